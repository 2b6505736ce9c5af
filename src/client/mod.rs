//! Checkout API client.

mod checkout;
mod transport;

pub use checkout::CheckoutClient;
pub use transport::{HttpTransport, Transport, TransportError, DEFAULT_BASE_URL};

use crate::config::ProtocolVersion;
use crate::objects::ValidationError;

/// Errors produced by the checkout client.
///
/// Configuration and validation errors are raised before any network call;
/// transport and gateway errors are surfaced as-is, never retried here.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The operation requires a protocol version the client is not
    /// configured for.
    #[error("operation requires protocol {required}, client is configured for {configured}")]
    UnsupportedProtocol {
        required: ProtocolVersion,
        configured: ProtocolVersion,
    },

    /// The request failed domain validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The transport failed to deliver the request.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The gateway answered with a non-`success` response status.
    #[error("gateway error{}: {message}", .code.map(|c| format!(" {c}")).unwrap_or_default())]
    Gateway { code: Option<i64>, message: String },

    /// The gateway's answer did not carry the `response` envelope.
    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),

    /// The response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
