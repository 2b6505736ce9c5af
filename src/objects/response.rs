//! Gateway response envelope and typed results.
//!
//! Every checkout endpoint answers with `{"response": {...}}`.  The inner
//! object carries `response_status`; anything other than `"success"` is a
//! gateway-side rejection with `error_code`/`error_message`.

use serde::Deserialize;
use url::Url;

use crate::client::ClientError;

/// Successful answer of the `checkout/url` endpoint (also used by
/// verification and subscription orders).
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutUrl {
    /// Hosted payment page for the customer.
    pub checkout_url: Url,
    /// Gateway-side payment identifier, when the gateway reports one.
    #[serde(default)]
    pub payment_id: Option<serde_json::Value>,
}

/// Successful answer of the `checkout/token` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutToken {
    /// Short-lived token for rendering a checkout UI.
    pub token: String,
}

/// Unwrap the `{"response": {...}}` envelope and deserialize the typed
/// result.
///
/// A missing envelope, a non-`success` status, or a body that does not fit
/// `T` each map to their own [`ClientError`] kind.
pub(crate) fn unwrap_response<T: serde::de::DeserializeOwned>(
    body: serde_json::Value,
) -> Result<T, ClientError> {
    let Some(response) = body.get("response") else {
        return Err(ClientError::MalformedResponse(body.to_string()));
    };
    let status = response.get("response_status").and_then(|v| v.as_str());
    if status != Some("success") {
        let code = response.get("error_code").and_then(|v| v.as_i64());
        let message = response
            .get("error_message")
            .and_then(|v| v.as_str())
            .unwrap_or("gateway reported failure")
            .to_owned();
        tracing::warn!(?code, %message, "gateway rejected request");
        return Err(ClientError::Gateway { code, message });
    }
    serde_json::from_value(response.clone()).map_err(ClientError::Json)
}
