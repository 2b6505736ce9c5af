//! Checkout operations.
//!
//! Each public operation is one pass through the same pipeline:
//! normalize → validate → sign → a single `post` on the [`Transport`].
//! All failures are raised before the transport call except gateway and
//! delivery errors, so invalid input never reaches the network.

use tracing::{debug, info};

use super::transport::{HttpTransport, Transport};
use super::ClientError;
use crate::config::{MerchantConfig, ProtocolVersion};
use crate::objects::checkout::{CheckoutRequest, OrderRequest};
use crate::objects::recurring::RecurringSchedule;
use crate::objects::response::{unwrap_response, CheckoutToken, CheckoutUrl};
use crate::objects::VerificationType;
use crate::signature::{sign, SIGNATURE_FIELD};

const CHECKOUT_URL_PATH: &str = "/api/checkout/url/";
const CHECKOUT_TOKEN_PATH: &str = "/api/checkout/token/";

/// Typed client for the gateway's checkout API.
///
/// Holds the immutable [`MerchantConfig`] and a [`Transport`]; both are
/// read-only after construction, so one instance can serve concurrent
/// calls.
#[derive(Debug, Clone)]
pub struct CheckoutClient<T: Transport = HttpTransport> {
    config: MerchantConfig,
    transport: T,
}

impl CheckoutClient<HttpTransport> {
    /// Create a client against the production gateway.
    pub fn new(config: MerchantConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            config,
            transport: HttpTransport::production()?,
        })
    }
}

impl<T: Transport> CheckoutClient<T> {
    /// Create a client with a custom transport (sandbox, stub, proxy).
    pub fn with_transport(config: MerchantConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// The merchant configuration this client was built with.
    pub fn config(&self) -> &MerchantConfig {
        &self.config
    }

    /// The transport this client delivers requests through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create a hosted checkout page and return its URL.
    pub async fn url(&self, request: CheckoutRequest) -> Result<CheckoutUrl, ClientError> {
        info!(merchant_id = %self.config.merchant_id, "creating checkout url");
        let order = request.normalize()?;
        self.dispatch(CHECKOUT_URL_PATH, &order).await
    }

    /// Create a checkout token for rendering a payment UI without a full
    /// URL.
    pub async fn token(&self, request: CheckoutRequest) -> Result<CheckoutToken, ClientError> {
        info!(merchant_id = %self.config.merchant_id, "creating checkout token");
        let order = request.normalize()?;
        self.dispatch(CHECKOUT_TOKEN_PATH, &order).await
    }

    /// Create a verification order: validates payment-method ownership
    /// without charging.
    ///
    /// Forces `verification=Y` and defaults `verification_type` to `code`
    /// when the caller did not pick one.
    pub async fn verification(
        &self,
        mut request: CheckoutRequest,
    ) -> Result<CheckoutUrl, ClientError> {
        info!(merchant_id = %self.config.merchant_id, "creating verification order");
        request.verification = Some(true);
        request.verification_type.get_or_insert(VerificationType::Code);
        let order = request.normalize()?;
        self.dispatch(CHECKOUT_URL_PATH, &order).await
    }

    /// Create a subscription order with a recurring billing schedule.
    ///
    /// Requires protocol `2.0`; fails before touching the request when the
    /// client is configured for `1.0`.
    pub async fn subscription(
        &self,
        mut request: CheckoutRequest,
        schedule: RecurringSchedule,
    ) -> Result<CheckoutUrl, ClientError> {
        if self.config.version != ProtocolVersion::V2 {
            return Err(ClientError::UnsupportedProtocol {
                required: ProtocolVersion::V2,
                configured: self.config.version,
            });
        }
        info!(merchant_id = %self.config.merchant_id, "creating subscription order");
        schedule.validate()?;
        request.subscription = Some(true);
        let mut order = request.normalize()?;
        order.recurring = Some(schedule);
        self.dispatch(CHECKOUT_URL_PATH, &order).await
    }

    /// Sign the validated order and hand it to the transport, exactly once.
    async fn dispatch<R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        order: &OrderRequest,
    ) -> Result<R, ClientError> {
        let mut params = order.to_params(&self.config)?;
        let signature = sign(self.config.secret_bytes(), &params);
        params.insert(SIGNATURE_FIELD, signature);
        debug!(
            order_id = %order.order_id,
            fields = params.len(),
            %path,
            "dispatching signed checkout payload"
        );
        let body = self.transport.post(path, &params).await?;
        unwrap_response(body)
    }
}
