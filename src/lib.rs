//! Rust SDK for the Fondy hosted checkout API.
//!
//! The crate builds signed checkout requests and parses the gateway's
//! responses into typed results.  Every public operation runs the same
//! pipeline:
//!
//! 1. **Normalize** — apply defaults (generated order id, templated
//!    description), convert the major-unit amount to minor units, coerce
//!    booleans to `"Y"`/`"N"` and lists to comma-joined strings, and drop
//!    absent optional parameters entirely.
//! 2. **Validate** — enforce the currency whitelist, the recurring-schedule
//!    format and the protocol-version requirement, failing with a
//!    field-specific error before any network call.
//! 3. **Sign & serialize** — flatten to the wire key/value set, compute the
//!    request signature over the canonical value order, and hand the result
//!    to the transport.
//!
//! ```no_run
//! use fondy_sdk::{CheckoutClient, CheckoutRequest, Currency, MerchantConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MerchantConfig::new("1396424", b"test".to_vec());
//! let client = CheckoutClient::new(config)?;
//!
//! let request = CheckoutRequest::new("10.50".parse()?, Currency::Usd)
//!     .with_order_id(42)
//!     .with_order_desc("Coffee beans");
//! let checkout = client.url(request).await?;
//! println!("pay at {}", checkout.checkout_url);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod objects;
pub mod signature;

pub use client::{CheckoutClient, ClientError, HttpTransport, Transport, TransportError};
pub use config::{MerchantConfig, ProtocolVersion};
pub use objects::checkout::{CheckoutRequest, OrderRequest};
pub use objects::recurring::{RecurringPeriod, RecurringSchedule};
pub use objects::response::{CheckoutToken, CheckoutUrl};
pub use objects::{Currency, ValidationError, VerificationType};
