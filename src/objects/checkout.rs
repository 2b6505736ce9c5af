//! Checkout request assembly.
//!
//! A [`CheckoutRequest`] is the caller-facing input: the two required
//! parameters plus every optional parameter the gateway accepts, each an
//! explicit `Option`.  [`CheckoutRequest::normalize`] applies defaults and
//! wire coercions and produces an [`OrderRequest`], the validated form that
//! [`OrderRequest::to_params`] flattens into the signed key/value payload.
//!
//! Presence is tracked by `Option`, never by value truthiness: a supplied
//! `order_id` of `"0"` is sent verbatim, and only an absent one triggers
//! generation.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::recurring::RecurringSchedule;
use super::{Currency, ValidationError, VerificationType, yn};
use crate::config::MerchantConfig;

/// Caller input for one checkout operation.
///
/// Construct with [`CheckoutRequest::new`] and fill in optional parameters
/// directly or through the chained setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Order amount in major units (`10.5` = 10 dollars 50 cents).
    pub amount: Decimal,
    /// Order currency.
    pub currency: Currency,
    /// Merchant order identifier; generated when absent.
    pub order_id: Option<String>,
    /// Order description; defaulted from the order id when absent.
    pub order_desc: Option<String>,
    /// URL the customer's browser is redirected to after payment.
    pub response_url: Option<String>,
    /// URL the gateway calls server-to-server with the final order state.
    pub server_callback_url: Option<String>,
    /// Payment systems offered on the hosted page; comma-joined on the wire.
    pub payment_systems: Option<Vec<String>>,
    /// Payment system preselected on the hosted page.
    pub default_payment_system: Option<String>,
    /// Order lifetime in seconds.
    pub lifetime: Option<u32>,
    /// Opaque merchant data echoed back in callbacks.
    pub merchant_data: Option<String>,
    /// Hold the amount instead of charging immediately.
    pub preauth: Option<bool>,
    /// Customer e-mail address.
    pub sender_email: Option<String>,
    /// Allow delayed (offline) payment methods.
    pub delayed: Option<bool>,
    /// Hosted page language code.
    pub lang: Option<String>,
    /// Merchant product identifier.
    pub product_id: Option<String>,
    /// Require the gateway to return a card token.
    pub required_rectoken: Option<bool>,
    /// Mark the order as a verification (no charge) request.
    pub verification: Option<bool>,
    /// Verification mode; only meaningful with `verification`.
    pub verification_type: Option<VerificationType>,
    /// Pay with a previously issued card token.
    pub rectoken: Option<String>,
    /// Card token of the receiving side for p2p transfers.
    pub receiver_rectoken: Option<String>,
    /// Hosted page design identifier.
    pub design_id: Option<u32>,
    /// Mark the order as a subscription request.
    pub subscription: Option<bool>,
    /// Callback URL for subscription state changes.
    pub subscription_callback_url: Option<String>,
}

impl CheckoutRequest {
    /// Create a request with the two required parameters and every optional
    /// parameter absent.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount,
            currency,
            order_id: None,
            order_desc: None,
            response_url: None,
            server_callback_url: None,
            payment_systems: None,
            default_payment_system: None,
            lifetime: None,
            merchant_data: None,
            preauth: None,
            sender_email: None,
            delayed: None,
            lang: None,
            product_id: None,
            required_rectoken: None,
            verification: None,
            verification_type: None,
            rectoken: None,
            receiver_rectoken: None,
            design_id: None,
            subscription: None,
            subscription_callback_url: None,
        }
    }

    /// Set the merchant order identifier.
    ///
    /// Accepts anything with a string form, so integer ids (including `0`)
    /// are honored verbatim.
    pub fn with_order_id(mut self, order_id: impl ToString) -> Self {
        self.order_id = Some(order_id.to_string());
        self
    }

    /// Set the order description.
    pub fn with_order_desc(mut self, order_desc: impl Into<String>) -> Self {
        self.order_desc = Some(order_desc.into());
        self
    }

    /// Apply defaults and wire coercions, producing the validated
    /// [`OrderRequest`].
    ///
    /// Fails on a negative amount or one that does not fit the wire's
    /// integer minor-unit range.
    pub fn normalize(self) -> Result<OrderRequest, ValidationError> {
        let amount = normalize_amount(self.amount)?;
        let order_id = self.order_id.unwrap_or_else(generate_order_id);
        let order_desc = self
            .order_desc
            .unwrap_or_else(|| format!("Order No {order_id}"));

        // Static coercion table for the optional parameters: each entry is
        // (wire name, coerced value).  Absent parameters never produce an
        // entry, so no key is ever present-but-null.
        let mut optional: Vec<(&'static str, String)> = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                optional.push((key, value));
            }
        };
        push("response_url", self.response_url);
        push("server_callback_url", self.server_callback_url);
        push(
            "payment_systems",
            self.payment_systems
                .filter(|systems| !systems.is_empty())
                .map(|systems| systems.join(",")),
        );
        push("default_payment_system", self.default_payment_system);
        push("lifetime", self.lifetime.map(|v| v.to_string()));
        push("merchant_data", self.merchant_data);
        push("preauth", self.preauth.map(|v| yn(v).to_owned()));
        push("sender_email", self.sender_email);
        push("delayed", self.delayed.map(|v| yn(v).to_owned()));
        push("lang", self.lang);
        push("product_id", self.product_id);
        push(
            "required_rectoken",
            self.required_rectoken.map(|v| yn(v).to_owned()),
        );
        push("verification", self.verification.map(|v| yn(v).to_owned()));
        push(
            "verification_type",
            self.verification_type.map(|v| v.code().to_owned()),
        );
        push("rectoken", self.rectoken);
        push("receiver_rectoken", self.receiver_rectoken);
        push("design_id", self.design_id.map(|v| v.to_string()));
        push("subscription", self.subscription.map(|v| yn(v).to_owned()));
        push("subscription_callback_url", self.subscription_callback_url);

        Ok(OrderRequest {
            order_id,
            order_desc,
            amount,
            currency: self.currency,
            optional,
            recurring: None,
        })
    }
}

/// Normalized, validated form of one checkout operation.
///
/// All four required parameters are populated; every optional parameter is
/// already coerced to its wire string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Merchant order identifier, stable string form.
    pub order_id: String,
    /// Order description.
    pub order_desc: String,
    /// Amount in the currency's minor units (cents).
    pub amount: i64,
    /// Order currency.
    pub currency: Currency,
    /// Coerced optional parameters, in table order.
    pub optional: Vec<(&'static str, String)>,
    /// Recurring schedule, set by the subscription operation only.
    pub recurring: Option<RecurringSchedule>,
}

impl OrderRequest {
    /// Flatten into the wire key/value set, injecting the merchant identity
    /// and protocol version from `config`.
    ///
    /// The result is everything the gateway expects except the `signature`
    /// parameter, which is computed over this map.
    pub fn to_params(
        &self,
        config: &MerchantConfig,
    ) -> Result<BTreeMap<&'static str, String>, ValidationError> {
        if config.merchant_id.is_empty() {
            return Err(ValidationError::MissingField("merchant_id"));
        }
        if self.order_id.is_empty() {
            return Err(ValidationError::MissingField("order_id"));
        }
        if self.order_desc.is_empty() {
            return Err(ValidationError::MissingField("order_desc"));
        }

        let mut params = BTreeMap::new();
        params.insert("merchant_id", config.merchant_id.clone());
        params.insert("version", config.version.to_string());
        params.insert("order_id", self.order_id.clone());
        params.insert("order_desc", self.order_desc.clone());
        params.insert("amount", self.amount.to_string());
        params.insert("currency", self.currency.code().to_owned());
        for (key, value) in &self.optional {
            params.insert(key, value.clone());
        }
        if let Some(recurring) = &self.recurring {
            params.insert("recurring_data", recurring.wire_value());
        }
        Ok(params)
    }
}

/// Convert a major-unit amount to integer minor units.
///
/// `round(amount * 100)` with midpoints away from zero, so `0.005` becomes
/// `1` minor unit.
fn normalize_amount(amount: Decimal) -> Result<i64, ValidationError> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(amount));
    }
    (amount * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(ValidationError::AmountOutOfRange(amount))
}

/// Generate a fresh merchant order id: UUIDv7, time-ordered and unique
/// within (and across) process runs.
fn generate_order_id() -> String {
    uuid::Uuid::now_v7().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProtocolVersion;
    use std::collections::HashSet;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn config() -> MerchantConfig {
        MerchantConfig::new("1396424", b"test".to_vec())
    }

    #[test]
    fn test_amount_minor_units() {
        let cases = [("10", 1000), ("10.5", 1050), ("0.005", 1), ("0", 0)];
        for (major, minor) in cases {
            let order = CheckoutRequest::new(dec(major), Currency::Usd)
                .normalize()
                .unwrap();
            assert_eq!(order.amount, minor, "major amount {major}");
        }
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = CheckoutRequest::new(dec("-0.01"), Currency::Usd)
            .normalize()
            .unwrap_err();
        assert!(matches!(err, ValidationError::NegativeAmount(_)));
    }

    #[test]
    fn test_explicit_order_id_honored_including_zero() {
        let order = CheckoutRequest::new(dec("10"), Currency::Usd)
            .with_order_id(0)
            .normalize()
            .unwrap();
        assert_eq!(order.order_id, "0");
        assert_eq!(order.order_desc, "Order No 0");
    }

    #[test]
    fn test_generated_order_ids_unique() {
        let mut seen = HashSet::new();
        for _ in 0..64 {
            let order = CheckoutRequest::new(dec("10"), Currency::Usd)
                .normalize()
                .unwrap();
            assert!(!order.order_id.is_empty());
            assert!(seen.insert(order.order_id));
        }
    }

    #[test]
    fn test_order_desc_defaulted_from_order_id() {
        let order = CheckoutRequest::new(dec("10"), Currency::Usd)
            .with_order_id(42)
            .normalize()
            .unwrap();
        assert_eq!(order.order_desc, "Order No 42");

        let order = CheckoutRequest::new(dec("10"), Currency::Usd)
            .with_order_id(42)
            .with_order_desc("Coffee beans")
            .normalize()
            .unwrap();
        assert_eq!(order.order_desc, "Coffee beans");
    }

    #[test]
    fn test_bool_coercion_and_absence() {
        let mut request = CheckoutRequest::new(dec("10"), Currency::Usd);
        request.preauth = Some(true);
        request.delayed = Some(false);
        let order = request.normalize().unwrap();
        let params = order.to_params(&config()).unwrap();
        assert_eq!(params.get("preauth").map(String::as_str), Some("Y"));
        assert_eq!(params.get("delayed").map(String::as_str), Some("N"));
        assert!(!params.contains_key("required_rectoken"));
    }

    #[test]
    fn test_payment_systems_comma_joined_and_empty_absent() {
        let mut request = CheckoutRequest::new(dec("10"), Currency::Usd);
        request.payment_systems = Some(vec!["card".to_owned(), "banklinks_eu".to_owned()]);
        let params = request.normalize().unwrap().to_params(&config()).unwrap();
        assert_eq!(
            params.get("payment_systems").map(String::as_str),
            Some("card,banklinks_eu")
        );

        let mut request = CheckoutRequest::new(dec("10"), Currency::Usd);
        request.payment_systems = Some(vec![]);
        let params = request.normalize().unwrap().to_params(&config()).unwrap();
        assert!(!params.contains_key("payment_systems"));
    }

    #[test]
    fn test_params_carry_merchant_identity_and_version() {
        let config = config().with_version(ProtocolVersion::V2);
        let order = CheckoutRequest::new(dec("10"), Currency::Eur)
            .with_order_id(7)
            .normalize()
            .unwrap();
        let params = order.to_params(&config).unwrap();
        assert_eq!(params.get("merchant_id").map(String::as_str), Some("1396424"));
        assert_eq!(params.get("version").map(String::as_str), Some("2.0"));
        assert_eq!(params.get("currency").map(String::as_str), Some("EUR"));
        assert_eq!(params.get("amount").map(String::as_str), Some("1000"));
    }

    #[test]
    fn test_pipeline_deterministic() {
        let request = CheckoutRequest::new(dec("10.5"), Currency::Usd)
            .with_order_id(42)
            .with_order_desc("Coffee beans");
        let a = request.clone().normalize().unwrap();
        let b = request.normalize().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_params(&config()).unwrap(), b.to_params(&config()).unwrap());
    }

    #[test]
    fn test_empty_order_id_is_an_error_not_regenerated() {
        let order = CheckoutRequest::new(dec("10"), Currency::Usd)
            .with_order_id("")
            .normalize()
            .unwrap();
        assert_eq!(order.order_id, "");
        let err = order.to_params(&config()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("order_id"));
    }
}
