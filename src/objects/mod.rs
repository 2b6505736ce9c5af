//! Wire types shared by the checkout API.

pub mod checkout;
pub mod recurring;
pub mod response;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation failure raised before any request leaves the process.
///
/// Every variant names the offending field and the violated rule so callers
/// can branch on error kind without string matching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Currency is not one of the gateway's accepted codes.
    #[error("unsupported currency {0:?}: expected UAH, RUB, USD, EUR, GBR or CZK")]
    Currency(String),

    /// Order amount is negative.
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(rust_decimal::Decimal),

    /// Order amount does not fit the wire's integer minor-unit range.
    #[error("amount {0} is not representable in minor units")]
    AmountOutOfRange(rust_decimal::Decimal),

    /// A required parameter is missing from the payload.
    #[error("required parameter {0:?} is missing")]
    MissingField(&'static str),

    /// Verification type is not one of the gateway's accepted values.
    #[error("unsupported verification_type {0:?}: expected \"code\" or \"amount\"")]
    VerificationType(String),

    /// Recurring start date is not a strict `YYYY-MM-DD` string.
    #[error("incorrect recurring start_time {0:?}: YYYY-MM-DD is allowed")]
    RecurringStartTime(String),

    /// Recurring period is not one of the accepted tokens.
    #[error("incorrect recurring period {0:?}: \"day\", \"week\" or \"month\" is allowed")]
    RecurringPeriod(String),
}

/// All currencies accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Uah,
    Rub,
    Usd,
    Eur,
    Gbr,
    Czk,
}

impl Currency {
    /// Uppercase wire code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Uah => "UAH",
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbr => "GBR",
            Currency::Czk => "CZK",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    /// Case-insensitive parse; the wire form is always uppercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UAH" => Ok(Currency::Uah),
            "RUB" => Ok(Currency::Rub),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBR" => Ok(Currency::Gbr),
            "CZK" => Ok(Currency::Czk),
            _ => Err(ValidationError::Currency(s.to_owned())),
        }
    }
}

/// Verification modes accepted by the gateway for card-ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationType {
    /// Verify by a code shown in the cardholder's statement.
    Code,
    /// Verify by a small charged-and-refunded amount.
    Amount,
}

impl VerificationType {
    pub fn code(self) -> &'static str {
        match self {
            VerificationType::Code => "code",
            VerificationType::Amount => "amount",
        }
    }
}

impl FromStr for VerificationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(VerificationType::Code),
            "amount" => Ok(VerificationType::Amount),
            _ => Err(ValidationError::VerificationType(s.to_owned())),
        }
    }
}

/// Wire form of a boolean parameter.
pub(crate) fn yn(flag: bool) -> &'static str {
    if flag { "Y" } else { "N" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("Uah".parse::<Currency>().unwrap(), Currency::Uah);
        assert_eq!("CZK".parse::<Currency>().unwrap().code(), "CZK");
    }

    #[test]
    fn test_currency_rejects_unknown() {
        let err = "GBP".parse::<Currency>().unwrap_err();
        assert_eq!(err, ValidationError::Currency("GBP".to_owned()));
    }

    #[test]
    fn test_verification_type_parse() {
        assert_eq!("code".parse::<VerificationType>().unwrap(), VerificationType::Code);
        assert!("pin".parse::<VerificationType>().is_err());
    }
}
