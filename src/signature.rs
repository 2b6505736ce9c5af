//! Request signature for the checkout API.
//!
//! Every request payload carries a `signature` parameter computed over the
//! flat key/value set:
//!
//! ```text
//! signature = hex(sha1("{secret}|{v1}|{v2}|…"))
//! ```
//!
//! where `v1..vn` are the values of all non-empty parameters (excluding
//! `signature` itself) ordered by parameter name ascending.  The scheme is
//! the gateway's published one; before going to production, verify the
//! produced signatures against the gateway's test merchant credentials.

use std::collections::BTreeMap;

/// Wire name of the signature parameter.  Never part of its own input.
pub const SIGNATURE_FIELD: &str = "signature";

/// Compute the request signature over a flat parameter set.
///
/// Empty values and the `signature` parameter are excluded from the
/// canonical string.  The map is keyed by parameter name, so iteration
/// order already matches the required ascending canonical order.
pub fn sign(secret: &[u8], params: &BTreeMap<&'static str, String>) -> String {
    let mut data = Vec::with_capacity(secret.len() + params.len() * 8);
    data.extend_from_slice(secret);
    for (key, value) in params {
        if *key == SIGNATURE_FIELD || value.is_empty() {
            continue;
        }
        data.push(b'|');
        data.extend_from_slice(value.as_bytes());
    }
    let digest = ring::digest::digest(&ring::digest::SHA1_FOR_LEGACY_USE_ONLY, &data);
    hex::encode(digest.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&'static str, &str)]) -> BTreeMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, (*v).to_owned())).collect()
    }

    #[test]
    fn test_deterministic() {
        let p = params(&[
            ("order_id", "42"),
            ("order_desc", "Order No 42"),
            ("amount", "1000"),
            ("currency", "USD"),
        ]);
        let a = sign(b"test", &p);
        let b = sign(b"test", &p);
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sensitive_to_values_and_secret() {
        let p = params(&[("amount", "1000"), ("currency", "USD")]);
        let mut q = p.clone();
        q.insert("amount", "1001".to_owned());
        assert_ne!(sign(b"test", &p), sign(b"test", &q));
        assert_ne!(sign(b"test", &p), sign(b"other", &p));
    }

    #[test]
    fn test_empty_values_excluded() {
        let with_empty = params(&[("amount", "1000"), ("currency", "USD"), ("lang", "")]);
        let without = params(&[("amount", "1000"), ("currency", "USD")]);
        assert_eq!(sign(b"test", &with_empty), sign(b"test", &without));
    }

    #[test]
    fn test_signature_field_excluded() {
        let plain = params(&[("amount", "1000"), ("currency", "USD")]);
        let mut signed = plain.clone();
        signed.insert(SIGNATURE_FIELD, sign(b"test", &plain));
        assert_eq!(sign(b"test", &signed), sign(b"test", &plain));
    }
}
