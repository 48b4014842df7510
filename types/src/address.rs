//! Member address type with `weft_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An address identifying a participant, organization, or token ledger,
/// always prefixed with `weft_`.
///
/// Derived from an Ed25519 public key via Blake2b hashing + hex encoding
/// (see `weft_crypto::derive_address`). The empty address is the null
/// identity and is rejected wherever a real participant is required.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberAddress(String);

impl MemberAddress {
    /// The standard prefix for all WEFT addresses.
    pub const PREFIX: &'static str = "weft_";

    /// The null identity.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Create an address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is non-empty and does not start with `weft_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(
            s.is_empty() || s.starts_with(Self::PREFIX),
            "address must start with weft_"
        );
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the null identity.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for MemberAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MemberAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for MemberAddress {
    fn from(s: &str) -> Self {
        Self::new(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_address() {
        let addr = MemberAddress::new("weft_abc123");
        assert!(addr.is_valid());
        assert!(!addr.is_empty());
    }

    #[test]
    fn empty_address_is_null_identity() {
        let addr = MemberAddress::empty();
        assert!(addr.is_empty());
        assert!(!addr.is_valid());
    }

    #[test]
    #[should_panic(expected = "must start with weft_")]
    fn wrong_prefix_panics() {
        MemberAddress::new("brst_abc");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = MemberAddress::new("weft_aa");
        let b = MemberAddress::new("weft_ab");
        assert!(a < b);
    }
}
