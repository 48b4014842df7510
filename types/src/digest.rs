//! Fixed-size digest type used for commitments, descriptors, and code ids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte Blake2b digest.
///
/// Used for onboarding set commitments, thread charter descriptors,
/// contract-kind identifiers, verification hashes, and code identifiers.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Digest32([u8; 32]);

impl Digest32 {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Digest32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest32({}…)", &self.to_hex()[..12.min(self.to_hex().len())])
    }
}

impl From<[u8; 32]> for Digest32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_digest() {
        assert!(Digest32::ZERO.is_zero());
        assert!(!Digest32::new([1u8; 32]).is_zero());
    }

    #[test]
    fn hex_round_trip() {
        let d = Digest32::new([0xAB; 32]);
        assert_eq!(d.to_hex().len(), 64);
        assert!(d.to_hex().starts_with("abab"));
    }

    #[test]
    fn ordering_is_bytewise() {
        let lo = Digest32::new([1u8; 32]);
        let hi = Digest32::new([2u8; 32]);
        assert!(lo < hi);
    }
}
