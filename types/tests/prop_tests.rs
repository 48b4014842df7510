use proptest::prelude::*;

use weft_types::{Digest32, ParticipantKind, Timestamp};

fn any_kind() -> impl Strategy<Value = ParticipantKind> {
    prop_oneof![
        Just(ParticipantKind::Null),
        Just(ParticipantKind::Removed),
        Just(ParticipantKind::Genesis),
        Just(ParticipantKind::Verifier),
        Just(ParticipantKind::GovernorCandidate),
        Just(ParticipantKind::Individual),
        Just(ParticipantKind::Organization),
    ]
}

proptest! {
    /// Digest32::is_zero is true only for all-zero bytes.
    #[test]
    fn digest_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        prop_assert_eq!(Digest32::new(bytes).is_zero(), bytes == [0u8; 32]);
    }

    /// Digest hex encoding is lossless and always 64 characters.
    #[test]
    fn digest_hex_is_stable(bytes in prop::array::uniform32(0u8..)) {
        let d = Digest32::new(bytes);
        prop_assert_eq!(d.to_hex().len(), 64);
        prop_assert_eq!(hex::decode(d.to_hex()).unwrap(), bytes.to_vec());
    }

    /// Timestamp ordering mirrors the underlying seconds.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        prop_assert_eq!(Timestamp::new(a) <= Timestamp::new(b), a <= b);
    }

    /// A deadline has passed exactly when `now` reaches it.
    #[test]
    fn deadline_boundary(deadline in 0u64..u64::MAX, now in 0u64..u64::MAX) {
        prop_assert_eq!(
            Timestamp::new(deadline).has_passed(Timestamp::new(now)),
            now >= deadline
        );
    }

    /// Membership implies a non-placeholder category, never the reverse.
    #[test]
    fn members_are_never_placeholders(kind in any_kind()) {
        if kind.is_member() {
            prop_assert!(kind != ParticipantKind::Null);
            prop_assert!(kind != ParticipantKind::Removed);
        }
        if kind.is_single_identity() {
            prop_assert!(kind.is_member());
        }
    }
}
