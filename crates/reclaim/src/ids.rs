//! Identifier bridge between the remote and local id spaces
//!
//! The remote store assigns numeric-string identifiers; the local store
//! addresses items by UUID. The bridge is deliberately stateless: a remote
//! id is embedded into the trailing hex digits of an otherwise all-zero
//! UUID, so the mapping can be re-derived at any time without a lookup
//! table. Identifiers minted for brand-new local items are random v4 UUIDs
//! and therefore never map back to a remote id - callers treat that as
//! "no remote counterpart yet".

use uuid::Uuid;

/// Bit width of the invertible remote-id range (12 hex digits).
const REMOTE_ID_BITS: u32 = 48;

/// Map a remote identifier onto a local universal identifier.
///
/// Total and deterministic:
/// - a string that already parses as a UUID passes through unchanged
///   (records that originated locally and were echoed back);
/// - anything else is parsed as an unsigned integer (0 when unparsable -
///   an accepted loss of fidelity, so every malformed id collapses onto
///   the encoding of 0) and embedded as the low bits of an otherwise
///   all-zero UUID.
pub fn to_local(remote_id: &str) -> Uuid {
    if let Ok(id) = Uuid::parse_str(remote_id) {
        return id;
    }
    let numeric = remote_id.parse::<u64>().unwrap_or(0);
    Uuid::from_u128(u128::from(numeric))
}

/// Recover the remote identifier a local identifier was derived from.
///
/// Returns `None` when the identifier does not follow the zero-padded
/// canonical form produced by [`to_local`] - in particular for the random
/// v4 identifiers minted by [`new_local_id`]. `None` means "no remote
/// counterpart yet", not an error; callers route those items to a remote
/// create instead of a replace/delete.
pub fn to_remote(local_id: &Uuid) -> Option<String> {
    let bits = local_id.as_u128();
    if bits >> REMOTE_ID_BITS != 0 {
        return None;
    }
    Some((bits as u64).to_string())
}

/// Mint a fresh identifier for a locally created item.
///
/// v4 identifiers always carry nonzero version bits, so they can never
/// collide with the canonical embedded form.
pub fn new_local_id() -> Uuid {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numeric_ids_embed_into_trailing_digits() {
        assert_eq!(
            to_local("7"),
            "00000000-0000-0000-0000-000000000007".parse::<Uuid>().unwrap()
        );
        assert_eq!(
            to_local("255"),
            "00000000-0000-0000-0000-0000000000ff".parse::<Uuid>().unwrap()
        );
    }

    #[test]
    fn canonical_uuids_pass_through() {
        let id = "8b4f9e2a-1c3d-4e5f-9a6b-7c8d9e0f1a2b";
        assert_eq!(to_local(id), id.parse::<Uuid>().unwrap());
    }

    #[test]
    fn zero_is_a_legitimate_remote_id() {
        assert_eq!(to_local("0"), Uuid::nil());
        assert_eq!(to_remote(&Uuid::nil()), Some("0".to_string()));
    }

    #[test]
    fn malformed_ids_collapse_to_zero_encoding() {
        assert_eq!(to_local("not-a-number"), Uuid::nil());
        assert_eq!(to_local(""), Uuid::nil());
        assert_eq!(to_local("-3"), Uuid::nil());
    }

    #[test]
    fn freshly_minted_ids_have_no_remote_mapping() {
        for _ in 0..64 {
            assert_eq!(to_remote(&new_local_id()), None);
        }
    }

    proptest! {
        #[test]
        fn round_trip_is_lossless_in_range(n in 0u64..(1 << REMOTE_ID_BITS)) {
            let remote = n.to_string();
            prop_assert_eq!(to_remote(&to_local(&remote)), Some(remote));
        }

        #[test]
        fn to_local_is_pure(s in ".{0,40}") {
            prop_assert_eq!(to_local(&s), to_local(&s));
        }

        #[test]
        fn out_of_range_values_are_not_invertible(n in (1u64 << REMOTE_ID_BITS)..u64::MAX) {
            prop_assert_eq!(to_remote(&to_local(&n.to_string())), None);
        }
    }
}
