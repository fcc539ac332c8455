#![allow(clippy::unwrap_used)]
#![allow(unused_crate_dependencies)]

use base64::Engine as _;
use lote_trust::jwt;
use lote_trust::profile::{check_profile_compliance, LoteProfile};
use lote_trust_generators::*;
use proptest::prelude::*;

fn encode(lote: &lote_trust::model::ListOfTrustedEntities) -> String {
    let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        b64.encode(serde_json::to_vec(&serde_json::json!({"alg": "RS256"})).unwrap()),
        b64.encode(serde_json::to_vec(&serde_json::json!({"listOfTrustedEntities": lote})).unwrap()),
        b64.encode(b"sig"),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Decoding the compact encoding of a list yields the same list.
    #[test]
    fn compact_encoding_roundtrips(lote in compliant_lote(&LoteProfile::eu_pid_providers())) {
        let decoded = jwt::decode_lote(&encode(&lote)).unwrap();
        prop_assert_eq!(decoded.payload.list_of_trusted_entities, lote);
    }

    /// Generated lists satisfy their profile, and checking twice gives the
    /// same verdict.
    #[test]
    fn generated_lists_are_compliant_and_checking_is_idempotent(
        lote in compliant_lote(&LoteProfile::eu_wallet_providers()),
    ) {
        let profile = LoteProfile::eu_wallet_providers();
        prop_assert!(check_profile_compliance(&lote, &profile).is_ok());
        prop_assert_eq!(
            check_profile_compliance(&lote, &profile),
            check_profile_compliance(&lote, &profile)
        );
    }

    /// A list generated for one family never satisfies another family's
    /// profile (the type check fires first).
    #[test]
    fn family_profiles_are_mutually_exclusive(lote in compliant_lote(&LoteProfile::eu_pid_providers())) {
        let other = LoteProfile::eu_mdl_providers();
        prop_assert!(check_profile_compliance(&lote, &other).is_err());
    }

    /// Corrupting any single payload byte either breaks decoding or changes
    /// the decoded list.
    #[test]
    fn payload_tampering_never_goes_unnoticed(
        lote in compliant_lote(&LoteProfile::eu_pid_providers()),
        tamper in any::<(usize, u8)>(),
    ) {
        let compact = encode(&lote);
        let parts: Vec<&str> = compact.split('.').collect();

        let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let mut payload = b64.decode(parts[1]).unwrap();

        let (index, xor) = tamper;
        let index = index % payload.len();
        let xor = if xor == 0 { 1 } else { xor };
        payload[index] ^= xor;

        let tampered = format!("{}.{}.{}", parts[0], b64.encode(&payload), parts[2]);

        match jwt::decode_lote(&tampered) {
            Ok(decoded) => prop_assert_ne!(decoded.payload.list_of_trusted_entities, lote),
            Err(jwt::MalformedJwt::InvalidJson { .. }) => {}
            Err(unexpected) => prop_assert!(false, "unexpected decode failure: {unexpected:?}"),
        }
    }
}
