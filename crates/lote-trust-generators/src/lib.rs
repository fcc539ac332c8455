//! Proptest strategies for the lote-trust model types.

use lote_trust::model::{
    CountryCode, EntityInformation, ListAndSchemeInformation, ListOfTrustedEntities, LoteDateTime,
    MultiLanguageUri, PkiObject, Service, ServiceDigitalIdentity, ServiceInformation, TrustedEntity, Uri,
};
use lote_trust::profile::LoteProfile;
use lote_trust::provision::Purpose;
use nonempty::NonEmpty;
use proptest::collection::vec;
use proptest::prelude::*;

pub fn uri() -> impl Strategy<Value = Uri> {
    "https://[a-z]{1,10}\\.example/[a-z0-9/-]{1,20}".prop_map(|s| Uri::new(&s)).no_shrink()
}

pub fn country_code() -> impl Strategy<Value = CountryCode> {
    "[A-Z]{2}".prop_map(|s| s.parse().expect("two uppercase letters")).no_shrink()
}

pub fn lote_datetime() -> impl Strategy<Value = LoteDateTime> {
    (2020i32..2035, 1u8..=12, 1u8..=28, 0u8..24, 0u8..60)
        .prop_map(|(year, month, day, hour, minute)| {
            format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:00Z")
                .parse()
                .expect("well-formed RFC 3339")
        })
        .no_shrink()
}

pub fn multi_language_uri() -> impl Strategy<Value = MultiLanguageUri> {
    ("[a-z]{2}", uri()).prop_map(|(language, value)| MultiLanguageUri::new(&language, value))
}

pub fn pki_object() -> impl Strategy<Value = PkiObject> {
    vec(any::<u8>(), 16..128).prop_map(PkiObject::from_der).no_shrink()
}

pub fn digital_identity_with_certificates() -> impl Strategy<Value = ServiceDigitalIdentity> {
    vec(pki_object(), 1..4).prop_map(|certs| ServiceDigitalIdentity {
        x509_certificates: NonEmpty::from_vec(certs),
    })
}

pub fn purpose() -> impl Strategy<Value = Purpose> {
    prop_oneof![
        Just(Purpose::Pid),
        Just(Purpose::PidStatus),
        Just(Purpose::WalletInstanceAttestation),
        Just(Purpose::WalletUnitAttestation),
        Just(Purpose::WalletUnitAttestationStatus),
        Just(Purpose::WalletRelyingPartyAccessCertificate),
        Just(Purpose::WalletRelyingPartyRegistrationCertificate),
        Just(Purpose::PubEaa),
        "[a-z]{2,8}".prop_map(Purpose::eaa),
        "[a-z]{2,8}".prop_map(Purpose::eaa_status),
    ]
    .no_shrink()
}

/// A service whose fields satisfy `profile`.
pub fn compliant_service(profile: &LoteProfile) -> impl Strategy<Value = Service> {
    let svc_types: Vec<Uri> = profile.service_type_identifiers.iter().cloned().collect();

    (proptest::sample::select(svc_types), digital_identity_with_certificates(), vec(multi_language_uri(), 0..3))
        .prop_map(|(type_identifier, digital_identity, name)| Service {
            information: ServiceInformation {
                type_identifier: Some(type_identifier),
                status: None,
                status_starting_time: None,
                digital_identity,
                name,
            },
            history: None,
        })
}

pub fn compliant_entity(profile: &LoteProfile) -> impl Strategy<Value = TrustedEntity> {
    vec(compliant_service(profile), 1..4).prop_map(|services| TrustedEntity {
        information: EntityInformation::default(),
        services: NonEmpty::from_vec(services).expect("generated at least one service"),
    })
}

/// A whole list satisfying `profile`, without pointers.
pub fn compliant_lote(profile: &LoteProfile) -> impl Strategy<Value = ListOfTrustedEntities> {
    let profile = profile.clone();

    (lote_datetime(), 0i64..=profile.max_months_until_next_update, vec(compliant_entity(&profile), 0..3)).prop_map(
        move |(issue, months_ahead, entities)| {
            let issue_instant = issue.inner();
            let next_update = LoteDateTime::new(
                issue_instant + time_months(months_ahead),
            );

            ListOfTrustedEntities {
                scheme_information: ListAndSchemeInformation {
                    lote_type: Some(profile.lote_type.clone()),
                    scheme_operator_address: Some("Rue de la Loi 1".into()),
                    scheme_name: Some("Generated scheme".into()),
                    scheme_information_uri: Some("https://example/info".into()),
                    status_determination_approach: Some(profile.status_determination_approach.clone()),
                    scheme_type_community_rules: Some(profile.scheme_community_rules.clone()),
                    scheme_territory: profile.scheme_territory.clone(),
                    policy_or_legal_notice: Some("https://example/policy".into()),
                    list_issue_date_time: issue,
                    next_update,
                    historical_information_period: None,
                },
                entities: if entities.is_empty() { None } else { Some(entities) },
                pointers_to_other_lotes: None,
            }
        },
    )
}

// 28-day months keep the generated interval within the allowed number of
// completed calendar months.
fn time_months(months: i64) -> time::Duration {
    time::Duration::days(months * 28)
}
