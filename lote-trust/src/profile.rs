//! Declarative list profiles and the compliance checker.
//!
//! A profile pins down the expected shape of one list family: its type URI,
//! scheme metadata, freshness window and the exhaustive set of service types
//! it may carry. A decoded list is either fully compliant or rejected with
//! every entity-level deviation reported at once.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::{
    CountryCode, ListOfTrustedEntities, LoteDateTime, MultiLanguageUri, ServiceDigitalIdentity, Uri,
};

/// URI constants of the ETSI 19602 namespace used by the EU list families.
pub mod etsi19602 {
    use crate::model::Uri;

    pub const LOTE_TYPE_EU_PID_PROVIDERS: &str = "https://uri.etsi.org/19602/v1.1.1/LoTEType/EU/PID-Providers";
    pub const LOTE_TYPE_EU_WALLET_PROVIDERS: &str = "https://uri.etsi.org/19602/v1.1.1/LoTEType/EU/Wallet-Providers";
    pub const LOTE_TYPE_EU_WRPAC_PROVIDERS: &str = "https://uri.etsi.org/19602/v1.1.1/LoTEType/EU/WRPAC-Providers";
    pub const LOTE_TYPE_EU_WRPRC_PROVIDERS: &str = "https://uri.etsi.org/19602/v1.1.1/LoTEType/EU/WRPRC-Providers";
    pub const LOTE_TYPE_EU_PUB_EAA_PROVIDERS: &str = "https://uri.etsi.org/19602/v1.1.1/LoTEType/EU/PubEAA-Providers";
    pub const LOTE_TYPE_EU_MDL_PROVIDERS: &str = "https://uri.etsi.org/19602/v1.1.1/LoTEType/EU/MDL-Providers";

    pub const SVC_TYPE_PID_ISSUANCE: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/PID/Issuance";
    pub const SVC_TYPE_PID_REVOCATION: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/PID/Revocation";
    pub const SVC_TYPE_WALLET_ISSUANCE: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/Wallet/Issuance";
    pub const SVC_TYPE_WALLET_REVOCATION: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/Wallet/Revocation";
    pub const SVC_TYPE_WRPAC_ISSUANCE: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/WRPAC/Issuance";
    pub const SVC_TYPE_WRPAC_REVOCATION: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/WRPAC/Revocation";
    pub const SVC_TYPE_WRPRC_ISSUANCE: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/WRPRC/Issuance";
    pub const SVC_TYPE_WRPRC_REVOCATION: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/WRPRC/Revocation";
    pub const SVC_TYPE_PUB_EAA_ISSUANCE: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/PubEAA/Issuance";
    pub const SVC_TYPE_PUB_EAA_REVOCATION: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/PubEAA/Revocation";
    pub const SVC_TYPE_MDL_ISSUANCE: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/MDL/Issuance";
    pub const SVC_TYPE_MDL_REVOCATION: &str = "https://uri.etsi.org/19602/v1.1.1/SvcType/MDL/Revocation";

    pub const STATUS_DETERMINATION_EU: &str = "https://uri.etsi.org/TrstSvc/TrustedList/StatusDetn/EUappropriate";
    pub const SCHEME_COMMUNITY_RULES_EU: &str = "https://uri.etsi.org/19602/v1.1.1/SchemeRules/EUcommon";
    pub const SERVICE_STATUS_GRANTED: &str = "https://uri.etsi.org/TrstSvc/TrustedList/Svcstatus/granted";

    pub fn eaa_lote_type(use_case: &str) -> Uri {
        Uri::new(format!("https://uri.etsi.org/19602/v1.1.1/LoTEType/EU/EAA-{use_case}-Providers"))
    }

    pub fn eaa_svc_type_issuance(use_case: &str) -> Uri {
        Uri::new(format!("https://uri.etsi.org/19602/v1.1.1/SvcType/EAA/{use_case}/Issuance"))
    }

    pub fn eaa_svc_type_revocation(use_case: &str) -> Uri {
        Uri::new(format!("https://uri.etsi.org/19602/v1.1.1/SvcType/EAA/{use_case}/Revocation"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoricalPeriodRule {
    Required(u32),
    Absent,
}

/// Declarative expectations for one list family.
#[derive(Debug, Clone)]
pub struct LoteProfile {
    pub lote_type: Uri,
    pub status_determination_approach: String,
    pub scheme_community_rules: Vec<MultiLanguageUri>,
    pub scheme_territory: CountryCode,
    pub max_months_until_next_update: i64,
    pub historical_information_period: HistoricalPeriodRule,
    /// Exhaustive: a service declaring any other type is a violation.
    pub service_type_identifiers: BTreeSet<Uri>,
    pub must_contain_x509_certificates: bool,
    /// Empty means the status fields must be absent altogether.
    pub service_statuses: BTreeSet<Uri>,
}

impl LoteProfile {
    /// Common shape shared by every EU list family.
    fn eu_family(lote_type: &str, issuance: impl Into<Uri>, revocation: impl Into<Uri>) -> Self {
        Self {
            lote_type: Uri::new(lote_type),
            status_determination_approach: etsi19602::STATUS_DETERMINATION_EU.to_owned(),
            scheme_community_rules: vec![MultiLanguageUri::new("en", etsi19602::SCHEME_COMMUNITY_RULES_EU)],
            scheme_territory: CountryCode::eu(),
            max_months_until_next_update: 6,
            historical_information_period: HistoricalPeriodRule::Absent,
            service_type_identifiers: BTreeSet::from([issuance.into(), revocation.into()]),
            must_contain_x509_certificates: true,
            service_statuses: BTreeSet::new(),
        }
    }

    pub fn eu_pid_providers() -> Self {
        Self::eu_family(
            etsi19602::LOTE_TYPE_EU_PID_PROVIDERS,
            etsi19602::SVC_TYPE_PID_ISSUANCE,
            etsi19602::SVC_TYPE_PID_REVOCATION,
        )
    }

    pub fn eu_wallet_providers() -> Self {
        Self::eu_family(
            etsi19602::LOTE_TYPE_EU_WALLET_PROVIDERS,
            etsi19602::SVC_TYPE_WALLET_ISSUANCE,
            etsi19602::SVC_TYPE_WALLET_REVOCATION,
        )
    }

    pub fn eu_wrpac_providers() -> Self {
        Self::eu_family(
            etsi19602::LOTE_TYPE_EU_WRPAC_PROVIDERS,
            etsi19602::SVC_TYPE_WRPAC_ISSUANCE,
            etsi19602::SVC_TYPE_WRPAC_REVOCATION,
        )
    }

    pub fn eu_wrprc_providers() -> Self {
        Self::eu_family(
            etsi19602::LOTE_TYPE_EU_WRPRC_PROVIDERS,
            etsi19602::SVC_TYPE_WRPRC_ISSUANCE,
            etsi19602::SVC_TYPE_WRPRC_REVOCATION,
        )
    }

    pub fn eu_pub_eaa_providers() -> Self {
        Self::eu_family(
            etsi19602::LOTE_TYPE_EU_PUB_EAA_PROVIDERS,
            etsi19602::SVC_TYPE_PUB_EAA_ISSUANCE,
            etsi19602::SVC_TYPE_PUB_EAA_REVOCATION,
        )
    }

    pub fn eu_mdl_providers() -> Self {
        Self::eu_family(
            etsi19602::LOTE_TYPE_EU_MDL_PROVIDERS,
            etsi19602::SVC_TYPE_MDL_ISSUANCE,
            etsi19602::SVC_TYPE_MDL_REVOCATION,
        )
    }

    /// Framework for user-defined EAA use cases.
    pub fn eaa_use_case(use_case: &str) -> Self {
        let lote_type = etsi19602::eaa_lote_type(use_case);
        Self::eu_family(
            lote_type.as_str(),
            etsi19602::eaa_svc_type_issuance(use_case),
            etsi19602::eaa_svc_type_revocation(use_case),
        )
    }

    /// Whether a service carrying `status` counts as currently usable.
    ///
    /// Profiles forbidding status fields treat the absence of a status as
    /// usable; profiles with declared statuses require `granted`.
    pub fn service_is_usable(&self, status: Option<&Uri>) -> bool {
        if self.service_statuses.is_empty() {
            status.is_none()
        } else {
            status.is_some_and(|s| s.as_str() == etsi19602::SERVICE_STATUS_GRANTED)
        }
    }
}

/// Profiles known to a provisioning run, selected by list type URI.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<LoteProfile>,
}

impl ProfileRegistry {
    /// The six fixed EU profiles.
    pub fn eu_defaults() -> Self {
        Self {
            profiles: vec![
                LoteProfile::eu_pid_providers(),
                LoteProfile::eu_wallet_providers(),
                LoteProfile::eu_wrpac_providers(),
                LoteProfile::eu_wrprc_providers(),
                LoteProfile::eu_pub_eaa_providers(),
                LoteProfile::eu_mdl_providers(),
            ],
        }
    }

    pub fn register(&mut self, profile: LoteProfile) {
        if self.find(&profile.lote_type).is_none() {
            self.profiles.push(profile);
        }
    }

    pub fn find(&self, lote_type: &Uri) -> Option<&LoteProfile> {
        self.profiles.iter().find(|profile| profile.lote_type == *lote_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationDetail {
    Scheme { field: &'static str, message: String },
    Entity { entity: usize, message: String },
}

impl core::fmt::Display for ViolationDetail {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ViolationDetail::Scheme { field, message } => write!(f, "{field}: {message}"),
            ViolationDetail::Entity { entity, message } => write!(f, "entity {entity}: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("list of type `{list_type}` does not comply with its profile: {}", .details.first().map(ToString::to_string).unwrap_or_default())]
pub struct ProfileViolation {
    pub list_type: Uri,
    pub details: Vec<ViolationDetail>,
}

impl ProfileViolation {
    fn scheme(profile: &LoteProfile, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            list_type: profile.lote_type.clone(),
            details: vec![ViolationDetail::Scheme {
                field,
                message: message.into(),
            }],
        }
    }
}

/// Verify a decoded list against its profile.
///
/// Scheme-level checks run in order and stop at the first violation; the
/// per-entity checks run over every entity, service and history instance and
/// are reported together.
pub fn check_profile_compliance(lote: &ListOfTrustedEntities, profile: &LoteProfile) -> Result<(), ProfileViolation> {
    let scheme = &lote.scheme_information;

    // 1. The scheme must be explicit about who operates it and under which rules.
    let presence: [(&'static str, bool); 7] = [
        ("schemeOperatorAddress", scheme.scheme_operator_address.is_some()),
        ("schemeName", scheme.scheme_name.is_some()),
        ("schemeInformationURI", scheme.scheme_information_uri.is_some()),
        ("statusDeterminationApproach", scheme.status_determination_approach.is_some()),
        ("schemeTypeCommunityRules", scheme.scheme_type_community_rules.is_some()),
        ("policyOrLegalNotice", scheme.policy_or_legal_notice.is_some()),
        ("type", scheme.lote_type.is_some()),
    ];

    for (field, present) in presence {
        if !present {
            return Err(ProfileViolation::scheme(profile, field, "required field is missing"));
        }
    }

    // 2. Declared type matches the profile (and thereby the pointer expectation).
    let declared_type = scheme.lote_type.as_ref().expect("checked above");
    if *declared_type != profile.lote_type {
        return Err(ProfileViolation::scheme(
            profile,
            "type",
            format!("expected `{}`, found `{declared_type}`", profile.lote_type),
        ));
    }

    // 3.
    let approach = scheme.status_determination_approach.as_ref().expect("checked above");
    if *approach != profile.status_determination_approach {
        return Err(ProfileViolation::scheme(
            profile,
            "statusDeterminationApproach",
            format!(
                "expected `{}`, found `{approach}`",
                profile.status_determination_approach
            ),
        ));
    }

    // 4. Community rules compare as a multiset of (language, value) pairs.
    let rules = scheme.scheme_type_community_rules.as_ref().expect("checked above");
    if !same_multiset(rules, &profile.scheme_community_rules) {
        return Err(ProfileViolation::scheme(
            profile,
            "schemeTypeCommunityRules",
            "community rules differ from the profile's",
        ));
    }

    // 5.
    if scheme.scheme_territory != profile.scheme_territory {
        return Err(ProfileViolation::scheme(
            profile,
            "schemeTerritory",
            format!(
                "expected `{}`, found `{}`",
                profile.scheme_territory, scheme.scheme_territory
            ),
        ));
    }

    // 6.
    match (profile.historical_information_period, scheme.historical_information_period) {
        (HistoricalPeriodRule::Absent, None) => {}
        (HistoricalPeriodRule::Absent, Some(_)) => {
            return Err(ProfileViolation::scheme(
                profile,
                "historicalInformationPeriod",
                "must be absent",
            ));
        }
        (HistoricalPeriodRule::Required(expected), Some(found)) if expected == found => {}
        (HistoricalPeriodRule::Required(expected), found) => {
            return Err(ProfileViolation::scheme(
                profile,
                "historicalInformationPeriod",
                format!("expected `{expected}`, found `{found:?}`"),
            ));
        }
    }

    // 7. Freshness, counted in completed calendar months.
    let months = scheme
        .list_issue_date_time
        .whole_months_until(&scheme.next_update);
    if months > profile.max_months_until_next_update {
        return Err(ProfileViolation::scheme(
            profile,
            "nextUpdate",
            format!(
                "{months} months after issuance exceeds the allowed {}",
                profile.max_months_until_next_update
            ),
        ));
    }

    // 8. Entity checks; all deviations are collected and reported together.
    let mut entity_errors = Vec::new();

    for (entity_index, entity) in lote.entities().iter().enumerate() {
        for (service_index, service) in entity.services.iter().enumerate() {
            let info = &service.information;
            for message in service_field_errors(
                profile,
                info.type_identifier.as_ref(),
                info.status.as_ref(),
                info.status_starting_time.as_ref(),
                &info.digital_identity,
            ) {
                entity_errors.push(ViolationDetail::Entity {
                    entity: entity_index,
                    message: format!("service {service_index}: {message}"),
                });
            }

            for (history_index, instance) in service.history.as_deref().unwrap_or_default().iter().enumerate() {
                for message in service_field_errors(
                    profile,
                    instance.type_identifier.as_ref(),
                    instance.status.as_ref(),
                    instance.status_starting_time.as_ref(),
                    &instance.digital_identity,
                ) {
                    entity_errors.push(ViolationDetail::Entity {
                        entity: entity_index,
                        message: format!("service {service_index} (history {history_index}): {message}"),
                    });
                }
            }
        }
    }

    if entity_errors.is_empty() {
        Ok(())
    } else {
        Err(ProfileViolation {
            list_type: profile.lote_type.clone(),
            details: entity_errors,
        })
    }
}

fn service_field_errors(
    profile: &LoteProfile,
    type_identifier: Option<&Uri>,
    status: Option<&Uri>,
    status_starting_time: Option<&LoteDateTime>,
    digital_identity: &ServiceDigitalIdentity,
) -> Vec<String> {
    let mut errors = Vec::new();

    match type_identifier {
        None => errors.push("typeIdentifier is missing".to_owned()),
        Some(identifier) if !profile.service_type_identifiers.contains(identifier) => {
            errors.push(format!("typeIdentifier `{identifier}` is not allowed by the profile"));
        }
        Some(_) => {}
    }

    if profile.must_contain_x509_certificates && digital_identity.x509_certificates.is_none() {
        errors.push("digitalIdentity must carry x509Certificates".to_owned());
    }

    if profile.service_statuses.is_empty() {
        if status.is_some() || status_starting_time.is_some() {
            errors.push("status fields must be absent for this profile".to_owned());
        }
    } else {
        match (status, status_starting_time) {
            (Some(status), Some(_)) if !profile.service_statuses.contains(status) => {
                errors.push(format!("status `{status}` is not allowed by the profile"));
            }
            (Some(_), Some(_)) => {}
            _ => errors.push("status and statusStartingTime are required for this profile".to_owned()),
        }
    }

    errors
}

fn same_multiset(left: &[MultiLanguageUri], right: &[MultiLanguageUri]) -> bool {
    let mut left: Vec<&MultiLanguageUri> = left.iter().collect();
    let mut right: Vec<&MultiLanguageUri> = right.iter().collect();
    left.sort();
    right.sort();
    left == right
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code can panic on errors")]

    use nonempty::NonEmpty;
    use rstest::rstest;

    use super::*;
    use crate::model::{
        EntityInformation, ListAndSchemeInformation, Service, ServiceInformation, TrustedEntity,
    };

    fn compliant_lote(profile: &LoteProfile) -> ListOfTrustedEntities {
        let svc_type = profile
            .service_type_identifiers
            .first()
            .expect("profiles declare at least one service type")
            .clone();

        ListOfTrustedEntities {
            scheme_information: ListAndSchemeInformation {
                lote_type: Some(profile.lote_type.clone()),
                scheme_operator_address: Some(serde_json::json!({"postalAddress": "Rue de la Loi 1"})),
                scheme_name: Some(serde_json::json!([{"language": "en", "value": "Test scheme"}])),
                scheme_information_uri: Some(serde_json::json!([{"language": "en", "value": "https://example/info"}])),
                status_determination_approach: Some(profile.status_determination_approach.clone()),
                scheme_type_community_rules: Some(profile.scheme_community_rules.clone()),
                scheme_territory: profile.scheme_territory.clone(),
                policy_or_legal_notice: Some(serde_json::json!("https://example/policy")),
                list_issue_date_time: "2025-01-15T00:00:00Z".parse().unwrap(),
                next_update: "2025-07-15T00:00:00Z".parse().unwrap(),
                historical_information_period: None,
            },
            entities: Some(vec![TrustedEntity {
                information: EntityInformation::default(),
                services: NonEmpty::new(Service {
                    information: ServiceInformation {
                        type_identifier: Some(svc_type),
                        status: None,
                        status_starting_time: None,
                        digital_identity: ServiceDigitalIdentity {
                            x509_certificates: Some(NonEmpty::new(crate::model::PkiObject::from_der(vec![1, 2, 3]))),
                        },
                        name: Vec::new(),
                    },
                    history: None,
                }),
            }]),
            pointers_to_other_lotes: None,
        }
    }

    #[test]
    fn compliant_list_passes() {
        let profile = LoteProfile::eu_pid_providers();
        check_profile_compliance(&compliant_lote(&profile), &profile).unwrap();
    }

    #[test]
    fn checking_is_deterministic() {
        let profile = LoteProfile::eu_mdl_providers();
        let mut lote = compliant_lote(&profile);
        lote.scheme_information.scheme_territory = "DE".parse().unwrap();

        let first = check_profile_compliance(&lote, &profile);
        let second = check_profile_compliance(&lote, &profile);
        assert_eq!(first, second);
    }

    #[test]
    fn wrong_territory_names_the_field() {
        let profile = LoteProfile::eu_mdl_providers();
        let mut lote = compliant_lote(&profile);
        lote.scheme_information.scheme_territory = "DE".parse().unwrap();

        let violation = check_profile_compliance(&lote, &profile).unwrap_err();
        assert_eq!(violation.details.len(), 1);
        assert!(matches!(
            &violation.details[0],
            ViolationDetail::Scheme { field: "schemeTerritory", .. }
        ));
    }

    #[rstest]
    #[case::operator_address("schemeOperatorAddress")]
    #[case::scheme_name("schemeName")]
    #[case::information_uri("schemeInformationURI")]
    #[case::determination("statusDeterminationApproach")]
    #[case::community_rules("schemeTypeCommunityRules")]
    #[case::policy("policyOrLegalNotice")]
    #[case::list_type("type")]
    fn missing_scheme_field_is_the_first_violation(#[case] field: &'static str) {
        let profile = LoteProfile::eu_pid_providers();
        let mut lote = compliant_lote(&profile);

        let scheme = &mut lote.scheme_information;
        match field {
            "schemeOperatorAddress" => scheme.scheme_operator_address = None,
            "schemeName" => scheme.scheme_name = None,
            "schemeInformationURI" => scheme.scheme_information_uri = None,
            "statusDeterminationApproach" => scheme.status_determination_approach = None,
            "schemeTypeCommunityRules" => scheme.scheme_type_community_rules = None,
            "policyOrLegalNotice" => scheme.policy_or_legal_notice = None,
            "type" => scheme.lote_type = None,
            _ => unreachable!(),
        }

        let violation = check_profile_compliance(&lote, &profile).unwrap_err();
        assert!(matches!(
            &violation.details[0],
            ViolationDetail::Scheme { field: found, .. } if *found == field
        ));
    }

    #[test]
    fn freshness_boundary_is_inclusive() {
        let profile = LoteProfile::eu_wallet_providers();
        let mut lote = compliant_lote(&profile);

        // Exactly six months: passes.
        lote.scheme_information.list_issue_date_time = "2025-01-15T00:00:00Z".parse().unwrap();
        lote.scheme_information.next_update = "2025-07-15T00:00:00Z".parse().unwrap();
        check_profile_compliance(&lote, &profile).unwrap();

        // Seven months: fails.
        lote.scheme_information.next_update = "2025-08-15T00:00:00Z".parse().unwrap();
        let violation = check_profile_compliance(&lote, &profile).unwrap_err();
        assert!(matches!(
            &violation.details[0],
            ViolationDetail::Scheme { field: "nextUpdate", .. }
        ));
    }

    #[test]
    fn non_positive_freshness_interval_is_valid() {
        let profile = LoteProfile::eu_wallet_providers();
        let mut lote = compliant_lote(&profile);

        lote.scheme_information.list_issue_date_time = "2025-07-15T00:00:00Z".parse().unwrap();
        lote.scheme_information.next_update = "2025-01-15T00:00:00Z".parse().unwrap();
        check_profile_compliance(&lote, &profile).unwrap();
    }

    #[test]
    fn entity_errors_are_collected_together() {
        let profile = LoteProfile::eu_pid_providers();
        let mut lote = compliant_lote(&profile);

        let entities = lote.entities.as_mut().unwrap();
        let mut second = entities[0].clone();
        second.services.head.information.type_identifier = Some(Uri::new("https://example/bogus"));
        second.services.head.information.digital_identity = ServiceDigitalIdentity {
            x509_certificates: None,
        };
        entities.push(second);

        let violation = check_profile_compliance(&lote, &profile).unwrap_err();
        assert_eq!(violation.details.len(), 2);
        assert!(violation
            .details
            .iter()
            .all(|detail| matches!(detail, ViolationDetail::Entity { entity: 1, .. })));
    }

    #[test]
    fn status_fields_must_be_absent_when_profile_forbids_them() {
        let profile = LoteProfile::eu_pid_providers();
        let mut lote = compliant_lote(&profile);

        let service = &mut lote.entities.as_mut().unwrap()[0].services.head;
        service.information.status = Some(Uri::new(etsi19602::SERVICE_STATUS_GRANTED));
        service.information.status_starting_time = Some("2025-01-01T00:00:00Z".parse().unwrap());

        let violation = check_profile_compliance(&lote, &profile).unwrap_err();
        assert!(matches!(&violation.details[0], ViolationDetail::Entity { .. }));
    }

    #[test]
    fn wrong_type_is_reported_against_the_expected_profile() {
        let profile = LoteProfile::eu_pid_providers();
        let mut lote = compliant_lote(&profile);
        lote.scheme_information.lote_type = Some(Uri::new(etsi19602::LOTE_TYPE_EU_MDL_PROVIDERS));

        let violation = check_profile_compliance(&lote, &profile).unwrap_err();
        assert!(matches!(
            &violation.details[0],
            ViolationDetail::Scheme { field: "type", .. }
        ));
    }

    #[test]
    fn registry_knows_the_eu_families_and_accepts_use_cases() {
        let mut registry = ProfileRegistry::eu_defaults();
        assert!(registry.find(&Uri::new(etsi19602::LOTE_TYPE_EU_PID_PROVIDERS)).is_some());
        assert!(registry.find(&Uri::new(etsi19602::LOTE_TYPE_EU_MDL_PROVIDERS)).is_some());
        assert!(registry.find(&Uri::new("https://example/unknown")).is_none());

        registry.register(LoteProfile::eaa_use_case("diploma"));
        assert!(registry.find(&etsi19602::eaa_lote_type("diploma")).is_some());
    }
}
