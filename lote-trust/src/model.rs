//! Data model for the ETSI TS 119 612 JSON binding as adapted by the EUDI
//! "ETSI 119 6x2" family of Lists of Trusted Entities.
//!
//! Values are produced by parsing and never mutated afterwards. Unknown JSON
//! fields are ignored everywhere.

use core::fmt;
use std::str::FromStr;

use base64::Engine as _;
use nonempty::NonEmpty;
use serde::de;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// Opaque URI; equality is byte-exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(SmolStr);

impl Uri {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(SmolStr::new(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Uri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Error)]
#[error("invalid country code: `{value}`")]
pub struct BadCountryCode {
    pub value: SmolStr,
}

/// Two uppercase ASCII letters (`EU` designates the union-wide scheme).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryCode(SmolStr);

impl CountryCode {
    pub const fn eu() -> Self {
        Self(SmolStr::new_static("EU"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for CountryCode {
    type Err = BadCountryCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let is_valid = s.len() == 2 && s.chars().all(|c| c.is_ascii_uppercase());

        if is_valid {
            Ok(Self(SmolStr::new(s)))
        } else {
            Err(BadCountryCode { value: SmolStr::new(s) })
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CountryCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Error)]
#[error("invalid RFC 3339 date-time")]
pub struct BadDateTime {
    #[source]
    source: time::error::Parse,
}

/// Absolute instant in UTC.
///
/// Instants are comparable and subtractable in whole completed calendar
/// months, which is the unit the freshness rule of a list profile is
/// expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoteDateTime(time::OffsetDateTime);

impl LoteDateTime {
    pub fn new(instant: time::OffsetDateTime) -> Self {
        Self(instant.to_offset(time::UtcOffset::UTC))
    }

    pub fn inner(&self) -> time::OffsetDateTime {
        self.0
    }

    /// Number of whole calendar months elapsed between `self` and `later`.
    ///
    /// A month only counts once it is completed: from January 31st to
    /// February 28th is zero months. Negative when `later` is before `self`.
    pub fn whole_months_until(&self, later: &LoteDateTime) -> i64 {
        let from = self.0;
        let to = later.0;

        let mut months = (i64::from(to.year()) - i64::from(from.year())) * 12
            + (i64::from(u8::from(to.month())) - i64::from(u8::from(from.month())));

        if (to.day(), to.time()) < (from.day(), from.time()) {
            months -= 1;
        }

        months
    }
}

impl FromStr for LoteDateTime {
    type Err = BadDateTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let instant = time::OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339)
            .map_err(|source| BadDateTime { source })?;
        Ok(Self::new(instant))
    }
}

impl fmt::Display for LoteDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .0
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl Serialize for LoteDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LoteDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// `(language, value)` pair; the language tag is a lowercase alpha-2 code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MultiLanguageUri {
    pub language: SmolStr,
    pub value: Uri,
}

impl MultiLanguageUri {
    pub fn new(language: impl AsRef<str>, value: impl Into<Uri>) -> Self {
        Self {
            language: SmolStr::new(language),
            value: value.into(),
        }
    }
}

impl<'de> Deserialize<'de> for MultiLanguageUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            language: SmolStr,
            value: Uri,
        }

        let helper = Helper::deserialize(deserializer)?;

        let language_is_valid =
            helper.language.len() == 2 && helper.language.chars().all(|c| c.is_ascii_lowercase());

        if !language_is_valid {
            return Err(de::Error::custom(format!(
                "invalid language tag: `{}`",
                helper.language
            )));
        }

        Ok(Self {
            language: helper.language,
            value: helper.value,
        })
    }
}

const BASE64_DER: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

#[derive(Debug, Error)]
#[error("failed to parse DER-encoded certificate")]
pub struct BadCertificate {
    #[source]
    source: picky::x509::certificate::CertError,
}

/// Opaque blob holding a DER-encoded X.509 certificate.
///
/// Converted to an X.509 object on demand; equality and hashing are over the
/// raw DER bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PkiObject(Vec<u8>);

impl PkiObject {
    pub fn from_der(der: impl Into<Vec<u8>>) -> Self {
        Self(der.into())
    }

    pub fn as_der(&self) -> &[u8] {
        &self.0
    }

    pub fn to_cert(&self) -> Result<picky::x509::Cert, BadCertificate> {
        picky::x509::Cert::from_der(&self.0).map_err(|source| BadCertificate { source })
    }
}

impl fmt::Debug for PkiObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PkiObject({} bytes)", self.0.len())
    }
}

impl Serialize for PkiObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        BASE64_DER.encode(&self.0).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PkiObject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let der = BASE64_DER.decode(encoded).map_err(de::Error::custom)?;
        Ok(Self(der))
    }
}

/// Set of identifiers for a trusted service.
///
/// Invariant: when present, `x509_certificates` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDigitalIdentity {
    pub x509_certificates: Option<NonEmpty<PkiObject>>,
}

impl Serialize for ServiceDigitalIdentity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Helper<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            x509_certificates: Option<Vec<&'a PkiObject>>,
        }

        Helper {
            x509_certificates: self
                .x509_certificates
                .as_ref()
                .map(|certs| certs.iter().collect()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ServiceDigitalIdentity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Helper {
            #[serde(default)]
            x509_certificates: Option<Vec<PkiObject>>,
        }

        let helper = Helper::deserialize(deserializer)?;

        let x509_certificates = match helper.x509_certificates {
            Some(certs) => Some(
                NonEmpty::from_vec(certs)
                    .ok_or_else(|| de::Error::custom("x509Certificates must not be empty when present"))?,
            ),
            None => None,
        };

        Ok(Self { x509_certificates })
    }
}

/// Live description of a trusted service.
///
/// Invariant: `status` and `status_starting_time` are jointly present or
/// jointly absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_identifier: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_starting_time: Option<LoteDateTime>,
    pub digital_identity: ServiceDigitalIdentity,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<MultiLanguageUri>,
}

impl<'de> Deserialize<'de> for ServiceInformation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = ServiceFieldsHelper::deserialize(deserializer)?;
        helper.check_status_pairing().map_err(de::Error::custom)?;

        Ok(Self {
            type_identifier: helper.type_identifier,
            status: helper.status,
            status_starting_time: helper.status_starting_time,
            digital_identity: helper.digital_identity,
            name: helper.name,
        })
    }
}

/// Same shape as [`ServiceInformation`], describing a past state of the
/// service rather than the live one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHistoryInstance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_identifier: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_starting_time: Option<LoteDateTime>,
    pub digital_identity: ServiceDigitalIdentity,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<MultiLanguageUri>,
}

impl<'de> Deserialize<'de> for ServiceHistoryInstance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = ServiceFieldsHelper::deserialize(deserializer)?;
        helper.check_status_pairing().map_err(de::Error::custom)?;

        Ok(Self {
            type_identifier: helper.type_identifier,
            status: helper.status,
            status_starting_time: helper.status_starting_time,
            digital_identity: helper.digital_identity,
            name: helper.name,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceFieldsHelper {
    #[serde(default)]
    type_identifier: Option<Uri>,
    #[serde(default)]
    status: Option<Uri>,
    #[serde(default)]
    status_starting_time: Option<LoteDateTime>,
    digital_identity: ServiceDigitalIdentity,
    #[serde(default)]
    name: Vec<MultiLanguageUri>,
}

impl ServiceFieldsHelper {
    fn check_status_pairing(&self) -> Result<(), &'static str> {
        match (&self.status, &self.status_starting_time) {
            (Some(_), Some(_)) | (None, None) => Ok(()),
            (Some(_), None) => Err("status is present but statusStartingTime is missing"),
            (None, Some(_)) => Err("statusStartingTime is present but status is missing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub information: ServiceInformation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<ServiceHistoryInstance>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityInformation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<MultiLanguageUri>,
}

/// A trusted entity and its services.
///
/// Invariant: `services` is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TrustedEntity {
    pub information: EntityInformation,
    pub services: NonEmpty<Service>,
}

impl Serialize for TrustedEntity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct Helper<'a> {
            information: &'a EntityInformation,
            services: Vec<&'a Service>,
        }

        Helper {
            information: &self.information,
            services: self.services.iter().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TrustedEntity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            information: EntityInformation,
            services: Vec<Service>,
        }

        let helper = Helper::deserialize(deserializer)?;

        let services = NonEmpty::from_vec(helper.services)
            .ok_or_else(|| de::Error::custom("a trusted entity must declare at least one service"))?;

        Ok(Self {
            information: helper.information,
            services,
        })
    }
}

/// Scheme header of a list.
///
/// Presence of the operator-facing fields is not enforced here; the profile
/// compliance checker reports missing ones as violations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAndSchemeInformation {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub lote_type: Option<Uri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_operator_address: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_name: Option<serde_json::Value>,
    #[serde(rename = "schemeInformationURI", default, skip_serializing_if = "Option::is_none")]
    pub scheme_information_uri: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_determination_approach: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_type_community_rules: Option<Vec<MultiLanguageUri>>,
    pub scheme_territory: CountryCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_or_legal_notice: Option<serde_json::Value>,
    pub list_issue_date_time: LoteDateTime,
    pub next_update: LoteDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_information_period: Option<u32>,
}

/// Pointer to another list.
///
/// Expresses "follow this URI; the fetched list must have `type` equal to
/// `expected_type`; optionally expect these signing anchors".
#[derive(Debug, Clone, PartialEq)]
pub struct LotePointer {
    pub location: Uri,
    pub expected_type: Uri,
    pub expected_anchors: Option<Vec<PkiObject>>,
}

impl LotePointer {
    pub fn new(location: impl Into<Uri>, expected_type: impl Into<Uri>) -> Self {
        Self {
            location: location.into(),
            expected_type: expected_type.into(),
            expected_anchors: None,
        }
    }

    #[must_use]
    pub fn with_expected_anchors(mut self, anchors: Vec<PkiObject>) -> Self {
        self.expected_anchors = Some(anchors);
        self
    }
}

impl Serialize for LotePointer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Helper<'a> {
            location: &'a Uri,
            #[serde(rename = "type")]
            expected_type: &'a Uri,
            #[serde(skip_serializing_if = "Option::is_none")]
            service_digital_identities: Option<Vec<ServiceDigitalIdentity>>,
        }

        let service_digital_identities = match &self.expected_anchors {
            Some(anchors) => Some(vec![ServiceDigitalIdentity {
                x509_certificates: NonEmpty::from_vec(anchors.clone()),
            }]),
            None => None,
        };

        Helper {
            location: &self.location,
            expected_type: &self.expected_type,
            service_digital_identities,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LotePointer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Helper {
            location: Uri,
            #[serde(rename = "type")]
            expected_type: Uri,
            #[serde(default)]
            service_digital_identities: Option<Vec<ServiceDigitalIdentity>>,
        }

        let helper = Helper::deserialize(deserializer)?;

        let anchors: Vec<PkiObject> = helper
            .service_digital_identities
            .into_iter()
            .flatten()
            .filter_map(|identity| identity.x509_certificates)
            .flat_map(|certs| certs.into_iter())
            .collect();

        Ok(Self {
            location: helper.location,
            expected_type: helper.expected_type,
            expected_anchors: if anchors.is_empty() { None } else { Some(anchors) },
        })
    }
}

/// A decoded List of Trusted Entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOfTrustedEntities {
    pub scheme_information: ListAndSchemeInformation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<TrustedEntity>>,
    #[serde(
        rename = "pointersToOtherLoTEs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pointers_to_other_lotes: Option<Vec<LotePointer>>,
}

impl ListOfTrustedEntities {
    pub fn declared_type(&self) -> Option<&Uri> {
        self.scheme_information.lote_type.as_ref()
    }

    pub fn pointers(&self) -> &[LotePointer] {
        self.pointers_to_other_lotes.as_deref().unwrap_or_default()
    }

    pub fn entities(&self) -> &[TrustedEntity] {
        self.entities.as_deref().unwrap_or_default()
    }
}

/// JWT claims object carrying a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotePayload {
    #[serde(rename = "listOfTrustedEntities")]
    pub list_of_trusted_entities: ListOfTrustedEntities,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code can panic on errors")]

    use super::*;

    fn datetime(s: &str) -> LoteDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn country_code_rejects_lowercase_and_length() {
        assert!("de".parse::<CountryCode>().is_err());
        assert!("DEU".parse::<CountryCode>().is_err());
        assert!("D1".parse::<CountryCode>().is_err());
        assert_eq!("DE".parse::<CountryCode>().unwrap().as_str(), "DE");
        assert_eq!("EU".parse::<CountryCode>().unwrap(), CountryCode::eu());
    }

    #[test]
    fn whole_months_only_count_completed_ones() {
        let issue = datetime("2025-01-31T12:00:00Z");

        assert_eq!(issue.whole_months_until(&datetime("2025-02-28T12:00:00Z")), 0);
        assert_eq!(issue.whole_months_until(&datetime("2025-03-31T12:00:00Z")), 2);
        assert_eq!(issue.whole_months_until(&datetime("2025-07-31T11:59:59Z")), 5);
        assert_eq!(issue.whole_months_until(&datetime("2025-07-31T12:00:00Z")), 6);
    }

    #[test]
    fn whole_months_is_non_positive_for_reversed_interval() {
        let issue = datetime("2025-06-15T00:00:00Z");

        assert_eq!(issue.whole_months_until(&issue), 0);
        assert_eq!(issue.whole_months_until(&datetime("2025-06-01T00:00:00Z")), -1);
        assert_eq!(issue.whole_months_until(&datetime("2025-03-15T00:00:00Z")), -3);
    }

    #[test]
    fn digital_identity_rejects_empty_certificate_list() {
        let err = serde_json::from_str::<ServiceDigitalIdentity>(r#"{"x509Certificates": []}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("must not be empty"));

        let absent: ServiceDigitalIdentity = serde_json::from_str("{}").unwrap();
        assert!(absent.x509_certificates.is_none());
    }

    #[test]
    fn service_information_requires_joint_status_fields() {
        let lone_status = r#"{
            "typeIdentifier": "https://example/svc",
            "status": "https://example/status/granted",
            "digitalIdentity": {}
        }"#;

        let err = serde_json::from_str::<ServiceInformation>(lone_status)
            .unwrap_err()
            .to_string();
        assert!(err.contains("statusStartingTime"));

        let both = r#"{
            "typeIdentifier": "https://example/svc",
            "status": "https://example/status/granted",
            "statusStartingTime": "2025-01-01T00:00:00Z",
            "digitalIdentity": {}
        }"#;
        serde_json::from_str::<ServiceInformation>(both).unwrap();
    }

    #[test]
    fn trusted_entity_requires_a_service() {
        let err = serde_json::from_str::<TrustedEntity>(r#"{"services": []}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("at least one service"));
    }

    #[test]
    fn pointer_anchors_are_flattened_from_digital_identities() {
        let json = r#"{
            "location": "https://example/child.jwt",
            "type": "https://example/type",
            "serviceDigitalIdentities": [
                {"x509Certificates": ["AQI="]},
                {},
                {"x509Certificates": ["Aw=="]}
            ]
        }"#;

        let pointer: LotePointer = serde_json::from_str(json).unwrap();
        let anchors = pointer.expected_anchors.unwrap();
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].as_der(), &[1, 2]);
        assert_eq!(anchors[1].as_der(), &[3]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{
            "schemeInformation": {
                "type": "https://example/type",
                "schemeTerritory": "EU",
                "listIssueDateTime": "2025-01-01T00:00:00Z",
                "nextUpdate": "2025-06-01T00:00:00Z",
                "futureExtension": {"nested": true}
            },
            "brandNewTopLevelField": 42
        }"#;

        let lote: ListOfTrustedEntities = serde_json::from_str(json).unwrap();
        assert_eq!(lote.declared_type().unwrap().as_str(), "https://example/type");
        assert!(lote.entities().is_empty());
        assert!(lote.pointers().is_empty());
    }

    #[test]
    fn multi_language_uri_validates_language_tag() {
        assert!(serde_json::from_str::<MultiLanguageUri>(r#"{"language": "EN", "value": "https://x"}"#).is_err());
        assert!(serde_json::from_str::<MultiLanguageUri>(r#"{"language": "eng", "value": "https://x"}"#).is_err());
        serde_json::from_str::<MultiLanguageUri>(r#"{"language": "en", "value": "https://x"}"#).unwrap();
    }
}
