//! Trust-anchor provisioning: traverse every configured list family and map
//! verification purposes to the anchor sets their service types declare.

use std::sync::Arc;

use async_trait::async_trait;
use smol_str::SmolStr;
use typed_builder::TypedBuilder;

use crate::dispatch::{ChainTrustDispatcher, DirectTrustValidator, ValidateCertificateChain};
use crate::jwt::VerifyJwtSignature;
use crate::loader::LoadLote;
use crate::model::{LotePointer, PkiObject, ServiceDigitalIdentity, Uri};
use crate::profile::{etsi19602, LoteProfile, ProfileRegistry};
use crate::traversal::{Constraints, ContinueOnProblem, LoteTraversal, TraversalProblem};

/// Verification purpose a certificate chain can be presented under.
///
/// EAA purposes are parameterized by a caller-chosen use case; equality is by
/// variant and payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Purpose {
    Pid,
    PidStatus,
    WalletInstanceAttestation,
    WalletUnitAttestation,
    WalletUnitAttestationStatus,
    WalletRelyingPartyAccessCertificate,
    WalletRelyingPartyAccessCertificateStatus,
    WalletRelyingPartyRegistrationCertificate,
    WalletRelyingPartyRegistrationCertificateStatus,
    PubEaa,
    PubEaaStatus,
    Eaa { use_case: SmolStr },
    EaaStatus { use_case: SmolStr },
}

impl Purpose {
    pub fn eaa(use_case: impl AsRef<str>) -> Self {
        Self::Eaa {
            use_case: SmolStr::new(use_case),
        }
    }

    pub fn eaa_status(use_case: impl AsRef<str>) -> Self {
        Self::EaaStatus {
            use_case: SmolStr::new(use_case),
        }
    }
}

impl core::fmt::Display for Purpose {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Purpose::Pid => write!(f, "PID"),
            Purpose::PidStatus => write!(f, "PID status"),
            Purpose::WalletInstanceAttestation => write!(f, "wallet instance attestation"),
            Purpose::WalletUnitAttestation => write!(f, "wallet unit attestation"),
            Purpose::WalletUnitAttestationStatus => write!(f, "wallet unit attestation status"),
            Purpose::WalletRelyingPartyAccessCertificate => write!(f, "wallet relying party access certificate"),
            Purpose::WalletRelyingPartyAccessCertificateStatus => {
                write!(f, "wallet relying party access certificate status")
            }
            Purpose::WalletRelyingPartyRegistrationCertificate => {
                write!(f, "wallet relying party registration certificate")
            }
            Purpose::WalletRelyingPartyRegistrationCertificateStatus => {
                write!(f, "wallet relying party registration certificate status")
            }
            Purpose::PubEaa => write!(f, "public EAA"),
            Purpose::PubEaaStatus => write!(f, "public EAA status"),
            Purpose::Eaa { use_case } => write!(f, "EAA ({use_case})"),
            Purpose::EaaStatus { use_case } => write!(f, "EAA status ({use_case})"),
        }
    }
}

/// Per-family configuration: which list type the family's root must declare,
/// which service type backs each purpose, and whether chains may be accepted
/// by direct trust instead of PKIX path building.
#[derive(Debug, Clone)]
pub struct LoteMeta {
    pub lote_type: Uri,
    /// Ordered: the position of a purpose here is its position in
    /// `supported_contexts`.
    pub svc_type_per_purpose: Vec<(Purpose, Uri)>,
    pub direct_trust: bool,
}

impl LoteMeta {
    pub fn eu_pid() -> Self {
        Self {
            lote_type: Uri::new(etsi19602::LOTE_TYPE_EU_PID_PROVIDERS),
            svc_type_per_purpose: vec![
                (Purpose::Pid, Uri::new(etsi19602::SVC_TYPE_PID_ISSUANCE)),
                (Purpose::PidStatus, Uri::new(etsi19602::SVC_TYPE_PID_REVOCATION)),
            ],
            direct_trust: false,
        }
    }

    pub fn eu_wallet() -> Self {
        Self {
            lote_type: Uri::new(etsi19602::LOTE_TYPE_EU_WALLET_PROVIDERS),
            svc_type_per_purpose: vec![
                (
                    Purpose::WalletInstanceAttestation,
                    Uri::new(etsi19602::SVC_TYPE_WALLET_ISSUANCE),
                ),
                (
                    Purpose::WalletUnitAttestation,
                    Uri::new(etsi19602::SVC_TYPE_WALLET_ISSUANCE),
                ),
                (
                    Purpose::WalletUnitAttestationStatus,
                    Uri::new(etsi19602::SVC_TYPE_WALLET_REVOCATION),
                ),
            ],
            direct_trust: false,
        }
    }

    pub fn eu_wrpac() -> Self {
        Self {
            lote_type: Uri::new(etsi19602::LOTE_TYPE_EU_WRPAC_PROVIDERS),
            svc_type_per_purpose: vec![(
                Purpose::WalletRelyingPartyAccessCertificate,
                Uri::new(etsi19602::SVC_TYPE_WRPAC_ISSUANCE),
            )],
            direct_trust: false,
        }
    }

    pub fn eu_wrprc() -> Self {
        Self {
            lote_type: Uri::new(etsi19602::LOTE_TYPE_EU_WRPRC_PROVIDERS),
            svc_type_per_purpose: vec![
                (
                    Purpose::WalletRelyingPartyRegistrationCertificate,
                    Uri::new(etsi19602::SVC_TYPE_WRPRC_ISSUANCE),
                ),
                (
                    Purpose::WalletRelyingPartyRegistrationCertificateStatus,
                    Uri::new(etsi19602::SVC_TYPE_WRPRC_REVOCATION),
                ),
            ],
            direct_trust: false,
        }
    }

    pub fn eu_pub_eaa() -> Self {
        Self {
            lote_type: Uri::new(etsi19602::LOTE_TYPE_EU_PUB_EAA_PROVIDERS),
            svc_type_per_purpose: vec![
                (Purpose::PubEaa, Uri::new(etsi19602::SVC_TYPE_PUB_EAA_ISSUANCE)),
                (Purpose::PubEaaStatus, Uri::new(etsi19602::SVC_TYPE_PUB_EAA_REVOCATION)),
            ],
            direct_trust: false,
        }
    }

    /// The mobile driving licence ecosystem anchors its IACA certificates by
    /// direct trust.
    pub fn mdl() -> Self {
        Self {
            lote_type: Uri::new(etsi19602::LOTE_TYPE_EU_MDL_PROVIDERS),
            svc_type_per_purpose: vec![
                (Purpose::eaa("mdl"), Uri::new(etsi19602::SVC_TYPE_MDL_ISSUANCE)),
                (Purpose::eaa_status("mdl"), Uri::new(etsi19602::SVC_TYPE_MDL_REVOCATION)),
            ],
            direct_trust: true,
        }
    }

    /// Framework for user-defined EAA use cases.
    pub fn eaa_use_case(use_case: &str) -> Self {
        Self {
            lote_type: etsi19602::eaa_lote_type(use_case),
            svc_type_per_purpose: vec![
                (Purpose::eaa(use_case), etsi19602::eaa_svc_type_issuance(use_case)),
                (Purpose::eaa_status(use_case), etsi19602::eaa_svc_type_revocation(use_case)),
            ],
            direct_trust: false,
        }
    }
}

/// Fixed-key record naming one value per supported list family, plus an
/// ordered map of EAA use cases.
///
/// Used twice: with `T = Uri` to locate root lists, and with `T = LoteMeta`
/// to describe expectations.
#[derive(Debug, Clone)]
pub struct SupportedLists<T> {
    pub pid_providers: Option<T>,
    pub wallet_providers: Option<T>,
    pub wrpac_providers: Option<T>,
    pub wrprc_providers: Option<T>,
    pub pub_eaa_providers: Option<T>,
    /// Keyed by use case; iteration follows insertion order.
    pub eaa_providers: Vec<(SmolStr, T)>,
}

impl<T> Default for SupportedLists<T> {
    fn default() -> Self {
        Self {
            pid_providers: None,
            wallet_providers: None,
            wrpac_providers: None,
            wrprc_providers: None,
            pub_eaa_providers: None,
            eaa_providers: Vec::new(),
        }
    }
}

impl<T> SupportedLists<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pid(mut self, value: T) -> Self {
        self.pid_providers = Some(value);
        self
    }

    #[must_use]
    pub fn with_wallet(mut self, value: T) -> Self {
        self.wallet_providers = Some(value);
        self
    }

    #[must_use]
    pub fn with_wrpac(mut self, value: T) -> Self {
        self.wrpac_providers = Some(value);
        self
    }

    #[must_use]
    pub fn with_wrprc(mut self, value: T) -> Self {
        self.wrprc_providers = Some(value);
        self
    }

    #[must_use]
    pub fn with_pub_eaa(mut self, value: T) -> Self {
        self.pub_eaa_providers = Some(value);
        self
    }

    #[must_use]
    pub fn with_eaa(mut self, use_case: impl AsRef<str>, value: T) -> Self {
        self.eaa_providers.push((SmolStr::new(use_case), value));
        self
    }

    fn eaa(&self, use_case: &str) -> Option<&T> {
        self.eaa_providers
            .iter()
            .find_map(|(key, value)| (key == use_case).then_some(value))
    }
}

impl SupportedLists<LoteMeta> {
    /// The EU default expectations for the five fixed families.
    ///
    /// EAA use cases are added by the caller, e.g.
    /// `SupportedLists::eu_default_meta().with_eaa("mdl", LoteMeta::mdl())`.
    pub fn eu_default_meta() -> Self {
        Self::new()
            .with_pid(LoteMeta::eu_pid())
            .with_wallet(LoteMeta::eu_wallet())
            .with_wrpac(LoteMeta::eu_wrpac())
            .with_wrprc(LoteMeta::eu_wrprc())
            .with_pub_eaa(LoteMeta::eu_pub_eaa())
    }
}

/// An X.509 certificate trusted as a root for some purpose, optionally
/// paired with DER-encoded name constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustAnchor {
    pub certificate: PkiObject,
    pub name_constraints: Option<Vec<u8>>,
}

impl TrustAnchor {
    pub fn new(certificate: PkiObject) -> Self {
        Self {
            certificate,
            name_constraints: None,
        }
    }

    #[must_use]
    pub fn with_name_constraints(mut self, constraints: Vec<u8>) -> Self {
        self.name_constraints = Some(constraints);
        self
    }
}

/// Capability turning a service digital identity into trust anchors.
pub trait CreateTrustAnchors: Send + Sync {
    fn create(&self, identity: &ServiceDigitalIdentity) -> Vec<TrustAnchor>;
}

impl<F> CreateTrustAnchors for F
where
    F: Fn(&ServiceDigitalIdentity) -> Vec<TrustAnchor> + Send + Sync,
{
    fn create(&self, identity: &ServiceDigitalIdentity) -> Vec<TrustAnchor> {
        self(identity)
    }
}

/// Default conversion: one anchor per listed certificate, no name
/// constraints.
pub fn anchors_from_certificates(identity: &ServiceDigitalIdentity) -> Vec<TrustAnchor> {
    identity
        .x509_certificates
        .as_ref()
        .map(|certs| certs.iter().cloned().map(TrustAnchor::new).collect())
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub enum AnchorsOutcome {
    Found(Vec<TrustAnchor>),
    /// The purpose is registered but provisioning produced no anchor for it.
    NotFound,
    /// The purpose was never registered.
    QueryNotSupported,
}

/// Capability answering "which anchors back this purpose?".
#[async_trait]
pub trait GetTrustAnchors: Send + Sync {
    async fn get_trust_anchors(&self, purpose: &Purpose) -> AnchorsOutcome;
}

/// Immutable `{purpose -> anchors}` map in stable registration order.
#[derive(Debug, Clone, Default)]
pub struct TrustAnchorMap {
    entries: Vec<(Purpose, Vec<TrustAnchor>)>,
}

impl TrustAnchorMap {
    /// Register `purpose`, extending its anchors with `anchors` deduplicated
    /// by certificate byte equality. A purpose registered with zero anchors
    /// answers `NotFound` rather than `QueryNotSupported`.
    fn register(&mut self, purpose: Purpose, anchors: Vec<TrustAnchor>) {
        let index = match self.entries.iter().position(|(known, _)| *known == purpose) {
            Some(index) => index,
            None => {
                self.entries.push((purpose, Vec::new()));
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[index].1;

        for anchor in anchors {
            if !entry.iter().any(|known| known.certificate == anchor.certificate) {
                entry.push(anchor);
            }
        }
    }

    pub fn supported_contexts(&self) -> Vec<Purpose> {
        self.entries.iter().map(|(purpose, _)| purpose.clone()).collect()
    }

    pub fn anchors(&self, purpose: &Purpose) -> Option<&[TrustAnchor]> {
        self.entries
            .iter()
            .find_map(|(known, anchors)| (known == purpose).then_some(anchors.as_slice()))
    }
}

#[async_trait]
impl GetTrustAnchors for TrustAnchorMap {
    async fn get_trust_anchors(&self, purpose: &Purpose) -> AnchorsOutcome {
        match self.anchors(purpose) {
            Some([]) => AnchorsOutcome::NotFound,
            Some(anchors) => AnchorsOutcome::Found(anchors.to_vec()),
            None => AnchorsOutcome::QueryNotSupported,
        }
    }
}

/// Everything `provision` needs, bundled because most call sites share the
/// same capabilities across invocations.
#[derive(TypedBuilder)]
pub struct ProvisioningParams<'a> {
    pub root_locations: &'a SupportedLists<Uri>,
    pub meta: &'a SupportedLists<LoteMeta>,
    #[builder(default)]
    pub constraints: Constraints,
    #[builder(default)]
    pub continue_on_problem: ContinueOnProblem,
    pub loader: &'a dyn LoadLote,
    pub verifier: &'a dyn VerifyJwtSignature,
    pub create_trust_anchors: &'a dyn CreateTrustAnchors,
    pub pkix_validator: Arc<dyn ValidateCertificateChain>,
    #[builder(default = Arc::new(DirectTrustValidator))]
    pub direct_trust_validator: Arc<dyn ValidateCertificateChain>,
}

/// A fully provisioned trust view: the dispatcher plus every non-fatal
/// problem met along the way.
pub struct ProvisionedTrust {
    pub dispatcher: ChainTrustDispatcher,
    pub anchors: TrustAnchorMap,
    pub problems: Vec<TraversalProblem>,
}

impl core::fmt::Debug for ProvisionedTrust {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProvisionedTrust")
            .field("anchors", &self.anchors)
            .field("problems", &self.problems)
            .finish_non_exhaustive()
    }
}

/// Traverse every configured family and build the purpose-to-anchors map.
pub async fn provision_trust_anchors_from_lotes(
    params: &ProvisioningParams<'_>,
) -> Result<(TrustAnchorMap, Vec<TraversalProblem>), TraversalProblem> {
    let registry = build_registry(params.meta);

    let mut map = TrustAnchorMap::default();
    let mut problems = Vec::new();

    let families = family_roots(params.root_locations, params.meta);

    for (root, meta) in families {
        let engine = LoteTraversal {
            loader: params.loader,
            verifier: params.verifier,
            registry: &registry,
            constraints: params.constraints,
            continue_on_problem: params.continue_on_problem,
        };

        let pointer = LotePointer::new(root.clone(), meta.lote_type.clone());

        debug!(root = %root, list_type = %meta.lote_type, "provisioning family");

        match engine.load_lote_and_pointers(pointer).await {
            Ok(outcome) => {
                collect_family_anchors(&mut map, &registry, meta, &outcome, params.create_trust_anchors);
                problems.extend(outcome.problems);
            }
            Err(fatal) => {
                let tolerated = match params.continue_on_problem {
                    ContinueOnProblem::Never => false,
                    ContinueOnProblem::Always => true,
                    ContinueOnProblem::AlwaysIfDownloaded => !fatal.problem.is_download_failure(),
                };

                if !tolerated {
                    return Err(fatal);
                }

                warn!(root = %fatal.pointer.location, error = %fatal.problem, "family root rejected");
                problems.push(fatal);
                register_family_purposes(&mut map, meta);
            }
        }
    }

    Ok((map, problems))
}

/// The full public entry point: provision anchors, then wire the dispatcher.
pub async fn provision(params: ProvisioningParams<'_>) -> Result<ProvisionedTrust, TraversalProblem> {
    let (map, problems) = provision_trust_anchors_from_lotes(&params).await?;

    let mut dispatcher = ChainTrustDispatcher::new();

    for (_, meta) in family_roots(params.root_locations, params.meta) {
        let validator = if meta.direct_trust {
            Arc::clone(&params.direct_trust_validator)
        } else {
            Arc::clone(&params.pkix_validator)
        };

        for (purpose, _) in &meta.svc_type_per_purpose {
            let anchors = map.anchors(purpose).unwrap_or_default().to_vec();
            dispatcher.register(purpose.clone(), anchors, Arc::clone(&validator));
        }
    }

    Ok(ProvisionedTrust {
        dispatcher,
        anchors: map,
        problems,
    })
}

/// Pairs each configured root with its family meta, in the stable family
/// order: PID, Wallet, WRPAC, WRPRC, PubEAA, then EAA use cases in insertion
/// order. A root without a matching meta (or vice versa) is skipped.
fn family_roots<'a>(
    roots: &'a SupportedLists<Uri>,
    meta: &'a SupportedLists<LoteMeta>,
) -> Vec<(&'a Uri, &'a LoteMeta)> {
    let mut families = Vec::new();

    let fixed = [
        (roots.pid_providers.as_ref(), meta.pid_providers.as_ref()),
        (roots.wallet_providers.as_ref(), meta.wallet_providers.as_ref()),
        (roots.wrpac_providers.as_ref(), meta.wrpac_providers.as_ref()),
        (roots.wrprc_providers.as_ref(), meta.wrprc_providers.as_ref()),
        (roots.pub_eaa_providers.as_ref(), meta.pub_eaa_providers.as_ref()),
    ];

    for entry in fixed {
        if let (Some(root), Some(meta)) = entry {
            families.push((root, meta));
        }
    }

    for (use_case, root) in &roots.eaa_providers {
        match meta.eaa(use_case) {
            Some(meta) => families.push((root, meta)),
            None => warn!(%use_case, "EAA root configured without a matching meta entry"),
        }
    }

    families
}

fn build_registry(meta: &SupportedLists<LoteMeta>) -> ProfileRegistry {
    let mut registry = ProfileRegistry::eu_defaults();

    for (use_case, meta) in &meta.eaa_providers {
        if registry.find(&meta.lote_type).is_none() {
            registry.register(LoteProfile::eaa_use_case(use_case));
        }
    }

    registry
}

fn register_family_purposes(map: &mut TrustAnchorMap, meta: &LoteMeta) {
    for (purpose, _) in &meta.svc_type_per_purpose {
        map.register(purpose.clone(), Vec::new());
    }
}

fn collect_family_anchors(
    map: &mut TrustAnchorMap,
    registry: &ProfileRegistry,
    meta: &LoteMeta,
    outcome: &crate::traversal::TraversalOutcome,
    create: &dyn CreateTrustAnchors,
) {
    for (purpose, svc_type) in &meta.svc_type_per_purpose {
        let mut anchors = Vec::new();

        for (pointer, lote) in outcome.lists() {
            let profile = registry.find(&pointer.expected_type);

            for entity in lote.entities() {
                for service in entity.services.iter() {
                    let info = &service.information;

                    let usable = profile
                        .map(|profile| profile.service_is_usable(info.status.as_ref()))
                        .unwrap_or(false);

                    if info.type_identifier.as_ref() == Some(svc_type) && usable {
                        anchors.extend(create.create(&info.digital_identity));
                    }
                }
            }
        }

        map.register(purpose.clone(), anchors);
    }
}
