//! Routing of `(chain, purpose)` queries to the right anchor set and chain
//! validator.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Problem;
use crate::model::PkiObject;
use crate::provision::{Purpose, TrustAnchor};

/// Outcome of one chain validation against a given anchor set.
#[derive(Debug)]
pub enum ChainValidation {
    Trusted {
        /// The anchor the chain was accepted under.
        anchor: TrustAnchor,
    },
    NotTrusted {
        cause: anyhow::Error,
    },
}

/// Capability validating a certificate chain against a set of trust anchors.
///
/// Implementations must fail with [`Problem::InvalidInput`] when handed an
/// empty chain or an empty anchor set.
#[async_trait]
pub trait ValidateCertificateChain: Send + Sync {
    async fn validate(&self, chain: &[PkiObject], anchors: &[TrustAnchor]) -> Result<ChainValidation, Problem>;
}

/// Accepts a chain whose head certificate matches some anchor by subject DN
/// and serial number, without building a certification path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectTrustValidator;

#[async_trait]
impl ValidateCertificateChain for DirectTrustValidator {
    async fn validate(&self, chain: &[PkiObject], anchors: &[TrustAnchor]) -> Result<ChainValidation, Problem> {
        let Some(head) = chain.first() else {
            return Err(Problem::InvalidInput {
                reason: "empty certificate chain",
            });
        };

        if anchors.is_empty() {
            return Err(Problem::InvalidInput {
                reason: "empty trust anchor set",
            });
        }

        let head = match head.to_cert() {
            Ok(cert) => cert,
            Err(error) => {
                return Ok(ChainValidation::NotTrusted {
                    cause: anyhow::Error::from(error).context("head certificate does not parse"),
                });
            }
        };

        let head_subject = head.subject_name().to_string();
        let head_serial = head.serial_number().0.clone();

        for anchor in anchors {
            let candidate = match anchor.certificate.to_cert() {
                Ok(cert) => cert,
                Err(error) => {
                    warn!(error = format!("{error:#}"), "skipping unparsable trust anchor");
                    continue;
                }
            };

            if candidate.subject_name().to_string() == head_subject && candidate.serial_number().0 == head_serial {
                return Ok(ChainValidation::Trusted {
                    anchor: anchor.clone(),
                });
            }
        }

        Ok(ChainValidation::NotTrusted {
            cause: anyhow::anyhow!("head certificate does not match any trust anchor"),
        })
    }
}

/// Answer for one `(chain, purpose)` query.
#[derive(Debug)]
pub enum ChainTrust {
    Trusted,
    NotTrusted { cause: anyhow::Error },
    /// The purpose was never registered with the dispatcher.
    UnsupportedVerificationContext,
}

struct Route {
    anchors: Vec<TrustAnchor>,
    validator: Arc<dyn ValidateCertificateChain>,
}

/// Holds one `(anchors, validator)` route per registered purpose and answers
/// chain-trust queries. Immutable once provisioning has finished; queries
/// only read.
#[derive(Default)]
pub struct ChainTrustDispatcher {
    routes: Vec<(Purpose, Route)>,
}

impl ChainTrustDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// First registration of a purpose wins; provisioning registers purposes
    /// in the stable enumeration order.
    pub fn register(&mut self, purpose: Purpose, anchors: Vec<TrustAnchor>, validator: Arc<dyn ValidateCertificateChain>) {
        if self.route(&purpose).is_none() {
            self.routes.push((purpose, Route { anchors, validator }));
        }
    }

    pub fn supported_contexts(&self) -> Vec<Purpose> {
        self.routes.iter().map(|(purpose, _)| purpose.clone()).collect()
    }

    /// Route the chain to the validator configured for `purpose`.
    pub async fn is_trusted(&self, chain: &[PkiObject], purpose: &Purpose) -> Result<ChainTrust, Problem> {
        let Some(route) = self.route(purpose) else {
            debug!(%purpose, "verification context is not supported");
            return Ok(ChainTrust::UnsupportedVerificationContext);
        };

        if chain.is_empty() {
            return Err(Problem::InvalidInput {
                reason: "empty certificate chain",
            });
        }

        match route.validator.validate(chain, &route.anchors).await? {
            ChainValidation::Trusted { .. } => Ok(ChainTrust::Trusted),
            ChainValidation::NotTrusted { cause } => Ok(ChainTrust::NotTrusted { cause }),
        }
    }

    fn route(&self, purpose: &Purpose) -> Option<&Route> {
        self.routes
            .iter()
            .find_map(|(known, route)| (known == purpose).then_some(route))
    }
}
