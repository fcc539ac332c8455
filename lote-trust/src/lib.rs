//! Answers one question for a digital-identity wallet ecosystem: given an
//! X.509 certificate chain presented with some attestation, is the chain
//! trusted for the specific purpose the attestation is being used for?
//!
//! Trust anchors are not configured statically; they are provisioned by a
//! bounded, parallel, depth-limited traversal of a federation of signed
//! Lists of Trusted Entities (LoTEs), each list validated against a
//! declarative profile before its service certificates are admitted.

#[macro_use]
extern crate tracing;

pub mod cache;
pub mod dispatch;
pub mod error;
pub mod jwt;
pub mod loader;
pub mod model;
pub mod profile;
pub mod provision;
pub mod traversal;

pub use dispatch::{ChainTrust, ChainTrustDispatcher, DirectTrustValidator, ValidateCertificateChain};
pub use error::Problem;
pub use provision::{provision, ProvisionedTrust, ProvisioningParams, Purpose, SupportedLists, TrustAnchor};
pub use traversal::{Constraints, ContinueOnProblem};
