//! Compact-JWS envelope handling for lists.
//!
//! Each list travels as `header.payload.signature`, base64url without
//! padding. Decoding is purely structural; signature checking is a separate
//! capability so that offline deployments can opt out of it.

use base64::Engine as _;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use smol_str::SmolStr;
use thiserror::Error;

use crate::model::{LotePayload, PkiObject};

const BASE64_COMPACT: base64::engine::GeneralPurpose = base64::engine::general_purpose::URL_SAFE_NO_PAD;

#[derive(Debug, Error)]
pub enum MalformedJwt {
    #[error("token is blank")]
    Blank,
    #[error("expected 3 dot-separated segments, found {found}")]
    SegmentCount { found: usize },
    #[error("{segment} segment is not valid base64url without padding")]
    InvalidBase64 {
        segment: &'static str,
        #[source]
        source: base64::DecodeError,
    },
    #[error("{segment} segment does not parse under the expected schema")]
    InvalidJson {
        segment: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// JOSE header of a list JWS.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct LoteJwtHeader {
    pub alg: SmolStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<SmolStr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<SmolStr>,
}

/// Decoded compact JWS.
///
/// The signature segment is retained as raw bytes; whether it is checked at
/// all is up to the [`VerifyJwtSignature`] implementation in use.
#[derive(Debug, Clone)]
pub struct JwtEnvelope<H, P> {
    pub header: H,
    pub payload: P,
    pub signature: Vec<u8>,
}

pub type DecodedLote = JwtEnvelope<LoteJwtHeader, LotePayload>;

pub fn decode_envelope<H, P>(compact: &str) -> Result<JwtEnvelope<H, P>, MalformedJwt>
where
    H: DeserializeOwned,
    P: DeserializeOwned,
{
    if compact.trim().is_empty() {
        return Err(MalformedJwt::Blank);
    }

    let segments: Vec<&str> = compact.split('.').collect();

    let [header, payload, signature] = segments[..] else {
        return Err(MalformedJwt::SegmentCount { found: segments.len() });
    };

    let header_bytes = decode_segment(header, "header")?;
    let payload_bytes = decode_segment(payload, "payload")?;
    let signature = decode_segment(signature, "signature")?;

    let header = serde_json::from_slice(&header_bytes).map_err(|source| MalformedJwt::InvalidJson {
        segment: "header",
        source,
    })?;
    let payload = serde_json::from_slice(&payload_bytes).map_err(|source| MalformedJwt::InvalidJson {
        segment: "payload",
        source,
    })?;

    Ok(JwtEnvelope {
        header,
        payload,
        signature,
    })
}

pub fn decode_lote(compact: &str) -> Result<DecodedLote, MalformedJwt> {
    decode_envelope(compact)
}

fn decode_segment(segment: &str, name: &'static str) -> Result<Vec<u8>, MalformedJwt> {
    BASE64_COMPACT
        .decode(segment)
        .map_err(|source| MalformedJwt::InvalidBase64 { segment: name, source })
}

#[derive(Debug, Error)]
#[error("failed to verify the list signature")]
pub struct SignatureError {
    #[source]
    pub source: anyhow::Error,
}

/// Capability checking the signature of a fetched list against the anchors
/// its pointer declared.
#[async_trait::async_trait]
pub trait VerifyJwtSignature: Send + Sync {
    async fn verify(&self, compact: &str, expected_anchors: Option<&[PkiObject]>) -> Result<(), SignatureError>;
}

/// Accepts every list without looking at the signature.
///
/// Intended for offline use and for deployments where authenticity is
/// established out of band.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSignatureVerification;

#[async_trait::async_trait]
impl VerifyJwtSignature for NoSignatureVerification {
    async fn verify(&self, _compact: &str, _expected_anchors: Option<&[PkiObject]>) -> Result<(), SignatureError> {
        Ok(())
    }
}

/// Verifies the JWS against the public key of each expected anchor
/// certificate until one matches.
///
/// A pointer without declared anchors leaves nothing to pin the signature
/// against; such lists are accepted as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickyJwsVerifier;

#[async_trait::async_trait]
impl VerifyJwtSignature for PickyJwsVerifier {
    async fn verify(&self, compact: &str, expected_anchors: Option<&[PkiObject]>) -> Result<(), SignatureError> {
        use picky::jose::jws::RawJws;

        let anchors = match expected_anchors {
            Some(anchors) if !anchors.is_empty() => anchors,
            Some(_) | None => {
                debug!("no expected anchors declared for this list, skipping signature pinning");
                return Ok(());
            }
        };

        let mut last_error = None;

        for anchor in anchors {
            let cert = match anchor.to_cert() {
                Ok(cert) => cert,
                Err(error) => {
                    last_error = Some(anyhow::Error::from(error).context("bad anchor certificate"));
                    continue;
                }
            };

            let raw_jws = RawJws::decode(compact).map_err(|source| SignatureError {
                source: anyhow::Error::from(source).context("not a JWS"),
            })?;

            match raw_jws.verify(cert.public_key()) {
                Ok(_) => return Ok(()),
                Err(error) => last_error = Some(anyhow::Error::from(error)),
            }
        }

        Err(SignatureError {
            source: last_error
                .unwrap_or_else(|| anyhow::anyhow!("no verifiable anchor"))
                .context(format!("none of the {} expected anchors verified the signature", anchors.len())),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code can panic on errors")]

    use super::*;

    fn encode(header: &serde_json::Value, payload: &serde_json::Value) -> String {
        format!(
            "{}.{}.{}",
            BASE64_COMPACT.encode(serde_json::to_vec(header).unwrap()),
            BASE64_COMPACT.encode(serde_json::to_vec(payload).unwrap()),
            BASE64_COMPACT.encode(b"sig"),
        )
    }

    #[test]
    fn roundtrip() {
        let header = serde_json::json!({"alg": "RS256", "typ": "lote+jwt"});
        let payload = serde_json::json!({"hello": "world"});

        let envelope: JwtEnvelope<serde_json::Value, serde_json::Value> = decode_envelope(&encode(&header, &payload)).unwrap();

        assert_eq!(envelope.header, header);
        assert_eq!(envelope.payload, payload);
        assert_eq!(envelope.signature, b"sig");
    }

    #[test]
    fn blank_input_is_rejected() {
        for input in ["", "   ", "\n"] {
            assert!(matches!(
                decode_envelope::<serde_json::Value, serde_json::Value>(input),
                Err(MalformedJwt::Blank)
            ));
        }
    }

    #[test]
    fn wrong_segment_count_is_rejected() {
        for (input, expected) in [("a.b", 2), ("a.b.c.d", 4)] {
            match decode_envelope::<serde_json::Value, serde_json::Value>(input) {
                Err(MalformedJwt::SegmentCount { found }) => assert_eq!(found, expected),
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
    }

    #[test]
    fn padded_base64_is_rejected() {
        // `aGk=` is valid base64, but compact JWS forbids padding.
        let result = decode_envelope::<serde_json::Value, serde_json::Value>("aGk=.aGk=.aGk=");
        assert!(matches!(result, Err(MalformedJwt::InvalidBase64 { segment: "header", .. })));
    }

    #[test]
    fn tampered_payload_changes_the_decoded_object_or_fails() {
        let header = serde_json::json!({"alg": "none"});
        let payload = serde_json::json!({"n": 1});
        let compact = encode(&header, &payload);

        let original: JwtEnvelope<serde_json::Value, serde_json::Value> = decode_envelope(&compact).unwrap();

        let mut parts: Vec<String> = compact.split('.').map(str::to_owned).collect();
        let mut payload_bytes = BASE64_COMPACT.decode(&parts[1]).unwrap();
        // {"n":1} -> {"n":2}
        let position = payload_bytes.iter().position(|b| *b == b'1').unwrap();
        payload_bytes[position] = b'2';
        parts[1] = BASE64_COMPACT.encode(&payload_bytes);

        let tampered: JwtEnvelope<serde_json::Value, serde_json::Value> =
            decode_envelope(&parts.join(".")).unwrap();
        assert_ne!(tampered.payload, original.payload);
    }

    #[tokio::test]
    async fn no_verification_accepts_anything() {
        NoSignatureVerification
            .verify("definitely.not.ajws", None)
            .await
            .unwrap();
    }
}
