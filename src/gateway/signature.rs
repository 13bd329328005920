use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::GatewayError;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_HEX_LEN: usize = 64;

/// Checks a gateway signature: lowercase or uppercase hex of
/// HMAC-SHA256(secret, payload).
///
/// Returns `Ok(false)` on a well-formed signature that does not match and
/// `Err` when the signature is not a hex-encoded SHA-256 MAC at all.
pub fn verify_signature(payload: &str, signature: &str, secret: &str) -> Result<bool, GatewayError> {
    if secret.is_empty() {
        return Err(GatewayError::MissingSecret);
    }
    if signature.len() != SIGNATURE_HEX_LEN {
        return Err(GatewayError::MalformedSignature(format!(
            "expected {SIGNATURE_HEX_LEN} hex characters, got {}",
            signature.len()
        )));
    }
    let expected = hex::decode(signature).map_err(|e| GatewayError::MalformedSignature(e.to_string()))?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| GatewayError::MalformedSignature(e.to_string()))?;
    mac.update(payload.as_bytes());
    Ok(mac.verify_slice(&expected).is_ok())
}

#[cfg(test)]
pub(crate) fn sign(payload: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
