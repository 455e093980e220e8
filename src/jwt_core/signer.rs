use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn keyed(message: &[u8], secret: &[u8]) -> HmacSha256 {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(secret).expect("HMAC can take a key of any size");
    mac.update(message);
    mac
}

/// Strict base64url: no padding, and the input must be the exact encoding of
/// the bytes it decodes to.
pub(crate) fn b64_decode(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    if let Some(offset) = encoded.find('=') {
        return Err(base64::DecodeError::InvalidByte(offset, b'='));
    }
    let bytes = base64::decode_config(encoded, base64::URL_SAFE_NO_PAD)?;
    if base64::encode_config(&bytes, base64::URL_SAFE_NO_PAD) != encoded {
        let last = encoded.len().saturating_sub(1);
        return Err(base64::DecodeError::InvalidLastSymbol(
            last,
            encoded.as_bytes().get(last).copied().unwrap_or_default(),
        ));
    }
    Ok(bytes)
}

/// HMAC-SHA256 of `message` keyed by `secret`, base64url without padding.
pub fn sign(message: &[u8], secret: &[u8]) -> String {
    let tag = keyed(message, secret).finalize().into_bytes();
    base64::encode_config(tag, base64::URL_SAFE_NO_PAD)
}

/// Checks a base64url signature against `message` in constant time.
///
/// A signature that is not canonical unpadded base64url is a mismatch, so only
/// one spelling of a valid signature is ever accepted.
pub fn verify_signature(message: &[u8], secret: &[u8], signature: &str) -> bool {
    let expected = match b64_decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    keyed(message, secret).verify_slice(&expected).is_ok()
}
