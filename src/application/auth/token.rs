//! Compact HS256 JSON Web Tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::Sha256;

use super::AuthError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";
const TOKEN_TYPE: &str = "JWT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

fn mac(secret: &[u8]) -> Result<HmacSha256, AuthError> {
    HmacSha256::new_from_slice(secret).map_err(|_| AuthError::Signing)
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, AuthError> {
    let json = serde_json::to_vec(value).map_err(|_| AuthError::Signing)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, AuthError> {
    let json = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| AuthError::MalformedToken)?;
    serde_json::from_slice(&json).map_err(|_| AuthError::MalformedToken)
}

pub fn sign(claims: &Claims, secret: &[u8]) -> Result<String, AuthError> {
    let header = encode_segment(&Header {
        alg: ALGORITHM.to_string(),
        typ: TOKEN_TYPE.to_string(),
    })?;
    let payload = encode_segment(claims)?;
    let signing_input = format!("{header}.{payload}");

    let mut mac = mac(secret)?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature}"))
}

/// Checks structure, algorithm and signature before looking at expiry.
pub fn decode(token: &str, secret: &[u8], now: i64) -> Result<Claims, AuthError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::MalformedToken);
    };

    let decoded_header: Header = decode_segment(header)?;
    if decoded_header.alg != ALGORITHM {
        return Err(AuthError::MalformedToken);
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| AuthError::MalformedToken)?;
    let mut mac = mac(secret)?;
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| AuthError::InvalidSignature)?;

    let claims: Claims = decode_segment(payload)?;
    if now >= claims.exp {
        return Err(AuthError::Expired);
    }
    Ok(claims)
}
