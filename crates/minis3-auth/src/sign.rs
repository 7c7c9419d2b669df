//! Signature computation: Base64(HMAC-SHA1(secret, canonical string)).

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Everything outside the unreserved set is escaped when the signature is
/// placed in a URL query component. Base64 output contains `+`, `/` and
/// `=`, all of which must not survive unescaped.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Compute the signature for a canonical string.
///
/// The canonical string is treated as an opaque byte sequence; the digest
/// is never truncated and the key is used as-is.
#[must_use]
pub fn sign(secret_access_key: &str, string_to_sign: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(secret_access_key.as_bytes())
        .expect("HMAC can accept any key length");
    mac.update(string_to_sign.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Compute the signature and percent-encode it for use as a URL query
/// parameter value.
#[must_use]
pub fn sign_url(secret_access_key: &str, string_to_sign: &str) -> String {
    utf8_percent_encode(&sign(secret_access_key, string_to_sign), QUERY_COMPONENT).to_string()
}
