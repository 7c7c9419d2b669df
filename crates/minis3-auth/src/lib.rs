//! Canonical request construction and HMAC-SHA1 signing for minis3.
//!
//! This crate implements the client side of the legacy AWS signing scheme
//! used by the S3 REST API. The `Authorization` header has the format:
//!
//! ```text
//! AWS <AWSAccessKeyId>:<Signature>
//! ```
//!
//! Where `Signature = Base64(HMAC-SHA1(SecretKey, StringToSign))` and:
//!
//! ```text
//! StringToSign = HTTP-Verb + "\n" +
//!                Content-MD5 + "\n" +
//!                Content-Type + "\n" +
//!                Date + "\n" +
//!                CanonicalizedAmzHeaders +
//!                CanonicalizedResource
//! ```
//!
//! The same canonical string also backs query-string authentication, where
//! a Unix expiry timestamp takes the place of the `Date` line and the
//! signature travels as a URL query parameter instead of a header.
//!
//! Everything in this crate is pure: no I/O, no shared state, safe to call
//! concurrently.
//!
//! # Modules
//!
//! - [`canonical`] - Deterministic canonical string construction
//! - [`credentials`] - Access key pair with a non-leaking secret
//! - [`sign`] - HMAC-SHA1 signature computation and URL encoding

pub mod canonical;
pub mod credentials;
pub mod sign;

pub use canonical::{
    ALTERNATE_DATE_HEADER, AMZ_HEADER_PREFIX, METADATA_PREFIX, canonical_string,
};
pub use credentials::Credentials;
pub use sign::{sign, sign_url};
