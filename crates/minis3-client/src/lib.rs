//! Authenticated request building and response decoding for the S3 REST API.
//!
//! This crate has two entry points sharing one canonicalization/signing
//! core (from `minis3-auth`):
//!
//! - [`Client`] performs operations: it signs each outgoing request by
//!   attaching an `Authorization: AWS <akid>:<signature>` header and
//!   dispatches it through an injected [`HttpTransport`] collaborator.
//! - [`QueryStringAuthGenerator`] mirrors the same operation surface but,
//!   instead of performing anything, renders URLs carrying the signature,
//!   expiry, and access key id as query parameters - usable from a tool
//!   that cannot set custom headers, such as a browser.
//!
//! Nothing in this crate opens connections or blocks: the transport
//! collaborator owns all network behavior, connection reuse, and retry
//! policy.
//!
//! # Modules
//!
//! - [`client`] - The operation surface over a transport
//! - [`config`] - Endpoint configuration (host, port, scheme)
//! - [`error`] - Client error types
//! - [`object`] - Object payload + metadata pairing
//! - [`presigned`] - Query-string authentication URL generation
//! - [`request`] - Direct-signing request augmentation
//! - [`response`] - Response wrappers and list decoding policy
//! - [`transport`] - The transport collaborator seam

pub mod client;
pub mod config;
pub mod error;
pub mod object;
pub mod presigned;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{Client, ListBucketOptions};
pub use config::ClientConfig;
pub use error::ClientError;
pub use minis3_auth::Credentials;
pub use object::S3Object;
pub use presigned::QueryStringAuthGenerator;
pub use response::{
    GetObjectResponse, ListAllMyBucketsResponse, ListBucketResponse, Response,
};
pub use transport::{BoxError, HttpTransport};
