//! Query-string authentication URL generation.
//!
//! Mirrors the client's operation surface, but instead of performing the
//! operations it returns URLs carrying the authentication parameters, so
//! the operation can be performed by another tool (such as a browser for
//! GETs). The Unix expiry timestamp takes the place of the date line in
//! the canonical string; the remote verifier rejects the URL after it.

use chrono::Utc;
use http::{HeaderMap, Method};
use minis3_auth::{Credentials, canonical_string};
use tracing::debug;

use crate::client::{ListBucketOptions, escape};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::object::S3Object;
use crate::request::{apply_metadata, ensure_supported};

/// Default validity window for generated URLs, in seconds.
pub const DEFAULT_EXPIRES_IN: i64 = 60;

/// Generates URLs carrying signature, expiry, and access key id as query
/// parameters.
///
/// Exactly one expiry mode is active at a time: an absolute Unix
/// timestamp, or a window relative to the moment of generation. Setting
/// one clears the other. Generation fails with
/// [`ClientError::ExpiryNotConfigured`] when both are unset.
#[derive(Debug)]
pub struct QueryStringAuthGenerator {
    credentials: Credentials,
    config: ClientConfig,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
}

impl QueryStringAuthGenerator {
    /// Create a generator with the default relative expiry window.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Self {
        Self {
            credentials,
            config,
            expires_at: None,
            expires_in: Some(DEFAULT_EXPIRES_IN),
        }
    }

    /// Fix the expiry to an absolute Unix timestamp. Clears any relative
    /// window; passing `None` leaves the generator without an expiry.
    pub fn set_expires_at(&mut self, timestamp: Option<i64>) {
        self.expires_at = timestamp;
        self.expires_in = None;
    }

    /// Expire a fixed number of seconds after each URL is generated.
    /// Clears any absolute expiry; passing `None` leaves the generator
    /// without an expiry.
    pub fn set_expires_in(&mut self, seconds: Option<i64>) {
        self.expires_in = seconds;
        self.expires_at = None;
    }

    /// Generate a URL for creating a bucket.
    pub fn create_bucket(&self, bucket: &str, headers: &HeaderMap) -> Result<String, ClientError> {
        self.generate_url(Method::PUT, bucket, headers)
    }

    /// Generate a URL for listing the objects in a bucket.
    pub fn list_bucket(
        &self,
        bucket: &str,
        options: &ListBucketOptions,
        headers: &HeaderMap,
    ) -> Result<String, ClientError> {
        let path = format!("{bucket}{}", options.to_query());
        self.generate_url(Method::GET, &path, headers)
    }

    /// Generate a URL for deleting a bucket.
    pub fn delete_bucket(&self, bucket: &str, headers: &HeaderMap) -> Result<String, ClientError> {
        self.generate_url(Method::DELETE, bucket, headers)
    }

    /// Generate a URL for storing an object. When an object is supplied
    /// its metadata is folded into the signed headers, so the eventual
    /// upload must present the same metadata headers.
    pub fn put(
        &self,
        bucket: &str,
        key: &str,
        object: Option<&S3Object>,
        headers: &HeaderMap,
    ) -> Result<String, ClientError> {
        let mut headers = headers.clone();
        if let Some(object) = object {
            apply_metadata(&mut headers, &object.metadata)?;
        }
        let path = format!("{bucket}/{}", escape(key));
        self.generate_url(Method::PUT, &path, &headers)
    }

    /// Generate a URL for fetching an object.
    pub fn get(&self, bucket: &str, key: &str, headers: &HeaderMap) -> Result<String, ClientError> {
        let path = format!("{bucket}/{}", escape(key));
        self.generate_url(Method::GET, &path, headers)
    }

    /// Generate a URL for deleting an object.
    pub fn delete(
        &self,
        bucket: &str,
        key: &str,
        headers: &HeaderMap,
    ) -> Result<String, ClientError> {
        let path = format!("{bucket}/{}", escape(key));
        self.generate_url(Method::DELETE, &path, headers)
    }

    /// Generate a URL for fetching an object's access control document.
    pub fn get_acl(
        &self,
        bucket: &str,
        key: &str,
        headers: &HeaderMap,
    ) -> Result<String, ClientError> {
        let path = format!("{bucket}/{}?acl", escape(key));
        self.generate_url(Method::GET, &path, headers)
    }

    /// Generate a URL for fetching a bucket's access control document.
    pub fn get_bucket_acl(&self, bucket: &str, headers: &HeaderMap) -> Result<String, ClientError> {
        self.get_acl(bucket, "", headers)
    }

    /// Generate a URL for replacing an object's access control document.
    /// The document itself is not part of the URL.
    pub fn put_acl(
        &self,
        bucket: &str,
        key: &str,
        headers: &HeaderMap,
    ) -> Result<String, ClientError> {
        let path = format!("{bucket}/{}?acl", escape(key));
        self.generate_url(Method::PUT, &path, headers)
    }

    /// Generate a URL for replacing a bucket's access control document.
    pub fn put_bucket_acl(&self, bucket: &str, headers: &HeaderMap) -> Result<String, ClientError> {
        self.put_acl(bucket, "", headers)
    }

    /// Generate a URL for listing all buckets owned by the caller.
    pub fn list_all_my_buckets(&self, headers: &HeaderMap) -> Result<String, ClientError> {
        self.generate_url(Method::GET, "", headers)
    }

    /// Build a URL with the authentication query parameters set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnsupportedMethod`] for a method outside the
    /// protocol and [`ClientError::ExpiryNotConfigured`] when no expiry
    /// mode is active.
    pub fn generate_url(
        &self,
        method: Method,
        path: &str,
        headers: &HeaderMap,
    ) -> Result<String, ClientError> {
        ensure_supported(&method)?;

        let expires = if let Some(window) = self.expires_in {
            Utc::now().timestamp() + window
        } else if let Some(at) = self.expires_at {
            at
        } else {
            return Err(ClientError::ExpiryNotConfigured);
        };

        let string_to_sign = canonical_string(&method, &format!("/{path}"), headers, Some(expires));
        let signature = self.credentials.sign_url(&string_to_sign);

        debug!(method = %method, path = path, expires, "generated query-string auth URL");

        let separator = if path.contains('?') { '&' } else { '?' };
        Ok(format!(
            "{}/{path}{separator}Signature={signature}&Expires={expires}&AWSAccessKeyId={}",
            self.config.base_url(),
            self.credentials.access_key_id(),
        ))
    }
}
