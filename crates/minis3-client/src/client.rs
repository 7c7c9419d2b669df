//! The operation surface over a transport.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method};
use minis3_auth::Credentials;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::object::S3Object;
use crate::request::{apply_metadata, sign_request};
use crate::response::{
    GetObjectResponse, ListAllMyBucketsResponse, ListBucketResponse, Response,
};
use crate::transport::HttpTransport;

/// Escaping for object keys and query parameter values placed in a URL.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub(crate) fn escape(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Pagination options for a list-objects operation.
///
/// These parameters shape the listing but are deliberately excluded from
/// the signed resource identity.
#[derive(Debug, Clone, Default)]
pub struct ListBucketOptions {
    /// Only keys beginning with this prefix.
    pub prefix: Option<String>,
    /// Start listing after this key.
    pub marker: Option<String>,
    /// Upper bound on returned entries.
    pub max_keys: Option<u32>,
}

impl ListBucketOptions {
    pub(crate) fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(prefix) = &self.prefix {
            params.push(format!("prefix={}", escape(prefix)));
        }
        if let Some(marker) = &self.marker {
            params.push(format!("marker={}", escape(marker)));
        }
        if let Some(max_keys) = self.max_keys {
            params.push(format!("max-keys={max_keys}"));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// An authenticated client for the object-storage REST API.
///
/// Each operation assembles a path, signs the request via the shared
/// canonicalization core, and dispatches it through the injected
/// transport. The client holds no connection state of its own.
#[derive(Debug)]
pub struct Client<T> {
    credentials: Credentials,
    config: ClientConfig,
    transport: T,
}

impl<T: HttpTransport> Client<T> {
    /// Create a client over the given transport.
    pub fn new(credentials: Credentials, config: ClientConfig, transport: T) -> Self {
        Self {
            credentials,
            config,
            transport,
        }
    }

    /// Create a bucket.
    pub fn create_bucket(&self, bucket: &str, headers: HeaderMap) -> Result<Response, ClientError> {
        let response = self.execute(Method::PUT, bucket, headers, Bytes::new(), None)?;
        Ok(Response::from_http(response))
    }

    /// List the objects in a bucket.
    pub fn list_bucket(
        &self,
        bucket: &str,
        options: &ListBucketOptions,
        headers: HeaderMap,
    ) -> Result<ListBucketResponse, ClientError> {
        let path = format!("{bucket}{}", options.to_query());
        let response = self.execute(Method::GET, &path, headers, Bytes::new(), None)?;
        ListBucketResponse::from_http(response)
    }

    /// Delete an empty bucket.
    pub fn delete_bucket(&self, bucket: &str, headers: HeaderMap) -> Result<Response, ClientError> {
        let response = self.execute(Method::DELETE, bucket, headers, Bytes::new(), None)?;
        Ok(Response::from_http(response))
    }

    /// Store an object. The payload's metadata rides along as prefixed
    /// headers and participates in signing.
    pub fn put(
        &self,
        bucket: &str,
        key: &str,
        object: impl Into<S3Object>,
        headers: HeaderMap,
    ) -> Result<Response, ClientError> {
        let object = object.into();
        let path = format!("{bucket}/{}", escape(key));
        let response = self.execute(
            Method::PUT,
            &path,
            headers,
            object.data,
            Some(&object.metadata),
        )?;
        Ok(Response::from_http(response))
    }

    /// Fetch an object and its metadata.
    pub fn get(
        &self,
        bucket: &str,
        key: &str,
        headers: HeaderMap,
    ) -> Result<GetObjectResponse, ClientError> {
        let path = format!("{bucket}/{}", escape(key));
        let response = self.execute(Method::GET, &path, headers, Bytes::new(), None)?;
        Ok(GetObjectResponse::from_http(response))
    }

    /// Delete an object.
    pub fn delete(
        &self,
        bucket: &str,
        key: &str,
        headers: HeaderMap,
    ) -> Result<Response, ClientError> {
        let path = format!("{bucket}/{}", escape(key));
        let response = self.execute(Method::DELETE, &path, headers, Bytes::new(), None)?;
        Ok(Response::from_http(response))
    }

    /// Fetch the access control document for an object.
    ///
    /// The body is the raw ACL XML; it is not decoded here.
    pub fn get_acl(
        &self,
        bucket: &str,
        key: &str,
        headers: HeaderMap,
    ) -> Result<GetObjectResponse, ClientError> {
        let path = format!("{bucket}/{}?acl", escape(key));
        let response = self.execute(Method::GET, &path, headers, Bytes::new(), None)?;
        Ok(GetObjectResponse::from_http(response))
    }

    /// Fetch the access control document for a bucket.
    pub fn get_bucket_acl(
        &self,
        bucket: &str,
        headers: HeaderMap,
    ) -> Result<GetObjectResponse, ClientError> {
        self.get_acl(bucket, "", headers)
    }

    /// Replace the access control document for an object. `acl_xml` must
    /// be a document in the service's ACL format.
    pub fn put_acl(
        &self,
        bucket: &str,
        key: &str,
        acl_xml: impl Into<Bytes>,
        headers: HeaderMap,
    ) -> Result<Response, ClientError> {
        let path = format!("{bucket}/{}?acl", escape(key));
        let response = self.execute(Method::PUT, &path, headers, acl_xml.into(), None)?;
        Ok(Response::from_http(response))
    }

    /// Replace the access control document for a bucket.
    pub fn put_bucket_acl(
        &self,
        bucket: &str,
        acl_xml: impl Into<Bytes>,
        headers: HeaderMap,
    ) -> Result<Response, ClientError> {
        self.put_acl(bucket, "", acl_xml, headers)
    }

    /// List all buckets owned by the caller.
    pub fn list_all_my_buckets(
        &self,
        headers: HeaderMap,
    ) -> Result<ListAllMyBucketsResponse, ClientError> {
        let response = self.execute(Method::GET, "", headers, Bytes::new(), None)?;
        ListAllMyBucketsResponse::from_http(response)
    }

    /// Sign and dispatch one request. `path` is relative to the service
    /// root and may carry a query string.
    fn execute(
        &self,
        method: Method,
        path: &str,
        mut headers: HeaderMap,
        body: Bytes,
        metadata: Option<&HashMap<String, String>>,
    ) -> Result<http::Response<Bytes>, ClientError> {
        if let Some(metadata) = metadata {
            apply_metadata(&mut headers, metadata)?;
        }
        sign_request(&self.credentials, &method, &format!("/{path}"), &mut headers)?;

        let uri = format!("{}/{path}", self.config.base_url());
        debug!(method = %method, uri = %uri, "dispatching request");

        let mut request = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(body)?;
        *request.headers_mut() = headers;

        self.transport.send(request).map_err(ClientError::Transport)
    }
}
