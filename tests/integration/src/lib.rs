//! End-to-end tests for the minis3 client.
//!
//! Instead of a network server, these tests dispatch through
//! [`InMemoryService`]: a transport that verifies each request's signature
//! the way the remote verifier would, keeps bucket and object state, and
//! renders listing documents from it. A round trip therefore exercises
//! canonicalization, signing, request assembly, and response decoding
//! against an independent re-derivation of the same protocol.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Once;

use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::{Method, Request, Response, StatusCode};
use minis3_auth::{Credentials, METADATA_PREFIX, canonical_string};
use minis3_client::transport::{BoxError, HttpTransport};
use minis3_client::{Client, ClientConfig};
use percent_encoding::percent_decode_str;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

const ACCESS_KEY_ID: &str = "AKIDEXAMPLE";
const SECRET_ACCESS_KEY: &str = "integration-secret";

const CREATION_DATE: &str = "2026-01-01T00:00:00.000Z";
const LAST_MODIFIED: &str = "2026-01-01T00:00:00.000Z";

const ACL_DOCUMENT: &str =
    "<AccessControlPolicy><Owner><ID>u1</ID></Owner></AccessControlPolicy>";

/// The credentials the in-memory service verifies against.
#[must_use]
pub fn service_credentials() -> Credentials {
    Credentials::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY)
}

/// A client whose credentials match the service.
#[must_use]
pub fn client() -> Client<InMemoryService> {
    init_tracing();
    Client::new(
        service_credentials(),
        ClientConfig::default(),
        InMemoryService::new(service_credentials()),
    )
}

/// A client signing with the wrong secret; every request gets a 403.
#[must_use]
pub fn misconfigured_client() -> Client<InMemoryService> {
    init_tracing();
    Client::new(
        Credentials::new(ACCESS_KEY_ID, "not-the-secret"),
        ClientConfig::default(),
        InMemoryService::new(service_credentials()),
    )
}

/// A transport standing in for the service.
///
/// Each request's `Authorization` header is checked against a signature
/// recomputed from the request itself; a mismatch yields a 403 without
/// touching state.
#[derive(Debug)]
pub struct InMemoryService {
    credentials: Credentials,
    state: RefCell<BTreeMap<String, BTreeMap<String, StoredObject>>>,
}

#[derive(Debug)]
struct StoredObject {
    body: Bytes,
    metadata: Vec<(String, String)>,
}

impl InMemoryService {
    /// Create a service verifying against the given credentials.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            state: RefCell::new(BTreeMap::new()),
        }
    }

    fn list_buckets(&self) -> Response<Bytes> {
        let state = self.state.borrow();
        let mut xml = String::from(
            "<ListAllMyBucketsResult>\
             <Owner><ID>u1</ID><DisplayName>tests</DisplayName></Owner>\
             <Buckets>",
        );
        for name in state.keys() {
            xml.push_str(&format!(
                "<Bucket><Name>{}</Name><CreationDate>{CREATION_DATE}</CreationDate></Bucket>",
                escape(name)
            ));
        }
        xml.push_str("</Buckets></ListAllMyBucketsResult>");
        xml_response(&xml)
    }

    fn list_objects(&self, bucket: &str, query: &str) -> Response<Bytes> {
        let state = self.state.borrow();
        let Some(objects) = state.get(bucket) else {
            return error_response(StatusCode::NOT_FOUND, "NoSuchBucket");
        };

        let prefix = param_value(query, "prefix")
            .map(|v| percent_decode_str(v).decode_utf8_lossy().into_owned())
            .unwrap_or_default();
        let max_keys = param_value(query, "max-keys")
            .and_then(|v| v.parse().ok())
            .unwrap_or(usize::MAX);

        let mut xml = format!("<ListBucketResult><Name>{}</Name>", escape(bucket));
        for (key, object) in objects
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .take(max_keys)
        {
            xml.push_str(&format!(
                "<Contents><Key>{}</Key>\
                 <LastModified>{LAST_MODIFIED}</LastModified>\
                 <ETag>&quot;0&quot;</ETag>\
                 <Size>{}</Size>\
                 <StorageClass>STANDARD</StorageClass>\
                 <Owner><ID>u1</ID><DisplayName>tests</DisplayName></Owner>\
                 </Contents>",
                escape(key),
                object.body.len(),
            ));
        }
        xml.push_str("</ListBucketResult>");
        xml_response(&xml)
    }
}

impl HttpTransport for InMemoryService {
    fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, BoxError> {
        let path_and_query = request
            .uri()
            .path_and_query()
            .map_or("/", http::uri::PathAndQuery::as_str);

        let expected = format!(
            "AWS {}:{}",
            self.credentials.access_key_id(),
            self.credentials.sign(&canonical_string(
                request.method(),
                path_and_query,
                request.headers(),
                None,
            ))
        );
        let presented = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if presented != expected {
            return Ok(error_response(
                StatusCode::FORBIDDEN,
                "SignatureDoesNotMatch",
            ));
        }

        let (parts, body) = request.into_parts();
        let path = percent_decode_str(parts.uri.path()).decode_utf8()?.into_owned();
        let query = parts.uri.query().unwrap_or("").to_owned();

        let trimmed = path.trim_start_matches('/');
        let (bucket, key) = match trimmed.split_once('/') {
            Some((bucket, key)) if !key.is_empty() => (bucket.to_owned(), Some(key.to_owned())),
            Some((bucket, _)) => (bucket.to_owned(), None),
            None => (trimmed.to_owned(), None),
        };

        if bucket.is_empty() {
            return Ok(self.list_buckets());
        }
        if has_param(&query, "acl") {
            // ACL documents are opaque to the client; a canned one will do.
            return Ok(xml_response(ACL_DOCUMENT));
        }

        let response = match key {
            None if parts.method == Method::PUT => {
                self.state.borrow_mut().entry(bucket).or_default();
                empty_response(StatusCode::OK)
            }
            None if parts.method == Method::DELETE => {
                self.state.borrow_mut().remove(&bucket);
                empty_response(StatusCode::NO_CONTENT)
            }
            None if parts.method == Method::GET => self.list_objects(&bucket, &query),
            Some(key) if parts.method == Method::PUT => {
                let metadata = parts
                    .headers
                    .iter()
                    .filter_map(|(name, value)| {
                        name.as_str().strip_prefix(METADATA_PREFIX).map(|bare| {
                            (bare.to_owned(), value.to_str().unwrap_or("").to_owned())
                        })
                    })
                    .collect();
                self.state
                    .borrow_mut()
                    .entry(bucket)
                    .or_default()
                    .insert(key, StoredObject { body, metadata });
                empty_response(StatusCode::OK)
            }
            Some(key) if parts.method == Method::GET => {
                let state = self.state.borrow();
                match state.get(&bucket).and_then(|objects| objects.get(&key)) {
                    Some(object) => {
                        let mut builder = Response::builder().status(StatusCode::OK);
                        for (bare, value) in &object.metadata {
                            builder = builder.header(format!("{METADATA_PREFIX}{bare}"), value);
                        }
                        builder.body(object.body.clone())?
                    }
                    None => error_response(StatusCode::NOT_FOUND, "NoSuchKey"),
                }
            }
            Some(key) if parts.method == Method::DELETE => {
                if let Some(objects) = self.state.borrow_mut().get_mut(&bucket) {
                    objects.remove(&key);
                }
                empty_response(StatusCode::NO_CONTENT)
            }
            _ => error_response(StatusCode::BAD_REQUEST, "MethodNotAllowed"),
        };
        Ok(response)
    }
}

fn escape(text: &str) -> String {
    quick_xml::escape::escape(text).into_owned()
}

fn param_value<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .find_map(|param| param.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')))
}

fn has_param(query: &str, name: &str) -> bool {
    query.split('&').any(|param| {
        param == name
            || param
                .strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('='))
    })
}

fn xml_response(body: &str) -> Response<Bytes> {
    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "application/xml")
        .body(Bytes::from(body.to_owned()))
        .expect("static response parts")
}

fn empty_response(status: StatusCode) -> Response<Bytes> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .expect("static response parts")
}

fn error_response(status: StatusCode, code: &str) -> Response<Bytes> {
    let body = format!("<Error><Code>{code}</Code></Error>");
    Response::builder()
        .status(status)
        .header("content-type", "application/xml")
        .body(Bytes::from(body))
        .expect("static response parts")
}

mod test_object;
