//! Access key credentials.

use std::fmt;

/// An access key id paired with its secret.
///
/// The secret never appears in `Debug` output and has no public accessor;
/// the only thing that can be derived from it is an HMAC digest via
/// [`Credentials::sign`] and [`Credentials::sign_url`].
#[derive(Clone)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
}

impl Credentials {
    /// Create credentials from an access key id and secret.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// Load credentials from `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY`.
    ///
    /// Returns `None` when either variable is unset.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let access_key_id = std::env::var("AWS_ACCESS_KEY_ID").ok()?;
        let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY").ok()?;
        Some(Self {
            access_key_id,
            secret_access_key,
        })
    }

    /// The access key id identifying these credentials.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Sign a canonical string with the secret key.
    #[must_use]
    pub fn sign(&self, string_to_sign: &str) -> String {
        crate::sign::sign(&self.secret_access_key, string_to_sign)
    }

    /// Sign a canonical string and percent-encode the result for a URL
    /// query component.
    #[must_use]
    pub fn sign_url(&self, string_to_sign: &str) -> String {
        crate::sign::sign_url(&self.secret_access_key, string_to_sign)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .finish()
    }
}
