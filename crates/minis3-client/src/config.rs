//! Endpoint configuration.

/// Default service host.
pub const DEFAULT_HOST: &str = "s3.amazonaws.com";

/// Endpoint configuration: where requests go and over which scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service host name.
    pub host: String,
    /// Service port.
    pub port: u16,
    /// Whether to address the service over https.
    pub secure: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: default_port(true),
            secure: true,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given host with the default port for
    /// the chosen scheme.
    pub fn new(host: impl Into<String>, secure: bool) -> Self {
        Self {
            host: host.into(),
            port: default_port(secure),
            secure,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `S3_SECURE` (`1`/`true`), `S3_HOST`, and `S3_PORT` override the
    /// defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("S3_SECURE") {
            config.secure = v == "1" || v.eq_ignore_ascii_case("true");
            config.port = default_port(config.secure);
        }
        if let Ok(v) = std::env::var("S3_HOST") {
            config.host = v;
        }
        if let Ok(v) = std::env::var("S3_PORT") {
            if let Ok(port) = v.parse() {
                config.port = port;
            }
        }

        config
    }

    /// URL scheme implied by the security flag.
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        if self.secure { "https" } else { "http" }
    }

    /// `scheme://host:port`, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme(), self.host, self.port)
    }
}

/// Well-known port for each scheme.
#[must_use]
pub fn default_port(secure: bool) -> u16 {
    if secure { 443 } else { 80 }
}
