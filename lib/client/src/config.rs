use memolookup_core::{Error, Result};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the remote tables API.
///
/// Supplied by the surrounding application; nothing here is read from
/// literals in the code. The credential is a publishable, low-privilege key:
/// row-level access is enforced by the backend.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the project, e.g. `https://abc.example.co`.
    pub endpoint: String,
    /// Access key sent as `apikey` and as a bearer token.
    pub credential: String,
    /// Per-request timeout covering connect and body read.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential: credential.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(Error::InvalidConfig("endpoint is empty".to_string()));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "endpoint must be an http(s) URL, got '{}'",
                endpoint
            )));
        }
        if self.credential.trim().is_empty() {
            return Err(Error::InvalidConfig("access credential is empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Endpoint without trailing slashes, ready for path joins.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim().trim_end_matches('/')
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("credential", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ClientConfig::new("https://project.example.co/", "pk_live");
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "https://project.example.co");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        assert!(matches!(
            ClientConfig::new("", "key").validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://host", "key").validate(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_empty_credential_and_timeout() {
        assert!(ClientConfig::new("http://localhost", "  ").validate().is_err());
        assert!(ClientConfig::new("http://localhost", "key")
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_debug_redacts_credential() {
        let rendered = format!("{:?}", ClientConfig::new("http://localhost", "secret-key"));
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
