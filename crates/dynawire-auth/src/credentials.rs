//! Signing credentials.

use std::fmt;

/// The service name used when signing DynamoDB requests.
pub const DYNAMODB_SERVICE: &str = "dynamodb";

/// Immutable signing credentials: the region/access-key/secret-key triple plus
/// the service name that goes into the credential scope.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    region: String,
    access_key: String,
    secret_key: String,
    service: String,
}

impl Credentials {
    /// Create credentials for an arbitrary service.
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            service: service.into(),
        }
    }

    /// Create credentials scoped to the DynamoDB service.
    #[must_use]
    pub fn dynamodb(
        region: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self::new(region, access_key, secret_key, DYNAMODB_SERVICE)
    }

    /// The AWS region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The access key ID.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The secret access key.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// The service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns a copy of these credentials bound to a different service name.
    #[must_use]
    pub fn with_service(&self, service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..self.clone()
        }
    }

    /// Build the credential scope for the given `YYYYMMDD` date:
    /// `date/region/service/aws4_request`.
    #[must_use]
    pub fn scope(&self, date: &str) -> String {
        format!("{date}/{}/{}/aws4_request", self.region, self.service)
    }
}

// The secret never shows up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("service", &self.service)
            .finish()
    }
}
