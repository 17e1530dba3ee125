//! Types for Chef server API requests and responses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Chef API version announced in `X-Chef-Version` unless overridden.
pub const DEFAULT_CHEF_VERSION: &str = "11.12.0";

/// Configuration for connecting to a Chef server.
#[derive(Debug, Clone)]
pub struct ChefConfig {
    /// Base URL of the server API (e.g., "https://chef.example.com/organizations/acme")
    pub url: String,
    /// Client name sent as `X-Ops-UserId`
    pub client_name: Option<String>,
    /// Value of the `X-Chef-Version` header
    pub chef_version: String,
    /// Total request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl ChefConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client_name: None,
            chef_version: DEFAULT_CHEF_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Set the client name used to identify requests.
    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    pub fn with_chef_version(mut self, chef_version: impl Into<String>) -> Self {
        self.chef_version = chef_version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// User Types
// =============================================================================

/// A Chef server user.
///
/// Every field is optional on the wire; absent keys decode to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub name: String,
    pub display_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub password: String,
    pub public_key: String,
}

impl User {
    /// Create a user record with only the name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Response from listing users: user name to resource URI.
pub type UserList = HashMap<String, String>;

/// Response from creating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResult {
    #[serde(default)]
    pub uri: String,
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the `authenticate_user` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
}

/// Response from a successful `authenticate_user` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthenticateResult {
    pub status: String,
    pub user: User,
}
