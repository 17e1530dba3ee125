//! The `authenticate_user` endpoint.

use crate::client::{json_body, ChefClient};
use crate::error::{ChefApiError, Result};
use crate::types::{AuthenticateRequest, AuthenticateResult};
use reqwest::Method;
use tracing::{debug, info, warn};

const AUTHENTICATE_USER: &str = "authenticate_user";

/// Verifies user passwords against the Chef server.
#[derive(Clone)]
pub struct AuthenticateService {
    client: ChefClient,
}

impl AuthenticateService {
    pub fn new(client: ChefClient) -> Self {
        Self { client }
    }

    /// Check `password` for the user `name`.
    ///
    /// A rejected password surfaces as a `401` status error.
    pub async fn authenticate(&self, name: &str, password: &str) -> Result<AuthenticateResult> {
        debug!(name = %name, "Authenticating user");

        let request = AuthenticateRequest {
            username: name.to_string(),
            password: password.to_string(),
        };
        let body = json_body(&request)?;

        match self
            .client
            .request_json::<Option<AuthenticateResult>>(Method::POST, AUTHENTICATE_USER, Some(body))
            .await
        {
            Ok(result) => {
                info!(name = %name, "Authentication successful");
                Ok(result.unwrap_or_default())
            }
            Err(e @ ChefApiError::Status { .. }) => {
                warn!(name = %name, error = %e, "Authentication rejected");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ApiResponse, MockTransport};
    use reqwest::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_authenticate_sends_credentials() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|method, path, body| {
                let sent: serde_json::Value = body
                    .as_deref()
                    .and_then(|b| serde_json::from_slice(b).ok())
                    .unwrap_or_default();
                *method == Method::POST
                    && path.to_string() == "authenticate_user"
                    && sent == serde_json::json!({"username": "alice", "password": "pw"})
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(ApiResponse {
                    url: "https://chef.test/authenticate_user".to_string(),
                    status: StatusCode::OK,
                    body: br#"{"status":"linked","user":{"name":"alice"}}"#.to_vec(),
                })
            });

        let service = ChefClient::with_transport(Arc::new(transport)).authenticate();
        let result = service.authenticate("alice", "pw").await.unwrap();

        assert_eq!(result.status, "linked");
        assert_eq!(result.user.name, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_empty_body_is_success() {
        let mut transport = MockTransport::new();
        transport.expect_send().returning(|_, _, _| {
            Ok(ApiResponse {
                url: "https://chef.test/authenticate_user".to_string(),
                status: StatusCode::OK,
                body: Vec::new(),
            })
        });

        let service = ChefClient::with_transport(Arc::new(transport)).authenticate();
        let result = service.authenticate("alice", "pw").await.unwrap();
        assert_eq!(result, AuthenticateResult::default());
    }

    #[tokio::test]
    async fn test_authenticate_rejected_password() {
        let mut transport = MockTransport::new();
        transport.expect_send().returning(|_, _, _| {
            Ok(ApiResponse {
                url: "https://testhost/authenticate_user".to_string(),
                status: StatusCode::UNAUTHORIZED,
                body: br#"{"error":"Failed to authenticate"}"#.to_vec(),
            })
        });

        let service = ChefClient::with_transport(Arc::new(transport)).authenticate();
        let err = service.authenticate("alice", "wrong").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "POST https://testhost/authenticate_user: 401"
        );
    }
}
