//! Generic Chef server client.

use crate::auth::AuthenticateService;
use crate::error::{ChefApiError, Result};
use crate::transport::{ApiResponse, HttpTransport, Transport};
use crate::types::ChefConfig;
use crate::users::UserService;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for a Chef server API root.
///
/// The client owns nothing but a shared [`Transport`]; cloning it is cheap
/// and clones may be used from independent tasks.
///
/// # Example
///
/// ```ignore
/// use chef_api::{ChefClient, ChefConfig, User};
///
/// let client = ChefClient::new(ChefConfig::new("https://chef.example.com"))?;
///
/// let users = client.users().list().await?;
/// for (name, uri) in &users {
///     println!("{name} -> {uri}");
/// }
///
/// let created = client.users().create(&User::new("alice")).await?;
/// println!("created {}", created.uri);
/// ```
#[derive(Clone)]
pub struct ChefClient {
    transport: Arc<dyn Transport>,
}

impl ChefClient {
    /// Create a client that talks plain HTTP to the configured server.
    pub fn new(config: ChefConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client on top of an existing transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Accessor for the `users` resource.
    pub fn users(&self) -> UserService {
        UserService::new(self.clone())
    }

    /// Accessor for the `authenticate_user` endpoint.
    pub fn authenticate(&self) -> AuthenticateService {
        AuthenticateService::new(self.clone())
    }

    /// Send a request and decode a successful response body as `T`.
    ///
    /// An empty body decodes as JSON `null`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let response = self.execute(method, path, body).await?;

        let payload: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &response.body
        };

        serde_json::from_slice(payload).map_err(|e| {
            ChefApiError::ParseError(format!(
                "Failed to parse response from {}: {}",
                response.url, e
            ))
        })
    }

    /// Send a request, check the status and drop the response body.
    pub async fn request_discard(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<()> {
        self.execute(method, path, body).await.map(|_| ())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse> {
        let response = self.transport.send(method.clone(), path, body).await?;

        if response.status.is_success() {
            debug!(method = %method, url = %response.url, status = %response.status, "Request succeeded");
            return Ok(response);
        }

        let body = String::from_utf8_lossy(&response.body).into_owned();
        warn!(
            method = %method,
            url = %response.url,
            status = %response.status,
            error = %body,
            "Server returned an error"
        );

        Err(ChefApiError::Status {
            method,
            url: response.url,
            status: response.status,
            body,
        })
    }
}

/// Encode `value` as a JSON request body.
pub fn json_body<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(ChefApiError::Serialize)
}

/// Percent-encode `segment` so it stays a single URL path segment.
///
/// `a/b` becomes `a%2Fb`; unreserved characters pass through untouched.
/// Dot segments are encoded so they cannot collapse into the parent path,
/// and an empty segment is rejected.
pub fn path_segment(segment: &str) -> Result<String> {
    match segment {
        "" => {
            return Err(ChefApiError::InvalidUrl(
                "path segment cannot be empty".into(),
            ))
        }
        "." => return Ok("%2E".to_string()),
        ".." => return Ok("%2E%2E".to_string()),
        _ => {}
    }

    let mut url = url::Url::parse("http://segment.invalid/")
        .map_err(|e| ChefApiError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| ChefApiError::InvalidUrl("URL cannot be a base".into()))?
        .pop_if_empty()
        .push(segment);

    Ok(url.path().trim_start_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use reqwest::StatusCode;
    use serde_json::Value;

    fn response(status: StatusCode, body: &str) -> ApiResponse {
        ApiResponse {
            url: "https://chef.test/users".to_string(),
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_client_rejects_invalid_url() {
        assert!(ChefClient::new(ChefConfig::new("")).is_err());
        assert!(ChefClient::new(ChefConfig::new("chef.example.com")).is_err());
        assert!(ChefClient::new(ChefConfig::new("https://chef.example.com/")).is_ok());
    }

    #[tokio::test]
    async fn test_request_json_decodes_success_body() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_, _, _| Ok(response(StatusCode::OK, r#"{"a":"b"}"#)));

        let client = ChefClient::with_transport(Arc::new(transport));
        let value: Value = client
            .request_json(Method::GET, "users", None)
            .await
            .unwrap();

        assert_eq!(value["a"], "b");
    }

    #[tokio::test]
    async fn test_request_json_empty_body_is_null() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_, _, _| Ok(response(StatusCode::OK, "  ")));

        let client = ChefClient::with_transport(Arc::new(transport));
        let value: Option<Value> = client
            .request_json(Method::GET, "users", None)
            .await
            .unwrap();

        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_, _, _| Ok(response(StatusCode::FORBIDDEN, "denied")));

        let client = ChefClient::with_transport(Arc::new(transport));
        let result: Result<Value> = client.request_json(Method::GET, "users", None).await;

        match result.unwrap_err() {
            ChefApiError::Status {
                method,
                status,
                body,
                ..
            } => {
                assert_eq!(method, Method::GET);
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(body, "denied");
            }
            e => panic!("Expected Status error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_, _, _| Ok(response(StatusCode::OK, "not json")));

        let client = ChefClient::with_transport(Arc::new(transport));
        let result: Result<Value> = client.request_json(Method::GET, "users", None).await;

        assert!(matches!(result, Err(ChefApiError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_transport_errors_pass_through() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_, _, _| Err(ChefApiError::ServerUnreachable("refused".into())));

        let client = ChefClient::with_transport(Arc::new(transport));
        let result = client.request_discard(Method::DELETE, "users/x", None).await;

        match result.unwrap_err() {
            ChefApiError::ServerUnreachable(msg) => assert_eq!(msg, "refused"),
            e => panic!("Expected ServerUnreachable, got: {:?}", e),
        }
    }

    #[test]
    fn test_path_segment_escaping() {
        assert_eq!(path_segment("alice").unwrap(), "alice");
        assert_eq!(path_segment("a/b").unwrap(), "a%2Fb");
        assert_eq!(path_segment("with space").unwrap(), "with%20space");
        assert_eq!(path_segment("q?x#y").unwrap(), "q%3Fx%23y");
        assert_eq!(path_segment("dots.and-dash_ok~").unwrap(), "dots.and-dash_ok~");
    }

    #[test]
    fn test_path_segment_dot_segments_stay_segments() {
        assert_eq!(path_segment(".").unwrap(), "%2E");
        assert_eq!(path_segment("..").unwrap(), "%2E%2E");
        assert_eq!(path_segment("...").unwrap(), "...");
        assert_eq!(path_segment(".hidden").unwrap(), ".hidden");
    }

    #[test]
    fn test_path_segment_rejects_empty() {
        assert!(matches!(path_segment(""), Err(ChefApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_json_body_encodes() {
        let body = json_body(&serde_json::json!({"name": "alice"})).unwrap();
        assert_eq!(body, br#"{"name":"alice"}"#.to_vec());
    }

    #[test]
    fn test_json_body_reports_encode_failure() {
        let mut map = std::collections::HashMap::new();
        map.insert((1, 2), "tuple keys are not valid JSON object keys");

        assert!(matches!(json_body(&map), Err(ChefApiError::Serialize(_))));
    }
}
