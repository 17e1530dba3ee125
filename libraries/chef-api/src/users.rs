//! The `users` resource.

use crate::client::{json_body, path_segment, ChefClient};
use crate::error::Result;
use crate::types::{User, UserList, UserResult};
use reqwest::Method;
use tracing::{debug, info};

const USERS: &str = "users";

/// Accessor for `users` on a Chef server.
///
/// Every method is a single request/response exchange; the service holds no
/// state besides the client it was built from.
#[derive(Clone)]
pub struct UserService {
    client: ChefClient,
}

impl UserService {
    pub fn new(client: ChefClient) -> Self {
        Self { client }
    }

    /// List users as a map of name to resource URI.
    pub async fn list(&self) -> Result<UserList> {
        debug!("Listing users");
        let users: UserList = self.client.request_json(Method::GET, USERS, None).await?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Get a single user by name.
    pub async fn get(&self, name: &str) -> Result<User> {
        let path = user_path(name)?;
        debug!(name = %name, path = %path, "Fetching user");
        self.client.request_json(Method::GET, &path, None).await
    }

    /// Create a user. The body is encoded before anything is sent.
    pub async fn create(&self, user: &User) -> Result<UserResult> {
        let body = json_body(user)?;
        let result: UserResult = self
            .client
            .request_json(Method::POST, USERS, Some(body))
            .await?;

        info!(name = %user.name, uri = %result.uri, "Created user");
        Ok(result)
    }

    /// Replace the user named `user.name` with `user`.
    pub async fn update(&self, user: &User) -> Result<User> {
        let path = user_path(&user.name)?;
        let body = json_body(user)?;
        debug!(name = %user.name, path = %path, "Updating user");
        self.client.request_json(Method::PUT, &path, Some(body)).await
    }

    /// Delete a user by name.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let path = user_path(name)?;
        self.client.request_discard(Method::DELETE, &path, None).await?;

        info!(name = %name, "Deleted user");
        Ok(())
    }
}

fn user_path(name: &str) -> Result<String> {
    Ok(format!("{}/{}", USERS, path_segment(name)?))
}
