//! Chef Server API client
//!
//! Typed bindings for the `users` resource of a Chef server REST API.
//!
//! # Features
//!
//! - **Users**: list, get, create, update (whole-record replace) and delete
//! - **Authentication**: verify a user's password via `authenticate_user`
//! - **Pluggable transport**: plain HTTP by default, or any [`Transport`]
//!   (e.g. one that signs requests)
//!
//! # Example
//!
//! ```ignore
//! use chef_api::{ChefClient, ChefConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ChefConfig::new("https://chef.example.com").with_client_name("pivotal");
//!     let client = ChefClient::new(config)?;
//!
//!     let alice = client.users().get("alice").await?;
//!     println!("{} <{}>", alice.display_name, alice.email);
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod transport;
mod types;
mod users;

// Re-export main types
pub use client::{json_body, path_segment, ChefClient};
pub use error::{ChefApiError, Result};
pub use transport::{ApiResponse, HttpTransport, Transport};
pub use types::{
    AuthenticateRequest, AuthenticateResult, ChefConfig, User, UserList, UserResult,
    DEFAULT_CHEF_VERSION,
};

// Re-export resource accessors for direct use if needed
pub use auth::AuthenticateService;
pub use users::UserService;

// Re-export so callers can implement `Transport` without a direct reqwest dependency
pub use reqwest::{Method, StatusCode};
