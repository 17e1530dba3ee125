//! Subcommand implementations.

use crate::UserFields;
use anyhow::Context;
use chef_api::{ChefClient, User};
use serde::Serialize;
use std::collections::BTreeMap;

pub async fn list(client: &ChefClient) -> anyhow::Result<()> {
    let users = client.users().list().await?;
    // Sorted for stable output
    let users: BTreeMap<_, _> = users.into_iter().collect();
    print_json(&users)
}

pub async fn get(client: &ChefClient, name: &str) -> anyhow::Result<()> {
    let user = client
        .users()
        .get(name)
        .await
        .with_context(|| format!("failed to fetch user {}", name))?;
    print_json(&user)
}

pub async fn create(client: &ChefClient, fields: UserFields) -> anyhow::Result<()> {
    let user = fields.into_user()?;
    let result = client
        .users()
        .create(&user)
        .await
        .with_context(|| format!("failed to create user {}", user.name))?;
    print_json(&result)
}

pub async fn update(client: &ChefClient, fields: UserFields) -> anyhow::Result<()> {
    let user = fields.into_user()?;
    let updated = client
        .users()
        .update(&user)
        .await
        .with_context(|| format!("failed to update user {}", user.name))?;
    print_json(&updated)
}

pub async fn delete(client: &ChefClient, name: &str) -> anyhow::Result<()> {
    client
        .users()
        .delete(name)
        .await
        .with_context(|| format!("failed to delete user {}", name))?;
    println!("Deleted user {}", name);
    Ok(())
}

pub async fn authenticate(client: &ChefClient, name: &str, password: &str) -> anyhow::Result<()> {
    let result = client.authenticate().authenticate(name, password).await?;
    print_json(&result.user)
}

impl UserFields {
    /// Build the full record sent to the server. Unset fields go out empty.
    pub fn into_user(self) -> anyhow::Result<User> {
        let public_key = match self.public_key {
            Some(path) => std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read public key {}", path.display()))?,
            None => String::new(),
        };

        Ok(User {
            name: self.name,
            display_name: self.display_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            middle_name: self.middle_name.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            public_key,
        })
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
