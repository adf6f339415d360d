use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use contracts::system::users::{CreateUserDto, User};

use super::repository;
use crate::system::auth::password;

/// Active account built from the create form
fn new_user(dto: &CreateUserDto, id: String, now: DateTime<Utc>) -> User {
    let now = now.to_rfc3339();
    User {
        id,
        username: dto.username.trim().to_string(),
        email: dto.email.clone().filter(|e| !e.trim().is_empty()),
        full_name: dto.full_name.clone().filter(|n| !n.trim().is_empty()),
        is_active: true,
        is_admin: dto.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    }
}

/// Create a staff account, returns its id
pub async fn create(dto: CreateUserDto) -> Result<String> {
    if let Err(e) = dto.validate() {
        bail!(e);
    }
    if repository::get_by_username(dto.username.trim()).await?.is_some() {
        bail!("Username '{}' is taken", dto.username.trim());
    }

    let user = new_user(&dto, uuid::Uuid::new_v4().to_string(), Utc::now());
    let password_hash = password::hash_password(&dto.password)?;
    repository::create_with_password(&user, &password_hash).await?;

    tracing::info!("User '{}' created (admin: {})", user.username, user.is_admin);
    Ok(user.id)
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

/// User for a correct username/password pair, `None` otherwise
///
/// Unknown names, inactive accounts and wrong passwords are indistinguishable
/// to the caller.
pub async fn verify_credentials(username: &str, password: &str) -> Result<Option<User>> {
    let Some(user) = repository::get_by_username(username.trim())
        .await?
        .filter(|u| u.is_active)
    else {
        return Ok(None);
    };

    let Some(hash) = repository::get_password_hash(&user.id).await? else {
        tracing::warn!("User '{}' has no password hash", user.username);
        return Ok(None);
    };
    if !password::verify_password(password, &hash)? {
        return Ok(None);
    }

    if let Err(e) = repository::update_last_login(&user.id).await {
        tracing::warn!("Failed to record login of {}: {:#}", user.username, e);
    }
    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_trims_and_drops_blank_optionals() {
        let dto = CreateUserDto {
            username: "  frontdesk ".into(),
            password: "secret".into(),
            email: Some("  ".into()),
            full_name: Some("Front Desk".into()),
            is_admin: false,
        };
        let now = Utc::now();
        let user = new_user(&dto, "u1".into(), now);
        assert_eq!(user.username, "frontdesk");
        assert_eq!(user.email, None);
        assert_eq!(user.full_name.as_deref(), Some("Front Desk"));
        assert!(user.is_active);
        assert_eq!(user.created_at, now.to_rfc3339());
    }
}
