use anyhow::Result;

/// Create the `admin` account when the user table is empty
pub async fn ensure_admin_user_exists(default_password: &str) -> Result<()> {
    use crate::system::users::{repository, service};
    use contracts::system::users::CreateUserDto;

    let count = repository::count_users().await?;
    if count > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");

    let admin_dto = CreateUserDto {
        username: "admin".to_string(),
        password: default_password.to_string(),
        email: None,
        full_name: Some("Administrator".to_string()),
        is_admin: true,
    };

    let admin_id = service::create(admin_dto).await?;

    tracing::warn!("===============================================");
    tracing::warn!("  Default admin user created");
    tracing::warn!("  Username: admin");
    tracing::warn!("  User ID: {}", admin_id);
    tracing::warn!("  Change the password set in config.toml [auth]");
    tracing::warn!("===============================================");

    Ok(())
}
