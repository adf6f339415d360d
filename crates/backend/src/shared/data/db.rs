use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Schema bootstrap, applied on every start
const SCHEMA: &[(&str, &str)] = &[
    (
        "a001_room_type",
        r#"
        CREATE TABLE IF NOT EXISTS a001_room_type (
            id INTEGER PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            adults INTEGER NOT NULL DEFAULT 0,
            children INTEGER NOT NULL DEFAULT 0,
            guests INTEGER NOT NULL DEFAULT 0,
            description TEXT NOT NULL DEFAULT '',
            size_json TEXT NOT NULL DEFAULT '{}',
            amenities_json TEXT NOT NULL DEFAULT '[]',
            available_rooms INTEGER NOT NULL DEFAULT 0,
            availability_status TEXT NOT NULL DEFAULT 'available',
            pricing_json TEXT NOT NULL DEFAULT '{}',
            package_name TEXT,
            refund_policy TEXT,
            banner_image TEXT NOT NULL DEFAULT '',
            check_in_date TEXT,
            check_out_date TEXT,
            room_numbers_json TEXT NOT NULL DEFAULT '[]',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a002_booking",
        r#"
        CREATE TABLE IF NOT EXISTS a002_booking (
            booking_id INTEGER PRIMARY KEY NOT NULL,
            room_id INTEGER NOT NULL,
            room_no INTEGER,
            room_name TEXT NOT NULL DEFAULT '',
            total_price REAL NOT NULL DEFAULT 0,
            currency TEXT NOT NULL DEFAULT 'INR',
            booking_date TEXT NOT NULL,
            status TEXT NOT NULL,
            check_in_date TEXT,
            check_out_date TEXT,
            user_name TEXT NOT NULL,
            email TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "sys_users",
        r#"
        CREATE TABLE IF NOT EXISTS sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            email TEXT,
            password_hash TEXT NOT NULL,
            full_name TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT
        );
        "#,
    ),
    (
        "sys_refresh_tokens",
        r#"
        CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            token_hash TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        );
        "#,
    ),
    (
        "sys_settings",
        r#"
        CREATE TABLE IF NOT EXISTS sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
];

/// Open the SQLite file (created if missing) and bootstrap the schema
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let conn = Database::connect(sqlite_url(&absolute_path)).await?;

    for (table, ddl) in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await
        .map_err(|e| anyhow::anyhow!("failed to create table {}: {}", table, e))?;
    }
    tracing::info!(
        "Database ready at {} ({} tables)",
        absolute_path.display(),
        SCHEMA.len()
    );

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Connection URL; Windows drive paths get a leading slash
fn sqlite_url(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url() {
        assert_eq!(
            sqlite_url(Path::new("/var/db/app.db")),
            "sqlite:///var/db/app.db?mode=rwc"
        );
        assert_eq!(
            sqlite_url(Path::new("C:\\data\\app.db")),
            "sqlite:///C:/data/app.db?mode=rwc"
        );
    }

    #[test]
    fn test_schema_covers_all_tables() {
        let names: Vec<&str> = SCHEMA.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "a001_room_type",
                "a002_booking",
                "sys_users",
                "sys_refresh_tokens",
                "sys_settings"
            ]
        );
        assert!(SCHEMA.iter().all(|(_, ddl)| ddl.contains("IF NOT EXISTS")));
    }
}
