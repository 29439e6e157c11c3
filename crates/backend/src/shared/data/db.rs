use once_cell::sync::OnceCell;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Open the SQLite database and bootstrap the schema
///
/// Idempotent: a second call (e.g. from another test) is a no-op. Pass
/// ":memory:" for an in-memory database.
pub async fn initialize_database(db_path: &str) -> anyhow::Result<()> {
    if DB_CONN.get().is_some() {
        return Ok(());
    }

    let conn = if db_path == ":memory:" {
        // Single connection: every pooled handle of an in-memory SQLite
        // database would otherwise see its own empty database.
        let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
        options.max_connections(1);
        Database::connect(options).await?
    } else {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let absolute_path = if std::path::Path::new(db_path).is_absolute() {
            std::path::PathBuf::from(db_path)
        } else {
            std::env::current_dir()?.join(db_path)
        };
        // Normalize path separators and ensure proper URL form on Windows
        let normalized = absolute_path.to_string_lossy().replace('\\', "/");
        let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
        let prefix = if needs_leading_slash { "/" } else { "" };
        let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
        Database::connect(&db_url).await?
    };
    create_schema(&conn).await?;

    // A concurrent initializer may have won the race; its connection serves
    // the same schema, so the loser is simply dropped.
    let _ = DB_CONN.set(conn);
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN.get().expect("Database is not initialized")
}

/// Initialize a shared, file-backed database for the test suite.
///
/// Each `#[tokio::test]` runs on its own runtime, and a `:memory:` SQLite
/// database is destroyed when its creating runtime ends — so every test after
/// the first would see an empty database. A file on disk outlives those
/// runtimes, and the global `DB_CONN` still pins the whole suite to one shared
/// database. The file is removed once per process so each `cargo test` run
/// starts from a clean schema.
#[cfg(test)]
pub async fn initialize_test_database() {
    use std::sync::Once;

    const TEST_DB_PATH: &str = "target/db/test_backend.db";
    static CLEAN: Once = Once::new();

    CLEAN.call_once(|| {
        let _ = std::fs::remove_file(TEST_DB_PATH);
        let _ = std::fs::remove_file(format!("{TEST_DB_PATH}-wal"));
        let _ = std::fs::remove_file(format!("{TEST_DB_PATH}-shm"));
    });

    initialize_database(TEST_DB_PATH).await.unwrap();
}

/// Create every table and index the backend relies on (IF NOT EXISTS)
async fn create_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS a001_lead (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            name TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            source TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'new',
            temperature TEXT NOT NULL DEFAULT 'warm',
            score INTEGER NOT NULL DEFAULT 0,
            finance_status TEXT,
            vehicle_model TEXT,
            lost_reason TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        "CREATE INDEX IF NOT EXISTS idx_a001_lead_phone ON a001_lead (phone);",
        "CREATE INDEX IF NOT EXISTS idx_a001_lead_email ON a001_lead (email);",
        "CREATE INDEX IF NOT EXISTS idx_a001_lead_status ON a001_lead (status);",
        r#"
        CREATE TABLE IF NOT EXISTS a002_quotation (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            lead_id TEXT NOT NULL,
            vehicle_model TEXT NOT NULL,
            ex_showroom_price REAL NOT NULL,
            rto_pct REAL NOT NULL DEFAULT 0,
            insurance_pct REAL NOT NULL DEFAULT 0,
            accessories REAL NOT NULL DEFAULT 0,
            discount REAL NOT NULL DEFAULT 0,
            down_payment REAL NOT NULL DEFAULT 0,
            annual_rate_pct REAL NOT NULL DEFAULT 0,
            tenure_months INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        "CREATE INDEX IF NOT EXISTS idx_a002_quotation_lead ON a002_quotation (lead_id);",
        r#"
        CREATE TABLE IF NOT EXISTS sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            email TEXT,
            password_hash TEXT NOT NULL,
            full_name TEXT,
            role TEXT NOT NULL DEFAULT 'executive',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT,
            created_by TEXT
        );
        "#,
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
        "CREATE INDEX IF NOT EXISTS idx_sys_refresh_tokens_hash ON sys_refresh_tokens (token_hash);",
        r#"
        CREATE TABLE IF NOT EXISTS sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ];

    for sql in statements {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }

    tracing::info!("Database schema ready");
    Ok(())
}
