use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/wine-store.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        name
    );
    let rows = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;
    Ok(!rows.is_empty())
}

/// Ensure required tables exist (minimal schema bootstrap)
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    // a001_wine
    if !table_exists(conn, "a001_wine").await? {
        tracing::info!("Creating a001_wine table");
        let create_wine_table_sql = r#"
            CREATE TABLE a001_wine (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                price REAL,
                sale INTEGER NOT NULL DEFAULT 0,
                sale_price REAL,
                description TEXT,
                short_description TEXT,
                image_url TEXT,
                wine_type TEXT NOT NULL DEFAULT 'OTHER',
                stock_status TEXT NOT NULL DEFAULT 'OUT_OF_STOCK',
                stock_quantity INTEGER,
                grape_variety TEXT,
                production_year INTEGER,
                alcohol TEXT,
                flavor TEXT,
                quality_level TEXT,
                edition TEXT,
                rating REAL,
                recommended_dishes TEXT NOT NULL DEFAULT '[]',
                tags TEXT NOT NULL DEFAULT '[]',
                featured INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_wine_table_sql.to_string(),
        ))
        .await?;
    }

    // a002_event
    if !table_exists(conn, "a002_event").await? {
        tracing::info!("Creating a002_event table");
        let create_event_table_sql = r#"
            CREATE TABLE a002_event (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                description TEXT,
                event_date TEXT NOT NULL,
                event_time TEXT,
                location TEXT,
                price_per_person REAL NOT NULL DEFAULT 0,
                total_spots INTEGER NOT NULL,
                booked_spots INTEGER NOT NULL DEFAULT 0,
                category TEXT NOT NULL DEFAULT 'OTHER',
                image_url TEXT,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_event_table_sql.to_string(),
        ))
        .await?;
    }

    // a003_booking
    if !table_exists(conn, "a003_booking").await? {
        tracing::info!("Creating a003_booking table");
        let create_booking_table_sql = r#"
            CREATE TABLE a003_booking (
                id TEXT PRIMARY KEY NOT NULL,
                event_ref TEXT NOT NULL,
                customer_name TEXT NOT NULL,
                customer_email TEXT NOT NULL,
                customer_phone TEXT,
                guests_count INTEGER NOT NULL,
                total_price REAL NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'PENDING',
                created_at TEXT
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_booking_table_sql.to_string(),
        ))
        .await?;

        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "CREATE INDEX idx_a003_booking_event_ref ON a003_booking(event_ref);".to_string(),
        ))
        .await?;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "CREATE INDEX idx_a003_booking_customer_email ON a003_booking(customer_email);"
                .to_string(),
        ))
        .await?;
    }

    Ok(())
}

/// Инициализация общей тестовой БД (process-wide, один раз).
/// Каждый тест работает со своими slug'ами, поэтому параллельный
/// запуск тестов не конфликтует по данным.
#[cfg(test)]
pub async fn ensure_test_database() {
    static INIT: tokio::sync::OnceCell<()> = tokio::sync::OnceCell::const_new();
    INIT.get_or_init(|| async {
        let path = std::env::temp_dir().join(format!("wine-store-test-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let path_str = path.to_string_lossy().into_owned();
        initialize_database(Some(&path_str))
            .await
            .expect("test database init failed");
    })
    .await;
}
