use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // One row per member; the primary key gives upsert its atomicity.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS birthdays (
            user_id BIGINT PRIMARY KEY,
            display_name TEXT NOT NULL,
            day SMALLINT NOT NULL,
            month SMALLINT NOT NULL,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day CHECK (day BETWEEN 1 AND 31),
            CONSTRAINT valid_month CHECK (month BETWEEN 1 AND 12)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_birthdays_month_day ON birthdays(month, day);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
