use crate::models::DbBirthday;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_birthday_by_user_id(
    pool: &Pool<Postgres>,
    user_id: i64,
) -> Result<Option<DbBirthday>> {
    let birthday = sqlx::query_as::<_, DbBirthday>(
        r#"
        SELECT user_id, display_name, day, month, updated_at
        FROM birthdays
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(birthday)
}

pub async fn get_birthdays_by_date(
    pool: &Pool<Postgres>,
    day: i16,
    month: i16,
) -> Result<Vec<DbBirthday>> {
    let birthdays = sqlx::query_as::<_, DbBirthday>(
        r#"
        SELECT user_id, display_name, day, month, updated_at
        FROM birthdays
        WHERE day = $1 AND month = $2
        "#,
    )
    .bind(day)
    .bind(month)
    .fetch_all(pool)
    .await?;

    Ok(birthdays)
}

pub async fn get_all_birthdays(pool: &Pool<Postgres>) -> Result<Vec<DbBirthday>> {
    let birthdays = sqlx::query_as::<_, DbBirthday>(
        r#"
        SELECT user_id, display_name, day, month, updated_at
        FROM birthdays
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(birthdays)
}

/// Insert a birthday unless the user already has one. Returns `None` on conflict.
pub async fn insert_birthday(
    pool: &Pool<Postgres>,
    user_id: i64,
    display_name: &str,
    day: i16,
    month: i16,
) -> Result<Option<DbBirthday>> {
    let now = Utc::now();

    let birthday = sqlx::query_as::<_, DbBirthday>(
        r#"
        INSERT INTO birthdays (user_id, display_name, day, month, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id) DO NOTHING
        RETURNING user_id, display_name, day, month, updated_at
        "#,
    )
    .bind(user_id)
    .bind(display_name)
    .bind(day)
    .bind(month)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(birthday)
}

pub async fn upsert_birthday(
    pool: &Pool<Postgres>,
    user_id: i64,
    display_name: &str,
    day: i16,
    month: i16,
) -> Result<DbBirthday> {
    let now = Utc::now();

    let birthday = sqlx::query_as::<_, DbBirthday>(
        r#"
        INSERT INTO birthdays (user_id, display_name, day, month, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id)
        DO UPDATE SET display_name = $2, day = $3, month = $4, updated_at = $5
        RETURNING user_id, display_name, day, month, updated_at
        "#,
    )
    .bind(user_id)
    .bind(display_name)
    .bind(day)
    .bind(month)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(birthday)
}

pub async fn delete_birthday(pool: &Pool<Postgres>, user_id: i64) -> Result<Option<DbBirthday>> {
    let birthday = sqlx::query_as::<_, DbBirthday>(
        r#"
        DELETE FROM birthdays
        WHERE user_id = $1
        RETURNING user_id, display_name, day, month, updated_at
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(birthday)
}
