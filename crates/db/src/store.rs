use async_trait::async_trait;
use cumplebot_core::{
    models::{BirthdayRecord, DayMonth, MemberId},
    store::BirthdayStore,
};
use eyre::Result;

use crate::{models::DbBirthday, repositories::birthday, DbPool};

/// [`BirthdayStore`] backed by the `birthdays` Postgres table.
#[derive(Debug, Clone)]
pub struct PgBirthdayStore {
    pool: DbPool,
}

impl PgBirthdayStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn date_columns(date: DayMonth) -> (i16, i16) {
    (i16::from(date.day()), i16::from(date.month().number()))
}

fn into_records(rows: Vec<DbBirthday>) -> Result<Vec<BirthdayRecord>> {
    rows.into_iter().map(DbBirthday::into_record).collect()
}

#[async_trait]
impl BirthdayStore for PgBirthdayStore {
    async fn find_one(&self, member: MemberId) -> Result<Option<BirthdayRecord>> {
        birthday::get_birthday_by_user_id(&self.pool, DbBirthday::user_id(member))
            .await?
            .map(DbBirthday::into_record)
            .transpose()
    }

    async fn find_by_date(&self, date: DayMonth) -> Result<Vec<BirthdayRecord>> {
        let (day, month) = date_columns(date);
        into_records(birthday::get_birthdays_by_date(&self.pool, day, month).await?)
    }

    async fn find_all(&self) -> Result<Vec<BirthdayRecord>> {
        into_records(birthday::get_all_birthdays(&self.pool).await?)
    }

    async fn insert(&self, record: &BirthdayRecord) -> Result<bool> {
        let (day, month) = date_columns(record.date);
        let inserted = birthday::insert_birthday(
            &self.pool,
            DbBirthday::user_id(record.member),
            &record.display_name,
            day,
            month,
        )
        .await?;

        Ok(inserted.is_some())
    }

    async fn upsert(&self, record: &BirthdayRecord) -> Result<BirthdayRecord> {
        let (day, month) = date_columns(record.date);
        birthday::upsert_birthday(
            &self.pool,
            DbBirthday::user_id(record.member),
            &record.display_name,
            day,
            month,
        )
        .await?
        .into_record()
    }

    async fn delete(&self, member: MemberId) -> Result<Option<BirthdayRecord>> {
        birthday::delete_birthday(&self.pool, DbBirthday::user_id(member))
            .await?
            .map(DbBirthday::into_record)
            .transpose()
    }
}
