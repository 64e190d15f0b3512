use chrono::{DateTime, Utc};
use cumplebot_core::models::{BirthdayRecord, DayMonth, MemberId, Month};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBirthday {
    pub user_id: i64,
    pub display_name: String,
    pub day: i16,
    pub month: i16,
    pub updated_at: DateTime<Utc>,
}

impl DbBirthday {
    pub fn user_id(member: MemberId) -> i64 {
        // Discord snowflakes fit in 63 bits.
        member.0 as i64
    }

    pub fn into_record(self) -> Result<BirthdayRecord> {
        let month = u8::try_from(self.month)
            .ok()
            .and_then(Month::from_number)
            .ok_or_else(|| eyre!("stored month {} is out of range", self.month))?;
        let day = u8::try_from(self.day)
            .map_err(|_| eyre!("stored day {} is out of range", self.day))?;
        let date = DayMonth::new(day, month)
            .map_err(|e| eyre!("stored birthday for {} is invalid: {}", self.user_id, e))?;

        Ok(BirthdayRecord {
            member: MemberId(self.user_id as u64),
            display_name: self.display_name,
            date,
        })
    }
}
