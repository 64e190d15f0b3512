//! The birthday registry.
//!
//! Owns the mapping from member to (display name, day-month date). The
//! registry never talks to the chat platform; callers re-render the roster
//! after a successful mutation.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{BirthdayError, BirthdayResult};
use crate::models::{Actor, BirthdayRecord, DayMonth, MemberId};
use crate::store::BirthdayStore;

/// Longest display name accepted, in characters. Matches Discord's nickname limit.
pub const MAX_DISPLAY_NAME_CHARS: usize = 32;

/// What happens when a non-privileged member registers a second time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReregistrationPolicy {
    /// Overwrite the existing record.
    #[default]
    Upsert,
    /// Refuse with [`BirthdayError::AlreadyRegistered`]. Only admins can correct a record.
    Reject,
}

impl FromStr for ReregistrationPolicy {
    type Err = BirthdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upsert" => Ok(Self::Upsert),
            "reject" => Ok(Self::Reject),
            other => Err(BirthdayError::Validation(format!(
                "unknown re-registration policy '{other}'"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct Registry {
    store: Arc<dyn BirthdayStore>,
    policy: ReregistrationPolicy,
}

impl Registry {
    pub fn new(store: Arc<dyn BirthdayStore>) -> Self {
        Self {
            store,
            policy: ReregistrationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ReregistrationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register or update `target`'s birthday.
    ///
    /// Privileged actors always upsert and may target any member. Other
    /// members may only register themselves; whether they may overwrite an
    /// existing record depends on the [`ReregistrationPolicy`].
    pub async fn register(
        &self,
        actor: &Actor,
        target: MemberId,
        display_name: &str,
        date: &str,
    ) -> BirthdayResult<BirthdayRecord> {
        let date = DayMonth::parse(date)?;

        let display_name = validate_display_name(display_name)?;

        if !actor.can_manage(target) {
            return Err(BirthdayError::Permission(
                "only administrators can register birthdays for other members".to_string(),
            ));
        }

        let record = BirthdayRecord {
            member: target,
            display_name: display_name.to_string(),
            date,
        };

        if !actor.privileged && self.policy == ReregistrationPolicy::Reject {
            if !self.store.insert(&record).await? {
                return Err(BirthdayError::AlreadyRegistered(target.mention()));
            }
            info!(member = %target, date = %date, "Birthday registered");
            return Ok(record);
        }

        let record = self.store.upsert(&record).await?;
        info!(member = %target, date = %date, actor = %actor.member, "Birthday saved");
        Ok(record)
    }

    /// Remove `target`'s birthday, returning the removed record.
    pub async fn remove(&self, actor: &Actor, target: MemberId) -> BirthdayResult<BirthdayRecord> {
        if !actor.can_manage(target) {
            return Err(BirthdayError::Permission(
                "only administrators can remove other members' birthdays".to_string(),
            ));
        }

        let removed = self
            .store
            .delete(target)
            .await?
            .ok_or_else(|| BirthdayError::NotFound(target.mention()))?;

        info!(member = %target, actor = %actor.member, "Birthday removed");
        Ok(removed)
    }

    pub async fn get(&self, member: MemberId) -> BirthdayResult<Option<BirthdayRecord>> {
        Ok(self.store.find_one(member).await?)
    }

    /// Every record, in no particular order.
    pub async fn list_all(&self) -> BirthdayResult<Vec<BirthdayRecord>> {
        Ok(self.store.find_all().await?)
    }

    /// Records whose day and month equal `date`. Years never take part.
    pub async fn celebrating_on(&self, date: DayMonth) -> BirthdayResult<Vec<BirthdayRecord>> {
        let mut records = self.store.find_by_date(date).await?;
        records.sort_by_key(|record| record.member);
        Ok(records)
    }
}

/// Trim `name` and check it is safe to echo into the roster and replies:
/// one line, no mentions, and short enough to keep the roster postable.
fn validate_display_name(name: &str) -> BirthdayResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BirthdayError::Validation("display name is empty".to_string()));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(BirthdayError::Validation(format!(
            "display name is longer than {MAX_DISPLAY_NAME_CHARS} characters"
        )));
    }
    if name.contains('@') || name.chars().any(char::is_control) {
        return Err(BirthdayError::Validation(
            "display name cannot contain mentions or line breaks".to_string(),
        ));
    }
    Ok(name)
}
