//! Persistence seam for birthday records.
//!
//! The registry only needs exact-match and full-scan access plus atomic
//! single-record writes, so any document or relational store fits behind
//! [`BirthdayStore`]. [`MemoryBirthdayStore`] backs tests and local runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use eyre::Result;
use tokio::sync::RwLock;

use crate::models::{BirthdayRecord, DayMonth, MemberId};

#[async_trait]
pub trait BirthdayStore: Send + Sync {
    async fn find_one(&self, member: MemberId) -> Result<Option<BirthdayRecord>>;

    async fn find_by_date(&self, date: DayMonth) -> Result<Vec<BirthdayRecord>>;

    async fn find_all(&self) -> Result<Vec<BirthdayRecord>>;

    /// Insert only if no record exists for the member. Returns `false` on conflict.
    async fn insert(&self, record: &BirthdayRecord) -> Result<bool>;

    async fn upsert(&self, record: &BirthdayRecord) -> Result<BirthdayRecord>;

    /// Delete the member's record, returning it if one existed.
    async fn delete(&self, member: MemberId) -> Result<Option<BirthdayRecord>>;
}

#[derive(Debug, Default)]
pub struct MemoryBirthdayStore {
    records: RwLock<BTreeMap<MemberId, BirthdayRecord>>,
}

impl MemoryBirthdayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl BirthdayStore for MemoryBirthdayStore {
    async fn find_one(&self, member: MemberId) -> Result<Option<BirthdayRecord>> {
        Ok(self.records.read().await.get(&member).cloned())
    }

    async fn find_by_date(&self, date: DayMonth) -> Result<Vec<BirthdayRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|record| record.date == date)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<BirthdayRecord>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn insert(&self, record: &BirthdayRecord) -> Result<bool> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.member) {
            return Ok(false);
        }
        records.insert(record.member, record.clone());
        Ok(true)
    }

    async fn upsert(&self, record: &BirthdayRecord) -> Result<BirthdayRecord> {
        self.records
            .write()
            .await
            .insert(record.member, record.clone());
        Ok(record.clone())
    }

    async fn delete(&self, member: MemberId) -> Result<Option<BirthdayRecord>> {
        Ok(self.records.write().await.remove(&member))
    }
}
