use async_trait::async_trait;
use cumplebot_core::{
    models::{BirthdayRecord, DayMonth, MemberId},
    store::BirthdayStore,
};
use mockall::mock;

// Mock store for injecting persistence failures in tests
mock! {
    pub BirthdayStore {}

    #[async_trait]
    impl BirthdayStore for BirthdayStore {
        async fn find_one(&self, member: MemberId) -> eyre::Result<Option<BirthdayRecord>>;

        async fn find_by_date(&self, date: DayMonth) -> eyre::Result<Vec<BirthdayRecord>>;

        async fn find_all(&self) -> eyre::Result<Vec<BirthdayRecord>>;

        async fn insert(&self, record: &BirthdayRecord) -> eyre::Result<bool>;

        async fn upsert(&self, record: &BirthdayRecord) -> eyre::Result<BirthdayRecord>;

        async fn delete(&self, member: MemberId) -> eyre::Result<Option<BirthdayRecord>>;
    }
}
