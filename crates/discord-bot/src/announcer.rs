//! The daily birthday announcer.
//!
//! Sleeps until the configured local time, announces every member whose
//! day-month matches today, schedules each announcement for deletion a day
//! later, refreshes the roster, then sleeps until the same time tomorrow.
//! It reads the registry but never mutates it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use cumplebot_core::{
    announcement::{self, TemplatePool},
    errors::{BirthdayError, BirthdayResult},
    models::{DayMonth, MemberId},
    registry::Registry,
    schedule::DailySchedule,
};
use serenity::model::id::{ChannelId, GuildId, MessageId};
use tracing::{error, info, warn};

use crate::{client::ChatClient, deletion::DeletionQueue, roster::RosterPublisher};

/// How long an announcement stays in the channel.
pub const ANNOUNCEMENT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// What one run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub announced: Vec<MemberId>,
    /// Matched, but the template pool ran out.
    pub dropped: Vec<MemberId>,
    /// Matched, but sending the message failed.
    pub failed: Vec<MemberId>,
    /// The announcement channel could not be resolved; nothing was sent.
    pub skipped: bool,
}

pub struct Announcer {
    client: Arc<dyn ChatClient>,
    registry: Registry,
    roster: RosterPublisher,
    deletions: DeletionQueue,
    templates: Arc<TemplatePool>,
    guild: GuildId,
    channel: ChannelId,
}

impl Announcer {
    pub fn new(
        client: Arc<dyn ChatClient>,
        registry: Registry,
        roster: RosterPublisher,
        deletions: DeletionQueue,
        templates: Arc<TemplatePool>,
        guild: GuildId,
        channel: ChannelId,
    ) -> Self {
        Self {
            client,
            registry,
            roster,
            deletions,
            templates,
            guild,
            channel,
        }
    }

    /// Run forever, firing once per day at `schedule`'s local time.
    pub async fn run(self: Arc<Self>, schedule: DailySchedule) {
        self.run_with_clock(schedule, Utc::now).await
    }

    /// [`run`](Self::run) with an injectable wall clock. Each local date is
    /// fired at most once because the schedule only moves forward by dates.
    pub async fn run_with_clock<C>(self: Arc<Self>, mut schedule: DailySchedule, now: C)
    where
        C: Fn() -> DateTime<Utc> + Send,
    {
        info!(
            next = %schedule.next_fire(),
            date = %schedule.next_date(),
            timezone = %schedule.timezone(),
            "Daily announcer waiting for first run"
        );

        loop {
            let wait = (schedule.next_fire() - now())
                .to_std()
                .unwrap_or(Duration::ZERO);
            tokio::time::sleep(wait).await;

            let today = schedule.today();
            let report = self.run_once(today).await;
            info!(
                %today,
                announced = report.announced.len(),
                dropped = report.dropped.len(),
                failed = report.failed.len(),
                skipped = report.skipped,
                "Daily announcer run finished"
            );

            let next = schedule.advance(now());
            info!(%next, "Next announcer run scheduled");
        }
    }

    /// Announce everyone celebrating on `today`, then refresh the roster.
    pub async fn run_once(&self, today: DayMonth) -> RunReport {
        let mut report = RunReport::default();

        if !self.channel_available().await {
            warn!(channel = self.channel.0, "Announcement channel not found; skipping today's run");
            report.skipped = true;
        } else {
            match self.registry.celebrating_on(today).await {
                Ok(records) => {
                    let members: Vec<MemberId> = records.iter().map(|r| r.member).collect();
                    let (assigned, dropped) = {
                        let mut rng = rand::thread_rng();
                        let (assigned, dropped) =
                            announcement::assign(&self.templates, &members, &mut rng);
                        (assigned, dropped.to_vec())
                    };

                    if !dropped.is_empty() {
                        warn!(
                            dropped = dropped.len(),
                            pool = self.templates.len(),
                            "More birthdays than announcement templates; extra members not announced"
                        );
                    }
                    report.dropped = dropped;

                    for (member, text) in assigned {
                        match self.send(&text).await {
                            Ok(_) => report.announced.push(member),
                            Err(e) => {
                                error!(member = %member, "Failed to send announcement: {}", e);
                                report.failed.push(member);
                            }
                        }
                    }
                }
                Err(e) => error!("Could not read today's birthdays: {}", e),
            }
        }

        self.roster.refresh_logged(&self.registry).await;
        report
    }

    /// Announce `member` right away, outside the daily schedule.
    pub async fn announce_now(&self, member: MemberId) -> BirthdayResult<MessageId> {
        if !self.channel_available().await {
            return Err(BirthdayError::ChannelUnavailable(format!(
                "announcement channel {}",
                self.channel.0
            )));
        }

        let text = {
            let mut rng = rand::thread_rng();
            self.templates.announce(member, &mut rng)
        }
        .ok_or_else(|| BirthdayError::Validation("no announcement templates".to_string()))?;

        let message = self.send(&text).await?;
        info!(member = %member, "Belated announcement sent");
        Ok(message)
    }

    async fn send(&self, text: &str) -> eyre::Result<MessageId> {
        let message = self.client.send_message(self.channel, text).await?;
        self.deletions.schedule(self.channel, message, ANNOUNCEMENT_TTL);
        Ok(message)
    }

    async fn channel_available(&self) -> bool {
        self.client
            .resolve_channel(self.guild, self.channel)
            .await
            .unwrap_or_else(|e| {
                warn!(channel = self.channel.0, "Announcement channel lookup failed: {}", e);
                false
            })
    }
}
