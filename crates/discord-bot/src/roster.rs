//! Publishing the roster to its single pinned slot.

use std::sync::Arc;

use cumplebot_core::{
    errors::{BirthdayError, BirthdayResult},
    models::Locale,
    registry::Registry,
    roster,
};
use serenity::model::id::{ChannelId, GuildId, MessageId};
use tracing::{error, info, warn};

use crate::client::ChatClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The existing pinned roster was edited in place.
    Edited(MessageId),
    /// No roster existed; a new message was sent and pinned.
    Created(MessageId),
}

#[derive(Clone)]
pub struct RosterPublisher {
    client: Arc<dyn ChatClient>,
    guild: GuildId,
    channel: ChannelId,
    locale: Locale,
}

impl RosterPublisher {
    pub fn new(client: Arc<dyn ChatClient>, guild: GuildId, channel: ChannelId, locale: Locale) -> Self {
        Self {
            client,
            guild,
            channel,
            locale,
        }
    }

    /// Write `text` into the roster slot: edit the bot's pinned message if
    /// there is one, otherwise send a new message and pin it.
    pub async fn publish(&self, text: &str) -> BirthdayResult<PublishOutcome> {
        let resolved = self
            .client
            .resolve_channel(self.guild, self.channel)
            .await
            .unwrap_or_else(|e| {
                warn!(channel = self.channel.0, "Roster channel lookup failed: {}", e);
                false
            });
        if !resolved {
            return Err(BirthdayError::ChannelUnavailable(format!(
                "roster channel {}",
                self.channel.0
            )));
        }

        let pinned = self.client.pinned_messages(self.channel).await?;
        if let Some(slot) = pinned.into_iter().find(|pin| pin.own) {
            self.client.edit_message(self.channel, slot.id, text).await?;
            return Ok(PublishOutcome::Edited(slot.id));
        }

        let message = self.client.send_message(self.channel, text).await?;
        self.client.pin_message(self.channel, message).await?;
        info!(message = message.0, "Roster message created and pinned");
        Ok(PublishOutcome::Created(message))
    }

    /// Re-render the whole registry and publish it.
    pub async fn refresh(&self, registry: &Registry) -> BirthdayResult<PublishOutcome> {
        let records = registry.list_all().await?;
        let text = roster::render(&records, self.locale);
        self.publish(&text).await
    }

    /// [`refresh`](Self::refresh), logging instead of returning failures.
    pub async fn refresh_logged(&self, registry: &Registry) {
        match self.refresh(registry).await {
            Ok(outcome) => info!(?outcome, "Roster refreshed"),
            Err(BirthdayError::ChannelUnavailable(what)) => {
                warn!("Roster not published: {} could not be resolved", what)
            }
            Err(e) => error!("Roster refresh failed: {}", e),
        }
    }
}
