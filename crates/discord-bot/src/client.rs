//! The chat-platform capability the bot's components are built on.
//!
//! Everything that talks to Discord goes through [`ChatClient`], which is
//! constructed once at startup and handed to the registry handlers, the
//! roster publisher and the announcer.

use async_trait::async_trait;
use eyre::Result;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

pub mod rest;

pub use rest::SerenityChatClient;

/// A message currently pinned in a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedMessage {
    pub id: MessageId,
    /// Authored by this bot, and therefore editable by it.
    pub own: bool,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Whether `channel` exists and belongs to `guild`.
    async fn resolve_channel(&self, guild: GuildId, channel: ChannelId) -> Result<bool>;

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<MessageId>;

    async fn edit_message(&self, channel: ChannelId, message: MessageId, content: &str) -> Result<()>;

    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> Result<()>;

    async fn add_reaction(&self, channel: ChannelId, message: MessageId, emoji: &str) -> Result<()>;

    async fn pin_message(&self, channel: ChannelId, message: MessageId) -> Result<()>;

    /// Pinned messages, newest first.
    async fn pinned_messages(&self, channel: ChannelId) -> Result<Vec<PinnedMessage>>;

    /// Whether `user` holds administrator capability in `guild`.
    async fn is_privileged(&self, guild: GuildId, user: UserId) -> Result<bool>;
}
