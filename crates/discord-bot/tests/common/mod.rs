#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cumplebot_core::{registry::Registry, store::MemoryBirthdayStore};
use cumplebot_discord_bot::{
    client::{ChatClient, PinnedMessage},
    config::BotConfig,
    handlers::{HandlerContext, Invocation},
};
use eyre::{eyre, Result};
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

pub const GUILD: GuildId = GuildId(1);
pub const CHAT: ChannelId = ChannelId(10);
pub const ROSTER: ChannelId = ChannelId(20);
pub const REGISTRATION: ChannelId = ChannelId(30);
pub const ADMIN: UserId = UserId(900);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send {
        channel: ChannelId,
        message: MessageId,
        content: String,
    },
    Edit {
        channel: ChannelId,
        message: MessageId,
        content: String,
    },
    Delete {
        channel: ChannelId,
        message: MessageId,
    },
    React {
        channel: ChannelId,
        message: MessageId,
        emoji: String,
    },
    Pin {
        channel: ChannelId,
        message: MessageId,
    },
}

/// Records every call and keeps just enough state (pins, channels, admins)
/// to behave like a guild.
#[derive(Default)]
pub struct FakeChatClient {
    calls: Mutex<Vec<Call>>,
    pins: Mutex<HashMap<ChannelId, Vec<PinnedMessage>>>,
    channels: Mutex<HashSet<ChannelId>>,
    admins: Mutex<HashSet<UserId>>,
    missing_messages: Mutex<HashSet<MessageId>>,
    next_id: AtomicU64,
}

impl FakeChatClient {
    /// A guild with the chat, roster and registration channels, and one admin.
    pub fn guild() -> Arc<Self> {
        let client = Self::default();
        client.next_id.store(1000, Ordering::SeqCst);
        client
            .channels
            .lock()
            .unwrap()
            .extend([CHAT, ROSTER, REGISTRATION]);
        client.admins.lock().unwrap().insert(ADMIN);
        Arc::new(client)
    }

    pub fn remove_channel(&self, channel: ChannelId) {
        self.channels.lock().unwrap().remove(&channel);
    }

    /// Pin a message authored by someone else.
    pub fn pin_foreign(&self, channel: ChannelId, message: MessageId) {
        self.pins
            .lock()
            .unwrap()
            .entry(channel)
            .or_default()
            .insert(0, PinnedMessage { id: message, own: false });
    }

    /// Deleting `message` will fail as if it were already gone.
    pub fn already_deleted(&self, message: MessageId) {
        self.missing_messages.lock().unwrap().insert(message);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent_to(&self, channel: ChannelId) -> Vec<(MessageId, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send {
                    channel: c,
                    message,
                    content,
                } if c == channel => Some((message, content)),
                _ => None,
            })
            .collect()
    }

    pub fn edits_in(&self, channel: ChannelId) -> Vec<(MessageId, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Edit {
                    channel: c,
                    message,
                    content,
                } if c == channel => Some((message, content)),
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<MessageId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Delete { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn reactions_on(&self, message: MessageId) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::React {
                    message: m, emoji, ..
                } if m == message => Some(emoji),
                _ => None,
            })
            .collect()
    }

    pub fn pinned(&self, channel: ChannelId) -> Vec<PinnedMessage> {
        self.pins
            .lock()
            .unwrap()
            .get(&channel)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn ensure_channel(&self, channel: ChannelId) -> Result<()> {
        if self.channels.lock().unwrap().contains(&channel) {
            Ok(())
        } else {
            Err(eyre!("Unknown Channel"))
        }
    }
}

#[async_trait]
impl ChatClient for FakeChatClient {
    async fn resolve_channel(&self, guild: GuildId, channel: ChannelId) -> Result<bool> {
        Ok(guild == GUILD && self.channels.lock().unwrap().contains(&channel))
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<MessageId> {
        self.ensure_channel(channel)?;
        let message = MessageId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.record(Call::Send {
            channel,
            message,
            content: content.to_string(),
        });
        Ok(message)
    }

    async fn edit_message(&self, channel: ChannelId, message: MessageId, content: &str) -> Result<()> {
        self.ensure_channel(channel)?;
        self.record(Call::Edit {
            channel,
            message,
            content: content.to_string(),
        });
        Ok(())
    }

    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> Result<()> {
        if self.missing_messages.lock().unwrap().contains(&message) {
            return Err(eyre!("Unknown Message"));
        }
        self.record(Call::Delete { channel, message });
        Ok(())
    }

    async fn add_reaction(&self, channel: ChannelId, message: MessageId, emoji: &str) -> Result<()> {
        self.record(Call::React {
            channel,
            message,
            emoji: emoji.to_string(),
        });
        Ok(())
    }

    async fn pin_message(&self, channel: ChannelId, message: MessageId) -> Result<()> {
        self.ensure_channel(channel)?;
        self.pins
            .lock()
            .unwrap()
            .entry(channel)
            .or_default()
            .insert(0, PinnedMessage { id: message, own: true });
        self.record(Call::Pin { channel, message });
        Ok(())
    }

    async fn pinned_messages(&self, channel: ChannelId) -> Result<Vec<PinnedMessage>> {
        self.ensure_channel(channel)?;
        Ok(self.pinned(channel))
    }

    async fn is_privileged(&self, guild: GuildId, user: UserId) -> Result<bool> {
        Ok(guild == GUILD && self.admins.lock().unwrap().contains(&user))
    }
}

pub fn test_config() -> BotConfig {
    let vars: HashMap<&str, &str> = [
        ("DISCORD_TOKEN", "test_token"),
        ("DATABASE_URL", "postgres://localhost/cumplebot"),
        ("GUILD_ID", "1"),
        ("CHAT_CHANNEL_ID", "10"),
        ("ROSTER_CHANNEL_ID", "20"),
        ("REGISTRATION_CHANNEL_ID", "30"),
        ("EPHEMERAL_SECONDS", "10"),
    ]
    .into();
    BotConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
        .expect("test config should load")
}

pub fn ephemeral_delay() -> Duration {
    test_config().ephemeral_delay
}

pub fn memory_registry() -> Registry {
    Registry::new(Arc::new(MemoryBirthdayStore::new()))
}

pub fn context(client: Arc<FakeChatClient>) -> HandlerContext {
    HandlerContext::new(test_config(), client, memory_registry())
}

pub fn invocation(author: UserId, author_name: &str, channel: ChannelId, message: u64) -> Invocation {
    Invocation {
        guild_id: GUILD,
        channel_id: channel,
        message_id: MessageId(message),
        author,
        author_name: author_name.to_string(),
        mentions: Vec::new(),
    }
}
