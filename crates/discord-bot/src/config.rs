use std::env;
use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;
use cumplebot_core::{models::Locale, registry::ReregistrationPolicy};
use eyre::{eyre, Result};
use serenity::model::id::{ChannelId, GuildId};

const DEFAULT_TIMEZONE: &str = "America/Argentina/Buenos_Aires";
const DEFAULT_ANNOUNCE_AT: &str = "09:00";
const DEFAULT_EPHEMERAL_SECONDS: u64 = 10;

/// Configuration for the Discord bot.
///
/// All values come from environment variables; see [`BotConfig::from_env`].
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord bot token (required)
    pub token: String,
    /// Database connection URL (required)
    pub database_url: String,
    /// The one community this bot serves (required)
    pub guild_id: GuildId,
    /// Where birthday announcements are posted (required)
    pub chat_channel_id: ChannelId,
    /// Where the pinned roster lives (required)
    pub roster_channel_id: ChannelId,
    /// The only channel registration and removal commands are accepted in (required)
    pub registration_channel_id: ChannelId,
    /// Prefix for commands (defaults to "!")
    pub command_prefix: Option<String>,
    /// Zone "today" and the daily run time are evaluated in
    pub timezone: Tz,
    /// Local wall-clock time of the daily announcement run
    pub announce_at: NaiveTime,
    /// Language of the roster and announcements
    pub locale: Locale,
    /// How long command replies stay visible
    pub ephemeral_delay: Duration,
    /// Whether members may overwrite their own registration
    pub reregistration: ReregistrationPolicy,
}

impl BotConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| eyre!("{} environment variable not set", key))
        };
        let id = |key: &str| -> Result<u64> {
            required(key)?
                .trim()
                .parse::<u64>()
                .map_err(|_| eyre!("{} must be a valid u64", key))
        };

        let token = required("DISCORD_TOKEN")?;
        let database_url = required("DATABASE_URL")?;
        let guild_id = GuildId(id("GUILD_ID")?);
        let chat_channel_id = ChannelId(id("CHAT_CHANNEL_ID")?);
        let roster_channel_id = ChannelId(id("ROSTER_CHANNEL_ID")?);
        let registration_channel_id = ChannelId(id("REGISTRATION_CHANNEL_ID")?);

        let command_prefix = lookup("COMMAND_PREFIX").filter(|p| !p.trim().is_empty());

        let timezone_name = lookup("TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = timezone_name
            .parse::<Tz>()
            .map_err(|_| eyre!("TIMEZONE '{}' is not a known IANA zone", timezone_name))?;

        let announce_at_raw = lookup("ANNOUNCE_AT").unwrap_or_else(|| DEFAULT_ANNOUNCE_AT.to_string());
        let announce_at = NaiveTime::parse_from_str(announce_at_raw.trim(), "%H:%M")
            .map_err(|_| eyre!("ANNOUNCE_AT must be HH:MM, got '{}'", announce_at_raw))?;

        let locale = match lookup("ROSTER_LOCALE") {
            Some(value) => value.parse::<Locale>()?,
            None => Locale::default(),
        };

        let ephemeral_delay = lookup("EPHEMERAL_SECONDS")
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| eyre!("EPHEMERAL_SECONDS must be a whole number of seconds"))
            })
            .transpose()?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_EPHEMERAL_SECONDS));

        let reregistration = match lookup("REREGISTRATION") {
            Some(value) => value.parse::<ReregistrationPolicy>()?,
            None => ReregistrationPolicy::default(),
        };

        Ok(Self {
            token,
            database_url,
            guild_id,
            chat_channel_id,
            roster_channel_id,
            registration_channel_id,
            command_prefix,
            timezone,
            announce_at,
            locale,
            ephemeral_delay,
            reregistration,
        })
    }

    /// Get the command prefix (defaults to "!" if not set)
    pub fn command_prefix(&self) -> &str {
        self.command_prefix.as_deref().unwrap_or("!")
    }
}
