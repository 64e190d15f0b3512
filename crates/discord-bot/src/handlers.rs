use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use cumplebot_core::{announcement::TemplatePool, registry::Registry, schedule::DailySchedule};
use serenity::{
    async_trait,
    model::{channel::Message, gateway::Ready, id::{ChannelId, GuildId, MessageId, UserId}},
    prelude::*,
};
use tracing::{debug, info};

pub mod birthday;

use crate::{
    announcer::Announcer, client::ChatClient, commands, config::BotConfig,
    deletion::DeletionQueue, roster::RosterPublisher,
};

/// Main Discord handler that processes all events.
///
/// Parses prefix commands from guild messages and starts the daily
/// announcer the first time the gateway reports ready.
pub struct Handler {
    ctx: HandlerContext,
    announcer_started: AtomicBool,
}

impl Handler {
    /// Create a new handler
    pub fn new(ctx: HandlerContext) -> Self {
        Self {
            ctx,
            announcer_started: AtomicBool::new(false),
        }
    }

    /// Spawn the daily announcer unless one is already running. Returns
    /// whether this call started it.
    pub fn start_announcer(&self) -> bool {
        if self.announcer_started.swap(true, Ordering::SeqCst) {
            debug!("Announcer already running");
            return false;
        }

        let config = &self.ctx.config;
        let schedule = DailySchedule::starting_after(Utc::now(), config.announce_at, config.timezone);
        info!(next = %schedule.next_fire(), "Starting daily announcer");
        tokio::spawn(self.ctx.announcer.clone().run(schedule));
        true
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Handle ready events (when bot connects to Discord)
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        // Ready fires again after every reconnect; only the first one starts work.
        if self.start_announcer() {
            self.ctx.roster.refresh_logged(&self.ctx.registry).await;
        }
    }

    /// Handle prefix commands
    async fn message(&self, _ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(guild_id) = msg.guild_id else {
            return;
        };
        if guild_id != self.ctx.config.guild_id {
            debug!(guild = guild_id.0, "Ignoring message from another guild");
            return;
        }

        let Some(parsed) = commands::parse(self.ctx.config.command_prefix(), &msg.content) else {
            return;
        };
        info!(author = msg.author.id.0, "Received command: {}", msg.content);

        let invocation = Invocation::from_message(&msg, guild_id);
        birthday::dispatch(&self.ctx, &invocation, parsed).await;
    }
}

/// Who issued a command, and where.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub author: UserId,
    pub author_name: String,
    /// Mentioned users with their platform usernames.
    pub mentions: Vec<(UserId, String)>,
}

impl Invocation {
    pub fn from_message(msg: &Message, guild_id: GuildId) -> Self {
        Self {
            guild_id,
            channel_id: msg.channel_id,
            message_id: msg.id,
            author: msg.author.id,
            author_name: msg.author.name.clone(),
            mentions: msg
                .mentions
                .iter()
                .map(|user| (user.id, user.name.clone()))
                .collect(),
        }
    }

    /// Platform username for `user`, if it was mentioned or is the author.
    pub fn username_of(&self, user: UserId) -> Option<&str> {
        if user == self.author {
            return Some(&self.author_name);
        }
        self.mentions
            .iter()
            .find(|(id, _)| *id == user)
            .map(|(_, name)| name.as_str())
    }
}

/// Shared context for command handlers.
///
/// Built once at startup; every component receives the same chat client
/// rather than reaching for a global.
#[derive(Clone)]
pub struct HandlerContext {
    pub config: BotConfig,
    pub client: Arc<dyn ChatClient>,
    pub registry: Registry,
    pub roster: RosterPublisher,
    pub announcer: Arc<Announcer>,
    pub deletions: DeletionQueue,
}

impl HandlerContext {
    /// Wire up the publisher, announcer and deletion queue. Must be called
    /// inside a tokio runtime.
    pub fn new(config: BotConfig, client: Arc<dyn ChatClient>, registry: Registry) -> Self {
        let deletions = DeletionQueue::spawn(client.clone());
        let roster = RosterPublisher::new(
            client.clone(),
            config.guild_id,
            config.roster_channel_id,
            config.locale,
        );
        let announcer = Arc::new(Announcer::new(
            client.clone(),
            registry.clone(),
            roster.clone(),
            deletions.clone(),
            Arc::new(TemplatePool::for_locale(config.locale)),
            config.guild_id,
            config.chat_channel_id,
        ));

        Self {
            config,
            client,
            registry,
            roster,
            announcer,
            deletions,
        }
    }
}
