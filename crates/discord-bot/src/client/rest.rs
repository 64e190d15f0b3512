use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use serenity::{
    builder::ParseValue,
    http::Http,
    model::{
        channel::{Channel, ReactionType},
        id::{ChannelId, GuildId, MessageId, RoleId, UserId},
    },
};

use super::{ChatClient, PinnedMessage};

/// [`ChatClient`] over Discord's REST API.
#[derive(Clone)]
pub struct SerenityChatClient {
    http: Arc<Http>,
    bot_id: UserId,
}

impl SerenityChatClient {
    /// Connect with `token` and look up the bot's own user id.
    ///
    /// Fails when the credential is rejected, which is fatal at startup.
    pub async fn connect(token: &str) -> Result<Self> {
        let http = Arc::new(Http::new(token));
        let bot_id = http.get_current_user().await?.id;
        Ok(Self { http, bot_id })
    }

    pub fn bot_id(&self) -> UserId {
        self.bot_id
    }
}

#[async_trait]
impl ChatClient for SerenityChatClient {
    async fn resolve_channel(&self, guild: GuildId, channel: ChannelId) -> Result<bool> {
        match self.http.get_channel(channel.0).await? {
            Channel::Guild(channel) => Ok(channel.guild_id == guild),
            _ => Ok(false),
        }
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<MessageId> {
        // Only user mentions ping; @everyone, @here and roles stay inert.
        let message = channel
            .send_message(&self.http, |m| {
                m.content(content)
                    .allowed_mentions(|a| a.parse(ParseValue::Users))
            })
            .await?;
        Ok(message.id)
    }

    async fn edit_message(&self, channel: ChannelId, message: MessageId, content: &str) -> Result<()> {
        channel
            .edit_message(&self.http, message, |m| m.content(content))
            .await?;
        Ok(())
    }

    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> Result<()> {
        channel.delete_message(&self.http, message).await?;
        Ok(())
    }

    async fn add_reaction(&self, channel: ChannelId, message: MessageId, emoji: &str) -> Result<()> {
        channel
            .create_reaction(&self.http, message, ReactionType::Unicode(emoji.to_string()))
            .await?;
        Ok(())
    }

    async fn pin_message(&self, channel: ChannelId, message: MessageId) -> Result<()> {
        channel.pin(&self.http, message).await?;
        Ok(())
    }

    async fn pinned_messages(&self, channel: ChannelId) -> Result<Vec<PinnedMessage>> {
        let pins = channel.pins(&self.http).await?;
        Ok(pins
            .into_iter()
            .map(|message| PinnedMessage {
                id: message.id,
                own: message.author.id == self.bot_id,
            })
            .collect())
    }

    async fn is_privileged(&self, guild: GuildId, user: UserId) -> Result<bool> {
        let partial = self.http.get_guild(guild.0).await?;
        if partial.owner_id == user {
            return Ok(true);
        }

        let member = self.http.get_member(guild.0, user.0).await?;
        let roles = self.http.get_guild_roles(guild.0).await?;

        // The @everyone role shares the guild's id and applies to every member.
        let everyone = RoleId(guild.0);
        Ok(roles
            .iter()
            .filter(|role| role.id == everyone || member.roles.contains(&role.id))
            .any(|role| role.permissions.administrator()))
    }
}
