//! Prefix command parsing.
//!
//! Turns raw message text into a [`Command`]. Parsing is pure; permission
//! and channel checks happen in the handlers.

use cumplebot_core::errors::{BirthdayError, BirthdayResult};
use serenity::model::id::UserId;

pub mod birthday;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `addbirthday [mention] [display name…] <DD-MM>`
    AddBirthday {
        target: Option<UserId>,
        display_name: Option<String>,
        date: String,
    },
    /// `removebirthday [mention]`
    RemoveBirthday { target: Option<UserId> },
    /// `belatedbirthday <mention>`
    BelatedBirthday { target: UserId },
    /// `status`
    Status,
}

impl Command {
    /// Whether the command is restricted to the registration channel.
    pub fn is_registration(&self) -> bool {
        matches!(self, Self::AddBirthday { .. } | Self::RemoveBirthday { .. })
    }
}

/// Parse `content` if it starts with `prefix`.
///
/// Returns `None` for messages that are not commands for this bot, and
/// `Some(Err(..))` for known commands with bad arguments.
pub fn parse(prefix: &str, content: &str) -> Option<BirthdayResult<Command>> {
    let body = content.trim().strip_prefix(prefix)?;
    let mut words = body.split_whitespace();
    let name = words.next()?.to_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match name.as_str() {
        "addbirthday" => birthday::parse_add(&args),
        "removebirthday" => birthday::parse_remove(&args),
        "belatedbirthday" => birthday::parse_belated(&args),
        "status" => Ok(Command::Status),
        _ => return None,
    };

    Some(command)
}

/// Parse a user mention (`<@123>` or `<@!123>`).
pub fn parse_mention(word: &str) -> Option<UserId> {
    serenity::utils::parse_username(word).map(UserId)
}

pub(crate) fn usage(text: &str) -> BirthdayError {
    BirthdayError::Validation(format!("uso: {text}"))
}
