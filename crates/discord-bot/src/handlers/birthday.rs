use cumplebot_core::{
    errors::{BirthdayError, BirthdayResult},
    models::{Actor, MemberId},
};
use serenity::model::id::UserId;
use tracing::{error, warn};

use crate::commands::Command;
use crate::handlers::{HandlerContext, Invocation};

const SUCCESS_REACTION: &str = "✅";
const FAILURE_REACTION: &str = "❌";

/// Run a parsed command and answer in the invoking channel.
///
/// Confirmations are cleaned up after the configured delay. Errors are
/// answered with a reply and a failure reaction, and both the reply and
/// the command message are deleted after the same delay.
pub async fn dispatch(ctx: &HandlerContext, inv: &Invocation, parsed: BirthdayResult<Command>) {
    let result = match parsed {
        Ok(command) => handle_command(ctx, inv, command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(Some(confirmation)) => respond_success(ctx, inv, &confirmation).await,
        Ok(None) => {}
        Err(e) => respond_error(ctx, inv, &e).await,
    }
}

/// Returns the confirmation text to show, if any.
pub async fn handle_command(
    ctx: &HandlerContext,
    inv: &Invocation,
    command: Command,
) -> BirthdayResult<Option<String>> {
    if command.is_registration() && inv.channel_id != ctx.config.registration_channel_id {
        return Err(BirthdayError::Validation(format!(
            "Este comando solo se puede usar en <#{}>.",
            ctx.config.registration_channel_id.0
        )));
    }

    let confirmation = match command {
        Command::Status => {
            handle_status(ctx, inv).await?;
            return Ok(None);
        }
        Command::AddBirthday {
            target,
            display_name,
            date,
        } => {
            let actor = invoking_actor(ctx, inv).await;
            handle_add(ctx, inv, &actor, target, display_name, &date).await?
        }
        Command::RemoveBirthday { target } => {
            let actor = invoking_actor(ctx, inv).await;
            handle_remove(ctx, inv, &actor, target).await?
        }
        Command::BelatedBirthday { target } => {
            let actor = invoking_actor(ctx, inv).await;
            handle_belated(ctx, &actor, target).await?
        }
    };

    Ok(Some(confirmation))
}

async fn handle_add(
    ctx: &HandlerContext,
    inv: &Invocation,
    actor: &Actor,
    target: Option<UserId>,
    display_name: Option<String>,
    date: &str,
) -> BirthdayResult<String> {
    let target = target.unwrap_or(inv.author);
    let display_name = display_name.unwrap_or_else(|| {
        inv.username_of(target)
            .map(str::to_string)
            .unwrap_or_else(|| target.0.to_string())
    });

    let record = ctx
        .registry
        .register(actor, member(target), &display_name, date)
        .await?;
    ctx.roster.refresh_logged(&ctx.registry).await;

    Ok(format!(
        "🎂 Cumpleaños de {} guardado para el {}.",
        record.display_name, record.date
    ))
}

async fn handle_remove(
    ctx: &HandlerContext,
    inv: &Invocation,
    actor: &Actor,
    target: Option<UserId>,
) -> BirthdayResult<String> {
    let target = target.unwrap_or(inv.author);
    let removed = ctx.registry.remove(actor, member(target)).await?;
    ctx.roster.refresh_logged(&ctx.registry).await;

    Ok(format!("🗑️ Cumpleaños de {} eliminado.", removed.display_name))
}

async fn handle_belated(ctx: &HandlerContext, actor: &Actor, target: UserId) -> BirthdayResult<String> {
    if !actor.privileged {
        return Err(BirthdayError::Permission(
            "only administrators can send belated announcements".to_string(),
        ));
    }

    ctx.announcer.announce_now(member(target)).await?;
    Ok(format!("🎉 Saludo enviado a {}.", member(target).mention()))
}

async fn handle_status(ctx: &HandlerContext, inv: &Invocation) -> BirthdayResult<()> {
    ctx.client
        .send_message(inv.channel_id, "✅ Estoy activo.")
        .await?;
    Ok(())
}

async fn invoking_actor(ctx: &HandlerContext, inv: &Invocation) -> Actor {
    let privileged = ctx
        .client
        .is_privileged(inv.guild_id, inv.author)
        .await
        .unwrap_or_else(|e| {
            warn!(user = inv.author.0, "Permission lookup failed, treating as member: {}", e);
            false
        });

    Actor {
        member: member(inv.author),
        privileged,
    }
}

fn member(user: UserId) -> MemberId {
    MemberId(user.0)
}

/// Reply text for a failed command.
pub fn user_message(error: &BirthdayError) -> String {
    match error {
        BirthdayError::InvalidDate(_) => "Formato inválido. Usá DD-MM (por ejemplo 15-03).".to_string(),
        BirthdayError::Validation(message) => format!("⚠️ {message}"),
        BirthdayError::Permission(_) => "Solo los administradores pueden hacer eso.".to_string(),
        BirthdayError::NotFound(_) => "Ese usuario no tiene cumpleaños registrado.".to_string(),
        BirthdayError::AlreadyRegistered(_) => "Ya registraste tu cumpleaños.".to_string(),
        BirthdayError::ChannelUnavailable(_) | BirthdayError::Collaborator(_) => {
            "No pude completar el comando. Probá de nuevo más tarde.".to_string()
        }
    }
}

async fn respond_success(ctx: &HandlerContext, inv: &Invocation, confirmation: &str) {
    if let Err(e) = ctx
        .client
        .add_reaction(inv.channel_id, inv.message_id, SUCCESS_REACTION)
        .await
    {
        warn!("Failed to react to command: {}", e);
    }

    match ctx.client.send_message(inv.channel_id, confirmation).await {
        Ok(reply) => ctx
            .deletions
            .schedule(inv.channel_id, reply, ctx.config.ephemeral_delay),
        Err(e) => error!("Failed to send confirmation: {}", e),
    }
}

async fn respond_error(ctx: &HandlerContext, inv: &Invocation, err: &BirthdayError) {
    if err.is_user_facing() {
        warn!(user = inv.author.0, "Command rejected: {}", err);
    } else {
        error!(user = inv.author.0, "Command failed: {}", err);
        // Unresolvable channels are logged only.
        if matches!(err, BirthdayError::ChannelUnavailable(_)) {
            return;
        }
    }

    if let Err(e) = ctx
        .client
        .add_reaction(inv.channel_id, inv.message_id, FAILURE_REACTION)
        .await
    {
        warn!("Failed to react to command: {}", e);
    }

    match ctx.client.send_message(inv.channel_id, &user_message(err)).await {
        Ok(reply) => ctx
            .deletions
            .schedule(inv.channel_id, reply, ctx.config.ephemeral_delay),
        Err(e) => error!("Failed to send error reply: {}", e),
    }
    ctx.deletions
        .schedule(inv.channel_id, inv.message_id, ctx.config.ephemeral_delay);
}
