use cumplebot_core::errors::BirthdayResult;

use super::{parse_mention, usage, Command};

const ADD_USAGE: &str = "addbirthday [@miembro] [nombre] DD-MM";
const REMOVE_USAGE: &str = "removebirthday [@miembro]";
const BELATED_USAGE: &str = "belatedbirthday @miembro";

/// `addbirthday [mention] [display name…] <DD-MM>`. The date is always the
/// last word; everything between the optional mention and the date is the
/// display name.
pub fn parse_add(args: &[&str]) -> BirthdayResult<Command> {
    let (date, rest) = args.split_last().ok_or_else(|| usage(ADD_USAGE))?;

    let (target, name_words) = match rest.split_first() {
        Some((first, tail)) => match parse_mention(first) {
            Some(user) => (Some(user), tail),
            None => (None, rest),
        },
        None => (None, rest),
    };

    let display_name = (!name_words.is_empty()).then(|| name_words.join(" "));

    Ok(Command::AddBirthday {
        target,
        display_name,
        date: date.to_string(),
    })
}

pub fn parse_remove(args: &[&str]) -> BirthdayResult<Command> {
    match args {
        [] => Ok(Command::RemoveBirthday { target: None }),
        [mention] => parse_mention(mention)
            .map(|user| Command::RemoveBirthday { target: Some(user) })
            .ok_or_else(|| usage(REMOVE_USAGE)),
        _ => Err(usage(REMOVE_USAGE)),
    }
}

pub fn parse_belated(args: &[&str]) -> BirthdayResult<Command> {
    match args {
        [mention] => parse_mention(mention)
            .map(|target| Command::BelatedBirthday { target })
            .ok_or_else(|| usage(BELATED_USAGE)),
        _ => Err(usage(BELATED_USAGE)),
    }
}
