//! Birthday announcement templates.
//!
//! Each daily run draws templates without replacement, so two members
//! celebrating on the same day never receive the same message. When more
//! members match than there are templates, the overflow gets no
//! announcement that day.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::errors::{BirthdayError, BirthdayResult};
use crate::models::{Locale, MemberId};

/// Placeholder replaced by the celebrated member's mention.
pub const MENTION_PLACEHOLDER: &str = "{mention}";

const SPANISH_TEMPLATES: &[&str] = &[
    "🎉 ¡Feliz cumpleaños, {mention}! Que tengas un gran día.",
    "🎂 ¡Hoy es el cumple de {mention}! Que lo disfrutes muchísimo.",
    "🥳 ¡Muy feliz cumpleaños, {mention}! Que se cumplan todos tus deseos.",
    "🎈 ¡Arriba las copas! {mention} cumple años hoy.",
    "🎁 {mention}, ¡feliz cumple! Todo el servidor te saluda.",
    "✨ ¡Felicidades, {mention}! Que este nuevo año venga lleno de cosas buenas.",
    "🍰 ¡Alguien traiga la torta! Es el cumpleaños de {mention}.",
    "🎊 ¡Feliz vuelta al sol, {mention}!",
];

const ENGLISH_TEMPLATES: &[&str] = &[
    "🎉 Happy birthday, {mention}! Have a great day.",
    "🎂 It's {mention}'s birthday today! Enjoy it.",
    "🥳 A very happy birthday to {mention}! May all your wishes come true.",
    "🎈 Raise your glasses: {mention} has a birthday today.",
    "🎁 Happy birthday {mention}, from the whole server!",
    "✨ Congratulations, {mention}! Here's to a great year ahead.",
    "🍰 Someone bring the cake, it's {mention}'s birthday.",
    "🎊 Happy trip around the sun, {mention}!",
];

#[derive(Debug, Clone)]
pub struct TemplatePool {
    templates: Vec<String>,
}

impl TemplatePool {
    pub fn new(templates: Vec<String>) -> BirthdayResult<Self> {
        if templates.is_empty() {
            return Err(BirthdayError::Validation("template pool is empty".to_string()));
        }
        if let Some(bad) = templates.iter().find(|t| !t.contains(MENTION_PLACEHOLDER)) {
            return Err(BirthdayError::Validation(format!(
                "template '{bad}' has no {MENTION_PLACEHOLDER} placeholder"
            )));
        }
        Ok(Self { templates })
    }

    /// Built-in pool for `locale`.
    pub fn for_locale(locale: Locale) -> Self {
        let templates = match locale {
            Locale::Spanish => SPANISH_TEMPLATES,
            Locale::English => ENGLISH_TEMPLATES,
        };
        Self {
            templates: templates.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Draw up to `count` distinct templates. Returns fewer than `count`
    /// when the pool is exhausted.
    pub fn draw<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&str> {
        self.templates
            .choose_multiple(rng, count)
            .map(String::as_str)
            .collect()
    }

    /// Draw one template and render it for `member`.
    pub fn announce<R: Rng + ?Sized>(&self, member: MemberId, rng: &mut R) -> Option<String> {
        self.draw(1, rng)
            .first()
            .map(|template| render_announcement(template, member))
    }
}

pub fn render_announcement(template: &str, member: MemberId) -> String {
    template.replace(MENTION_PLACEHOLDER, &member.mention())
}

/// Pair each member with a distinct template. Members beyond the pool size
/// are returned separately and receive nothing.
pub fn assign<'a, R: Rng + ?Sized>(
    pool: &TemplatePool,
    members: &'a [MemberId],
    rng: &mut R,
) -> (Vec<(MemberId, String)>, &'a [MemberId]) {
    let templates = pool.draw(members.len(), rng);
    let announced = members
        .iter()
        .zip(templates.iter())
        .map(|(member, template)| (*member, render_announcement(template, *member)))
        .collect::<Vec<_>>();
    let dropped = &members[announced.len()..];
    (announced, dropped)
}
