//! Roster rendering.
//!
//! The roster is a pure function of the registry snapshot: records grouped
//! by month in calendar order, sorted by day then name inside each month.

use std::collections::BTreeMap;

use crate::models::{BirthdayRecord, Locale, Month};

pub fn header(locale: Locale) -> &'static str {
    match locale {
        Locale::Spanish => "**🎂 Lista de cumpleaños del servidor**",
        Locale::English => "**🎂 Server birthday list**",
    }
}

/// Body used when nobody has registered yet.
pub fn empty_sentinel(locale: Locale) -> &'static str {
    match locale {
        Locale::Spanish => "Todavía no hay cumpleaños registrados.",
        Locale::English => "No birthdays registered yet.",
    }
}

/// Render the full roster text.
///
/// Identical input always yields byte-identical output, whatever order the
/// records arrive in.
pub fn render(records: &[BirthdayRecord], locale: Locale) -> String {
    let mut out = String::from(header(locale));
    out.push_str("\n\n");

    if records.is_empty() {
        out.push_str(empty_sentinel(locale));
        return out;
    }

    let mut by_month: BTreeMap<Month, Vec<&BirthdayRecord>> = BTreeMap::new();
    for record in records {
        by_month.entry(record.date.month()).or_default().push(record);
    }

    let sections: Vec<String> = by_month
        .into_iter()
        .map(|(month, mut entries)| {
            entries.sort_by(|a, b| {
                (a.date.day(), &a.display_name, a.member).cmp(&(
                    b.date.day(),
                    &b.display_name,
                    b.member,
                ))
            });

            let mut section = format!("**{}**", month.label(locale));
            for entry in entries {
                section.push('\n');
                section.push_str(&format!("{} {}", entry.date.day(), entry.display_name));
            }
            section
        })
        .collect();

    out.push_str(&sections.join("\n\n"));
    out
}
