//! # Cumplebot Core
//!
//! Domain types and the chat-independent parts of the birthday service:
//!
//! - **Models**: members, day-month dates, birthday records
//! - **Registry**: add/update/remove/list over a [`store::BirthdayStore`]
//! - **Roster**: deterministic rendering of the full registry
//! - **Announcement**: the flavoured message pool and sampling policy
//! - **Schedule**: the fixed local instant the daily announcer fires at

pub mod announcement;
pub mod errors;
pub mod models;
pub mod registry;
pub mod roster;
pub mod schedule;
pub mod store;
