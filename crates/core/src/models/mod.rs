pub mod birthday;
pub mod date;

pub use birthday::{Actor, BirthdayRecord, MemberId};
pub use date::{DayMonth, Locale, Month};
