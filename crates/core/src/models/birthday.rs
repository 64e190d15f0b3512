use std::fmt;

use serde::{Deserialize, Serialize};

use super::date::DayMonth;

/// Stable identifier of a community member (the Discord user id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl MemberId {
    /// Chat mention markup for this member.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayRecord {
    pub member: MemberId,
    pub display_name: String,
    pub date: DayMonth,
}

/// The member invoking a registry operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub member: MemberId,
    /// Holds administrative capability in the community.
    pub privileged: bool,
}

impl Actor {
    pub fn member(member: MemberId) -> Self {
        Self {
            member,
            privileged: false,
        }
    }

    pub fn admin(member: MemberId) -> Self {
        Self {
            member,
            privileged: true,
        }
    }

    /// Whether this actor may act on `target`'s record.
    pub fn can_manage(&self, target: MemberId) -> bool {
        self.privileged || self.member == target
    }
}
