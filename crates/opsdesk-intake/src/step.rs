// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed conversation steps.
//!
//! The step is persisted in the session store as a snake_case string under
//! `step:{chat_id}`. Idle is represented by the absence of that key, not by a
//! variant, so a chat with no stored step (or an expired one) is idle by
//! construction.

use std::str::FromStr;

use strum::{Display, EnumString};

/// Where a chat currently is in the intake conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Step {
    AwaitingTitle,
    AwaitingAssignee,
    AwaitingPriority,
    AwaitingTaskId,
}

impl Step {
    /// Decode a stored step string. Anything unrecognized maps to idle
    /// (`None`) rather than an error, so a corrupt or legacy value cannot
    /// wedge a chat.
    pub fn decode(stored: Option<&str>) -> Option<Step> {
        stored.and_then(|s| Step::from_str(s).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_snake_case() {
        assert_eq!(Step::AwaitingTitle.to_string(), "awaiting_title");
        assert_eq!(Step::AwaitingTaskId.to_string(), "awaiting_task_id");
        assert_eq!(
            Step::decode(Some("awaiting_assignee")),
            Some(Step::AwaitingAssignee)
        );
        assert_eq!(
            Step::decode(Some("awaiting_priority")),
            Some(Step::AwaitingPriority)
        );
    }

    #[test]
    fn absent_key_is_idle() {
        assert_eq!(Step::decode(None), None);
    }

    #[test]
    fn unrecognized_value_is_idle() {
        assert_eq!(Step::decode(Some("AWAITING_TITLE")), None);
        assert_eq!(Step::decode(Some("awaiting-title")), None);
        assert_eq!(Step::decode(Some("garbage")), None);
        assert_eq!(Step::decode(Some("")), None);
    }
}
