// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session key layout.
//!
//! All conversation state lives under two key families: `step:{chat_id}` for
//! the current step and `task:{chat_id}:{field}` for each collected field.

use strum::{Display, EnumIter};

/// Task fields collected across the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Title,
    Category,
    CountryCode,
    Project,
    Assignee,
}

/// Key holding the chat's current [`crate::step::Step`].
pub fn step_key(chat_id: i64) -> String {
    format!("step:{chat_id}")
}

/// Key holding one collected field for the chat's in-progress task.
pub fn field_key(chat_id: i64, field: Field) -> String {
    format!("task:{chat_id}:{field}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn key_shapes() {
        assert_eq!(step_key(42), "step:42");
        assert_eq!(field_key(42, Field::Title), "task:42:title");
        assert_eq!(field_key(-100123, Field::CountryCode), "task:-100123:country_code");
    }

    #[test]
    fn field_keys_are_distinct_per_chat_and_field() {
        let mut keys: Vec<String> = Field::iter().map(|f| field_key(7, f)).collect();
        keys.push(step_key(7));
        let before = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), before);
    }
}
