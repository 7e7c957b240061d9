// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing reply text.
//!
//! Everything the bot says lives here so tests can assert against the exact
//! strings and translations stay in one place.

use opsdesk_core::User;

pub const TITLE_PROMPT: &str =
    "Creating a new task. Send the title, optionally followed by category, country code and project, separated by commas.";
pub const PRIORITY_PROMPT: &str = "What priority should this task have?";
pub const CLOSE_PROMPT: &str = "Which task id should be closed?";
pub const STATE_RESET: &str = "State reset.";
pub const NO_PENDING: &str = "No pending tasks to report.";
pub const USAGE_HINT: &str =
    "Available commands: /task to create a task, /done to close one, /list to show open tasks, /abort to cancel.";
pub const RESTRICTED: &str = "This bot is restricted to a specific group.";
pub const FAILURE: &str = "Something went wrong. Please try again.";

/// Assignee selection prompt: the literal `Unassigned:0` option first, then
/// one `name (ID: id)` line per directory entry.
pub fn assignee_prompt(users: &[User]) -> String {
    let mut out = String::from("Who should this task be assigned to? Reply with a user id.\nUnassigned:0");
    for user in users {
        out.push_str(&format!("\n{} (ID: {})", user.name, user.id));
    }
    out
}

pub fn task_created(id: i64) -> String {
    format!("Task #{id} created.")
}

pub fn task_completed(id: i64) -> String {
    format!("Task #{id} marked as completed.")
}

pub fn task_not_found(id: i64) -> String {
    format!("Task #{id} was not found.")
}
