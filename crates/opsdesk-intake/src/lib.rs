// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state machine for chat-driven task intake.
//!
//! Turns a stream of single chat messages into created and closed tasks: a
//! positional comma parser seeds the task fields, a typed step enum tracks
//! where each chat is, and the engine wires session store, task repository,
//! user directory, and notifier together.

pub mod coerce;
pub mod engine;
pub mod keys;
pub mod parser;
pub mod prompts;
pub mod report;
pub mod step;

pub use engine::{IntakeEngine, IntakePolicy};
pub use parser::{TaskSeed, parse_seed};
pub use step::Step;
