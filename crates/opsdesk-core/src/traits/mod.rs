// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Opsdesk service seams.
//!
//! All backends extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod notify;
pub mod session;
pub mod storage;
pub mod users;

pub use adapter::PluginAdapter;
pub use notify::Notifier;
pub use session::SessionStore;
pub use storage::TaskStore;
pub use users::UserDirectory;
