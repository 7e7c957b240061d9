// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session store implementations for the Opsdesk task intake service.
//!
//! The conversation engine only depends on the [`opsdesk_core::SessionStore`]
//! trait; this crate provides the in-memory TTL-backed implementation used in
//! production and in tests. Swapping in a distributed cache later means
//! implementing the same three-method trait.

pub mod memory;

pub use memory::MemorySessionStore;
