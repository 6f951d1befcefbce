// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and business logic.

pub mod sanitize_component;

/// Sanitize user-facing titles into filesystem-safe name stems.
pub use sanitize_component::sanitize_component;
