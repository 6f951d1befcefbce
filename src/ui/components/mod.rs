// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reusable egui components structured for MVU-style updates.

use crate::i18n::Text;

pub mod bulk_editor;
pub mod movies;
pub mod widgets;

/// User-facing feedback a component hands back to the root: status bar text
/// or, when `is_error`, the error modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: Text,
    pub is_error: bool,
}

impl Notice {
    pub fn info(text: Text) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    pub fn error(text: Text) -> Self {
        Self {
            text,
            is_error: true,
        }
    }
}
