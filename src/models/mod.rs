// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types and validation helpers shared between UI and Store logic.

pub mod field_errors;
pub mod movie;
pub mod record;
pub mod resource;
pub mod selection;
pub mod validation;
