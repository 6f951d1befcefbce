// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic that runs independently of the UI: paging, batch
//! bookkeeping, request encoding and spreadsheet export.

pub mod batch;
pub mod deletion;
pub mod export;
pub mod pagination;
pub mod wire;
