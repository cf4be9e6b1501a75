// ABOUTME: Caller-held clipboard token for the copy/paste session flow
// ABOUTME: A reference to the source module, not a snapshot of it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a previously copied module
///
/// The clipboard is a value the caller holds, not hidden engine state:
/// pasting is a pure function of this token and the target day. Because it
/// is a reference rather than a snapshot, paste re-reads the source's
/// current state; edits between copy and paste are picked up, and a deleted
/// source fails the paste. Cancelling a copy is simply dropping the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardRef {
    module_id: Uuid,
}

impl ClipboardRef {
    /// Wrap a module id as clipboard contents
    #[must_use]
    pub const fn new(module_id: Uuid) -> Self {
        Self { module_id }
    }

    /// The referenced source module
    #[must_use]
    pub const fn module_id(&self) -> Uuid {
        self.module_id
    }
}
