// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT

/// Loading indicator shared by every operation.
///
/// Reference-counted: each operation shows it when it starts and hides it in
/// its final step, and it stays visible while any operation is outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusyIndicator {
    pending: usize,
}

impl BusyIndicator {
    pub fn show(&mut self) {
        self.pending += 1;
    }

    pub fn hide(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    pub fn is_visible(&self) -> bool {
        self.pending > 0
    }
}
