// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque identifier allocation, one monotonic counter per entity kind.

/// Mints short, human-readable identifiers (`D0`, `PR0`, `PA0`, `P0`, `p0`, ...).
///
/// Identifiers are unique within the lifetime of the allocator and stable
/// across serialization. They are not cryptographically random.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next_document: u64,
    next_assignment: u64,
    next_request: u64,
    next_printer: u64,
    next_print: u64,
}

impl IdAllocator {
    /// Create a fresh allocator with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every counter to zero. Intended for deterministic tests.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn next_document_id(&mut self) -> String {
        let id = format!("D{}", self.next_document);
        self.next_document += 1;
        id
    }

    pub fn next_assignment_id(&mut self) -> String {
        let id = format!("PA{}", self.next_assignment);
        self.next_assignment += 1;
        id
    }

    pub fn next_request_id(&mut self) -> String {
        let id = format!("PR{}", self.next_request);
        self.next_request += 1;
        id
    }

    pub fn next_printer_id(&mut self) -> String {
        let id = format!("P{}", self.next_printer);
        self.next_printer += 1;
        id
    }

    pub fn next_print_id(&mut self) -> String {
        let id = format!("p{}", self.next_print);
        self.next_print += 1;
        id
    }
}

#[cfg(test)]
#[path = "ids_tests.rs"]
mod tests;
