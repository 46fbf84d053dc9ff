// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of signal names
//!
//! Names are created exclusively: creating a name that already exists fails
//! instead of silently sharing the signal with another simulation.

use crate::error::ResourceError;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, OnceLock};

/// Shared registry of live signal names
#[derive(Clone, Debug, Default)]
pub struct SignalNamespace {
    names: Arc<Mutex<BTreeSet<String>>>,
}

static GLOBAL: OnceLock<SignalNamespace> = OnceLock::new();

impl SignalNamespace {
    /// A private, empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide namespace
    pub fn global() -> &'static SignalNamespace {
        GLOBAL.get_or_init(SignalNamespace::new)
    }

    /// Register `name`, failing if it is already live
    pub fn create(&self, name: &str) -> Result<(), ResourceError> {
        let mut names = self.names.lock().unwrap_or_else(|e| e.into_inner());
        if !names.insert(name.to_string()) {
            return Err(ResourceError::SignalExists(name.to_string()));
        }
        tracing::trace!(name, "signal created");
        Ok(())
    }

    /// Remove `name`; returns false if it was not live
    pub fn unlink(&self, name: &str) -> bool {
        let removed = self
            .names
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(name);
        if removed {
            tracing::trace!(name, "signal unlinked");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(name)
    }

    /// Live names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.names
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.names
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }
}

#[cfg(test)]
#[path = "namespace_tests.rs"]
mod tests;
