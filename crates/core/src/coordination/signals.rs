// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The gates of one simulation
//!
//! All five gates start empty. They are created in a fixed order under a
//! common prefix; a failure part way through unlinks the names created so
//! far, newest first. Closing is idempotent.

use super::gate::Gate;
use super::namespace::SignalNamespace;
use crate::error::ResourceError;
use std::sync::atomic::{AtomicBool, Ordering};

/// Role of a gate in the protocol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Latch Santa opens once everyone has retired
    Finish,
    /// Help granted to a served quorum
    Got,
    /// Request slots, replenished a quorum at a time
    Ask,
    /// Santa's admission of one request
    Action,
    /// Posted once by the last elf to retire
    Vacation,
}

impl SignalKind {
    /// Creation order
    pub const ALL: [SignalKind; 5] = [
        SignalKind::Finish,
        SignalKind::Got,
        SignalKind::Ask,
        SignalKind::Action,
        SignalKind::Vacation,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            SignalKind::Finish => "finish",
            SignalKind::Got => "got",
            SignalKind::Ask => "ask",
            SignalKind::Action => "action",
            SignalKind::Vacation => "vacation",
        }
    }

    /// Name of this gate under `prefix`
    pub fn name(self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.suffix())
    }
}

/// Gates shared by every agent of one simulation
#[derive(Debug)]
pub struct SignalSet {
    namespace: SignalNamespace,
    pub finish: Gate,
    pub got: Gate,
    pub ask: Gate,
    pub action: Gate,
    pub vacation: Gate,
    closed: AtomicBool,
}

impl SignalSet {
    /// Create all gates under `prefix` in `namespace`
    pub fn open(namespace: &SignalNamespace, prefix: &str) -> Result<Self, ResourceError> {
        let mut created: Vec<String> = Vec::with_capacity(SignalKind::ALL.len());

        for kind in SignalKind::ALL {
            let name = kind.name(prefix);
            if let Err(e) = namespace.create(&name) {
                tracing::error!(name, error = %e, "signal creation failed, rolling back");
                for name in created.iter().rev() {
                    namespace.unlink(name);
                }
                return Err(e);
            }
            created.push(name);
        }

        tracing::debug!(prefix, "signals created");

        Ok(Self {
            namespace: namespace.clone(),
            finish: Gate::new(SignalKind::Finish.name(prefix), 0),
            got: Gate::new(SignalKind::Got.name(prefix), 0),
            ask: Gate::new(SignalKind::Ask.name(prefix), 0),
            action: Gate::new(SignalKind::Action.name(prefix), 0),
            vacation: Gate::new(SignalKind::Vacation.name(prefix), 0),
            closed: AtomicBool::new(false),
        })
    }

    pub fn gate(&self, kind: SignalKind) -> &Gate {
        match kind {
            SignalKind::Finish => &self.finish,
            SignalKind::Got => &self.got,
            SignalKind::Ask => &self.ask,
            SignalKind::Action => &self.action,
            SignalKind::Vacation => &self.vacation,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Close every gate and unlink its name
    ///
    /// Returns false if the set was already closed.
    pub fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::SeqCst) {
            return false;
        }

        for kind in SignalKind::ALL.iter().rev() {
            let gate = self.gate(*kind);
            gate.close();
            self.namespace.unlink(gate.name());
        }

        tracing::debug!("signals closed");
        true
    }
}

impl Drop for SignalSet {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[path = "signals_tests.rs"]
mod tests;
