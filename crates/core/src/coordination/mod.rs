// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordination primitives shared by Santa and the elves
//!
//! This module provides:
//! - **Gate** - Counting semaphore: producers post N units, each waiter takes one
//! - **SignalNamespace** - Exclusive registry of signal names
//! - **SignalSet** - The five gates of one simulation, created and torn down together
//! - **SharedState** - Counters and quorum rules behind the shared-state lock

pub mod gate;
pub mod namespace;
pub mod signals;
pub mod state;

pub use gate::{Gate, GateError};
pub use namespace::SignalNamespace;
pub use signals::{SignalKind, SignalSet};
pub use state::{quorum_size, Admission, CoordinationState, Release, SharedState, QUORUM};
