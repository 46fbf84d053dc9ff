// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Santa protocol
//!
//! Santa opens the first round of request slots, then admits one request
//! per help event. When the number waiting equals the current quorum he
//! serves the whole group at once. After the last help event he waits for
//! the final retirement and opens the finish latch.

use super::{ensure_live, pause, AgentError, AgentId, Workshop};
use crate::delay::Delay;
use crate::log::Action;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Run Santa to completion
pub async fn run<D: Delay>(
    workshop: Arc<Workshop>,
    mut delay: D,
    cancel: CancellationToken,
) -> Result<(), AgentError> {
    let me = AgentId::Santa;
    let signals = &workshop.signals;
    let config = &workshop.config;

    signals.ask.post(config.initial_quorum())?;
    workshop.emit(&cancel, me, Action::Started)?;

    for event in 0..config.help_events() {
        signals.action.wait(&cancel).await?;

        ensure_live(&cancel)?;
        let admission = workshop.state.with(|state| state.admit());

        if !admission.quorum_reached() {
            continue;
        }

        tracing::debug!(
            event,
            waiting = admission.waiting,
            active = admission.active,
            "quorum reached"
        );

        workshop.emit(
            &cancel,
            me,
            Action::CheckedState {
                active: admission.active,
                waiting: admission.waiting,
            },
        )?;
        workshop.emit(&cancel, me, Action::CanHelp)?;
        pause(delay.next(config.max_serve_delay), &cancel).await?;
        signals.got.post(admission.waiting)?;
    }

    signals.vacation.wait(&cancel).await?;

    ensure_live(&cancel)?;
    let (active, waiting) = workshop.state.with(|state| (state.active(), state.waiting));
    workshop.emit(&cancel, me, Action::CheckedState { active, waiting })?;

    signals.finish.post(1)?;
    workshop.emit(&cancel, me, Action::Finished)?;

    Ok(())
}
