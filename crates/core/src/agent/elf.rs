// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Elf protocol
//!
//! Per cycle: work, wait for a request slot, notify Santa, wait for help,
//! then leave the waiting group. The elf that empties the group reopens
//! request slots for the next round. On the final cycle the elf logs its
//! vacation and then retires; the last one to retire wakes Santa for
//! shutdown. Every elf then passes the finish latch and re-opens it for
//! the next.

use super::{ensure_live, pause, AgentError, AgentId, Workshop};
use crate::coordination::GateError;
use crate::delay::Delay;
use crate::log::Action;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Run elf `id` to completion
pub async fn run<D: Delay>(
    id: u32,
    workshop: Arc<Workshop>,
    mut delay: D,
    cancel: CancellationToken,
) -> Result<(), AgentError> {
    let me = AgentId::Elf(id);
    let signals = &workshop.signals;
    let cycles = workshop.config.cycles;

    workshop.emit(&cancel, me, Action::Started)?;

    for cycle in 0..cycles {
        let last_cycle = cycle + 1 == cycles;

        pause(delay.next(workshop.config.max_help_delay), &cancel).await?;
        workshop.emit(&cancel, me, Action::NeededHelp)?;

        signals.ask.wait(&cancel).await?;
        workshop.emit(&cancel, me, Action::AskedForHelp)?;
        signals.action.post(1)?;

        signals.got.wait(&cancel).await?;
        workshop.emit(&cancel, me, Action::GotHelp)?;

        // The vacation line precedes the retirement Santa counts
        if last_cycle {
            workshop.emit(&cancel, me, Action::GotVacation)?;
        }

        ensure_live(&cancel)?;
        let release = workshop.state.with(|state| {
            let release = state.release(last_cycle);
            if let Some(slots) = release.reopen {
                signals.ask.post(slots)?;
            }
            Ok::<_, GateError>(release)
        })?;

        tracing::debug!(
            cycle,
            retired = release.retired,
            reopened = ?release.reopen,
            "left waiting group"
        );

        if release.last_to_retire {
            tracing::debug!("last elf retired, waking santa");
            signals.vacation.post(1)?;
        }
    }

    signals.finish.wait(&cancel).await?;
    signals.finish.post(1)?;
    workshop.emit(&cancel, me, Action::Finished)?;

    Ok(())
}
