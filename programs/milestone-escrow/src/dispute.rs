//! Arbitration: `InProgress --open--> Disputed --resolve--> Completed`.

use anchor_lang::prelude::*;
use crate::errors::EscrowError;
use crate::guard::{authorize, Role};
use crate::state::*;

/// Split of the lamports attached to `open_dispute`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DisputeBond {
    /// Collected into the vault
    pub fee: u64,
    /// Left with the caller
    pub excess: u64,
    pub raised_by: Role,
}

pub fn open_dispute(
    config: &ProgramConfig,
    job: &mut Job,
    job_id: u64,
    caller: &Pubkey,
    attached: u64,
) -> Result<DisputeBond> {
    let raised_by = authorize(
        config,
        job,
        job_id,
        caller,
        &[Role::Payer, Role::Worker],
        JobState::InProgress,
    )?;
    require!(attached >= job.dispute_fee, EscrowError::InsufficientFunds);

    job.state = JobState::Disputed;
    Ok(DisputeBond {
        fee: job.dispute_fee,
        excess: attached - job.dispute_fee,
        raised_by,
    })
}

/// Arbiter splits escrow between worker and payer and completes the job.
///
/// Whatever is not awarded stays in `escrow_balance`; no instruction pays it
/// out afterwards. Returns that residual.
pub fn resolve_dispute(
    config: &ProgramConfig,
    job: &mut Job,
    job_id: u64,
    caller: &Pubkey,
    worker_amount: u64,
    payer_refund: u64,
    worker_pending: &mut PendingWithdrawal,
    payer_pending: &mut PendingWithdrawal,
) -> Result<u64> {
    authorize(config, job, job_id, caller, &[Role::Arbiter], JobState::Disputed)?;
    worker_pending.ensure_owned_by(&job.worker, &job.asset)?;
    payer_pending.ensure_owned_by(&job.payer, &job.asset)?;

    // Amounts are unsigned, so only the upper bound needs checking.
    let awarded = worker_amount
        .checked_add(payer_refund)
        .ok_or(EscrowError::Overflow)?;
    let residual = job
        .escrow_balance
        .checked_sub(awarded)
        .ok_or(EscrowError::InsufficientFunds)?;
    let worker_total = worker_pending.credited(&job.worker, &job.asset, worker_amount)?;
    let payer_total = payer_pending.credited(&job.payer, &job.asset, payer_refund)?;

    // ── Effects ─────────────────────────────────────────────────────────
    worker_pending.amount = worker_total;
    payer_pending.amount = payer_total;
    job.escrow_balance = residual;
    job.state = JobState::Completed;
    Ok(residual)
}
