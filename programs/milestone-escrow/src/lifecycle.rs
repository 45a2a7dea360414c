//! Job state machine.
//!
//! `Created --fund--> Funded --start--> InProgress --(all approved)--> Completed`
//! and `Created --cancel--> Cancelled`. Dispute transitions live in
//! [`crate::dispute`]. Every operation validates fully before it mutates.

use anchor_lang::prelude::*;
use crate::errors::EscrowError;
use crate::guard::{authorize, Role};
use crate::ledger::{self, MintSupply};
use crate::state::*;

/// Checks milestone amounts and the dispute fee against the configured
/// ceilings and returns the job total.
pub fn check_amounts(limits: &EscrowLimits, amounts: &[u64], dispute_fee: u64) -> Result<u64> {
    require!(
        !amounts.is_empty() && amounts.len() <= MAX_MILESTONES,
        EscrowError::LimitExceeded
    );

    let mut total: u64 = 0;
    for &amount in amounts {
        require!(
            amount > 0 && amount <= limits.max_milestone_amount,
            EscrowError::LimitExceeded
        );
        total = total.checked_add(amount).ok_or(EscrowError::LimitExceeded)?;
    }
    require!(total <= limits.max_total_amount, EscrowError::LimitExceeded);
    require!(
        dispute_fee > 0 && dispute_fee <= limits.max_dispute_fee,
        EscrowError::LimitExceeded
    );
    Ok(total)
}

fn check_participants(payer: &Pubkey, terms: &JobTerms) -> Result<()> {
    let unset = Pubkey::default();
    require!(
        terms.worker != unset && terms.arbiter != unset,
        EscrowError::InvalidParticipant
    );
    require!(
        terms.worker != terms.arbiter && terms.worker != *payer && terms.arbiter != *payer,
        EscrowError::InvalidParticipant
    );
    Ok(())
}

/// Records a new job under the next id from the job counter.
pub fn create_job(
    config: &mut ProgramConfig,
    job: &mut Job,
    payer: Pubkey,
    terms: JobTerms,
    mint: Option<MintSupply>,
    now: i64,
    bump: u8,
) -> Result<u64> {
    config.ensure_live()?;
    check_participants(&payer, &terms)?;
    let total_amount = check_amounts(&config.limits, &terms.milestone_amounts, terms.dispute_fee)?;
    ledger::check_asset(&terms.asset, mint)?;

    let id = config.job_count;
    let next = id.checked_add(1).ok_or(EscrowError::Overflow)?;

    job.id = id;
    job.payer = payer;
    job.worker = terms.worker;
    job.arbiter = terms.arbiter;
    job.asset = terms.asset;
    job.total_amount = total_amount;
    job.state = JobState::Created;
    job.milestones = terms.milestone_amounts.into_iter().map(Milestone::new).collect();
    job.escrow_balance = 0;
    job.dispute_fee = terms.dispute_fee;
    job.created_at = now;
    job.bump = bump;

    config.job_count = next;
    Ok(id)
}

/// Moves the job to `Funded` and returns the amount the caller must pull
/// into custody. `funding_asset` is the asset the calling instruction moves.
pub fn fund_job(
    config: &ProgramConfig,
    job: &mut Job,
    job_id: u64,
    caller: &Pubkey,
    attached_native: u64,
    funding_asset: &Pubkey,
) -> Result<u64> {
    authorize(config, job, job_id, caller, &[Role::Payer], JobState::Created)?;
    require_keys_eq!(*funding_asset, job.asset, EscrowError::AssetMismatch);
    if job.is_native() {
        require!(attached_native == job.total_amount, EscrowError::InsufficientFunds);
    } else {
        require!(attached_native == 0, EscrowError::InsufficientFunds);
    }

    job.escrow_balance = job.total_amount;
    job.state = JobState::Funded;
    Ok(job.total_amount)
}

pub fn start_job(config: &ProgramConfig, job: &mut Job, job_id: u64, caller: &Pubkey) -> Result<()> {
    authorize(config, job, job_id, caller, &[Role::Payer], JobState::Funded)?;
    job.state = JobState::InProgress;
    Ok(())
}

pub fn deliver_milestone(
    config: &ProgramConfig,
    job: &mut Job,
    job_id: u64,
    caller: &Pubkey,
    index: u8,
    evidence_ref: String,
) -> Result<()> {
    authorize(config, job, job_id, caller, &[Role::Worker], JobState::InProgress)?;
    let milestone = job
        .milestones
        .get_mut(index as usize)
        .ok_or(EscrowError::NotFound)?;
    require!(!milestone.delivered, EscrowError::AlreadyProcessed);
    require!(
        !evidence_ref.is_empty() && evidence_ref.len() <= MAX_EVIDENCE_REF_LEN,
        EscrowError::InvalidEvidence
    );

    milestone.delivered = true;
    milestone.evidence_ref = evidence_ref;
    Ok(())
}

/// Releases one milestone from escrow into the worker's pending balance.
/// Returns the released amount.
pub fn approve_milestone(
    config: &ProgramConfig,
    job: &mut Job,
    job_id: u64,
    caller: &Pubkey,
    index: u8,
    worker_pending: &mut PendingWithdrawal,
) -> Result<u64> {
    authorize(config, job, job_id, caller, &[Role::Payer], JobState::InProgress)?;
    worker_pending.ensure_owned_by(&job.worker, &job.asset)?;

    let (worker, asset) = (job.worker, job.asset);
    let milestone = job
        .milestones
        .get_mut(index as usize)
        .ok_or(EscrowError::NotFound)?;
    require!(milestone.delivered, EscrowError::MilestoneNotDelivered);
    require!(!milestone.approved, EscrowError::AlreadyProcessed);
    let amount = milestone.amount;
    let remaining = job
        .escrow_balance
        .checked_sub(amount)
        .ok_or(EscrowError::InsufficientFunds)?;
    let worker_total = worker_pending.credited(&worker, &asset, amount)?;

    // ── Effects ─────────────────────────────────────────────────────────
    milestone.approved = true;
    job.escrow_balance = remaining;
    worker_pending.amount = worker_total;

    if job.milestones.iter().all(|m| m.approved) {
        job.state = JobState::Completed;
    }
    Ok(amount)
}

/// Cancels an unfunded job, routing any escrow to the payer's pending
/// balance. Returns the refunded amount.
pub fn cancel_job(
    config: &ProgramConfig,
    job: &mut Job,
    job_id: u64,
    caller: &Pubkey,
    payer_pending: &mut PendingWithdrawal,
) -> Result<u64> {
    authorize(config, job, job_id, caller, &[Role::Payer], JobState::Created)?;
    payer_pending.ensure_owned_by(&job.payer, &job.asset)?;

    let refund = job.escrow_balance;
    if refund > 0 {
        payer_pending.credit(&job.payer, &job.asset, refund)?;
    }
    job.escrow_balance = 0;
    job.state = JobState::Cancelled;
    Ok(refund)
}
