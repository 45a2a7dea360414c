use anchor_lang::prelude::*;

pub mod state;
pub mod errors;
pub mod events;
pub mod guard;
pub mod ledger;
pub mod lifecycle;
pub mod dispute;
pub mod instructions;

#[cfg(test)]
mod test_fixtures;

use instructions::*;
use state::{EscrowLimits, JobTerms, JobView, Milestone};

// Program ID: replace with the deployed keypair address
declare_id!("ARWdJVV13n8eTQn3FCYHrCta4G5qc37ThfujWU6VNZmV");

#[program]
pub mod milestone_escrow {
    use super::*;

    // ── Administration ──────────────────────────────────────────────────

    /// Initialize program configuration and the custody vault.
    /// Must be called once after deployment; the signer becomes admin.
    pub fn initialize(ctx: Context<Initialize>, limits: Option<EscrowLimits>) -> Result<()> {
        instructions::initialize::handler(ctx, limits)
    }

    /// Update program configuration (admin-only).
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        new_admin: Option<Pubkey>,
        new_limits: Option<EscrowLimits>,
    ) -> Result<()> {
        instructions::update_config::handler(ctx, new_admin, new_limits)
    }

    /// Reject every mutating operation until unpaused (admin-only).
    pub fn pause(ctx: Context<SetPaused>) -> Result<()> {
        instructions::pause::handler(ctx, true)
    }

    /// Re-enable mutating operations (admin-only).
    pub fn unpause(ctx: Context<SetPaused>) -> Result<()> {
        instructions::pause::handler(ctx, false)
    }

    // ── Job lifecycle ───────────────────────────────────────────────────

    /// Payer creates a job with 1-10 milestones.
    pub fn create_job(ctx: Context<CreateJob>, terms: JobTerms) -> Result<()> {
        instructions::create_job::handler(ctx, terms)
    }

    /// Payer funds a native job with exactly its total amount.
    pub fn fund_job(ctx: Context<FundJob>, job_id: u64, attached: u64) -> Result<()> {
        instructions::fund_job::handler(ctx, job_id, attached)
    }

    /// Payer funds a token job; `attached` native value must be zero.
    pub fn fund_job_token(ctx: Context<FundJobToken>, job_id: u64, attached: u64) -> Result<()> {
        instructions::fund_job_token::handler(ctx, job_id, attached)
    }

    /// Payer starts a funded job.
    pub fn start_job(ctx: Context<StartJob>, job_id: u64) -> Result<()> {
        instructions::start_job::handler(ctx, job_id)
    }

    /// Worker delivers a milestone with an evidence reference.
    pub fn deliver_milestone(
        ctx: Context<DeliverMilestone>,
        job_id: u64,
        index: u8,
        evidence_ref: String,
    ) -> Result<()> {
        instructions::deliver_milestone::handler(ctx, job_id, index, evidence_ref)
    }

    /// Payer approves a delivered milestone, crediting the worker.
    pub fn approve_milestone(ctx: Context<ApproveMilestone>, job_id: u64, index: u8) -> Result<()> {
        instructions::approve_milestone::handler(ctx, job_id, index)
    }

    /// Payer cancels an unfunded job.
    pub fn cancel_job(ctx: Context<CancelJob>, job_id: u64) -> Result<()> {
        instructions::cancel_job::handler(ctx, job_id)
    }

    // ── Disputes ────────────────────────────────────────────────────────

    /// Payer or worker opens a dispute, posting the dispute fee.
    pub fn open_dispute(ctx: Context<OpenDispute>, job_id: u64, attached: u64) -> Result<()> {
        instructions::open_dispute::handler(ctx, job_id, attached)
    }

    /// Job arbiter splits escrow between worker and payer.
    pub fn resolve_dispute(
        ctx: Context<ResolveDispute>,
        job_id: u64,
        worker_amount: u64,
        payer_refund: u64,
    ) -> Result<()> {
        instructions::resolve_dispute::handler(ctx, job_id, worker_amount, payer_refund)
    }

    // ── Withdrawals ─────────────────────────────────────────────────────

    /// Beneficiary withdraws their native pending balance.
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    /// Beneficiary withdraws their pending balance of one token.
    pub fn withdraw_token(ctx: Context<WithdrawToken>) -> Result<()> {
        instructions::withdraw_token::handler(ctx)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn get_job(ctx: Context<GetJob>, job_id: u64) -> Result<JobView> {
        instructions::queries::job_view(ctx, job_id)
    }

    pub fn get_milestone(ctx: Context<GetJob>, job_id: u64, index: u8) -> Result<Milestone> {
        instructions::queries::milestone(ctx, job_id, index)
    }

    pub fn get_pending_withdrawal(
        ctx: Context<GetPendingWithdrawal>,
        beneficiary: Pubkey,
        asset: Pubkey,
    ) -> Result<u64> {
        instructions::queries::pending_withdrawal(ctx, beneficiary, asset)
    }

    pub fn get_job_count(ctx: Context<GetJobCount>) -> Result<u64> {
        instructions::queries::job_count(ctx)
    }
}
