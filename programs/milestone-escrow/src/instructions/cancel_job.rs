use anchor_lang::prelude::*;
use crate::events::JobCancelled;
use crate::lifecycle;
use crate::state::*;

/// Payer cancels a job that has not been funded yet.
/// Any escrow is routed to the payer's pending balance, never pushed.
pub fn handler(ctx: Context<CancelJob>, job_id: u64) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let payer = accounts.payer.key();
    let (owner, asset) = (accounts.job.payer, accounts.job.asset);
    accounts
        .payer_pending
        .bind(owner, asset, ctx.bumps.payer_pending);

    accounts.config.enter()?;
    let refund = lifecycle::cancel_job(
        &accounts.config,
        &mut accounts.job,
        job_id,
        &payer,
        &mut accounts.payer_pending,
    )?;
    accounts.config.leave();

    emit!(JobCancelled {
        job_id,
        payer,
        refund,
    });
    msg!("Job {} cancelled - {} refunded to payer balance", job_id, refund);
    Ok(())
}

#[derive(Accounts)]
#[instruction(job_id: u64)]
pub struct CancelJob<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ProgramConfig>,

    #[account(
        mut,
        seeds = [JOB_SEED, &job_id.to_le_bytes()],
        bump = job.bump,
    )]
    pub job: Account<'info, Job>,

    // ── Payer's ledger entry for the job asset ──────────────────────────
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + PendingWithdrawal::LEN,
        seeds = [PENDING_SEED, job.payer.as_ref(), job.asset.as_ref()],
        bump,
    )]
    pub payer_pending: Account<'info, PendingWithdrawal>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
