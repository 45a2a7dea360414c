use anchor_lang::prelude::*;
use crate::dispute;
use crate::events::DisputeResolved;
use crate::state::*;

/// Job arbiter resolves a dispute by splitting escrow.
///
/// `worker_amount` and `payer_refund` are credited to the respective
/// pending balances. Escrow not awarded to either side remains on the job
/// as a residual; the arbiter is not paid from it and no instruction
/// releases it afterwards.
pub fn handler(
    ctx: Context<ResolveDispute>,
    job_id: u64,
    worker_amount: u64,
    payer_refund: u64,
) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let arbiter = accounts.arbiter.key();
    let (worker, payer, asset) = (accounts.job.worker, accounts.job.payer, accounts.job.asset);
    accounts
        .worker_pending
        .bind(worker, asset, ctx.bumps.worker_pending);
    accounts
        .payer_pending
        .bind(payer, asset, ctx.bumps.payer_pending);

    accounts.config.enter()?;
    let residual = dispute::resolve_dispute(
        &accounts.config,
        &mut accounts.job,
        job_id,
        &arbiter,
        worker_amount,
        payer_refund,
        &mut accounts.worker_pending,
        &mut accounts.payer_pending,
    )?;
    accounts.config.leave();

    emit!(DisputeResolved {
        job_id,
        arbiter,
        worker_amount,
        payer_refund,
        residual,
    });
    msg!(
        "Dispute resolved for job {}: {} to worker, {} to payer, {} left in escrow",
        job_id,
        worker_amount,
        payer_refund,
        residual
    );
    Ok(())
}

#[derive(Accounts)]
#[instruction(job_id: u64)]
pub struct ResolveDispute<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ProgramConfig>,

    /// SECURITY: PDA seeds ensure legitimate job account
    #[account(
        mut,
        seeds = [JOB_SEED, &job_id.to_le_bytes()],
        bump = job.bump,
    )]
    pub job: Account<'info, Job>,

    #[account(
        init_if_needed,
        payer = arbiter,
        space = 8 + PendingWithdrawal::LEN,
        seeds = [PENDING_SEED, job.worker.as_ref(), job.asset.as_ref()],
        bump,
    )]
    pub worker_pending: Account<'info, PendingWithdrawal>,

    #[account(
        init_if_needed,
        payer = arbiter,
        space = 8 + PendingWithdrawal::LEN,
        seeds = [PENDING_SEED, job.payer.as_ref(), job.asset.as_ref()],
        bump,
    )]
    pub payer_pending: Account<'info, PendingWithdrawal>,

    #[account(mut)]
    pub arbiter: Signer<'info>,

    pub system_program: Program<'info, System>,
}
