use anchor_lang::prelude::*;
use crate::events::MilestoneApproved;
use crate::lifecycle;
use crate::state::*;

/// Payer approves a delivered milestone.
///
/// The milestone amount moves from job escrow to the worker's pending
/// balance; nothing leaves the program here. The worker withdraws later.
pub fn handler(ctx: Context<ApproveMilestone>, job_id: u64, index: u8) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let payer = accounts.payer.key();
    let (worker, asset) = (accounts.job.worker, accounts.job.asset);
    accounts
        .worker_pending
        .bind(worker, asset, ctx.bumps.worker_pending);

    accounts.config.enter()?;
    let amount = lifecycle::approve_milestone(
        &accounts.config,
        &mut accounts.job,
        job_id,
        &payer,
        index,
        &mut accounts.worker_pending,
    )?;
    accounts.config.leave();

    let job_completed = accounts.job.state == JobState::Completed;
    emit!(MilestoneApproved {
        job_id,
        index,
        worker,
        amount,
        job_completed,
    });
    msg!(
        "Milestone {} of job {} approved - {} credited to worker{}",
        index,
        job_id,
        amount,
        if job_completed { " (job completed)" } else { "" }
    );
    Ok(())
}

#[derive(Accounts)]
#[instruction(job_id: u64)]
pub struct ApproveMilestone<'info> {
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

    // ── Worker's ledger entry for the job asset ─────────────────────────
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + PendingWithdrawal::LEN,
        seeds = [PENDING_SEED, job.worker.as_ref(), job.asset.as_ref()],
        bump,
    )]
    pub worker_pending: Account<'info, PendingWithdrawal>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
