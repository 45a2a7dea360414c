use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use crate::events::JobCreated;
use crate::ledger::MintSupply;
use crate::lifecycle;
use crate::state::*;

/// Create a new job in `Created` state.
///
/// The signer becomes the payer. The job PDA is derived from the current
/// job counter, so ids are dense and never reused. Token jobs must pass the
/// mint so its supply can be checked; native jobs omit it.
pub fn handler(ctx: Context<CreateJob>, terms: JobTerms) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.job;
    let mint = ctx.accounts.mint.as_ref().map(|mint| MintSupply {
        key: mint.key(),
        supply: mint.supply,
    });

    let accounts = &mut *ctx.accounts;
    let payer = accounts.payer.key();

    accounts.config.enter()?;
    let job_id = lifecycle::create_job(
        &mut accounts.config,
        &mut accounts.job,
        payer,
        terms,
        mint,
        now,
        bump,
    )?;
    accounts.config.leave();

    let job = &accounts.job;
    emit!(JobCreated {
        job_id,
        payer,
        worker: job.worker,
        arbiter: job.arbiter,
        asset: job.asset,
        total_amount: job.total_amount,
        milestone_count: job.milestones.len() as u8,
        dispute_fee: job.dispute_fee,
        created_at: job.created_at,
    });
    msg!(
        "Job {} created: {} milestones, total {} (asset: {})",
        job_id,
        job.milestones.len(),
        job.total_amount,
        job.asset
    );
    Ok(())
}

#[derive(Accounts)]
pub struct CreateJob<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ProgramConfig>,

    // ── Job PDA, keyed by the next job id ───────────────────────────────
    #[account(
        init,
        payer = payer,
        space = 8 + Job::LEN,
        seeds = [JOB_SEED, &config.job_count.to_le_bytes()],
        bump,
    )]
    pub job: Account<'info, Job>,

    #[account(mut)]
    pub payer: Signer<'info>,

    /// Token mint for token jobs; omitted for native jobs
    pub mint: Option<Account<'info, Mint>>,

    pub system_program: Program<'info, System>,
}
