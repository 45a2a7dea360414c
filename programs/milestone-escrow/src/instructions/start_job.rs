use anchor_lang::prelude::*;
use crate::events::JobStarted;
use crate::lifecycle;
use crate::state::*;

/// Payer starts a funded job; the worker may deliver from here on.
pub fn handler(ctx: Context<StartJob>, job_id: u64) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let payer = accounts.payer.key();

    accounts.config.enter()?;
    lifecycle::start_job(&accounts.config, &mut accounts.job, job_id, &payer)?;
    accounts.config.leave();

    emit!(JobStarted { job_id });
    msg!("Job {} started", job_id);
    Ok(())
}

#[derive(Accounts)]
#[instruction(job_id: u64)]
pub struct StartJob<'info> {
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

    pub payer: Signer<'info>,
}
