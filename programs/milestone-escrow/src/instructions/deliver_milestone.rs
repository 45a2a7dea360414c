use anchor_lang::prelude::*;
use crate::events::MilestoneDelivered;
use crate::lifecycle;
use crate::state::*;

/// Worker marks a milestone delivered and records the evidence reference
/// (a content identifier for work stored off-chain).
pub fn handler(
    ctx: Context<DeliverMilestone>,
    job_id: u64,
    index: u8,
    evidence_ref: String,
) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let worker = accounts.worker.key();

    accounts.config.enter()?;
    lifecycle::deliver_milestone(
        &accounts.config,
        &mut accounts.job,
        job_id,
        &worker,
        index,
        evidence_ref.clone(),
    )?;
    accounts.config.leave();

    msg!("Milestone {} of job {} delivered: {}", index, job_id, evidence_ref);
    emit!(MilestoneDelivered {
        job_id,
        index,
        evidence_ref,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(job_id: u64)]
pub struct DeliverMilestone<'info> {
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

    pub worker: Signer<'info>,
}
