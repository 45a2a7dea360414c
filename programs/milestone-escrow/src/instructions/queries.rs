//! Read-only instructions. They return data through Anchor return values
//! and ignore the pause switch and the operation lock.

use anchor_lang::prelude::*;
use crate::errors::EscrowError;
use crate::ledger;
use crate::state::*;

pub fn job_view(ctx: Context<GetJob>, job_id: u64) -> Result<JobView> {
    let job = load_job(&ctx.accounts.config, job_id, &ctx.accounts.job.to_account_info())?;
    Ok(job.view())
}

pub fn milestone(ctx: Context<GetJob>, job_id: u64, index: u8) -> Result<Milestone> {
    let job = load_job(&ctx.accounts.config, job_id, &ctx.accounts.job.to_account_info())?;
    milestone_at(&job, index)
}

/// Decodes a job PDA. Ids past the counter and accounts that were never
/// created are `NotFound`.
pub fn load_job(config: &ProgramConfig, job_id: u64, info: &AccountInfo) -> Result<Job> {
    config.ensure_job_exists(job_id)?;
    require!(!info.data_is_empty(), EscrowError::NotFound);
    require_keys_eq!(*info.owner, crate::ID, EscrowError::NotFound);
    let data = info.try_borrow_data()?;
    let mut slice: &[u8] = &data;
    Job::try_deserialize(&mut slice)
}

fn milestone_at(job: &Job, index: u8) -> Result<Milestone> {
    let milestone = job
        .milestones
        .get(index as usize)
        .ok_or(EscrowError::NotFound)?;
    Ok(milestone.clone())
}

pub fn pending_withdrawal(
    ctx: Context<GetPendingWithdrawal>,
    _beneficiary: Pubkey,
    _asset: Pubkey,
) -> Result<u64> {
    ledger::pending_amount(&ctx.accounts.pending.to_account_info())
}

pub fn job_count(ctx: Context<GetJobCount>) -> Result<u64> {
    Ok(ctx.accounts.config.job_count)
}

#[derive(Accounts)]
#[instruction(job_id: u64)]
pub struct GetJob<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ProgramConfig>,

    /// CHECK: job that may not exist. Validated by seeds, decoded by
    /// `load_job`.
    #[account(
        seeds = [JOB_SEED, &job_id.to_le_bytes()],
        bump,
    )]
    pub job: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey, asset: Pubkey)]
pub struct GetPendingWithdrawal<'info> {
    /// CHECK: ledger entry that may not exist yet. Validated by seeds,
    /// decoded by `ledger::pending_amount`.
    #[account(
        seeds = [PENDING_SEED, beneficiary.as_ref(), asset.as_ref()],
        bump,
    )]
    pub pending: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct GetJobCount<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ProgramConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_escrow_err;
    use crate::test_fixtures::*;

    #[test]
    fn test_load_job_decodes_stored_job() {
        let (config, job, _) = created_job(&[3, 2], 1);
        let key = Pubkey::new_unique();
        let mut lamports = 1;
        let mut data = account_data(&job);
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &crate::ID, false, 0);

        let loaded = load_job(&config, 0, &info).unwrap();
        assert_eq!(loaded.view(), job.view());
        assert_eq!(milestone_at(&loaded, 1).unwrap().amount, 2);
        assert_escrow_err(milestone_at(&loaded, 2), EscrowError::NotFound);
    }

    #[test]
    fn test_unknown_job_is_not_found() {
        let (config, _, _) = created_job(&[3], 1);
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &anchor_lang::system_program::ID,
            false,
            0,
        );

        assert_escrow_err(load_job(&config, 5, &info), EscrowError::NotFound);
        assert_escrow_err(load_job(&config, 0, &info), EscrowError::NotFound);
    }
}
