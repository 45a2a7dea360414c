use anchor_lang::prelude::*;
use crate::events::JobFunded;
use crate::ledger::{AssetTransfer, NativeTransfer};
use crate::lifecycle;
use crate::state::*;

/// Payer funds a native (lamport) job with exactly its total amount.
///
/// Job state and the held operation lock are written back before the
/// lamports are pulled into the vault.
pub fn handler(ctx: Context<FundJob>, job_id: u64, attached: u64) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let payer = accounts.payer.key();

    accounts.config.enter()?;
    let amount = lifecycle::fund_job(
        &accounts.config,
        &mut accounts.job,
        job_id,
        &payer,
        attached,
        &NATIVE_ASSET,
    )?;
    accounts.config.exit(&crate::ID)?;
    accounts.job.exit(&crate::ID)?;

    // ── Pull lamports into custody ──────────────────────────────────────
    NativeTransfer {
        party: accounts.payer.to_account_info(),
        vault: accounts.vault.to_account_info(),
        system_program: accounts.system_program.to_account_info(),
    }
    .pull(amount)?;
    accounts.config.leave();

    emit!(JobFunded {
        job_id,
        payer,
        asset: NATIVE_ASSET,
        amount,
    });
    msg!("Job {} funded - {} lamports escrowed", job_id, amount);
    Ok(())
}

#[derive(Accounts)]
#[instruction(job_id: u64)]
pub struct FundJob<'info> {
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
        mut,
        seeds = [VAULT_SEED],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
