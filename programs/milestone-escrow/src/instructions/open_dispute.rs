use anchor_lang::prelude::*;
use crate::dispute;
use crate::events::DisputeOpened;
use crate::ledger::{AssetTransfer, NativeTransfer};
use crate::state::*;

/// Payer or worker opens a dispute on a job in progress.
///
/// `attached` is the lamport amount the caller offers as bond. Exactly the
/// job's dispute fee is collected into the vault; the excess never leaves
/// the caller. The bond is held by the vault and is not part of job escrow.
pub fn handler(ctx: Context<OpenDispute>, job_id: u64, attached: u64) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let caller = accounts.caller.key();

    accounts.config.enter()?;
    let bond = dispute::open_dispute(
        &accounts.config,
        &mut accounts.job,
        job_id,
        &caller,
        attached,
    )?;
    accounts.config.exit(&crate::ID)?;
    accounts.job.exit(&crate::ID)?;

    // ── Collect the bond ────────────────────────────────────────────────
    NativeTransfer {
        party: accounts.caller.to_account_info(),
        vault: accounts.vault.to_account_info(),
        system_program: accounts.system_program.to_account_info(),
    }
    .pull(bond.fee)?;
    accounts.config.leave();

    emit!(DisputeOpened {
        job_id,
        raised_by: caller,
        fee: bond.fee,
        excess_returned: bond.excess,
    });
    msg!(
        "Dispute opened on job {} by {:?} {} (fee {}, excess returned {})",
        job_id,
        bond.raised_by,
        caller,
        bond.fee,
        bond.excess
    );
    Ok(())
}

#[derive(Accounts)]
#[instruction(job_id: u64)]
pub struct OpenDispute<'info> {
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

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, Vault>,

    /// Payer or worker of the job
    #[account(mut)]
    pub caller: Signer<'info>,

    pub system_program: Program<'info, System>,
}
