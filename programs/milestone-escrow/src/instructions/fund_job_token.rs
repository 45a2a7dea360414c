use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::errors::EscrowError;
use crate::events::JobFunded;
use crate::ledger::{AssetTransfer, TokenTransfer};
use crate::lifecycle;
use crate::state::*;

/// Payer funds an SPL token job. No lamports may be attached; the job total
/// is pulled from the payer's token account into the per-mint vault.
pub fn handler(ctx: Context<FundJobToken>, job_id: u64, attached: u64) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let payer = accounts.payer.key();
    let asset = accounts.mint.key();

    accounts.config.enter()?;
    let amount = lifecycle::fund_job(
        &accounts.config,
        &mut accounts.job,
        job_id,
        &payer,
        attached,
        &asset,
    )?;
    accounts.config.exit(&crate::ID)?;
    accounts.job.exit(&crate::ID)?;

    // ── Pull tokens into custody ────────────────────────────────────────
    TokenTransfer {
        party: accounts.payer.to_account_info(),
        party_token: accounts.payer_token.to_account_info(),
        vault: accounts.vault.to_account_info(),
        vault_token: accounts.vault_token.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
        vault_bump: accounts.config.vault_bump,
    }
    .pull(amount)?;
    accounts.config.leave();

    emit!(JobFunded {
        job_id,
        payer,
        asset,
        amount,
    });
    msg!("Job {} funded - {} tokens escrowed (mint: {})", job_id, amount, asset);
    Ok(())
}

#[derive(Accounts)]
#[instruction(job_id: u64)]
pub struct FundJobToken<'info> {
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

    /// Token authority of the vault token account
    #[account(
        seeds = [VAULT_SEED],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, Vault>,

    // ── Vault token account PDA for this mint ───────────────────────────
    #[account(
        init_if_needed,
        payer = payer,
        token::mint = mint,
        token::authority = vault,
        seeds = [VAULT_TOKEN_SEED, mint.key().as_ref()],
        bump,
    )]
    pub vault_token: Account<'info, TokenAccount>,

    /// SECURITY: Validate owner matches signer and mint matches job mint
    #[account(
        mut,
        constraint = payer_token.owner == payer.key() @ EscrowError::InvalidTokenOwner,
        constraint = payer_token.mint == mint.key() @ EscrowError::AssetMismatch,
    )]
    pub payer_token: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
