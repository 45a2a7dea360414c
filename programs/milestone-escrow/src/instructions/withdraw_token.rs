use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::errors::EscrowError;
use crate::events::WithdrawalCompleted;
use crate::ledger::{self, AssetTransfer, TokenTransfer};
use crate::state::*;

/// Beneficiary withdraws their whole pending balance of one SPL token.
/// The vault PDA signs the outbound transfer.
pub fn handler(ctx: Context<WithdrawToken>) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let beneficiary = accounts.beneficiary.key();
    let asset = accounts.mint.key();

    accounts.config.enter()?;
    let amount = ledger::withdraw(
        &accounts.config,
        &mut accounts.pending,
        &beneficiary,
        &asset,
    )?;
    accounts.config.exit(&crate::ID)?;
    accounts.pending.exit(&crate::ID)?;

    // ── Push tokens out of custody ──────────────────────────────────────
    TokenTransfer {
        party: accounts.beneficiary.to_account_info(),
        party_token: accounts.beneficiary_token.to_account_info(),
        vault: accounts.vault.to_account_info(),
        vault_token: accounts.vault_token.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
        vault_bump: accounts.config.vault_bump,
    }
    .push(amount)?;
    accounts.config.leave();

    emit!(WithdrawalCompleted {
        beneficiary,
        asset,
        amount,
    });
    msg!("Withdrawal: {} tokens to {} (mint: {})", amount, beneficiary, asset);
    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawToken<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ProgramConfig>,

    #[account(
        mut,
        seeds = [PENDING_SEED, beneficiary.key().as_ref(), mint.key().as_ref()],
        bump = pending.bump,
    )]
    pub pending: Account<'info, PendingWithdrawal>,

    /// Token authority of the vault token account
    #[account(
        seeds = [VAULT_SEED],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, Vault>,

    /// SECURITY: Vault token validated by PDA seeds + mint check
    #[account(
        mut,
        seeds = [VAULT_TOKEN_SEED, mint.key().as_ref()],
        bump,
        constraint = vault_token.mint == mint.key() @ EscrowError::AssetMismatch,
    )]
    pub vault_token: Account<'info, TokenAccount>,

    /// SECURITY: Beneficiary token owner + mint validated
    #[account(
        mut,
        constraint = beneficiary_token.owner == beneficiary.key() @ EscrowError::InvalidTokenOwner,
        constraint = beneficiary_token.mint == mint.key() @ EscrowError::AssetMismatch,
    )]
    pub beneficiary_token: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    pub beneficiary: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
