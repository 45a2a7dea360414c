use anchor_lang::prelude::*;
use crate::state::*;

/// Initialize the program configuration and the custody vault.
/// Called once after deployment; the signer becomes admin.
pub fn handler(ctx: Context<Initialize>, limits: Option<EscrowLimits>) -> Result<()> {
    let limits = limits.unwrap_or_default();
    limits.validate()?;

    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.paused = false;
    config.locked = false;
    config.job_count = 0;
    config.limits = limits;
    config.vault_bump = ctx.bumps.vault;
    config.bump = ctx.bumps.config;

    ctx.accounts.vault.bump = ctx.bumps.vault;

    msg!(
        "Program initialized: admin={}, max milestone={}, max total={}, max dispute fee={}",
        config.admin,
        limits.max_milestone_amount,
        limits.max_total_amount,
        limits.max_dispute_fee
    );
    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + ProgramConfig::LEN,
        seeds = [CONFIG_SEED],
        bump,
    )]
    pub config: Account<'info, ProgramConfig>,

    // ── Vault PDA (holds lamports, signs token transfers) ───────────────
    #[account(
        init,
        payer = admin,
        space = 8 + Vault::LEN,
        seeds = [VAULT_SEED],
        bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}
