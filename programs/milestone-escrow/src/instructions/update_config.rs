use anchor_lang::prelude::*;
use crate::events::ConfigUpdated;
use crate::state::*;

/// Update program configuration (admin-only).
/// Allows transferring admin rights or changing the creation ceilings.
/// Ceilings only apply to jobs created afterwards.
pub fn handler(
    ctx: Context<UpdateConfig>,
    new_admin: Option<Pubkey>,
    new_limits: Option<EscrowLimits>,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.ensure_admin(&ctx.accounts.admin.key())?;

    if let Some(limits) = new_limits {
        limits.validate()?;
        msg!(
            "Limits updated: max milestone {} -> {}, max total {} -> {}, max dispute fee {} -> {}",
            config.limits.max_milestone_amount,
            limits.max_milestone_amount,
            config.limits.max_total_amount,
            limits.max_total_amount,
            config.limits.max_dispute_fee,
            limits.max_dispute_fee
        );
        config.limits = limits;
    }

    if let Some(admin) = new_admin {
        msg!("Admin transferred: {} -> {}", config.admin, admin);
        config.admin = admin;
    }

    emit!(ConfigUpdated {
        admin: config.admin,
        limits: config.limits,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ProgramConfig>,

    pub admin: Signer<'info>,
}
