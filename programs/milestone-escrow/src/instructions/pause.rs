use anchor_lang::prelude::*;
use crate::events::PauseToggled;
use crate::state::*;

/// Admin toggles the gate on every mutating job and withdrawal operation.
/// Queries stay available while paused.
pub fn handler(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let admin = ctx.accounts.admin.key();
    config.set_paused(&admin, paused)?;

    emit!(PauseToggled { admin, paused });
    msg!("Program {} by {}", if paused { "paused" } else { "unpaused" }, admin);
    Ok(())
}

#[derive(Accounts)]
pub struct SetPaused<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ProgramConfig>,

    pub admin: Signer<'info>,
}
