use anchor_lang::prelude::*;
use crate::events::WithdrawalCompleted;
use crate::ledger::{self, AssetTransfer, NativeTransfer};
use crate::state::*;

/// Beneficiary withdraws their whole native pending balance.
///
/// The entry is zeroed and written back, together with the held operation
/// lock, before lamports leave the vault.
pub fn handler(ctx: Context<Withdraw>) -> Result<()> {
    pay_out(ctx.accounts)
}

fn pay_out(accounts: &mut Withdraw<'_>) -> Result<()> {
    let beneficiary = accounts.beneficiary.key();

    accounts.config.enter()?;
    let amount = ledger::withdraw(
        &accounts.config,
        &mut accounts.pending,
        &beneficiary,
        &NATIVE_ASSET,
    )?;
    accounts.config.exit(&crate::ID)?;
    accounts.pending.exit(&crate::ID)?;

    // ── Push lamports out of custody ────────────────────────────────────
    NativeTransfer {
        party: accounts.beneficiary.to_account_info(),
        vault: accounts.vault.to_account_info(),
        system_program: accounts.system_program.to_account_info(),
    }
    .push(amount)?;
    accounts.config.leave();

    emit!(WithdrawalCompleted {
        beneficiary,
        asset: NATIVE_ASSET,
        amount,
    });
    msg!("Withdrawal: {} lamports to {}", amount, beneficiary);
    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ProgramConfig>,

    #[account(
        mut,
        seeds = [PENDING_SEED, beneficiary.key().as_ref(), NATIVE_ASSET.as_ref()],
        bump = pending.bump,
    )]
    pub pending: Account<'info, PendingWithdrawal>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub beneficiary: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{assert_escrow_err, EscrowError};
    use crate::test_fixtures::*;
    use anchor_lang::system_program;

    struct Buffers {
        keys: [Pubkey; 5],
        lamports: [u64; 5],
        config: Vec<u8>,
        pending: Vec<u8>,
        vault: Vec<u8>,
        unused: [Vec<u8>; 2],
    }

    fn buffers(beneficiary: Pubkey, owed: u64, vault_lamports: u64) -> Buffers {
        let mut pending = pending_for(beneficiary, NATIVE_ASSET);
        pending.amount = owed;
        Buffers {
            keys: [
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                beneficiary,
                system_program::ID,
            ],
            lamports: [1, 1, vault_lamports, 0, 1],
            config: account_data(&config()),
            pending: account_data(&pending),
            vault: account_data(&Vault::default()),
            unused: [Vec::new(), Vec::new()],
        }
    }

    /// config, pending, vault, beneficiary, system program
    fn infos(b: &mut Buffers) -> [AccountInfo<'_>; 5] {
        let [config_l, pending_l, vault_l, beneficiary_l, system_l] = &mut b.lamports;
        let [beneficiary_data, system_data] = &mut b.unused;
        [
            AccountInfo::new(&b.keys[0], false, true, config_l, &mut b.config, &crate::ID, false, 0),
            AccountInfo::new(&b.keys[1], false, true, pending_l, &mut b.pending, &crate::ID, false, 0),
            AccountInfo::new(&b.keys[2], false, true, vault_l, &mut b.vault, &crate::ID, false, 0),
            AccountInfo::new(&b.keys[3], true, true, beneficiary_l, beneficiary_data, &system_program::ID, false, 0),
            AccountInfo::new(&b.keys[4], false, false, system_l, system_data, &system_program::ID, true, 0),
        ]
    }

    fn withdraw_accounts<'a>(infos: &'a [AccountInfo<'a>; 5]) -> Withdraw<'a> {
        Withdraw {
            config: Account::try_from(&infos[0]).unwrap(),
            pending: Account::try_from(&infos[1]).unwrap(),
            vault: Account::try_from(&infos[2]).unwrap(),
            beneficiary: Signer::try_from(&infos[3]).unwrap(),
            system_program: Program::try_from(&infos[4]).unwrap(),
        }
    }

    #[test]
    fn test_withdraw_pays_out_and_persists_zeroed_entry() {
        let mut buffers = buffers(Pubkey::new_unique(), 7, 10);
        let infos = infos(&mut buffers);
        let mut accounts = withdraw_accounts(&infos);

        pay_out(&mut accounts).unwrap();

        assert_eq!(infos[2].lamports(), 3);
        assert_eq!(infos[3].lamports(), 7);
        assert_eq!(stored::<PendingWithdrawal>(&infos[1]).amount, 0);
        assert!(!accounts.config.locked);
    }

    #[test]
    fn test_entry_and_lock_are_written_before_payout() {
        let mut buffers = buffers(Pubkey::new_unique(), 7, 3);
        let infos = infos(&mut buffers);
        let mut accounts = withdraw_accounts(&infos);

        assert_escrow_err(pay_out(&mut accounts), EscrowError::TransferFailed);

        assert_eq!(stored::<PendingWithdrawal>(&infos[1]).amount, 0);
        assert!(stored::<ProgramConfig>(&infos[0]).locked);
        assert_eq!(infos[2].lamports(), 3);
        assert_eq!(infos[3].lamports(), 0);
    }

    #[test]
    fn test_held_lock_rejects_withdrawal() {
        let mut buffers = buffers(Pubkey::new_unique(), 7, 10);
        let infos = infos(&mut buffers);
        let mut accounts = withdraw_accounts(&infos);
        accounts.config.locked = true;

        assert_escrow_err(pay_out(&mut accounts), EscrowError::ReentrantCall);
        assert_eq!(stored::<PendingWithdrawal>(&infos[1]).amount, 7);
        assert_eq!(infos[3].lamports(), 0);
    }
}
