//! Pull-payment ledger and the asset transfer primitives.
//!
//! Value only enters custody through `AssetTransfer::pull` (funding, dispute
//! bonds) and only leaves through `AssetTransfer::push` after a
//! `PendingWithdrawal` entry has been zeroed and persisted.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token;
use crate::errors::EscrowError;
use crate::state::*;

// ============================================================================
// PENDING WITHDRAWAL BOOKKEEPING
// ============================================================================

impl PendingWithdrawal {
    /// Records the owner of a freshly initialized entry. Existing entries keep
    /// their owner; seeds already pin (beneficiary, asset).
    pub fn bind(&mut self, beneficiary: Pubkey, asset: Pubkey, bump: u8) {
        if self.beneficiary == Pubkey::default() {
            self.beneficiary = beneficiary;
            self.asset = asset;
            self.bump = bump;
        }
    }

    pub fn ensure_owned_by(&self, beneficiary: &Pubkey, asset: &Pubkey) -> Result<()> {
        require!(
            self.beneficiary == *beneficiary && self.asset == *asset,
            EscrowError::InvalidLedgerAccount
        );
        Ok(())
    }

    /// Balance after crediting `amount`, without touching the entry.
    pub fn credited(&self, beneficiary: &Pubkey, asset: &Pubkey, amount: u64) -> Result<u64> {
        self.ensure_owned_by(beneficiary, asset)?;
        Ok(self.amount.checked_add(amount).ok_or(EscrowError::Overflow)?)
    }

    pub fn credit(&mut self, beneficiary: &Pubkey, asset: &Pubkey, amount: u64) -> Result<()> {
        self.amount = self.credited(beneficiary, asset, amount)?;
        Ok(())
    }

    /// Zeroes the entry and returns what it held.
    pub fn take(&mut self) -> Result<u64> {
        let amount = self.amount;
        require!(amount > 0, EscrowError::NothingToWithdraw);
        self.amount = 0;
        Ok(amount)
    }
}

/// Ledger side of a withdrawal. The caller must persist `pending` before
/// pushing the returned amount out.
pub fn withdraw(
    config: &ProgramConfig,
    pending: &mut PendingWithdrawal,
    caller: &Pubkey,
    asset: &Pubkey,
) -> Result<u64> {
    config.ensure_live()?;
    require_keys_eq!(pending.beneficiary, *caller, EscrowError::Unauthorized);
    require_keys_eq!(pending.asset, *asset, EscrowError::InvalidLedgerAccount);
    pending.take()
}

/// Decodes a pending entry that may not exist yet; absent entries hold zero.
pub fn pending_amount(info: &AccountInfo) -> Result<u64> {
    if info.data_is_empty() {
        return Ok(0);
    }
    require_keys_eq!(*info.owner, crate::ID, EscrowError::InvalidLedgerAccount);
    let data = info.try_borrow_data()?;
    let mut slice: &[u8] = &data;
    Ok(PendingWithdrawal::try_deserialize(&mut slice)?.amount)
}

// ============================================================================
// ASSET VALIDATION
// ============================================================================

/// Supply snapshot of a mint supplied at job creation.
#[derive(Clone, Copy, Debug)]
pub struct MintSupply {
    pub key: Pubkey,
    pub supply: u64,
}

/// Native jobs need no mint; token jobs need the matching mint with a
/// non-zero supply.
pub fn check_asset(asset: &Pubkey, mint: Option<MintSupply>) -> Result<()> {
    if *asset == NATIVE_ASSET {
        return Ok(());
    }
    let mint = mint.ok_or(EscrowError::InvalidAsset)?;
    require_keys_eq!(mint.key, *asset, EscrowError::InvalidAsset);
    require!(mint.supply > 0, EscrowError::InvalidAsset);
    Ok(())
}

// ============================================================================
// TRANSFER PRIMITIVES
// ============================================================================

pub trait AssetTransfer {
    /// Moves `amount` from the counterparty into program custody.
    fn pull(&self, amount: u64) -> Result<()>;
    /// Moves `amount` from program custody to the counterparty.
    fn push(&self, amount: u64) -> Result<()>;
}

/// Lamport custody in the program-owned vault PDA.
pub struct NativeTransfer<'info> {
    pub party: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
}

impl<'info> AssetTransfer for NativeTransfer<'info> {
    fn pull(&self, amount: u64) -> Result<()> {
        let cpi_accounts = system_program::Transfer {
            from: self.party.clone(),
            to: self.vault.clone(),
        };
        let cpi_ctx = CpiContext::new(self.system_program.clone(), cpi_accounts);
        system_program::transfer(cpi_ctx, amount).map_err(|_| error!(EscrowError::TransferFailed))
    }

    fn push(&self, amount: u64) -> Result<()> {
        // The vault is owned by this program, so lamports move directly.
        let vault_lamports = self
            .vault
            .lamports()
            .checked_sub(amount)
            .ok_or(EscrowError::TransferFailed)?;
        let party_lamports = self
            .party
            .lamports()
            .checked_add(amount)
            .ok_or(EscrowError::Overflow)?;
        **self.vault.try_borrow_mut_lamports()? = vault_lamports;
        **self.party.try_borrow_mut_lamports()? = party_lamports;
        Ok(())
    }
}

/// SPL token custody in the per-mint vault token account, owned by the
/// vault PDA.
pub struct TokenTransfer<'info> {
    /// Signs pulls
    pub party: AccountInfo<'info>,
    pub party_token: AccountInfo<'info>,
    /// Token authority of `vault_token`, signs pushes
    pub vault: AccountInfo<'info>,
    pub vault_token: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub vault_bump: u8,
}

impl<'info> AssetTransfer for TokenTransfer<'info> {
    fn pull(&self, amount: u64) -> Result<()> {
        let cpi_accounts = token::Transfer {
            from: self.party_token.clone(),
            to: self.vault_token.clone(),
            authority: self.party.clone(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.clone(), cpi_accounts);
        token::transfer(cpi_ctx, amount).map_err(|_| error!(EscrowError::TransferFailed))
    }

    fn push(&self, amount: u64) -> Result<()> {
        let seeds: &[&[u8]] = &[VAULT_SEED, &[self.vault_bump]];
        let signer_seeds = &[seeds];

        let cpi_accounts = token::Transfer {
            from: self.vault_token.clone(),
            to: self.party_token.clone(),
            authority: self.vault.clone(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            cpi_accounts,
            signer_seeds,
        );
        token::transfer(cpi_ctx, amount).map_err(|_| error!(EscrowError::TransferFailed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_escrow_err;
    use crate::test_fixtures::*;

    #[test]
    fn test_credits_from_several_jobs_pool_together() {
        let owner = Pubkey::new_unique();
        let mut pending = pending_for(owner, NATIVE_ASSET);
        pending.credit(&owner, &NATIVE_ASSET, 3).unwrap();
        pending.credit(&owner, &NATIVE_ASSET, 4).unwrap();
        assert_eq!(pending.amount, 7);
    }

    #[test]
    fn test_credit_rejects_foreign_entry() {
        let owner = Pubkey::new_unique();
        let mut pending = pending_for(owner, NATIVE_ASSET);
        assert_escrow_err(
            pending.credit(&Pubkey::new_unique(), &NATIVE_ASSET, 1),
            EscrowError::InvalidLedgerAccount,
        );
        assert_escrow_err(
            pending.credit(&owner, &Pubkey::new_unique(), 1),
            EscrowError::InvalidLedgerAccount,
        );
        assert_eq!(pending.amount, 0);
    }

    #[test]
    fn test_credit_overflow_leaves_balance() {
        let owner = Pubkey::new_unique();
        let mut pending = pending_for(owner, NATIVE_ASSET);
        pending.credit(&owner, &NATIVE_ASSET, u64::MAX).unwrap();
        assert_escrow_err(pending.credit(&owner, &NATIVE_ASSET, 1), EscrowError::Overflow);
        assert_eq!(pending.amount, u64::MAX);
    }

    #[test]
    fn test_bind_keeps_existing_owner() {
        let owner = Pubkey::new_unique();
        let mut pending = PendingWithdrawal::default();
        pending.bind(owner, NATIVE_ASSET, 254);
        pending.bind(Pubkey::new_unique(), Pubkey::new_unique(), 1);
        assert_eq!(pending.beneficiary, owner);
        assert_eq!(pending.asset, NATIVE_ASSET);
        assert_eq!(pending.bump, 254);
    }

    #[test]
    fn test_second_withdrawal_has_nothing_left() {
        let config = config();
        let owner = Pubkey::new_unique();
        let mut pending = pending_for(owner, NATIVE_ASSET);
        pending.credit(&owner, &NATIVE_ASSET, 5).unwrap();

        assert_eq!(withdraw(&config, &mut pending, &owner, &NATIVE_ASSET).unwrap(), 5);
        assert_eq!(pending.amount, 0);
        assert_escrow_err(
            withdraw(&config, &mut pending, &owner, &NATIVE_ASSET),
            EscrowError::NothingToWithdraw,
        );
    }

    #[test]
    fn test_withdraw_is_beneficiary_only() {
        let config = config();
        let owner = Pubkey::new_unique();
        let mut pending = pending_for(owner, NATIVE_ASSET);
        pending.credit(&owner, &NATIVE_ASSET, 5).unwrap();
        assert_escrow_err(
            withdraw(&config, &mut pending, &Pubkey::new_unique(), &NATIVE_ASSET),
            EscrowError::Unauthorized,
        );
        assert_eq!(pending.amount, 5);
    }

    #[test]
    fn test_withdraw_blocked_while_paused() {
        let mut config = config();
        config.paused = true;
        let owner = Pubkey::new_unique();
        let mut pending = pending_for(owner, NATIVE_ASSET);
        pending.credit(&owner, &NATIVE_ASSET, 5).unwrap();
        assert_escrow_err(
            withdraw(&config, &mut pending, &owner, &NATIVE_ASSET),
            EscrowError::SystemPaused,
        );
        assert_eq!(pending.amount, 5);
    }

    #[test]
    fn test_pending_amount_of_absent_entry_is_zero() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &system_program::ID, false, 0);
        assert_eq!(pending_amount(&info).unwrap(), 0);
    }

    #[test]
    fn test_pending_amount_decodes_owned_entry_only() {
        let owner = Pubkey::new_unique();
        let mut pending = pending_for(owner, NATIVE_ASSET);
        pending.credit(&owner, &NATIVE_ASSET, 9).unwrap();

        let key = Pubkey::new_unique();
        let mut lamports = 1;
        let mut data = account_data(&pending);
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &crate::ID, false, 0);
        assert_eq!(pending_amount(&info).unwrap(), 9);

        let foreign = Pubkey::new_unique();
        let mut foreign_lamports = 1;
        let mut foreign_data = account_data(&pending);
        let info = AccountInfo::new(&key, false, false, &mut foreign_lamports, &mut foreign_data, &foreign, false, 0);
        assert_escrow_err(pending_amount(&info), EscrowError::InvalidLedgerAccount);
    }

    #[test]
    fn test_native_push_moves_vault_lamports() {
        let keys = [Pubkey::new_unique(), Pubkey::new_unique()];
        let (mut party_lamports, mut vault_lamports, mut system_lamports) = (1, 10, 1);
        let (mut party_data, mut vault_data, mut system_data) = (Vec::<u8>::new(), Vec::<u8>::new(), Vec::<u8>::new());
        let transfer = NativeTransfer {
            party: AccountInfo::new(&keys[0], true, true, &mut party_lamports, &mut party_data, &system_program::ID, false, 0),
            vault: AccountInfo::new(&keys[1], false, true, &mut vault_lamports, &mut vault_data, &crate::ID, false, 0),
            system_program: AccountInfo::new(&system_program::ID, false, false, &mut system_lamports, &mut system_data, &system_program::ID, true, 0),
        };

        transfer.push(4).unwrap();
        assert_eq!(transfer.party.lamports(), 5);
        assert_eq!(transfer.vault.lamports(), 6);

        assert_escrow_err(transfer.push(7), EscrowError::TransferFailed);
        assert_eq!(transfer.party.lamports(), 5);
        assert_eq!(transfer.vault.lamports(), 6);
    }

    #[test]
    fn test_check_asset() {
        assert!(check_asset(&NATIVE_ASSET, None).is_ok());

        let mint = Pubkey::new_unique();
        assert_escrow_err(check_asset(&mint, None), EscrowError::InvalidAsset);
        assert_escrow_err(
            check_asset(&mint, Some(MintSupply { key: mint, supply: 0 })),
            EscrowError::InvalidAsset,
        );
        assert_escrow_err(
            check_asset(&mint, Some(MintSupply { key: Pubkey::new_unique(), supply: 9 })),
            EscrowError::InvalidAsset,
        );
        assert!(check_asset(&mint, Some(MintSupply { key: mint, supply: 9 })).is_ok());
    }
}
