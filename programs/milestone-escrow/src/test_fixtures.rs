use anchor_lang::prelude::*;
use crate::lifecycle;
use crate::state::*;

pub(crate) struct Parties {
    pub payer: Pubkey,
    pub worker: Pubkey,
    pub arbiter: Pubkey,
    pub outsider: Pubkey,
}

pub(crate) fn parties() -> Parties {
    Parties {
        payer: Pubkey::new_unique(),
        worker: Pubkey::new_unique(),
        arbiter: Pubkey::new_unique(),
        outsider: Pubkey::new_unique(),
    }
}

pub(crate) fn config() -> ProgramConfig {
    ProgramConfig {
        admin: Pubkey::new_unique(),
        ..ProgramConfig::default()
    }
}

pub(crate) fn terms(parties: &Parties, amounts: &[u64], dispute_fee: u64) -> JobTerms {
    JobTerms {
        worker: parties.worker,
        arbiter: parties.arbiter,
        asset: NATIVE_ASSET,
        milestone_amounts: amounts.to_vec(),
        dispute_fee,
    }
}

/// Account bytes as stored on chain, discriminator included.
pub(crate) fn account_data<T: AccountSerialize>(account: &T) -> Vec<u8> {
    let mut data = Vec::new();
    account.try_serialize(&mut data).unwrap();
    data
}

/// Decodes an account written through `AccountInfo`.
pub(crate) fn stored<T: AccountDeserialize>(info: &AccountInfo) -> T {
    let data = info.try_borrow_data().unwrap();
    let mut slice: &[u8] = &data;
    T::try_deserialize(&mut slice).unwrap()
}

pub(crate) fn pending_for(beneficiary: Pubkey, asset: Pubkey) -> PendingWithdrawal {
    let mut pending = PendingWithdrawal::default();
    pending.bind(beneficiary, asset, 255);
    pending
}

/// Native job 0 in `Created`.
pub(crate) fn created_job(amounts: &[u64], dispute_fee: u64) -> (ProgramConfig, Job, Parties) {
    let mut config = config();
    let parties = parties();
    let mut job = Job::default();
    lifecycle::create_job(
        &mut config,
        &mut job,
        parties.payer,
        terms(&parties, amounts, dispute_fee),
        None,
        1_700_000_000,
        255,
    )
    .unwrap();
    (config, job, parties)
}

/// Native job 0, funded with its exact total and started.
pub(crate) fn in_progress_job(amounts: &[u64], dispute_fee: u64) -> (ProgramConfig, Job, Parties) {
    let (config, mut job, parties) = created_job(amounts, dispute_fee);
    let total = job.total_amount;
    lifecycle::fund_job(&config, &mut job, 0, &parties.payer, total, &NATIVE_ASSET).unwrap();
    lifecycle::start_job(&config, &mut job, 0, &parties.payer).unwrap();
    (config, job, parties)
}
