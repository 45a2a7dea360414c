use anchor_lang::prelude::*;

#[error_code]
pub enum EscrowError {
    // ── Lookup errors ───────────────────────────────────────────────────
    #[msg("Job or milestone not found")]
    NotFound,

    // ── Authorization errors ────────────────────────────────────────────
    #[msg("Unauthorized: signer does not hold the required role")]
    Unauthorized,

    #[msg("Program is paused")]
    SystemPaused,

    #[msg("Reentrant call: another mutating operation is in progress")]
    ReentrantCall,

    // ── Status errors ───────────────────────────────────────────────────
    #[msg("Invalid job state for this operation")]
    InvalidState,

    #[msg("Milestone has already been processed")]
    AlreadyProcessed,

    #[msg("Milestone has not been delivered")]
    MilestoneNotDelivered,

    // ── Validation errors ───────────────────────────────────────────────
    #[msg("Milestone count, amount or dispute fee outside configured bounds")]
    LimitExceeded,

    #[msg("Worker and arbiter must be set and distinct from each other and the payer")]
    InvalidParticipant,

    #[msg("Asset is not a valid mint with non-zero supply")]
    InvalidAsset,

    #[msg("Asset does not match the job asset")]
    AssetMismatch,

    #[msg("Evidence reference must be non-empty and at most 128 bytes")]
    InvalidEvidence,

    #[msg("Token account owner does not match expected party")]
    InvalidTokenOwner,

    #[msg("Pending withdrawal account does not belong to this beneficiary and asset")]
    InvalidLedgerAccount,

    // ── Funds errors ────────────────────────────────────────────────────
    #[msg("Insufficient funds or wrong funding amount")]
    InsufficientFunds,

    #[msg("Nothing to withdraw")]
    NothingToWithdraw,

    #[msg("Asset transfer failed")]
    TransferFailed,

    // ── Arithmetic errors ───────────────────────────────────────────────
    #[msg("Arithmetic overflow")]
    Overflow,
}

#[cfg(test)]
pub(crate) fn assert_escrow_err<T: std::fmt::Debug>(result: Result<T>, expected: EscrowError) {
    let expected: anchor_lang::error::Error = expected.into();
    assert_eq!(result.unwrap_err(), expected);
}
