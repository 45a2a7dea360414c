use anchor_lang::prelude::*;
use crate::state::EscrowLimits;

// ──────────────────────────────────────────────────────
// Events: one per committed mutating operation
// ──────────────────────────────────────────────────────

#[event]
pub struct JobCreated {
    pub job_id: u64,
    pub payer: Pubkey,
    pub worker: Pubkey,
    pub arbiter: Pubkey,
    pub asset: Pubkey,
    pub total_amount: u64,
    pub milestone_count: u8,
    pub dispute_fee: u64,
    pub created_at: i64,
}

#[event]
pub struct JobFunded {
    pub job_id: u64,
    pub payer: Pubkey,
    pub asset: Pubkey,
    pub amount: u64,
}

#[event]
pub struct JobStarted {
    pub job_id: u64,
}

#[event]
pub struct MilestoneDelivered {
    pub job_id: u64,
    pub index: u8,
    pub evidence_ref: String,
}

#[event]
pub struct MilestoneApproved {
    pub job_id: u64,
    pub index: u8,
    pub worker: Pubkey,
    pub amount: u64,
    pub job_completed: bool,
}

#[event]
pub struct DisputeOpened {
    pub job_id: u64,
    pub raised_by: Pubkey,
    pub fee: u64,
    pub excess_returned: u64,
}

#[event]
pub struct DisputeResolved {
    pub job_id: u64,
    pub arbiter: Pubkey,
    pub worker_amount: u64,
    pub payer_refund: u64,
    pub residual: u64,
}

#[event]
pub struct JobCancelled {
    pub job_id: u64,
    pub payer: Pubkey,
    pub refund: u64,
}

#[event]
pub struct WithdrawalCompleted {
    pub beneficiary: Pubkey,
    pub asset: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PauseToggled {
    pub admin: Pubkey,
    pub paused: bool,
}

#[event]
pub struct ConfigUpdated {
    pub admin: Pubkey,
    pub limits: EscrowLimits,
}
