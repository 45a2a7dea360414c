use anchor_lang::prelude::*;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const CONFIG_SEED: &[u8] = b"config";
pub const VAULT_SEED: &[u8] = b"vault";
pub const VAULT_TOKEN_SEED: &[u8] = b"vault_token";
pub const JOB_SEED: &[u8] = b"job";
pub const PENDING_SEED: &[u8] = b"pending";

/// Maximum number of milestones per job
pub const MAX_MILESTONES: usize = 10;

/// Maximum length for an evidence content identifier (CID, URI, hash)
pub const MAX_EVIDENCE_REF_LEN: usize = 128;

/// Sentinel asset id for jobs paid in native lamports
pub const NATIVE_ASSET: Pubkey = Pubkey::new_from_array([0u8; 32]);

pub const DEFAULT_MAX_MILESTONE_AMOUNT: u64 = 1_000_000_000_000_000;
pub const DEFAULT_MAX_TOTAL_AMOUNT: u64 = 10_000_000_000_000_000;
pub const DEFAULT_MAX_DISPUTE_FEE: u64 = 10_000_000_000;

// ============================================================================
// PROGRAM CONFIG - Global configuration PDA
// ============================================================================

/// Ceilings applied when a job is created.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct EscrowLimits {
    /// Upper bound for a single milestone amount
    pub max_milestone_amount: u64,
    /// Upper bound for the sum of all milestone amounts
    pub max_total_amount: u64,
    /// Upper bound for the dispute bond
    pub max_dispute_fee: u64,
}

impl EscrowLimits {
    pub const LEN: usize = 8 + 8 + 8;

    pub fn validate(&self) -> Result<()> {
        require!(
            self.max_milestone_amount > 0
                && self.max_total_amount > 0
                && self.max_dispute_fee > 0,
            crate::errors::EscrowError::LimitExceeded
        );
        require!(
            self.max_milestone_amount <= self.max_total_amount,
            crate::errors::EscrowError::LimitExceeded
        );
        Ok(())
    }
}

impl Default for EscrowLimits {
    fn default() -> Self {
        Self {
            max_milestone_amount: DEFAULT_MAX_MILESTONE_AMOUNT,
            max_total_amount: DEFAULT_MAX_TOTAL_AMOUNT,
            max_dispute_fee: DEFAULT_MAX_DISPUTE_FEE,
        }
    }
}

#[account]
#[derive(Default, Debug)]
pub struct ProgramConfig {
    /// Admin who can pause the program and update configuration
    pub admin: Pubkey,
    /// When set, every mutating job operation is rejected
    pub paused: bool,
    /// Held while a mutating operation is executing
    pub locked: bool,
    /// Number of jobs ever created; the next job id
    pub job_count: u64,
    /// Creation-time ceilings
    pub limits: EscrowLimits,
    /// Vault PDA bump seed
    pub vault_bump: u8,
    /// PDA bump seed
    pub bump: u8,
}

impl ProgramConfig {
    /// admin (32) + paused (1) + locked (1) + job_count (8) + limits (24)
    /// + vault_bump (1) + bump (1) = 68
    pub const LEN: usize = 32 + 1 + 1 + 8 + EscrowLimits::LEN + 1 + 1;
}

// ============================================================================
// VAULT - Custody PDA for lamports and token authority
// ============================================================================

#[account]
#[derive(Default)]
pub struct Vault {
    pub bump: u8,
}

impl Vault {
    pub const LEN: usize = 1;
}

// ============================================================================
// JOB - Per-job escrow state PDA
// ============================================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum JobState {
    /// Terms recorded, not yet funded
    #[default]
    Created,
    /// Escrow holds the full budget
    Funded,
    /// Worker may deliver milestones
    InProgress,
    /// Awaiting arbiter decision
    Disputed,
    /// All milestones approved or dispute resolved
    Completed,
    /// Payer cancelled before funding
    Cancelled,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct Milestone {
    /// Payment released on approval
    pub amount: u64,
    pub delivered: bool,
    pub approved: bool,
    /// Content identifier of the delivered work (empty until delivered)
    pub evidence_ref: String,
}

impl Milestone {
    /// amount (8) + delivered (1) + approved (1) + evidence_ref (4 + 128)
    pub const LEN: usize = 8 + 1 + 1 + (4 + MAX_EVIDENCE_REF_LEN);

    pub fn new(amount: u64) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }
}

#[account]
#[derive(Default, Debug)]
pub struct Job {
    /// Sequential job id, also the PDA seed
    pub id: u64,
    /// Party who created and funds the job
    pub payer: Pubkey,
    /// Party delivering milestones
    pub worker: Pubkey,
    /// Party resolving disputes
    pub arbiter: Pubkey,
    /// Token mint, or NATIVE_ASSET for lamports
    pub asset: Pubkey,
    /// Sum of all milestone amounts
    pub total_amount: u64,
    pub state: JobState,
    /// Fixed-order milestones, 1..=MAX_MILESTONES
    pub milestones: Vec<Milestone>,
    /// Funds currently custodied for this job
    pub escrow_balance: u64,
    /// Bond required to open a dispute, in lamports
    pub dispute_fee: u64,
    /// Unix timestamp when job was created
    pub created_at: i64,
    /// Job PDA bump seed
    pub bump: u8,
}

impl Job {
    /// Fields:
    ///   id:             8
    ///   payer:          32
    ///   worker:         32
    ///   arbiter:        32
    ///   asset:          32
    ///   total_amount:   8
    ///   state (enum):   1
    ///   milestones:     4 + MAX_MILESTONES * Milestone::LEN = 1424
    ///   escrow_balance: 8
    ///   dispute_fee:    8
    ///   created_at:     8
    ///   bump:           1
    ///   -----------------------------------------
    ///   Total:          1594
    pub const LEN: usize = 8
        + 32  // payer
        + 32  // worker
        + 32  // arbiter
        + 32  // asset
        + 8   // total_amount
        + 1   // state
        + (4 + MAX_MILESTONES * Milestone::LEN)
        + 8   // escrow_balance
        + 8   // dispute_fee
        + 8   // created_at
        + 1; // bump

    pub fn is_native(&self) -> bool {
        self.asset == NATIVE_ASSET
    }

    pub fn view(&self) -> JobView {
        JobView {
            payer: self.payer,
            worker: self.worker,
            arbiter: self.arbiter,
            asset: self.asset,
            total_amount: self.total_amount,
            state: self.state,
            escrow_balance: self.escrow_balance,
            milestone_count: self.milestones.len() as u8,
            dispute_fee: self.dispute_fee,
            created_at: self.created_at,
        }
    }
}

/// Terms supplied by the payer at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct JobTerms {
    pub worker: Pubkey,
    pub arbiter: Pubkey,
    pub asset: Pubkey,
    pub milestone_amounts: Vec<u64>,
    pub dispute_fee: u64,
}

/// Read-only summary returned by `get_job`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct JobView {
    pub payer: Pubkey,
    pub worker: Pubkey,
    pub arbiter: Pubkey,
    pub asset: Pubkey,
    pub total_amount: u64,
    pub state: JobState,
    pub escrow_balance: u64,
    pub milestone_count: u8,
    pub dispute_fee: u64,
    pub created_at: i64,
}

// ============================================================================
// PENDING WITHDRAWAL - Pull-payment ledger entry per (beneficiary, asset)
// ============================================================================

#[account]
#[derive(Default, Debug)]
pub struct PendingWithdrawal {
    pub beneficiary: Pubkey,
    /// Token mint, or NATIVE_ASSET for lamports
    pub asset: Pubkey,
    /// Accrued amount awaiting withdrawal
    pub amount: u64,
    pub bump: u8,
}

impl PendingWithdrawal {
    /// beneficiary (32) + asset (32) + amount (8) + bump (1) = 73
    pub const LEN: usize = 32 + 32 + 8 + 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialized_len<T: AnchorSerialize>(value: &T) -> usize {
        let mut buf = Vec::new();
        value.serialize(&mut buf).unwrap();
        buf.len()
    }

    #[test]
    fn test_account_sizes_fit_serialized_form() {
        let job = Job {
            milestones: vec![
                Milestone {
                    amount: u64::MAX,
                    delivered: true,
                    approved: true,
                    evidence_ref: "x".repeat(MAX_EVIDENCE_REF_LEN),
                };
                MAX_MILESTONES
            ],
            ..Job::default()
        };
        assert_eq!(serialized_len(&job), Job::LEN);
        assert_eq!(serialized_len(&ProgramConfig::default()), ProgramConfig::LEN);
        assert_eq!(
            serialized_len(&PendingWithdrawal::default()),
            PendingWithdrawal::LEN
        );
    }

    #[test]
    fn test_default_limits_are_valid() {
        assert!(EscrowLimits::default().validate().is_ok());
        let inverted = EscrowLimits {
            max_milestone_amount: 10,
            max_total_amount: 5,
            max_dispute_fee: 1,
        };
        assert!(inverted.validate().is_err());
    }
}
