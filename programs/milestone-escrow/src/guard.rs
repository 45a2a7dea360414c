//! Access control shared by every mutating operation: role checks, the
//! program-wide pause switch and the single active-operation lock.

use anchor_lang::prelude::*;
use crate::errors::EscrowError;
use crate::state::*;

/// Per-job roles. The administrator is tracked on `ProgramConfig`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    Payer,
    Worker,
    Arbiter,
}

impl Role {
    pub fn holder(self, job: &Job) -> Pubkey {
        match self {
            Role::Payer => job.payer,
            Role::Worker => job.worker,
            Role::Arbiter => job.arbiter,
        }
    }

    /// First role among `roles` held by `caller` on `job`.
    pub fn held_by(roles: &[Role], job: &Job, caller: &Pubkey) -> Option<Role> {
        roles.iter().copied().find(|role| role.holder(job) == *caller)
    }
}

impl ProgramConfig {
    pub fn ensure_live(&self) -> Result<()> {
        require!(!self.paused, EscrowError::SystemPaused);
        Ok(())
    }

    pub fn ensure_job_exists(&self, job_id: u64) -> Result<()> {
        require!(job_id < self.job_count, EscrowError::NotFound);
        Ok(())
    }

    pub fn ensure_admin(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.admin, EscrowError::Unauthorized);
        Ok(())
    }

    /// Acquire the active-operation lock.
    pub fn enter(&mut self) -> Result<()> {
        require!(!self.locked, EscrowError::ReentrantCall);
        self.locked = true;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.locked = false;
    }

    /// Admin-only toggle of the mutating-operation gate.
    pub fn set_paused(&mut self, caller: &Pubkey, paused: bool) -> Result<()> {
        self.ensure_admin(caller)?;
        require!(self.paused != paused, EscrowError::InvalidState);
        self.paused = paused;
        Ok(())
    }
}

/// Preconditions of a mutating job operation, checked in order:
/// pause switch, job existence, caller role, job state.
///
/// Returns the role the caller acted under.
pub fn authorize(
    config: &ProgramConfig,
    job: &Job,
    job_id: u64,
    caller: &Pubkey,
    roles: &[Role],
    required: JobState,
) -> Result<Role> {
    config.ensure_live()?;
    config.ensure_job_exists(job_id)?;
    require!(job.id == job_id, EscrowError::NotFound);
    let role = Role::held_by(roles, job, caller).ok_or(EscrowError::Unauthorized)?;
    require!(job.state == required, EscrowError::InvalidState);
    Ok(role)
}
