pub mod initialize;
pub mod update_config;
pub mod pause;
pub mod create_job;
pub mod fund_job;
pub mod fund_job_token;
pub mod start_job;
pub mod deliver_milestone;
pub mod approve_milestone;
pub mod cancel_job;
pub mod open_dispute;
pub mod resolve_dispute;
pub mod withdraw;
pub mod withdraw_token;
pub mod queries;

pub use initialize::*;
pub use update_config::*;
pub use pause::*;
pub use create_job::*;
pub use fund_job::*;
pub use fund_job_token::*;
pub use start_job::*;
pub use deliver_milestone::*;
pub use approve_milestone::*;
pub use cancel_job::*;
pub use open_dispute::*;
pub use resolve_dispute::*;
pub use withdraw::*;
pub use withdraw_token::*;
pub use queries::*;
