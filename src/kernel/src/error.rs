//! Diagnostic-only error conditions.
//!
//! None of these are returned from the five handler entry points — the
//! host protocol has no channel for that. They are logged at `error`/`warn`
//! as they occur and are exposed publicly so tests (and host integrations
//! that capture log output) can assert on them.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// A queue held a reference to a job number with no backing record in
    /// the job arena. Indicates an invariant bug elsewhere in the scheduler.
    #[error("no job record for job number {0}")]
    UnknownJob(u64),

    /// A supervisor call carried a sub-opcode outside `{5, 6, 7}`.
    #[error("unrecognized supervisor sub-opcode {0}")]
    UnknownSupervisorOpcode(u64),
}
