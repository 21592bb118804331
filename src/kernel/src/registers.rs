//! Typed view over the host's `(a: inout int, p: int[6])` interrupt protocol.

/// The register file exchanged with the host on every interrupt.
///
/// Field roles differ by handler, mirroring the original `p[1..6]` array:
///
/// - `job_number`, `priority`, `job_size`, `time_remaining`: inputs describing
///   a new job on [`crate::scheduler::Scheduler::new_job`]; `job_size`,
///   `time_remaining` and `core_addr` become dispatcher *outputs* on any
///   handler that ends with `Directive::Run`.
/// - `current_time`: always an input, the host's wall clock at the moment of
///   the interrupt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    pub job_number: u64,
    pub priority: u64,
    pub job_size: u64,
    pub time_remaining: u64,
    pub current_time: u64,
    pub core_addr: u64,
}

/// The outbound CPU directive returned by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// CPU idle until the next interrupt.
    Idle,
    /// Run the job described by the register file.
    Run,
}
