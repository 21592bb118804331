//! Job record (PCB): per-job attributes and lifecycle flags.

bitflags::bitflags! {
    /// Lifecycle flags tracked per job.
    ///
    /// `PENDING_IO` is derived (never set directly outside [`Job::sync_pending_io`]);
    /// it always mirrors `io_count > 0`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct JobFlags: u8 {
        const BLOCKED    = 0b0001;
        const PENDING_IO = 0b0010;
        const TERMINATED = 0b0100;
        const RUNNING    = 0b1000;
    }
}

/// A job's process control block.
///
/// Equality and identity are by [`Job::job_number`] alone; every other field
/// is ignored for comparison purposes.
#[derive(Debug, Clone)]
pub struct Job {
    job_number: u64,
    priority: u64,
    job_size: u64,
    time_of_arrival: u64,

    time_remaining: i64,
    core_addr: u64,
    io_count: u32,
    starting_time_execution: u64,

    flags: JobFlags,
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.job_number == other.job_number
    }
}
impl Eq for Job {}

impl Job {
    pub fn new(job_number: u64, priority: u64, job_size: u64, time_remaining: u64, time_of_arrival: u64) -> Self {
        Self {
            job_number,
            priority,
            job_size,
            time_of_arrival,
            time_remaining: i64::try_from(time_remaining).unwrap_or(i64::MAX),
            core_addr: 0,
            io_count: 0,
            starting_time_execution: 0,
            flags: JobFlags::empty(),
        }
    }

    pub const fn job_number(&self) -> u64 {
        self.job_number
    }

    pub const fn priority(&self) -> u64 {
        self.priority
    }

    pub const fn job_size(&self) -> u64 {
        self.job_size
    }

    pub const fn time_of_arrival(&self) -> u64 {
        self.time_of_arrival
    }

    pub fn time_remaining(&self) -> u64 {
        self.time_remaining.max(0) as u64
    }

    pub const fn core_addr(&self) -> u64 {
        self.core_addr
    }

    pub fn set_core_addr(&mut self, addr: u64) {
        self.core_addr = addr;
    }

    pub const fn io_count(&self) -> u32 {
        self.io_count
    }

    pub fn increment_io_count(&mut self) {
        self.io_count += 1;
    }

    /// Decrements the I/O count. A decrement below zero is a protocol bug (a stray
    /// `disk_done` for a job with no outstanding request); it is clamped and logged
    /// by the caller rather than panicking.
    pub fn decrement_io_count(&mut self) {
        self.io_count = self.io_count.saturating_sub(1);
    }

    pub const fn starting_time_execution(&self) -> u64 {
        self.starting_time_execution
    }

    pub fn set_starting_time_execution(&mut self, time: u64) {
        self.starting_time_execution = time;
    }

    pub fn is_blocked(&self) -> bool {
        self.flags.contains(JobFlags::BLOCKED)
    }

    pub fn set_blocked(&mut self, value: bool) {
        self.flags.set(JobFlags::BLOCKED, value);
    }

    pub fn is_pending_io(&self) -> bool {
        self.flags.contains(JobFlags::PENDING_IO)
    }

    /// Recomputes `pending_io` from `io_count`. Called once per job per
    /// handler by accounting.
    pub fn sync_pending_io(&mut self) {
        self.flags.set(JobFlags::PENDING_IO, self.io_count > 0);
    }

    pub fn is_terminated(&self) -> bool {
        self.flags.contains(JobFlags::TERMINATED)
    }

    pub fn set_terminated(&mut self, value: bool) {
        self.flags.set(JobFlags::TERMINATED, value);
    }

    pub fn is_running(&self) -> bool {
        self.flags.contains(JobFlags::RUNNING)
    }

    pub fn set_running(&mut self, value: bool) {
        self.flags.set(JobFlags::RUNNING, value);
    }

    /// Subtracts `elapsed` from `time_remaining`, clamping at zero and
    /// terminating the job if it reaches zero.
    pub fn consume_time(&mut self, elapsed: u64) {
        self.time_remaining -= i64::try_from(elapsed).unwrap_or(i64::MAX);
        if self.time_remaining <= 0 {
            if self.time_remaining < 0 {
                log::error!(
                    "job {}: time_remaining went negative (elapsed {elapsed} exceeded owed time); clamping to 0",
                    self.job_number
                );
            }
            self.time_remaining = 0;
            self.set_terminated(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_job_number() {
        let a = Job::new(1, 0, 10, 100, 0);
        let mut b = Job::new(1, 9, 999, 1, 0);
        b.set_core_addr(50);
        assert_eq!(a, b);
    }

    #[test]
    fn consume_time_terminates_at_zero() {
        let mut job = Job::new(1, 0, 10, 100, 0);
        job.consume_time(100);
        assert_eq!(job.time_remaining(), 0);
        assert!(job.is_terminated());
    }

    #[test]
    fn consume_time_clamps_overrun() {
        let mut job = Job::new(1, 0, 10, 50, 0);
        job.consume_time(75);
        assert_eq!(job.time_remaining(), 0);
        assert!(job.is_terminated());
    }

    #[test]
    fn pending_io_tracks_io_count() {
        let mut job = Job::new(1, 0, 10, 100, 0);
        job.sync_pending_io();
        assert!(!job.is_pending_io());

        job.increment_io_count();
        job.sync_pending_io();
        assert!(job.is_pending_io());

        job.decrement_io_count();
        job.sync_pending_io();
        assert!(!job.is_pending_io());
    }

    #[test]
    fn decrement_io_count_below_zero_saturates() {
        let mut job = Job::new(1, 0, 10, 100, 0);
        job.decrement_io_count();
        assert_eq!(job.io_count(), 0);
    }
}
