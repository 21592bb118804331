//! The scheduler context: owns every queue, the job arena, the free-space
//! table, and the device semaphores. The five interrupt handlers
//! (`crate::interrupts`) are methods on [`Scheduler`]; this module and its
//! children hold the machinery they share — accounting, dispatch, and
//! long-term promotion — plus the epilogue that stitches them together.

mod accounting;
mod dispatcher;
mod long_term;

use std::collections::HashMap;

use crate::config::SchedulerConfig;
use crate::host::{DrumDirection, Host};
use crate::job::Job;
use crate::memory::FreeSpaceTable;
use crate::queues::{AdmissionQueue, IoQueue, ReadyQueue, SwapQueue};
use crate::registers::{Directive, Registers};

/// Jobs live in a single arena keyed by job number; every queue (LTS, STS,
/// RQ, IOQ) holds only `u64` job-number references into it, so mutation
/// through any one queue is visible to all.
pub(crate) type JobArena = HashMap<u64, Job>;

/// Owns the entire scheduler context for one simulated machine.
///
/// There is no interior locking: a `Scheduler` is driven by `&mut self`
/// calls, and the host is responsible for not invoking a second handler
/// until the first returns.
pub struct Scheduler<H: Host> {
    pub(crate) config: SchedulerConfig,
    pub(crate) host: H,

    pub(crate) arena: JobArena,
    pub(crate) free_space: FreeSpaceTable,

    pub(crate) lts: AdmissionQueue,
    pub(crate) sts: SwapQueue,
    pub(crate) rq: ReadyQueue,
    pub(crate) ioq: IoQueue,

    pub(crate) drum_busy: bool,
    pub(crate) disk_busy: bool,
}

impl<H: Host> Scheduler<H> {
    /// Builds a fresh scheduler per the startup contract: device semaphores
    /// false, trace off, free-space table a single interval covering all of
    /// `config.core_size`, all queues empty.
    pub fn new(config: SchedulerConfig, mut host: H) -> Self {
        host.trace_off();

        Self {
            free_space: FreeSpaceTable::new(config.core_size),
            config,
            host,
            arena: HashMap::new(),
            lts: AdmissionQueue::new(),
            sts: SwapQueue::new(),
            rq: ReadyQueue::new(),
            ioq: IoQueue::new(),
            drum_busy: false,
            disk_busy: false,
        }
    }

    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Looks up a job record by job number. Public mainly so hosts/tests can
    /// inspect state between interrupts; the handlers themselves index
    /// `self.arena` directly.
    pub fn job(&self, job_number: u64) -> Option<&Job> {
        self.arena.get(&job_number)
    }

    pub const fn free_space(&self) -> &FreeSpaceTable {
        &self.free_space
    }

    pub const fn ready_queue(&self) -> &ReadyQueue {
        &self.rq
    }

    pub const fn swap_queue(&self) -> &SwapQueue {
        &self.sts
    }

    pub const fn io_queue(&self) -> &IoQueue {
        &self.ioq
    }

    pub const fn admission_queue(&self) -> &AdmissionQueue {
        &self.lts
    }

    pub const fn drum_busy(&self) -> bool {
        self.drum_busy
    }

    pub const fn disk_busy(&self) -> bool {
        self.disk_busy
    }

    /// The shared tail of every handler.
    ///
    /// Accounting runs first (when RQ is non-empty): it is the only step
    /// that can return memory and promote a waiting job into the short-term
    /// queue, and the device-kick step that follows must observe that
    /// promotion so a newly-idle device is re-armed within the *same*
    /// invocation — a job freed by a terminate call has its drum swap-in
    /// kicked off before this handler returns, not on some later one.
    /// Dispatch runs last, against whatever RQ looks like after accounting.
    pub(crate) fn epilogue(&mut self, regs: &mut Registers) -> Directive {
        if !self.rq.is_empty() {
            accounting::run(self, regs.current_time);
        }

        if !self.drum_busy
            && let Some(job_number) = self.sts.front()
        {
            if let Some(job) = self.arena.get(&job_number) {
                self.host.start_drum_io(job.job_number(), job.job_size(), job.core_addr(), DrumDirection::SwapIn);
            } else {
                log::error!("{}", crate::error::CoreError::UnknownJob(job_number));
            }
            self.drum_busy = true;
        }

        if !self.disk_busy
            && let Some(job_number) = self.ioq.front()
        {
            self.host.start_disk_io(job_number);
            self.disk_busy = true;
        }

        if self.rq.is_empty() {
            Directive::Idle
        } else {
            dispatcher::dispatch(self, regs)
        }
    }
}
