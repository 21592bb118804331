//! The five interrupt entry points: `crint`/`new_job`, `drmint`/`drum_done`,
//! `dskint`/`disk_done`, `tro`/`timer`, and `svc`/`supervisor_call`. Each is
//! a method on [`Scheduler`] and each ends by delegating to
//! [`Scheduler::epilogue`], the shared tail: kick idle devices, then (if any
//! job is resident) run accounting and dispatch.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::CoreError;
use crate::host::Host;
use crate::job::Job;
use crate::registers::{Directive, Registers};
use crate::scheduler::Scheduler;

/// Supervisor-call sub-opcodes, carried by the host in the directive slot of
/// the register file on a `svc` interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u64)]
pub enum Supervisor {
    /// Terminate the calling job immediately.
    Terminate = 5,
    /// Request one disk I/O; does not yield the CPU.
    RequestIo = 6,
    /// Block the calling job until its outstanding I/O drains.
    BlockUntilIoDrained = 7,
}

impl<H: Host> Scheduler<H> {
    /// `crint`: admit a freshly-arrived job described by `regs`.
    ///
    /// Attempts `find_space`; on a hit the job is pushed to the short-term
    /// queue for drum swap-in, on a miss it waits in the long-term
    /// admission queue until memory is later released.
    pub fn new_job(&mut self, regs: &mut Registers) -> Directive {
        let job_number = regs.job_number;
        let mut job = Job::new(job_number, regs.priority, regs.job_size, regs.time_remaining, regs.current_time);
        let job_size = job.job_size();

        match self.free_space.find_space(job_size) {
            Some((size, addr)) => {
                job.set_core_addr(addr);
                self.arena.insert(job_number, job);
                self.sts.push_back(job_number);

                let remainder = size - job_size;
                self.free_space.insert(remainder, addr + job_size);
                self.free_space.defragment();

                log::debug!("crint: job {job_number} admitted, size {job_size} at addr {addr}");
            }
            None => {
                self.arena.insert(job_number, job);
                self.lts.push(job_number);
                log::debug!("crint: job {job_number} deferred to LTS, no space for size {job_size}");
            }
        }

        self.epilogue(regs)
    }

    /// `drmint`: the swap-in for the short-term queue's head has completed.
    /// It moves from STS onto the tail of RQ; if RQ was empty the running
    /// cursor initializes onto it.
    pub fn drum_done(&mut self, regs: &mut Registers) -> Directive {
        match self.sts.pop_front() {
            Some(job_number) => {
                self.rq.push(job_number);
                log::debug!("drmint: job {job_number} swapped in, now resident");
            }
            None => log::warn!("drmint: drum completion with an empty short-term queue"),
        }

        let directive = self.epilogue(regs);
        self.drum_busy = false;
        directive
    }

    /// `dskint`: one disk transfer for the I/O queue's head has completed.
    /// Decrements that job's `io_count`, pops the queue, then immediately
    /// re-arms the disk for the new head if one exists.
    pub fn disk_done(&mut self, regs: &mut Registers) -> Directive {
        if let Some(job_number) = self.ioq.front() {
            match self.arena.get_mut(&job_number) {
                Some(job) => {
                    job.decrement_io_count();
                    log::debug!("dskint: job {job_number} io_count -> {}", job.io_count());
                }
                None => log::warn!("{}", CoreError::UnknownJob(job_number)),
            }
            self.ioq.pop_front();
        } else {
            log::warn!("dskint: disk completion with an empty I/O queue");
        }

        let directive = self.epilogue(regs);

        self.disk_busy = false;
        if let Some(job_number) = self.ioq.front() {
            self.host.start_disk_io(job_number);
            self.disk_busy = true;
        }

        directive
    }

    /// `tro`: the running job's quantum has elapsed. Charges it for the
    /// slice, terminating it if `time_remaining` reaches zero, and always
    /// advances the running cursor.
    pub fn timer(&mut self, regs: &mut Registers) -> Directive {
        match self.rq.current() {
            Some(job_number) => {
                self.charge_slice(job_number, regs.current_time);
                if let Some(job) = self.arena.get_mut(&job_number) {
                    job.set_running(false);
                }
                self.rq.advance();
            }
            None => log::warn!("tro: timer interrupt with an empty ready queue"),
        }

        self.epilogue(regs)
    }

    /// `svc`: dispatch on the supervisor sub-opcode.
    pub fn supervisor_call(&mut self, opcode: Supervisor, regs: &mut Registers) -> Directive {
        match opcode {
            Supervisor::Terminate => self.svc_terminate(regs),
            Supervisor::RequestIo => self.svc_request_io(regs),
            Supervisor::BlockUntilIoDrained => self.svc_block_until_io_drained(regs),
        }
    }

    /// Convenience entry point for hosts carrying the sub-opcode as a raw
    /// `u64` (the directive slot of the wire protocol). Values outside
    /// `{5, 6, 7}` are logged and otherwise ignored, but the epilogue still
    /// runs.
    pub fn supervisor_call_raw(&mut self, raw_opcode: u64, regs: &mut Registers) -> Directive {
        match Supervisor::try_from(raw_opcode) {
            Ok(opcode) => self.supervisor_call(opcode, regs),
            Err(_) => {
                log::warn!("{}", CoreError::UnknownSupervisorOpcode(raw_opcode));
                self.epilogue(regs)
            }
        }
    }

    fn svc_terminate(&mut self, regs: &mut Registers) -> Directive {
        if let Some(job_number) = self.rq.current() {
            self.charge_slice(job_number, regs.current_time);
            if let Some(job) = self.arena.get_mut(&job_number) {
                job.set_terminated(true);
                job.set_running(false);
            }
            self.rq.advance();
            log::debug!("svc 5: job {job_number} terminated");
        } else {
            log::warn!("svc 5: terminate with an empty ready queue");
        }

        self.epilogue(regs)
    }

    fn svc_request_io(&mut self, regs: &mut Registers) -> Directive {
        if let Some(job_number) = self.rq.current() {
            if let Some(job) = self.arena.get_mut(&job_number) {
                job.increment_io_count();
            }
            self.ioq.push_back(job_number);
            log::debug!("svc 6: job {job_number} requested I/O, does not yield the CPU");
        } else {
            log::warn!("svc 6: request-io with an empty ready queue");
        }

        self.epilogue(regs)
    }

    fn svc_block_until_io_drained(&mut self, regs: &mut Registers) -> Directive {
        if let Some(job_number) = self.rq.current() {
            let pending = self.arena.get(&job_number).is_some_and(|job| job.io_count() > 0);
            if pending {
                self.charge_slice(job_number, regs.current_time);
                if let Some(job) = self.arena.get_mut(&job_number) {
                    job.set_blocked(true);
                    job.set_running(false);
                }
                self.rq.advance();
                log::debug!("svc 7: job {job_number} blocked pending I/O drain");
            }
        } else {
            log::warn!("svc 7: block with an empty ready queue");
        }

        self.epilogue(regs)
    }

    /// Charges `job_number` for time elapsed since `starting_time_execution`,
    /// shared by `tro` and the two slice-ending supervisor calls.
    fn charge_slice(&mut self, job_number: u64, current_time: u64) {
        if let Some(job) = self.arena.get_mut(&job_number) {
            let elapsed = current_time.saturating_sub(job.starting_time_execution());
            job.consume_time(elapsed);
        }
    }
}
