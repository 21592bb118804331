//! Dispatcher: selects the next runnable job from the ready queue's
//! round-robin cursor and populates the outbound register file.

use crate::error::CoreError;
use crate::host::Host;
use crate::registers::{Directive, Registers};

use super::Scheduler;

pub(super) fn dispatch<H: Host>(scheduler: &mut Scheduler<H>, regs: &mut Registers) -> Directive {
    let len = scheduler.rq.len();

    for _ in 0..len {
        let Some(job_number) = scheduler.rq.current() else { break };

        let runnable = match scheduler.arena.get(&job_number) {
            Some(job) => !job.is_blocked() && !job.is_terminated(),
            None => {
                log::error!("{}", CoreError::UnknownJob(job_number));
                false
            }
        };

        if runnable {
            let job = scheduler.arena.get_mut(&job_number).expect("checked above");
            let quantum = quantum(scheduler.config.time_slice, job.time_remaining());

            regs.job_number = job_number;
            regs.core_addr = job.core_addr();
            regs.job_size = job.job_size();
            regs.time_remaining = quantum;

            job.set_starting_time_execution(regs.current_time);
            job.set_running(true);

            log::trace!("dispatch: job {job_number} -> Run (addr={}, quantum={quantum})", regs.core_addr);
            return Directive::Run;
        }

        scheduler.rq.advance();
    }

    log::trace!("dispatch: no runnable job, CPU idle");
    Directive::Idle
}

/// `quantum() = min(TIME_SLICE, time_remaining)`: the next timer interrupt
/// arrives no later than the job's natural completion.
fn quantum(time_slice: u64, time_remaining: u64) -> u64 {
    time_slice.min(time_remaining)
}
