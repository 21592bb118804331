//! Accounting ("bookkeeping").
//!
//! Runs once per handler invocation, as the last step before dispatch,
//! whenever the ready queue is non-empty. Walks RQ exactly once and fuses
//! four concerns that all depend on the `io_count`-derived `pending_io` bit:
//! reclaiming terminated jobs, unblocking drained jobs, and charging the
//! running job for elapsed CPU time.

use crate::error::CoreError;
use crate::host::Host;

use super::{long_term, Scheduler};

pub(super) fn run<H: Host>(scheduler: &mut Scheduler<H>, current_time: u64) {
    let mut reclaimed = Vec::new();
    let mut running_seen = 0u32;

    for job_number in scheduler.rq.iter().collect::<Vec<_>>() {
        let Some(job) = scheduler.arena.get_mut(&job_number) else {
            log::error!("{}", CoreError::UnknownJob(job_number));
            continue;
        };

        job.sync_pending_io();
        debug_assert_eq!(
            job.is_pending_io(),
            job.io_count() > 0,
            "pending_io out of sync with io_count for job {job_number}"
        );

        if job.is_running() {
            running_seen += 1;
        }

        if job.is_terminated() && !job.is_pending_io() {
            let (job_size, core_addr) = (job.job_size(), job.core_addr());

            reclaimed.push(job_number);
            scheduler.free_space.insert(job_size, core_addr);
            scheduler.free_space.defragment();
            scheduler.rq.advance_if_current_is(job_number);

            log::debug!("accounting: job {job_number} reclaimed, {job_size} units returned at {core_addr}");

            if !scheduler.lts.is_empty() {
                long_term::promote(scheduler);
            }
            continue;
        }

        if job.is_blocked() && !job.is_pending_io() {
            job.set_blocked(false);
            log::debug!("accounting: job {job_number} unblocked, I/O drained");
        }

        if job.is_running() {
            let elapsed = current_time.saturating_sub(job.starting_time_execution());
            job.consume_time(elapsed);
            log::trace!("accounting: job {job_number} charged {elapsed}, time_remaining={}", job.time_remaining());
        }
    }

    debug_assert!(
        running_seen <= 1,
        "{running_seen} ready-queue entries marked job_running, expected at most one"
    );

    scheduler.rq.remove_all(&reclaimed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerConfig;
    use crate::host::test_util::RecordingHost;
    use crate::job::Job;

    fn scheduler() -> Scheduler<RecordingHost> {
        Scheduler::new(SchedulerConfig::default(), RecordingHost::new())
    }

    #[test]
    fn reclaims_terminated_job_and_returns_memory() {
        let mut s = scheduler();
        let mut job = Job::new(1, 0, 40, 0, 0);
        job.set_core_addr(0);
        job.set_terminated(true);
        s.arena.insert(1, job);
        s.rq.push(1);
        s.free_space.find_space(40);

        run(&mut s, 0);

        assert!(s.ready_queue().is_empty());
        assert_eq!(s.free_space().total_free(), 100);
    }

    #[test]
    fn clears_blocked_once_pending_io_drains() {
        let mut s = scheduler();
        let mut job = Job::new(1, 0, 10, 100, 0);
        job.set_blocked(true);
        s.arena.insert(1, job);
        s.rq.push(1);

        run(&mut s, 0);

        assert!(!s.job(1).unwrap().is_blocked());
    }

    #[test]
    fn charges_running_job_elapsed_time() {
        let mut s = scheduler();
        let mut job = Job::new(1, 0, 10, 100, 0);
        job.set_running(true);
        job.set_starting_time_execution(50);
        s.arena.insert(1, job);
        s.rq.push(1);

        run(&mut s, 120);

        assert_eq!(s.job(1).unwrap().time_remaining(), 30);
    }

    #[test]
    fn reclaim_promotes_waiting_lts_job() {
        let mut s = scheduler();

        // Job 1 occupies all of memory and has just terminated.
        let mut job1 = Job::new(1, 0, 100, 0, 0);
        job1.set_core_addr(0);
        job1.set_terminated(true);
        s.arena.insert(1, job1);
        s.rq.push(1);
        s.free_space.find_space(100);

        // Job 2 is waiting in LTS for memory to free up.
        let job2 = Job::new(2, 0, 30, 500, 1);
        s.arena.insert(2, job2);
        s.lts.push(2);

        run(&mut s, 0);

        assert!(s.admission_queue().iter().next().is_none());
        assert_eq!(s.swap_queue().front(), Some(2));
        assert_eq!(s.job(2).unwrap().core_addr(), 0);
    }
}
