//! Long-term scheduler: invoked whenever memory is returned to the
//! free-space table; walks the admission queue in FIFO order and promotes
//! every candidate that now fits into the short-term queue.

use crate::error::CoreError;
use crate::host::Host;
use crate::job::Job;

use super::Scheduler;

pub(super) fn promote<H: Host>(scheduler: &mut Scheduler<H>) {
    let mut promoted = Vec::new();

    for job_number in scheduler.lts.iter().collect::<Vec<_>>() {
        let Some(job_size) = scheduler.arena.get(&job_number).map(Job::job_size) else {
            log::error!("{}", CoreError::UnknownJob(job_number));
            continue;
        };

        let Some((size, addr)) = scheduler.free_space.find_space(job_size) else {
            continue;
        };

        if let Some(job) = scheduler.arena.get_mut(&job_number) {
            job.set_core_addr(addr);
        }
        scheduler.sts.push_back(job_number);

        let remainder = size - job_size;
        scheduler.free_space.insert(remainder, addr + job_size);
        scheduler.free_space.defragment();

        promoted.push(job_number);
        log::debug!("long_term: job {job_number} promoted to STS at addr {addr}");
    }

    scheduler.lts.remove_all(&promoted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerConfig;
    use crate::host::test_util::RecordingHost;

    fn scheduler() -> Scheduler<RecordingHost> {
        Scheduler::new(SchedulerConfig::default(), RecordingHost::new())
    }

    #[test]
    fn promotes_job_that_now_fits() {
        let mut s = scheduler();
        s.free_space.find_space(60); // leave 40 free at addr 60
        s.free_space.insert(40, 60);

        let job = Job::new(2, 0, 30, 500, 1);
        s.arena.insert(2, job);
        s.lts.push(2);

        promote(&mut s);

        assert!(s.admission_queue().iter().next().is_none());
        assert_eq!(s.swap_queue().front(), Some(2));
        assert_eq!(s.job(2).unwrap().core_addr(), 60);
    }

    #[test]
    fn leaves_non_fitting_job_in_lts() {
        let mut s = scheduler();
        s.free_space.find_space(90); // only 10 free

        let job = Job::new(2, 0, 30, 500, 1);
        s.arena.insert(2, job);
        s.lts.push(2);

        promote(&mut s);

        assert_eq!(s.admission_queue().iter().collect::<Vec<_>>(), vec![2]);
        assert!(s.swap_queue().is_empty());
    }

    #[test]
    fn promotes_multiple_jobs_in_one_pass() {
        let mut s = scheduler();
        s.free_space.find_space(100);
        s.free_space.insert(50, 0);
        s.free_space.insert(50, 50);

        s.arena.insert(2, Job::new(2, 0, 20, 100, 0));
        s.lts.push(2);
        s.arena.insert(3, Job::new(3, 0, 20, 100, 0));
        s.lts.push(3);

        promote(&mut s);

        assert!(s.admission_queue().iter().next().is_none());
        assert_eq!(s.swap_queue().front(), Some(2));
    }
}
