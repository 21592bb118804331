//! Integration tests driving the public `Scheduler` API end-to-end with a
//! `RecordingHost` test double, covering the core admission/dispatch/
//! reclaim lifecycle plus its round-trip laws.

use sos_core::host::test_util::{HostCall, RecordingHost};
use sos_core::{Directive, DrumDirection, Registers, Scheduler, SchedulerConfig, Supervisor};

fn regs(job_number: u64, priority: u64, job_size: u64, time_remaining: u64, current_time: u64) -> Registers {
    Registers { job_number, priority, job_size, time_remaining, current_time, core_addr: 0 }
}

fn scheduler() -> Scheduler<RecordingHost> {
    let _ = env_logger::builder().is_test(true).try_init();
    Scheduler::new(SchedulerConfig::default(), RecordingHost::new())
}

/// A job whose size exactly matches the entire core: admitted, swapped in,
/// run to completion, and its memory fully reclaimed.
#[test]
fn exact_fit_single_job() {
    let mut s = scheduler();

    let mut r = regs(1, 0, 100, 100, 0);
    assert_eq!(s.new_job(&mut r), Directive::Idle);
    assert_eq!(s.swap_queue().front(), Some(1));
    assert!(s.free_space().is_empty());
    assert!(s.drum_busy());
    assert!(s.host().drum_io_starts().eq([(1, 100, 0)]));

    let mut r = regs(0, 0, 0, 0, 0);
    let directive = s.drum_done(&mut r);
    assert_eq!(directive, Directive::Run);
    assert_eq!((r.job_number, r.core_addr, r.job_size, r.time_remaining), (1, 0, 100, 100));

    let mut r = regs(0, 0, 0, 0, 100);
    assert_eq!(s.timer(&mut r), Directive::Idle);
    assert!(s.ready_queue().is_empty());
    assert_eq!(s.free_space().entries(), &[(100, 0)]);
}

/// Two jobs fragment memory, and the timer round-robins between them once
/// both are resident.
#[test]
fn two_job_fragmentation() {
    let mut s = scheduler();

    s.new_job(&mut regs(1, 0, 40, 800, 0));
    s.drum_done(&mut regs(0, 0, 0, 0, 0));

    s.new_job(&mut regs(2, 0, 30, 800, 0));
    assert_eq!(s.free_space().entries(), &[(30, 70)]);
    assert_eq!(s.swap_queue().front(), Some(2));

    s.drum_done(&mut regs(0, 0, 0, 0, 0));
    assert_eq!(s.ready_queue().iter().collect::<Vec<_>>(), vec![1, 2]);

    let directive = s.timer(&mut regs(0, 0, 0, 0, 400));
    assert_eq!(directive, Directive::Run);
}

/// A job that doesn't fit waits in the admission queue until a terminate
/// frees enough memory, at which point it's promoted and its drum swap-in
/// kicked off within the same handler invocation.
#[test]
fn admission_deferred_and_promoted_on_release() {
    let mut s = scheduler();

    s.new_job(&mut regs(1, 0, 100, 1000, 0));
    s.drum_done(&mut regs(0, 0, 0, 0, 0));

    s.new_job(&mut regs(2, 0, 50, 500, 1));
    assert_eq!(s.admission_queue().iter().collect::<Vec<_>>(), vec![2]);

    let before = s.host().calls.len();
    s.supervisor_call(Supervisor::Terminate, &mut regs(0, 0, 0, 0, 500));

    assert!(s.admission_queue().iter().next().is_none());
    assert_eq!(s.swap_queue().front(), Some(2));
    assert!(s.drum_busy());
    assert!(s.host().calls[before..]
        .contains(&HostCall::StartDrumIo { job_number: 2, job_size: 50, core_addr: 0, direction: DrumDirection::SwapIn }));
}

/// A job blocks once it has outstanding I/O, and is only re-admitted to the
/// dispatcher once that I/O drains.
#[test]
fn block_and_unblock_on_disk_completion() {
    let mut s = scheduler();

    s.new_job(&mut regs(1, 0, 10, 500, 0));
    let directive = s.drum_done(&mut regs(0, 0, 0, 0, 0));
    assert_eq!(directive, Directive::Run);

    s.supervisor_call(Supervisor::RequestIo, &mut regs(0, 0, 0, 0, 50));
    assert_eq!(s.job(1).unwrap().io_count(), 1);

    let directive = s.supervisor_call(Supervisor::BlockUntilIoDrained, &mut regs(0, 0, 0, 0, 60));
    assert_eq!(directive, Directive::Idle);
    assert!(s.job(1).unwrap().is_blocked());

    let directive = s.disk_done(&mut regs(0, 0, 0, 0, 60));
    assert_eq!(directive, Directive::Run);
    assert_eq!(s.job(1).unwrap().io_count(), 0);
    assert!(!s.job(1).unwrap().is_blocked());
}

/// A job dispatched with less time remaining than `TIME_SLICE` gets exactly
/// that remainder as its quantum, and terminates cleanly with no residual
/// slice.
#[test]
fn time_slice_boundary() {
    let mut s = scheduler();

    s.new_job(&mut regs(1, 0, 10, 350, 0));
    let mut r = regs(0, 0, 0, 0, 0);
    s.drum_done(&mut r);
    assert_eq!(r.time_remaining, 350);

    r.current_time = 350;
    let directive = s.timer(&mut r);
    assert_eq!(directive, Directive::Idle);
    assert!(s.ready_queue().is_empty());
}

/// Round-trip law: admitting and immediately terminating a job returns the
/// free-space table to a state equivalent (under defragment) to the
/// pre-admission state.
#[test]
fn admit_then_terminate_round_trips_free_space() {
    let mut s = scheduler();

    s.new_job(&mut regs(1, 0, 40, 100, 0));
    s.drum_done(&mut regs(0, 0, 0, 0, 0));
    s.supervisor_call(Supervisor::Terminate, &mut regs(0, 0, 0, 0, 0));
    s.timer(&mut regs(0, 0, 0, 0, 100));

    assert_eq!(s.free_space().entries(), &[(100, 0)]);
}

/// Multiple jobs can wait in the admission queue and are promoted in one
/// pass as memory becomes available.
#[test]
fn multiple_lts_jobs_promoted_in_one_release() {
    let mut s = scheduler();

    s.new_job(&mut regs(1, 0, 100, 1000, 0));
    s.drum_done(&mut regs(0, 0, 0, 0, 0));

    s.new_job(&mut regs(2, 0, 30, 200, 1));
    s.new_job(&mut regs(3, 0, 30, 200, 2));
    assert_eq!(s.admission_queue().iter().collect::<Vec<_>>(), vec![2, 3]);

    s.supervisor_call(Supervisor::Terminate, &mut regs(0, 0, 0, 0, 1000));

    assert!(s.admission_queue().iter().next().is_none());
    assert_eq!(s.swap_queue().front(), Some(2));
}
