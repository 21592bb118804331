//! Runnable illustration of the five-entry-point contract: wires a
//! console-logging [`Host`] to a scripted run of an exact-fit single job
//! and prints the resulting directives. Not part of the core and not
//! exercised by the test suite.

use sos_core::{Directive, Host, Registers, Scheduler, SchedulerConfig, Supervisor};

struct ConsoleHost;

impl Host for ConsoleHost {
    fn start_disk_io(&mut self, job_number: u64) {
        println!("host: start_disk_io(job={job_number})");
    }

    fn start_drum_io(&mut self, job_number: u64, job_size: u64, core_addr: u64, direction: sos_core::DrumDirection) {
        println!("host: start_drum_io(job={job_number}, size={job_size}, addr={core_addr}, dir={direction:?})");
    }

    fn trace_on(&mut self) {
        log::set_max_level(log::LevelFilter::Trace);
    }

    fn trace_off(&mut self) {
        log::set_max_level(log::LevelFilter::Info);
    }
}

fn main() {
    sos_core::logging::init();

    let mut scheduler = Scheduler::new(SchedulerConfig::default(), ConsoleHost);

    let mut regs = Registers { job_number: 1, priority: 0, job_size: 100, time_remaining: 100, current_time: 0, core_addr: 0 };
    let directive = scheduler.new_job(&mut regs);
    println!("crint -> {directive:?}");

    regs.current_time = 0;
    let directive = scheduler.drum_done(&mut regs);
    println!("drmint -> {directive:?} (job {}, addr {}, quantum {})", regs.job_number, regs.core_addr, regs.time_remaining);

    regs.current_time = 100;
    let directive = scheduler.timer(&mut regs);
    println!("tro -> {directive:?}");

    // Demonstrate the supervisor-call surface too, on a second job that
    // blocks on I/O before draining.
    let mut regs = Registers { job_number: 2, priority: 0, job_size: 10, time_remaining: 500, current_time: 200, core_addr: 0 };
    scheduler.new_job(&mut regs);
    scheduler.drum_done(&mut regs);

    let directive = scheduler.supervisor_call(Supervisor::RequestIo, &mut regs);
    println!("svc 6 -> {directive:?}");

    let directive = scheduler.supervisor_call(Supervisor::BlockUntilIoDrained, &mut regs);
    println!("svc 7 -> {directive:?}");

    let directive = scheduler.disk_done(&mut regs);
    println!("dskint -> {directive:?}");

    assert_eq!(directive, Directive::Run);
}
