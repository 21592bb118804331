//! `sos_core`: the interrupt-driven job scheduler and memory arbiter at the
//! heart of a simulated operating system.
//!
//! A [`Scheduler`] owns a fixed simulated core memory, a job arena, and the
//! four scheduler queues (admission, swap, ready, I/O). It is driven purely
//! by five interrupt entry points — [`Scheduler::new_job`],
//! [`Scheduler::drum_done`], [`Scheduler::disk_done`], [`Scheduler::timer`],
//! and [`Scheduler::supervisor_call`] — each of which restores the system's
//! invariants before returning a [`Directive`] telling the host whether the
//! CPU should run a job or sit idle.
//!
//! The scheduler never talks to a disk or drum directly; it drives them
//! through the [`Host`] trait, which the embedding simulation harness
//! implements.

#![warn(clippy::pedantic, clippy::cargo)]
#![allow(clippy::missing_const_for_fn, clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod config;
pub mod error;
pub mod host;
pub mod interrupts;
pub mod job;
pub mod logging;
pub mod memory;
pub mod queues;
pub mod registers;
pub mod scheduler;

pub use config::SchedulerConfig;
pub use error::CoreError;
pub use host::{DrumDirection, Host};
pub use interrupts::Supervisor;
pub use job::Job;
pub use registers::{Directive, Registers};
pub use scheduler::Scheduler;
