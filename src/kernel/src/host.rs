//! The host boundary: asynchronous device primitives the core consumes but
//! does not implement.

/// Direction of a drum (swap) transfer. The core only ever issues
/// [`DrumDirection::SwapIn`]; swap-out is outside this crate's scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrumDirection {
    SwapIn = 0,
}

/// Host-provided primitives the scheduler drives but never executes itself.
///
/// Implementations are fire-and-forget triggers: `start_disk_io` and
/// `start_drum_io` return immediately, and their completion arrives later as
/// a `disk_done`/`drum_done` call back into the scheduler.
pub trait Host {
    /// Begins one disk transfer for `job_number`.
    fn start_disk_io(&mut self, job_number: u64);

    /// Begins a drum transfer of `job_size` units for `job_number` at
    /// `core_addr`, in `direction`.
    fn start_drum_io(&mut self, job_number: u64, job_size: u64, core_addr: u64, direction: DrumDirection);

    /// Raises the diagnostic trace level.
    fn trace_on(&mut self);

    /// Lowers the diagnostic trace level.
    fn trace_off(&mut self);
}

/// A [`Host`] that logs every call through the `log` facade and toggles the
/// global max log level for `trace_on`/`trace_off`. Useful as a host for
/// demos and as a base for test doubles that also want to observe calls.
#[derive(Debug, Default)]
pub struct LoggingHost;

impl Host for LoggingHost {
    fn start_disk_io(&mut self, job_number: u64) {
        log::debug!("host: start_disk_io(job={job_number})");
    }

    fn start_drum_io(&mut self, job_number: u64, job_size: u64, core_addr: u64, direction: DrumDirection) {
        log::debug!("host: start_drum_io(job={job_number}, size={job_size}, addr={core_addr}, dir={direction:?})");
    }

    fn trace_on(&mut self) {
        log::set_max_level(log::LevelFilter::Trace);
    }

    fn trace_off(&mut self) {
        log::set_max_level(log::LevelFilter::Info);
    }
}

#[cfg(any(test, feature = "test-util"))]
pub mod test_util {
    //! A recording host double for unit and integration tests.

    use super::{DrumDirection, Host};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum HostCall {
        StartDiskIo { job_number: u64 },
        StartDrumIo { job_number: u64, job_size: u64, core_addr: u64, direction: DrumDirection },
        TraceOn,
        TraceOff,
    }

    /// Records every call made to it, in order, for assertion in tests.
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub calls: Vec<HostCall>,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn disk_io_starts(&self) -> impl Iterator<Item = u64> + '_ {
            self.calls.iter().filter_map(|call| match *call {
                HostCall::StartDiskIo { job_number } => Some(job_number),
                _ => None,
            })
        }

        pub fn drum_io_starts(&self) -> impl Iterator<Item = (u64, u64, u64)> + '_ {
            self.calls.iter().filter_map(|call| match *call {
                HostCall::StartDrumIo { job_number, job_size, core_addr, .. } => {
                    Some((job_number, job_size, core_addr))
                }
                _ => None,
            })
        }
    }

    impl Host for RecordingHost {
        fn start_disk_io(&mut self, job_number: u64) {
            self.calls.push(HostCall::StartDiskIo { job_number });
        }

        fn start_drum_io(&mut self, job_number: u64, job_size: u64, core_addr: u64, direction: DrumDirection) {
            self.calls.push(HostCall::StartDrumIo { job_number, job_size, core_addr, direction });
        }

        fn trace_on(&mut self) {
            self.calls.push(HostCall::TraceOn);
        }

        fn trace_off(&mut self) {
            self.calls.push(HostCall::TraceOff);
        }
    }
}
