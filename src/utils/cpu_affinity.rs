//! Thread pinning for stable measurements.
//!
//! On Linux the calling thread is pinned with `sched_setaffinity` and its
//! previous mask is restored on unpin. Other platforms get a no-op that
//! reports "not pinned".

#[cfg(target_os = "linux")]
mod platform {
    use std::cell::RefCell;

    thread_local! {
        static SAVED_MASK: RefCell<Option<libc::cpu_set_t>> = const { RefCell::new(None) };
    }

    pub fn online_cores() -> Option<usize> {
        // SAFETY: sysconf has no memory-safety preconditions.
        let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        (n > 0).then_some(n as usize)
    }

    pub fn current_cpu() -> Option<usize> {
        // SAFETY: sched_getcpu only reads the calling thread's state.
        let cpu = unsafe { libc::sched_getcpu() };
        (cpu >= 0).then_some(cpu as usize)
    }

    pub fn pin(core_id: usize) -> bool {
        // SAFETY: both masks are plain data owned by this frame and sized by
        // size_of::<cpu_set_t>(); pid 0 targets the calling thread.
        unsafe {
            let mut saved: libc::cpu_set_t = std::mem::zeroed();
            if libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut saved) != 0 {
                return false;
            }

            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            if libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) != 0 {
                return false;
            }

            SAVED_MASK.with(|cell| *cell.borrow_mut() = Some(saved));
            true
        }
    }

    pub fn unpin() -> bool {
        SAVED_MASK.with(|cell| match cell.borrow_mut().take() {
            // SAFETY: `set` was filled by sched_getaffinity in `pin`.
            Some(set) => unsafe {
                libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
            },
            None => false,
        })
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub fn online_cores() -> Option<usize> {
        std::thread::available_parallelism().ok().map(|n| n.get())
    }

    pub fn current_cpu() -> Option<usize> {
        None
    }

    pub fn pin(_core_id: usize) -> bool {
        false
    }

    pub fn unpin() -> bool {
        false
    }
}

/// Number of online CPU cores
pub fn online_cores() -> Option<usize> {
    platform::online_cores()
}

/// Pin the current thread to the core it is running on (core 0 if unknown).
///
/// Returns the pinned core, or `None` when pinning is unsupported or failed.
pub fn pin_to_current_core() -> Option<usize> {
    let core = platform::current_cpu().unwrap_or(0);
    platform::pin(core).then_some(core)
}

/// Restore the affinity saved by the last successful pin.
pub fn unpin() -> bool {
    platform::unpin()
}

/// Pins on creation, unpins on drop.
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
}

impl CpuPinGuard {
    pub fn new() -> Self {
        let pinned_core = pin_to_current_core();
        if pinned_core.is_none() {
            tracing::debug!("cpu pinning unavailable, measuring unpinned");
        }
        Self { pinned_core }
    }

    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if self.pinned_core.is_some() {
            unpin();
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}
