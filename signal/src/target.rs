//! Maps POSIX pid/pgrp conventions onto the kernel's `(pid, tid)` delivery call.

use crate::error::{check, Result};
use syscall::Kernel;

/// Recipient of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    CurrentThread,
    /// Any thread of process `pid`.
    Process(isize),
    /// The caller's own process group.
    CallerGroup,
    /// Process group `pgid`, given as a positive id.
    Group(isize),
}

impl Target {
    /// `kill(pid, _)`: positive is a process, zero the caller's group, negative a group.
    pub fn from_pid(pid: isize) -> Self {
        match pid {
            0 => Target::CallerGroup,
            p if p > 0 => Target::Process(p),
            p => Target::Group(p.wrapping_abs()),
        }
    }

    /// `killpg(pgrp, _)`: zero is the caller's group, otherwise the group `|pgrp|`.
    pub fn from_pgrp(pgrp: isize) -> Self {
        match pgrp {
            0 => Target::CallerGroup,
            g => Target::Group(g.wrapping_abs()),
        }
    }

    /// Kernel `(process_id, thread_id)` for this target. Groups use negative ids, `tid == 0`
    /// means any thread.
    pub fn resolve(&self, kernel: &dyn Kernel) -> Result<(isize, isize)> {
        match *self {
            Target::CurrentThread => Ok((check(kernel.getpid())?, check(kernel.gettid())?)),
            Target::Process(pid) => Ok((pid, 0)),
            Target::CallerGroup => Ok((-check(kernel.getpgrp())?, 0)),
            Target::Group(pgid) => Ok((pgid.wrapping_neg(), 0)),
        }
    }
}
