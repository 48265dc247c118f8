//! POSIX `<signal.h>` operations.
//!
//! Methods on [`SignalContext`] do the work. The free functions of the same name
//! use the process-wide context and record failures in [`crate::errno`].

use crate::action::{Entry, SigAction, SigHandler};
use crate::error::{check, record, Error, Result};
use crate::target::Target;
use crate::{context, SignalContext};
use signal_defs::{SaFlags, SigHow, SigSet, SignalNo};

fn valid_signal(signal: i32) -> Result<SignalNo> {
    SignalNo::from_raw(signal).ok_or_else(|| {
        log::warn!("bad signal number {}", signal);
        Error::InvalidArgument
    })
}

impl SignalContext {
    /// Sends `signal` to the calling thread.
    pub fn raise(&self, signal: i32) -> Result<()> {
        self.send(Target::CurrentThread, signal)
    }

    /// Sends `signal` to process `pid`, or to a process group for `pid <= 0`.
    pub fn kill(&self, pid: isize, signal: i32) -> Result<()> {
        self.send(Target::from_pid(pid), signal)
    }

    /// Sends `signal` to process group `pgrp`; `0` is the caller's group.
    pub fn killpg(&self, pgrp: isize, signal: i32) -> Result<()> {
        self.send(Target::from_pgrp(pgrp), signal)
    }

    fn send(&self, target: Target, signal: i32) -> Result<()> {
        valid_signal(signal)?;
        let (pid, tid) = target.resolve(self.kernel)?;
        log::trace!("deliver {} to ({}, {})", signal, pid, tid);
        check(self.kernel.deliver_signal(pid, tid, signal))?;
        Ok(())
    }

    /// Installs `handler` with an empty mask and no flags, returning the previous handler.
    pub fn signal(&self, signum: i32, handler: SigHandler) -> Result<SigHandler> {
        let action = SigAction {
            handler,
            mask: SigSet::EMPTY,
            flags: SaFlags::empty(),
        };
        let mut old = SigAction::default();
        self.sigaction(signum, Some(&action), Some(&mut old))?;
        Ok(old.handler)
    }

    /// Installs `act` if given and reports the previous action through `oact`.
    pub fn sigaction(
        &self,
        signal: i32,
        act: Option<&SigAction>,
        oact: Option<&mut SigAction>,
    ) -> Result<()> {
        let signo = valid_signal(signal)?;
        let old = match act {
            Some(act) => {
                if !act.flags.is_empty() {
                    log::debug!("sigaction: {:?} flags {:?} ignored", signo, act.flags);
                }
                self.install(signal, Entry::from_action(signo, act))?
            }
            None => self.query(signo),
        };
        if let Some(oact) = oact {
            *oact = old.to_action();
        }
        Ok(())
    }

    /// Changes the calling thread's mask according to `how`.
    ///
    /// With `set == None` the mask is only read. `SIGKILL` can never be part of `set`.
    pub fn sigprocmask(
        &self,
        how: i32,
        set: Option<&SigSet>,
        oldset: Option<&mut SigSet>,
    ) -> Result<()> {
        if set.is_none() && oldset.is_none() {
            return Err(Error::InvalidArgument);
        }
        let mask = self.mask();
        let old = match set {
            Some(set) => {
                if set.contains(SignalNo::SIGKILL) {
                    log::warn!("sigprocmask: SIGKILL cannot be masked");
                    return Err(Error::InvalidArgument);
                }
                let how = SigHow::try_from(how).map_err(|_| Error::InvalidArgument)?;
                log::debug!("sigprocmask: {:?} {:#x}", how, set.0);
                match how {
                    SigHow::SIG_BLOCK => mask.block(*set),
                    SigHow::SIG_UNBLOCK => mask.unblock(*set),
                    SigHow::SIG_SETMASK => mask.replace(*set),
                }
            }
            None => mask.current(),
        };
        if let Some(oldset) = oldset {
            *oldset = old;
        }
        Ok(())
    }

    /// Waits for a signal with `mask` in place; the delivery path restores the mask.
    pub fn sigsuspend(&self, mask: &SigSet) -> Result<()> {
        check(self.kernel.suspend_until_signal(*mask))?;
        Ok(())
    }
}

pub fn raise(signal: i32) -> Result<()> {
    record(context().and_then(|ctx| ctx.raise(signal)))
}

pub fn kill(pid: isize, signal: i32) -> Result<()> {
    record(context().and_then(|ctx| ctx.kill(pid, signal)))
}

pub fn killpg(pgrp: isize, signal: i32) -> Result<()> {
    record(context().and_then(|ctx| ctx.killpg(pgrp, signal)))
}

/// `Err` is the `SIG_ERR` return.
pub fn signal(signum: i32, handler: SigHandler) -> Result<SigHandler> {
    record(context().and_then(|ctx| ctx.signal(signum, handler)))
}

pub fn sigaction(signal: i32, act: Option<&SigAction>, oact: Option<&mut SigAction>) -> Result<()> {
    record(context().and_then(|ctx| ctx.sigaction(signal, act, oact)))
}

pub fn sigprocmask(how: i32, set: Option<&SigSet>, oldset: Option<&mut SigSet>) -> Result<()> {
    record(context().and_then(|ctx| ctx.sigprocmask(how, set, oldset)))
}

pub fn sigsuspend(mask: &SigSet) -> Result<()> {
    record(context().and_then(|ctx| ctx.sigsuspend(mask)))
}

fn non_null<T>(set: Option<T>) -> Result<T> {
    set.ok_or_else(|| {
        log::warn!("null signal set");
        Error::InvalidArgument
    })
}

pub fn sigemptyset(set: Option<&mut SigSet>) -> Result<()> {
    record(non_null(set).map(|set| *set = SigSet::EMPTY))
}

/// Not implemented; always fails with [`Error::NotSupported`].
pub fn sigfillset(_set: Option<&mut SigSet>) -> Result<()> {
    record(Err(Error::NotSupported))
}

/// Not implemented; always fails with [`Error::NotSupported`].
pub fn sigisemptyset(_set: Option<&SigSet>) -> Result<bool> {
    record(Err(Error::NotSupported))
}

pub fn sigaddset(set: Option<&mut SigSet>, signo: i32) -> Result<()> {
    record(non_null(set).and_then(|set| {
        set.add_bit(valid_signal(signo)? as usize);
        Ok(())
    }))
}

pub fn sigdelset(set: Option<&mut SigSet>, signo: i32) -> Result<()> {
    record(non_null(set).and_then(|set| {
        set.remove_bit(valid_signal(signo)? as usize);
        Ok(())
    }))
}

pub fn sigismember(set: Option<&SigSet>, signo: i32) -> Result<bool> {
    record(non_null(set).and_then(|set| Ok(set.contains(valid_signal(signo)?))))
}
