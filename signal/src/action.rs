//! Disposition table and default signal actions.

use crate::error::{Error, Result};
use signal_defs::{SaFlags, SigSet, SignalNo, NSIG};

/// Signature of a user-installed signal handler.
pub type HandlerFn = fn(i32);

/// What happens when a signal reaches the trampoline.
#[allow(unknown_lints, unpredictable_function_pointer_comparisons)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Signal 0 should never be delivered; report it as a bug.
    Diagnostic,
    Ignore,
    /// End the process with the signal encoded in the exit status.
    Terminate,
    Custom(HandlerFn),
}

/// Default action of `signo`, or `None` when the signal is not actionable here.
pub fn classify_default(signo: SignalNo) -> Option<Disposition> {
    use SignalNo::*;
    match signo {
        ERR => Some(Disposition::Diagnostic),
        SIGHUP | SIGINT | SIGQUIT | SIGILL | SIGTRAP | SIGABRT | SIGEMT | SIGFPE | SIGKILL
        | SIGBUS | SIGSEGV | SIGSYS | SIGPIPE | SIGALRM | SIGTERM | SIGIO | SIGXCPU
        | SIGXFSZ | SIGVTALRM | SIGPROF => Some(Disposition::Terminate),
        SIGURG | SIGSTOP | SIGTSTP | SIGCONT | SIGCHLD | SIGTTIN | SIGTTOU | SIGWINCH
        | SIGINFO | SIGUSR1 | SIGUSR2 => Some(Disposition::Ignore),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

/// Whether the disposition of `signo` may be changed by the process.
#[inline]
pub fn is_mutable(signo: SignalNo) -> bool {
    !matches!(signo, SignalNo::SIGKILL | SignalNo::SIGSTOP)
}

/// Exit status used by [`Disposition::Terminate`].
#[inline]
pub const fn terminate_status(signo: SignalNo) -> i32 {
    ((signo as i32) & 0x7f) << 8
}

/// How a signal's handler is described at the POSIX boundary.
#[allow(unknown_lints, unpredictable_function_pointer_comparisons)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigHandler {
    /// `SIG_DFL`
    Default,
    /// `SIG_IGN`
    Ignore,
    Handler(HandlerFn),
}

/// `struct sigaction`.
///
/// `flags` are stored and reported back, never acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigAction {
    pub handler: SigHandler,
    pub mask: SigSet,
    pub flags: SaFlags,
}

impl Default for SigAction {
    fn default() -> Self {
        Self {
            handler: SigHandler::Default,
            mask: SigSet::EMPTY,
            flags: SaFlags::empty(),
        }
    }
}

/// One slot of the disposition table.
///
/// `handler` is what the caller installed and is reported back unchanged;
/// `disposition` is what the trampoline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub handler: SigHandler,
    pub disposition: Option<Disposition>,
    /// `sa_mask` as installed.
    pub mask: SigSet,
    pub flags: SaFlags,
}

impl Entry {
    /// The entry a freshly started process has for `signo`.
    pub fn default_for(signo: SignalNo) -> Self {
        Self {
            handler: SigHandler::Default,
            disposition: classify_default(signo),
            mask: SigSet::EMPTY,
            flags: SaFlags::empty(),
        }
    }

    pub fn from_action(signo: SignalNo, action: &SigAction) -> Self {
        let disposition = match action.handler {
            SigHandler::Default => classify_default(signo),
            SigHandler::Ignore => Some(Disposition::Ignore),
            SigHandler::Handler(f) => Some(Disposition::Custom(f)),
        };
        Self {
            handler: action.handler,
            disposition,
            mask: action.mask,
            flags: action.flags,
        }
    }

    #[inline]
    pub fn to_action(&self) -> SigAction {
        SigAction {
            handler: self.handler,
            mask: self.mask,
            flags: self.flags,
        }
    }
}

/// Process-wide table of signal dispositions, one entry per signal number.
pub struct DispositionTable {
    entries: [Entry; NSIG],
}

impl DispositionTable {
    pub fn new() -> Self {
        let mut entries = [Entry::default_for(SignalNo::ERR); NSIG];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = Entry::default_for(SignalNo::from(i));
        }
        Self { entries }
    }

    #[inline]
    pub fn get(&self, signo: SignalNo) -> Entry {
        self.entries[signo as usize]
    }

    /// Replaces the entry of `signal` and returns the previous one.
    pub fn install(&mut self, signal: i32, entry: Entry) -> Result<Entry> {
        let signo = SignalNo::from_raw(signal).ok_or(Error::InvalidArgument)?;
        if !is_mutable(signo) {
            log::warn!("install: disposition of {:?} is fixed", signo);
            return Err(Error::InvalidArgument);
        }
        let slot = &mut self.entries[signo as usize];
        let old = *slot;
        *slot = entry;
        log::debug!("install: {:?} {:?} -> {:?}", signo, old.disposition, entry.disposition);
        Ok(old)
    }
}

impl Default for DispositionTable {
    fn default() -> Self {
        Self::new()
    }
}
