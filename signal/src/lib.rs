//! User-space POSIX signals on top of the microkernel's signal primitives.
//!
//! The kernel only knows how to exchange a thread's mask, call one registered
//! entry point, suspend a thread and deliver a raw signal number. Dispositions,
//! defaults, targeting and mask discipline around handlers live here.
//!
//! [`init`] creates the process-wide [`SignalContext`] and registers
//! [`signal_entry`] with the kernel. The [`posix`] free functions act on that
//! context; tests and embedders may also drive a context of their own.

#![no_std]

pub mod action;
pub mod error;
pub mod mask;
pub mod posix;
pub mod target;
mod trampoline;

pub use action::{
    classify_default, Disposition, DispositionTable, Entry, HandlerFn, SigAction, SigHandler,
};
pub use error::{errno, set_errno, Error, Result};
pub use mask::{MaskAuthority, MaskGuard};
pub use signal_defs::{Errno, SaFlags, SigHow, SigSet, SignalNo, NSIG};
pub use syscall::Kernel;
pub use target::Target;
pub use trampoline::signal_entry;

use error::check;
use spin::{Mutex, Once};

/// Signal state of one process: the disposition table and the kernel it talks to.
pub struct SignalContext {
    kernel: &'static dyn Kernel,
    table: Mutex<DispositionTable>,
}

impl SignalContext {
    /// Fresh context with every signal at its default disposition.
    pub fn new(kernel: &'static dyn Kernel) -> Self {
        Self {
            kernel,
            table: Mutex::new(DispositionTable::new()),
        }
    }

    #[inline]
    pub fn kernel(&self) -> &'static dyn Kernel {
        self.kernel
    }

    #[inline]
    pub fn mask(&self) -> MaskAuthority {
        MaskAuthority::new(self.kernel)
    }

    /// Registers [`signal_entry`] with the kernel, deliverable for every signal.
    pub fn register(&self) -> Result<()> {
        check(
            self.kernel.register_trampoline(
                signal_entry as extern "C" fn(i32) as usize,
                0,
                SigSet::FULL,
            ),
        )?;
        Ok(())
    }

    /// Current table entry of `signo`.
    ///
    /// Takes the table lock with the mask untouched; the caller must already
    /// have every signal blocked, as the trampoline does. Use [`Self::query`]
    /// otherwise.
    pub fn lookup(&self, signo: SignalNo) -> Entry {
        self.table.lock().get(signo)
    }

    /// Current table entry of `signo`, read with every signal blocked.
    pub fn query(&self, signo: SignalNo) -> Entry {
        let _blocked = self.mask().block_all();
        self.lookup(signo)
    }

    /// Replaces the table entry of `signal`, returning the previous one.
    ///
    /// Signals stay blocked while the table lock is held, so a delivery on this
    /// thread cannot spin on it. The mask is the same afterwards.
    pub fn install(&self, signal: i32, entry: Entry) -> Result<Entry> {
        let _blocked = self.mask().block_all();
        let mut table = self.table.lock();
        table.install(signal, entry)
    }
}

static CONTEXT: Once<SignalContext> = Once::new();

/// Creates the process-wide context and registers the trampoline.
///
/// The context is published only once registration succeeds, so a failed call
/// may be retried. Later calls return the existing context and ignore `kernel`.
pub fn init(kernel: &'static dyn Kernel) -> Result<&'static SignalContext> {
    CONTEXT.try_call_once(|| {
        let ctx = SignalContext::new(kernel);
        ctx.register()?;
        log::debug!("signal layer ready");
        Ok::<_, Error>(ctx)
    })
}

/// The process-wide context, if [`init`] has run.
#[inline]
pub fn context() -> Result<&'static SignalContext> {
    CONTEXT.get().ok_or(Error::Uninitialized)
}
