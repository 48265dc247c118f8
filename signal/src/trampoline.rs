use crate::action::{terminate_status, Disposition};
use crate::{SignalContext, CONTEXT};
use signal_defs::{SigSet, SignalNo};

/// Entry point registered with the kernel; called on the receiving thread's stack.
///
/// Signals arriving before [`crate::init`] are dropped.
pub extern "C" fn signal_entry(signal: i32) {
    if let Some(ctx) = CONTEXT.get() {
        ctx.handle(signal);
    }
}

impl SignalContext {
    /// Runs the disposition of `signal` with every signal blocked, then restores the mask.
    ///
    /// Out-of-range numbers are dropped. [`Disposition::Terminate`] does not return.
    pub fn handle(&self, signal: i32) {
        let Some(signo) = SignalNo::from_raw(signal) else {
            log::trace!("trampoline: dropped signal {}", signal);
            return;
        };

        let mask = self.mask();
        let saved = mask.exchange(SigSet::FULL, SigSet::FULL);

        let entry = self.lookup(signo);
        log::trace!("trampoline: {:?} -> {:?}", signo, entry.disposition);
        match entry.disposition {
            Some(disposition) => self.invoke(disposition, signo),
            None => log::trace!("trampoline: no action for {:?}", signo),
        }

        mask.exchange(saved, SigSet::FULL);
    }

    fn invoke(&self, disposition: Disposition, signo: SignalNo) {
        match disposition {
            Disposition::Diagnostic => self.report_bug(),
            Disposition::Ignore => {}
            Disposition::Terminate => self.kernel.exit(terminate_status(signo)),
            Disposition::Custom(handler) => handler(signo as i32),
        }
    }

    #[cfg(feature = "diagnostic")]
    fn report_bug(&self) {
        log::error!("{}: BUG - received signal #0", self.kernel.getpid());
    }

    #[cfg(not(feature = "diagnostic"))]
    fn report_bug(&self) {}
}
