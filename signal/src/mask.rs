//! Blocked-signal mask, owned by the kernel.
//!
//! Every transition is a single atomic [`Kernel::mask_exchange`]; nothing here
//! caches the mask.

use signal_defs::SigSet;
use syscall::Kernel;

/// Thin handle over the kernel's mask exchange primitive.
#[derive(Clone, Copy)]
pub struct MaskAuthority {
    kernel: &'static dyn Kernel,
}

impl MaskAuthority {
    #[inline]
    pub fn new(kernel: &'static dyn Kernel) -> Self {
        Self { kernel }
    }

    /// `new = (old & !affected) | (value & affected)`; returns `old`.
    #[inline]
    pub fn exchange(&self, value: SigSet, affected: SigSet) -> SigSet {
        self.kernel.mask_exchange(value, affected)
    }

    /// Adds `set` to the mask.
    #[inline]
    pub fn block(&self, set: SigSet) -> SigSet {
        self.exchange(SigSet::FULL, set)
    }

    /// Removes `set` from the mask.
    #[inline]
    pub fn unblock(&self, set: SigSet) -> SigSet {
        self.exchange(SigSet::EMPTY, set)
    }

    /// Makes `set` the whole mask.
    #[inline]
    pub fn replace(&self, set: SigSet) -> SigSet {
        self.exchange(set, SigSet::FULL)
    }

    /// Reads the mask without changing it.
    #[inline]
    pub fn current(&self) -> SigSet {
        self.exchange(SigSet::EMPTY, SigSet::EMPTY)
    }

    /// Blocks every signal until the returned guard is dropped.
    pub fn block_all(&self) -> MaskGuard {
        MaskGuard {
            authority: *self,
            saved: self.block(SigSet::FULL),
        }
    }
}

/// Restores the mask saved by [`MaskAuthority::block_all`] on drop.
pub struct MaskGuard {
    authority: MaskAuthority,
    saved: SigSet,
}

impl MaskGuard {
    /// The mask in effect before the guard was taken.
    #[inline]
    pub fn saved(&self) -> SigSet {
        self.saved
    }
}

impl Drop for MaskGuard {
    fn drop(&mut self) {
        self.authority.replace(self.saved);
    }
}
