use crate::{Kernel, SigSet, SyscallId};

/// 发起带 1 个参数的系统调用
///
/// # Safety
/// 调用方必须确保 syscall id 和参数有效
#[cfg(target_arch = "riscv64")]
#[inline]
pub unsafe fn syscall1(id: SyscallId, a0: usize) -> isize {
    let ret: isize;
    core::arch::asm!(
        "ecall",
        inlateout("a0") a0 => ret,
        in("a7") id.0,
        options(nostack, preserves_flags)
    );
    ret
}

#[cfg(not(target_arch = "riscv64"))]
#[inline]
pub unsafe fn syscall1(_id: SyscallId, _a0: usize) -> isize {
    // 非 RISC-V 架构上没有内核可调用
    -1
}

/// 发起不带参数的系统调用
#[inline]
pub unsafe fn syscall0(id: SyscallId) -> isize {
    syscall1(id, 0)
}

/// 发起带 2 个参数的系统调用
#[cfg(target_arch = "riscv64")]
#[inline]
pub unsafe fn syscall2(id: SyscallId, a0: usize, a1: usize) -> isize {
    let ret: isize;
    core::arch::asm!(
        "ecall",
        inlateout("a0") a0 => ret,
        in("a1") a1,
        in("a7") id.0,
        options(nostack, preserves_flags)
    );
    ret
}

#[cfg(not(target_arch = "riscv64"))]
#[inline]
pub unsafe fn syscall2(_id: SyscallId, _a0: usize, _a1: usize) -> isize {
    -1
}

/// 发起带 3 个参数的系统调用
#[cfg(target_arch = "riscv64")]
#[inline]
pub unsafe fn syscall3(id: SyscallId, a0: usize, a1: usize, a2: usize) -> isize {
    let ret: isize;
    core::arch::asm!(
        "ecall",
        inlateout("a0") a0 => ret,
        in("a1") a1,
        in("a2") a2,
        in("a7") id.0,
        options(nostack, preserves_flags)
    );
    ret
}

#[cfg(not(target_arch = "riscv64"))]
#[inline]
pub unsafe fn syscall3(_id: SyscallId, _a0: usize, _a1: usize, _a2: usize) -> isize {
    -1
}

/// 通过 `ecall` 访问内核的 [`Kernel`] 实现
#[derive(Debug, Clone, Copy, Default)]
pub struct Native;

impl Kernel for Native {
    fn mask_exchange(&self, value: SigSet, affected: SigSet) -> SigSet {
        let old = unsafe {
            syscall2(SyscallId::SIGNAL_MASK, value.0 as usize, affected.0 as usize)
        };
        SigSet(old as u32)
    }

    fn register_trampoline(&self, entry: usize, arg: usize, mask: SigSet) -> isize {
        unsafe { syscall3(SyscallId::SIGNAL_HANDLE, entry, arg, mask.0 as usize) }
    }

    fn suspend_until_signal(&self, mask: SigSet) -> isize {
        unsafe { syscall1(SyscallId::SIGNAL_SUSPEND, mask.0 as usize) }
    }

    fn deliver_signal(&self, pid: isize, tid: isize, signal: i32) -> isize {
        unsafe {
            syscall3(
                SyscallId::THREAD_KILL,
                pid as usize,
                tid as usize,
                signal as usize,
            )
        }
    }

    fn getpid(&self) -> isize {
        unsafe { syscall0(SyscallId::GETPID) }
    }

    fn gettid(&self) -> isize {
        unsafe { syscall0(SyscallId::GETTID) }
    }

    fn getpgrp(&self) -> isize {
        unsafe { syscall0(SyscallId::GETPGRP) }
    }

    fn exit(&self, status: i32) -> ! {
        unsafe { syscall1(SyscallId::EXIT, status as usize) };
        loop {
            core::hint::spin_loop();
        }
    }
}
