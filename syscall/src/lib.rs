//! 微内核信号原语接口
//!
//! 信号层只通过 [`Kernel`] 与内核交互：掩码交换、注册入口、挂起等待、投递信号，
//! 以及读取进程标识和退出进程。[`Native`] 以 `ecall` 实现该接口。

#![no_std]

// 由 build.rs 根据 src/syscall.h.in 生成
#[allow(dead_code)]
mod syscalls {
    include!(concat!(env!("OUT_DIR"), "/syscalls.rs"));
}

pub mod native;

pub use native::Native;
pub use signal_defs::SigSet;

/// Syscall 号包装类型
///
/// 使用 `#[repr(transparent)]` 确保 ABI 兼容性
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SyscallId(pub usize);

impl From<usize> for SyscallId {
    fn from(value: usize) -> Self {
        SyscallId(value)
    }
}

/// 信号层所消费的内核原语
///
/// 返回 `isize` 的方法沿用内核约定：负值为 `-errno`，非负为成功。
pub trait Kernel: Send + Sync {
    /// 原子地将当前线程掩码改为 `(old & !affected) | (value & affected)`，返回 `old`。
    fn mask_exchange(&self, value: SigSet, affected: SigSet) -> SigSet;

    /// 注册用户态信号入口。内核之后以信号编号为参数在目标线程上调用 `entry`。
    fn register_trampoline(&self, entry: usize, arg: usize, mask: SigSet) -> isize;

    /// 原子地替换掩码并阻塞，直到有信号投递到当前线程。
    fn suspend_until_signal(&self, mask: SigSet) -> isize;

    /// 向 `(pid, tid)` 投递信号。`tid == 0` 表示进程内任一线程，负 `pid` 表示进程组。
    fn deliver_signal(&self, pid: isize, tid: isize, signal: i32) -> isize;

    fn getpid(&self) -> isize;

    fn gettid(&self) -> isize;

    fn getpgrp(&self) -> isize;

    /// 以 `status` 结束进程，不返回。
    fn exit(&self, status: i32) -> !;
}
