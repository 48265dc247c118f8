#![no_std]

use numeric_enum_macro::numeric_enum;

/// 支持的信号数量
///
/// 合法信号编号为 `[0, NSIG)`，其中 0 号仅作为诊断占位。
pub const NSIG: usize = 32;

numeric_enum! {
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum SignalNo {
        ERR = 0,
        SIGHUP = 1,
        SIGINT = 2,
        SIGQUIT = 3,
        SIGILL = 4,
        SIGTRAP = 5,
        SIGABRT = 6,
        SIGEMT = 7,
        SIGFPE = 8,
        SIGKILL = 9,
        SIGBUS = 10,
        SIGSEGV = 11,
        SIGSYS = 12,
        SIGPIPE = 13,
        SIGALRM = 14,
        SIGTERM = 15,
        SIGURG = 16,
        SIGSTOP = 17,
        SIGTSTP = 18,
        SIGCONT = 19,
        SIGCHLD = 20,
        SIGTTIN = 21,
        SIGTTOU = 22,
        SIGIO = 23,
        SIGXCPU = 24,
        SIGXFSZ = 25,
        SIGVTALRM = 26,
        SIGPROF = 27,
        SIGWINCH = 28,
        SIGINFO = 29,
        SIGUSR1 = 30,
        SIGUSR2 = 31,
    }
}

impl SignalNo {
    /// `SIGIOT` 与 `SIGABRT` 共用编号
    pub const SIGIOT: SignalNo = SignalNo::SIGABRT;

    /// 从原始整数转换，超出 `[0, NSIG)` 返回 `None`
    #[inline]
    pub fn from_raw(raw: i32) -> Option<Self> {
        u8::try_from(raw).ok().and_then(|n| SignalNo::try_from(n).ok())
    }

    /// 该信号在 `SigSet` 中对应的位
    #[inline]
    pub const fn bit(self) -> SigSet {
        SigSet(1u32 << (self as u32))
    }
}

impl From<usize> for SignalNo {
    /// 超出范围的编号映射为 `SignalNo::ERR`
    fn from(num: usize) -> Self {
        u8::try_from(num)
            .ok()
            .and_then(|n| SignalNo::try_from(n).ok())
            .unwrap_or(SignalNo::ERR)
    }
}

/// 信号集合
///
/// 第 `n` 位对应 `n` 号信号。内核、运行时与 POSIX 接口共用这一布局，
/// 宽度固定为 32 位，与 `NSIG` 一致。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SigSet(pub u32);

impl SigSet {
    pub const EMPTY: SigSet = SigSet(0);
    pub const FULL: SigSet = SigSet(u32::MAX);

    #[inline]
    pub fn add_bit(&mut self, bit: usize) {
        if bit < NSIG {
            self.0 |= 1u32 << bit;
        }
    }

    #[inline]
    pub fn remove_bit(&mut self, bit: usize) {
        if bit < NSIG {
            self.0 &= !(1u32 << bit);
        }
    }

    #[inline]
    pub fn contain_bit(&self, bit: usize) -> bool {
        bit < NSIG && (self.0 & (1u32 << bit)) != 0
    }

    #[inline]
    pub fn contains(&self, signal: SignalNo) -> bool {
        self.contain_bit(signal as usize)
    }

    #[inline]
    pub const fn union(self, rhs: SigSet) -> SigSet {
        SigSet(self.0 | rhs.0)
    }

    #[inline]
    pub const fn intersection(self, rhs: SigSet) -> SigSet {
        SigSet(self.0 & rhs.0)
    }

    #[inline]
    pub const fn difference(self, rhs: SigSet) -> SigSet {
        SigSet(self.0 & !rhs.0)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// 按掩码交换规则计算新集合：`(self & !affected) | (value & affected)`
    #[inline]
    pub const fn exchange(self, value: SigSet, affected: SigSet) -> SigSet {
        SigSet((self.0 & !affected.0) | (value.0 & affected.0))
    }
}

impl From<SignalNo> for SigSet {
    fn from(signal: SignalNo) -> Self {
        signal.bit()
    }
}

numeric_enum! {
    #[repr(i32)]
    /// `sigprocmask` 的 `how` 参数
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[allow(non_camel_case_types)]
    pub enum SigHow {
        SIG_BLOCK = 1,
        SIG_UNBLOCK = 2,
        SIG_SETMASK = 3,
    }
}

bitflags::bitflags! {
    /// `sigaction` 标志位
    ///
    /// 仅被保存并原样返回，信号层不解释其中任何一位。
    #[derive(Default)]
    pub struct SaFlags: u32 {
        const SA_ONSTACK = 0x0001;
        const SA_RESTART = 0x0002;
        const SA_RESETHAND = 0x0004;
        const SA_NOCLDSTOP = 0x0008;
        const SA_NODEFER = 0x0010;
        const SA_NOCLDWAIT = 0x0020;
        const SA_SIGINFO = 0x0040;
    }
}

numeric_enum! {
    #[repr(i32)]
    /// 信号层会产生的错误码
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Errno {
        ESRCH = 3,
        EINVAL = 22,
        ENOSYS = 38,
    }
}
