//! 测试用的内核实现：在内存中模拟掩码交换，并记录所有调用。

#![allow(dead_code)]

use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};
use std::sync::Mutex;

use signal::{Kernel, SigSet};

/// `exit` 以该值作为 panic 负载，测试通过 `catch_unwind` 取回退出码
#[derive(Debug, PartialEq, Eq)]
pub struct Exited(pub i32);

pub const PID: isize = 42;
pub const TID: isize = 7;
pub const PGRP: isize = 40;

pub struct MockKernel {
    mask: Mutex<SigSet>,
    /// 每次交换之后的掩码
    pub history: Mutex<Vec<SigSet>>,
    pub exchanges: AtomicUsize,
    pub delivered: Mutex<Vec<(isize, isize, i32)>>,
    pub suspended: Mutex<Vec<SigSet>>,
    pub registered: Mutex<Vec<(usize, usize, SigSet)>>,
    /// 非零时 deliver_signal / suspend_until_signal / getpgrp 返回该值
    pub fail_with: AtomicIsize,
    /// register_trampoline 的返回值
    pub register_status: AtomicIsize,
}

impl MockKernel {
    pub fn with_mask(mask: SigSet) -> &'static MockKernel {
        Box::leak(Box::new(MockKernel {
            mask: Mutex::new(mask),
            history: Mutex::new(Vec::new()),
            exchanges: AtomicUsize::new(0),
            delivered: Mutex::new(Vec::new()),
            suspended: Mutex::new(Vec::new()),
            registered: Mutex::new(Vec::new()),
            fail_with: AtomicIsize::new(0),
            register_status: AtomicIsize::new(0),
        }))
    }

    pub fn new() -> &'static MockKernel {
        Self::with_mask(SigSet::EMPTY)
    }

    /// 直接读取掩码，不计入交换次数
    pub fn peek(&self) -> SigSet {
        *self.mask.lock().unwrap()
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }

    pub fn history(&self) -> Vec<SigSet> {
        self.history.lock().unwrap().clone()
    }

    pub fn deliveries(&self) -> Vec<(isize, isize, i32)> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn fail(&self, status: isize) {
        self.fail_with.store(status, Ordering::SeqCst);
    }

    pub fn fail_register(&self, status: isize) {
        self.register_status.store(status, Ordering::SeqCst);
    }

    fn failure(&self) -> Option<isize> {
        match self.fail_with.load(Ordering::SeqCst) {
            0 => None,
            status => Some(status),
        }
    }
}

impl Kernel for MockKernel {
    fn mask_exchange(&self, value: SigSet, affected: SigSet) -> SigSet {
        let mut mask = self.mask.lock().unwrap();
        let old = *mask;
        *mask = old.exchange(value, affected);
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        self.history.lock().unwrap().push(*mask);
        old
    }

    fn register_trampoline(&self, entry: usize, arg: usize, mask: SigSet) -> isize {
        self.registered.lock().unwrap().push((entry, arg, mask));
        self.register_status.load(Ordering::SeqCst)
    }

    fn suspend_until_signal(&self, mask: SigSet) -> isize {
        if let Some(status) = self.failure() {
            return status;
        }
        self.suspended.lock().unwrap().push(mask);
        0
    }

    fn deliver_signal(&self, pid: isize, tid: isize, signal: i32) -> isize {
        if let Some(status) = self.failure() {
            return status;
        }
        self.delivered.lock().unwrap().push((pid, tid, signal));
        0
    }

    fn getpid(&self) -> isize {
        PID
    }

    fn gettid(&self) -> isize {
        TID
    }

    fn getpgrp(&self) -> isize {
        self.failure().unwrap_or(PGRP)
    }

    fn exit(&self, status: i32) -> ! {
        std::panic::panic_any(Exited(status))
    }
}
