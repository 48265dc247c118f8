//! 进程级全局上下文与 POSIX 自由函数测试
//!
//! 全局上下文只能初始化一次，errno 也是进程级的，
//! 因此本文件的测试通过 `SERIAL` 串行执行。

mod common;

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Mutex, MutexGuard};

use common::{MockKernel, PGRP, PID, TID};
use signal::posix::*;
use signal::{errno, set_errno, Errno, Error, SigHandler, SigHow, SigSet, SignalNo, NSIG};

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

static USR1_SEEN: AtomicI32 = AtomicI32::new(0);

fn on_usr1(signal: i32) {
    USR1_SEEN.store(signal, Ordering::SeqCst);
}

#[test]
fn test_process_wide_lifecycle() {
    let _serial = serial();
    let usr1 = SignalNo::SIGUSR1 as i32;

    // 初始化之前
    set_errno(0);
    assert_eq!(raise(usr1), Err(Error::Uninitialized));
    assert_eq!(errno(), Errno::ENOSYS as i32);
    assert!(signal::context().is_err());
    signal::signal_entry(usr1);

    // 初始化：注册入口一次，默认掩码全 1
    let kernel = MockKernel::new();
    let ctx = signal::init(kernel).unwrap();
    assert_eq!(
        *kernel.registered.lock().unwrap(),
        vec![(signal::signal_entry as extern "C" fn(i32) as usize, 0, SigSet::FULL)]
    );
    let again = signal::init(MockKernel::new()).unwrap();
    assert!(std::ptr::eq(ctx, again));
    assert_eq!(kernel.registered.lock().unwrap().len(), 1);

    // 自由函数作用于全局上下文
    assert_eq!(signal(usr1, SigHandler::Handler(on_usr1)), Ok(SigHandler::Default));
    raise(usr1).unwrap();
    kill(PID, usr1).unwrap();
    killpg(0, usr1).unwrap();
    assert_eq!(
        kernel.deliveries(),
        vec![(PID, TID, usr1), (PID, 0, usr1), (-PGRP, 0, usr1)]
    );

    // 内核调用入口
    let initial = kernel.peek();
    signal::signal_entry(usr1);
    assert_eq!(USR1_SEEN.load(Ordering::SeqCst), usr1);
    assert_eq!(kernel.peek(), initial);

    let exchanges = kernel.exchange_count();
    signal::signal_entry(-1);
    signal::signal_entry(NSIG as i32);
    assert_eq!(kernel.exchange_count(), exchanges);

    // 掩码操作
    let mut old = SigSet::FULL;
    let set = SignalNo::SIGINT.bit();
    sigprocmask(SigHow::SIG_BLOCK as i32, Some(&set), Some(&mut old)).unwrap();
    assert_eq!(old, initial);
    assert!(kernel.peek().contains(SignalNo::SIGINT));
    sigprocmask(SigHow::SIG_UNBLOCK as i32, Some(&set), None).unwrap();
    assert_eq!(kernel.peek(), initial);

    set_errno(0);
    assert_eq!(
        sigprocmask(SigHow::SIG_SETMASK as i32, None, None),
        Err(Error::InvalidArgument)
    );
    assert_eq!(errno(), Errno::EINVAL as i32);

    sigsuspend(&SigSet::EMPTY).unwrap();
    assert_eq!(*kernel.suspended.lock().unwrap(), vec![SigSet::EMPTY]);

    // 内核错误写入 errno
    kernel.fail(-3);
    set_errno(0);
    assert_eq!(kill(1, usr1), Err(Error::Kernel(-3)));
    assert_eq!(errno(), 3);
    kernel.fail(0);
}

#[test]
fn test_set_helpers() {
    let _serial = serial();

    let mut set = SigSet(0xdead_beef);
    sigemptyset(Some(&mut set)).unwrap();
    assert_eq!(set, SigSet::EMPTY);

    let x = SignalNo::SIGPIPE as i32;
    sigaddset(Some(&mut set), x).unwrap();
    for y in 0..NSIG as i32 {
        assert_eq!(sigismember(Some(&set), y), Ok(y == x));
    }

    sigaddset(Some(&mut set), 0).unwrap();
    sigdelset(Some(&mut set), x).unwrap();
    assert_eq!(sigismember(Some(&set), x), Ok(false));
    assert_eq!(sigismember(Some(&set), 0), Ok(true));
    assert_eq!(set, SigSet(1));
}

#[test]
fn test_set_helpers_reject() {
    let _serial = serial();
    let mut set = SigSet::EMPTY;

    set_errno(0);
    assert_eq!(sigemptyset(None), Err(Error::InvalidArgument));
    assert_eq!(errno(), Errno::EINVAL as i32);

    assert_eq!(sigaddset(None, 1), Err(Error::InvalidArgument));
    assert_eq!(sigdelset(None, 1), Err(Error::InvalidArgument));
    assert_eq!(sigismember(None, 1), Err(Error::InvalidArgument));

    assert_eq!(sigaddset(Some(&mut set), NSIG as i32), Err(Error::InvalidArgument));
    assert_eq!(sigaddset(Some(&mut set), -1), Err(Error::InvalidArgument));
    assert_eq!(sigdelset(Some(&mut set), 100), Err(Error::InvalidArgument));
    assert_eq!(sigismember(Some(&set), NSIG as i32), Err(Error::InvalidArgument));
    assert_eq!(set, SigSet::EMPTY);
}

#[test]
fn test_unsupported_helpers() {
    let _serial = serial();
    let mut set = SigSet(0b101);

    set_errno(0);
    assert_eq!(sigfillset(Some(&mut set)), Err(Error::NotSupported));
    assert_eq!(errno(), Errno::ENOSYS as i32);
    assert_eq!(sigfillset(None), Err(Error::NotSupported));
    assert_eq!(sigisemptyset(Some(&SigSet::EMPTY)), Err(Error::NotSupported));
    assert_eq!(sigisemptyset(None), Err(Error::NotSupported));
    // 集合不被修改
    assert_eq!(set, SigSet(0b101));
}
