//! 自旋锁
//!
//! [`RawSpinLock`] 实现 `lock_api::RawMutex`，持锁期间禁用本地中断；
//! [`SpinLock`] 是在其上构建的带数据互斥锁。
//!
//! # 示例
//! ```ignore
//! let lock = SpinLock::new(0);
//! {
//!     let mut guard = lock.lock(); // 获取锁，禁用中断
//!     *guard += 1;
//! } // 离开作用域，释放锁并恢复中断状态
//! ```
//!
//! SpinLock 不可重入：持锁时再次 `lock()` 会死锁。

use core::{
    hint,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use lock_api::{GuardNoSend, RawMutex};

use crate::IntrGuard;

/// 原始自旋锁
///
/// 获取锁时保存的中断状态存放在锁内部，释放时恢复。
/// 只有持锁者会读写 `saved_flags`，因此 Relaxed 足够。
#[derive(Debug)]
pub struct RawSpinLock {
    locked: AtomicBool,
    saved_flags: AtomicUsize,
}

impl RawSpinLock {
    /// 创建未加锁的 RawSpinLock
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
            saved_flags: AtomicUsize::new(0),
        }
    }
}

impl Default for RawSpinLock {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl RawMutex for RawSpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    // 守卫恢复的是本 CPU 的中断状态，不能跨线程释放
    type GuardMarker = GuardNoSend;

    fn lock(&self) {
        let guard = IntrGuard::new();
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            hint::spin_loop();
        }
        self.saved_flags.store(guard.into_flags(), Ordering::Relaxed);
    }

    fn try_lock(&self) -> bool {
        let guard = IntrGuard::new();
        if self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            self.saved_flags.store(guard.into_flags(), Ordering::Relaxed);
            true
        } else {
            // guard 在此处 Drop，恢复中断
            false
        }
    }

    unsafe fn unlock(&self) {
        let flags = self.saved_flags.load(Ordering::Relaxed);
        self.locked.store(false, Ordering::Release);
        // SAFETY: flags 由持锁时的 lock()/try_lock() 保存
        unsafe { IntrGuard::restore(flags) };
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

/// 提供对数据互斥访问的自旋锁
pub type SpinLock<T> = lock_api::Mutex<RawSpinLock, T>;

/// [`SpinLock`] 的 RAII 保护器
pub type SpinLockGuard<'a, T> = lock_api::MutexGuard<'a, RawSpinLock, T>;
