//! 中断保护器
//!
//! 注意：禁用中断只能阻止**本地 CPU** 的“任务 vs 本地中断”并发，
//! 多核共享数据仍需要配合自旋锁。

use crate::arch_ops;

/// 中断保护器，创建时禁用本地中断，销毁时恢复之前的状态。
pub struct IntrGuard {
    flags: usize,
}

impl IntrGuard {
    /// 禁用中断并返回保护器
    pub fn new() -> Self {
        // SAFETY: 保存的 flags 只会在 Drop 中原样恢复
        let flags = unsafe { arch_ops().read_and_disable_interrupts() };
        IntrGuard { flags }
    }

    /// 进入临界区前中断是否处于启用状态
    pub fn was_enabled(&self) -> bool {
        self.flags & arch_ops().interrupt_enable_mask() != 0
    }

    /// 放弃恢复责任，返回保存的中断状态
    ///
    /// 由 [`crate::RawSpinLock`] 使用：锁的释放点不在保护器的作用域内，
    /// 因此要把状态转交给锁自身保存。
    pub(crate) fn into_flags(self) -> usize {
        let flags = self.flags;
        core::mem::forget(self);
        flags
    }

    /// 恢复之前由 [`IntrGuard::into_flags`] 交出的中断状态
    ///
    /// # Safety
    /// `flags` 必须来自同一 CPU 上最近一次 `into_flags`
    pub(crate) unsafe fn restore(flags: usize) {
        unsafe { arch_ops().restore_interrupts(flags) };
    }
}

impl Default for IntrGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for IntrGuard {
    fn drop(&mut self) {
        // SAFETY: flags 是在创建 IntrGuard 时保存的
        unsafe { arch_ops().restore_interrupts(self.flags) };
    }
}
