//! 架构相关操作的 Mock 实现
//!
//! 以一个原子布尔值模拟本地中断使能位。

use core::sync::atomic::{AtomicBool, Ordering};

/// Mock 架构操作
pub struct MockArchOps {
    pub interrupt_state: AtomicBool,
}

impl MockArchOps {
    pub const fn new() -> Self {
        Self {
            interrupt_state: AtomicBool::new(true),
        }
    }

    pub unsafe fn read_and_disable_interrupts(&self) -> usize {
        self.interrupt_state.swap(false, Ordering::SeqCst) as usize
    }

    pub unsafe fn restore_interrupts(&self, flags: usize) {
        self.interrupt_state.store(flags != 0, Ordering::SeqCst);
    }

    pub fn interrupt_enable_mask(&self) -> usize {
        0x1
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.interrupt_state.load(Ordering::SeqCst)
    }
}

/// 全局 Mock 实例
pub static MOCK_ARCH_OPS: MockArchOps = MockArchOps::new();
