//! `/proc/modules` - 已加载模块列表
//!
//! 每次 `read` 都从注册表当前状态重新生成文本，不缓存任何快照：
//!
//! 1. 以会话偏移 `pos` 作为 `skip`，表示之前的调用已经交付过的字节数；
//! 2. 遍历注册表，把每个模块格式化到单行缓冲区；
//! 3. 用 [`procfs_memcpy`] 跳过恢复点之前的内容，把其余部分拷进用户缓冲区；
//! 4. 用户缓冲区写满即停止遍历，`pos` 增加本次交付的字节数。
//!
//! 内存占用与模块数量无关：每个会话只有一个 [`LineBuf`]。
//! 注册表在两次调用之间可能变化，因此总长度不稳定；同一次调用内看到的是一致的状态。

use alloc::sync::Arc;
use core::any::Any;
use core::ops::ControlFlow;
use core::sync::atomic::{AtomicUsize, Ordering};

use sync::SpinLock;
use vfs::{File, FileMode, FsError, OpenFlags, ProcfsOperations, Stat, procfs_memcpy};

use crate::config::DEFAULT_MAX_OPEN;
use crate::line::LineBuf;
use crate::registry::ModuleRegistry;

/// 描述符预算
///
/// 每个打开的会话（包括 dup 出来的副本）占用一个名额；
/// 名额耗尽等价于会话状态分配失败。
#[derive(Debug)]
struct OpenBudget {
    open: AtomicUsize,
    max_open: usize,
}

impl OpenBudget {
    fn reserve(self: &Arc<Self>) -> Result<OpenSlot, FsError> {
        self.open
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max_open).then_some(n + 1)
            })
            .map_err(|_| {
                log::warn!("modprocfs: descriptor budget ({}) exhausted", self.max_open);
                FsError::OutOfMemory
            })?;
        Ok(OpenSlot(self.clone()))
    }
}

/// 占用中的描述符名额，Drop 时归还
#[derive(Debug)]
struct OpenSlot(Arc<OpenBudget>);

impl Drop for OpenSlot {
    fn drop(&mut self) {
        self.0.open.fetch_sub(1, Ordering::AcqRel);
    }
}

/// 每个会话独占的状态
#[derive(Debug, Clone)]
struct ModProcState {
    /// 已交付给读者的累计字节数，唯一的恢复依据
    pos: usize,
    /// 单行格式化缓冲区
    line: LineBuf,
}

/// 单次 `read` 调用的输出游标
struct ReadCursor<'a> {
    dest: &'a mut [u8],
    total: usize,
    skip: usize,
}

impl<'a> ReadCursor<'a> {
    fn new(dest: &'a mut [u8], skip: usize) -> Self {
        Self {
            dest,
            total: 0,
            skip,
        }
    }

    fn remaining(&self) -> usize {
        self.dest.len() - self.total
    }

    fn push(&mut self, line: &[u8]) -> usize {
        let copied = procfs_memcpy(line, &mut self.dest[self.total..], &mut self.skip);
        self.total += copied;
        copied
    }

    fn is_full(&self) -> bool {
        self.remaining() == 0
    }
}

/// `/proc/modules` 条目
///
/// 持有注册表的共享引用；路径分发层在查找到该条目后调用 [`ProcfsOperations::open`]。
pub struct ModProcfs {
    registry: Arc<ModuleRegistry>,
    budget: Arc<OpenBudget>,
}

impl ModProcfs {
    /// 使用默认描述符上限创建条目
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self::with_max_open(registry, DEFAULT_MAX_OPEN)
    }

    /// 指定同时打开的会话上限
    pub fn with_max_open(registry: Arc<ModuleRegistry>, max_open: usize) -> Self {
        Self {
            registry,
            budget: Arc::new(OpenBudget {
                open: AtomicUsize::new(0),
                max_open,
            }),
        }
    }

    /// 当前打开的会话数
    pub fn open_count(&self) -> usize {
        self.budget.open.load(Ordering::Acquire)
    }

    /// 会话上限
    pub fn max_open(&self) -> usize {
        self.budget.max_open
    }

    fn stat_buf() -> Stat {
        Stat {
            st_mode: FileMode::regular_readonly().bits(),
            ..Stat::default()
        }
    }
}

impl ProcfsOperations for ModProcfs {
    fn open(&self, relpath: &str, flags: OpenFlags) -> Result<Arc<dyn File>, FsError> {
        log::debug!("modprocfs: open '{}' flags={:#o}", relpath, flags.bits());

        // procfs 只读，任何写访问都不允许
        if flags.writable() {
            log::warn!("modprocfs: only O_RDONLY supported (flags={:#o})", flags.bits());
            return Err(FsError::PermissionDenied);
        }

        let slot = self.budget.reserve()?;
        Ok(Arc::new(ModProcFile {
            registry: self.registry.clone(),
            flags,
            state: SpinLock::new(ModProcState {
                pos: 0,
                line: LineBuf::new(),
            }),
            slot,
        }))
    }

    fn stat(&self, _relpath: &str) -> Result<Stat, FsError> {
        Ok(Self::stat_buf())
    }
}

/// `/proc/modules` 的一个打开会话
pub struct ModProcFile {
    registry: Arc<ModuleRegistry>,
    flags: OpenFlags,
    state: SpinLock<ModProcState>,
    slot: OpenSlot,
}

impl File for ModProcFile {
    fn readable(&self) -> bool {
        true
    }

    fn writable(&self) -> bool {
        false
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize, FsError> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut state = self.state.lock();
        let ModProcState { pos, line } = &mut *state;
        let mut cursor = ReadCursor::new(buf, *pos);

        let result = self.registry.foreach::<_, FsError>(|module| {
            line.format_module(module).map_err(|_| {
                log::error!("modprocfs: line for '{}' overflows scratch", module.name);
                FsError::Overflow
            })?;
            cursor.push(line.as_bytes());
            Ok(if cursor.is_full() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            })
        });

        // 失败时不推进 pos，重试会从同一位置恢复
        result?;
        *pos += cursor.total;
        Ok(cursor.total)
    }

    fn write(&self, _buf: &[u8]) -> Result<usize, FsError> {
        Err(FsError::PermissionDenied)
    }

    fn duplicate(&self) -> Result<Arc<dyn File>, FsError> {
        let slot = self.slot.0.reserve()?;
        let state = self.state.lock().clone();
        log::debug!("modprocfs: dup at pos {}", state.pos);
        Ok(Arc::new(ModProcFile {
            registry: self.registry.clone(),
            flags: self.flags,
            state: SpinLock::new(state),
            slot,
        }))
    }

    fn stat(&self) -> Result<Stat, FsError> {
        Ok(ModProcfs::stat_buf())
    }

    fn offset(&self) -> usize {
        self.state.lock().pos
    }

    fn flags(&self) -> OpenFlags {
        self.flags
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for ModProcFile {
    fn drop(&mut self) {
        log::debug!("modprocfs: close at pos {}", self.state.get_mut().pos);
    }
}
