//! 文件描述符表
//!
//! 进程级的文件描述符管理，提供 POSIX 兼容的描述符操作。
//!
//! 约定与语义：
//!
//! - `alloc()` 分配“最小可用 fd”
//! - `dup/dup2` 通过 [`File::duplicate`] 复制会话状态，新 fd 拥有独立的 offset
//! - `clone_table()`（fork）对每个已打开文件做同样的复制
//! - 对已关闭的 fd 再次 `close()` 返回 [`FsError::BadFileDescriptor`]

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use sync::SpinLock;

use crate::{File, FsError};

/// 默认最大文件描述符数
pub const DEFAULT_MAX_FDS: usize = 256;

/// 文件描述符表
pub struct FDTable {
    files: SpinLock<Vec<Option<Arc<dyn File>>>>,
    max_fds: usize,
}

impl fmt::Debug for FDTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = self.files.lock();
        let used = files.iter().filter(|slot| slot.is_some()).count();
        f.debug_struct("FDTable")
            .field("max_fds", &self.max_fds)
            .field("slots", &files.len())
            .field("used", &used)
            .finish()
    }
}

impl FDTable {
    /// 创建新的文件描述符表
    pub fn new() -> Self {
        Self::with_max_fds(DEFAULT_MAX_FDS)
    }

    /// 创建指定容量上限的文件描述符表
    pub fn with_max_fds(max_fds: usize) -> Self {
        Self {
            files: SpinLock::new(Vec::new()),
            max_fds,
        }
    }

    /// 分配一个新的文件描述符
    pub fn alloc(&self, file: Arc<dyn File>) -> Result<usize, FsError> {
        let mut files = self.files.lock();

        // 查找最小可用 FD
        if let Some((fd, slot)) = files.iter_mut().enumerate().find(|(_, s)| s.is_none()) {
            *slot = Some(file);
            return Ok(fd);
        }

        let fd = files.len();
        if fd >= self.max_fds {
            return Err(FsError::TooManyOpenFiles);
        }

        files.push(Some(file));
        Ok(fd)
    }

    /// 在指定的 FD 位置安装文件，替换原有文件
    pub fn install_at(&self, fd: usize, file: Arc<dyn File>) -> Result<(), FsError> {
        if fd >= self.max_fds {
            return Err(FsError::BadFileDescriptor);
        }

        let mut files = self.files.lock();
        if files.len() <= fd {
            files.resize_with(fd + 1, || None);
        }
        files[fd] = Some(file);
        Ok(())
    }

    /// 获取文件对象
    pub fn get(&self, fd: usize) -> Result<Arc<dyn File>, FsError> {
        let files = self.files.lock();
        files
            .get(fd)
            .and_then(|f| f.clone())
            .ok_or(FsError::BadFileDescriptor)
    }

    /// 关闭文件描述符
    ///
    /// 会话状态在最后一个引用释放时销毁。
    pub fn close(&self, fd: usize) -> Result<(), FsError> {
        let file = {
            let mut files = self.files.lock();
            files
                .get_mut(fd)
                .and_then(Option::take)
                .ok_or(FsError::BadFileDescriptor)?
        };
        // 在表锁之外释放，文件的 Drop 可能需要获取其它锁
        drop(file);
        Ok(())
    }

    /// 复制文件描述符到最小可用位置
    pub fn dup(&self, old_fd: usize) -> Result<usize, FsError> {
        let copy = self.get(old_fd)?.duplicate()?;
        let new_fd = self.alloc(copy)?;
        log::debug!("fd_table: dup {} -> {}", old_fd, new_fd);
        Ok(new_fd)
    }

    /// 复制文件描述符到指定位置
    pub fn dup2(&self, old_fd: usize, new_fd: usize) -> Result<usize, FsError> {
        let file = self.get(old_fd)?;
        if old_fd == new_fd {
            return Ok(new_fd);
        }
        let copy = file.duplicate()?;
        let _ = self.close(new_fd);
        self.install_at(new_fd, copy)?;
        Ok(new_fd)
    }

    /// 克隆整个文件描述符表（用于 fork）
    ///
    /// 任一文件复制失败时返回错误，已复制的部分随之释放。
    pub fn clone_table(&self) -> Result<Self, FsError> {
        let snapshot: Vec<Option<Arc<dyn File>>> = self.files.lock().clone();
        let mut files = Vec::with_capacity(snapshot.len());
        for slot in snapshot {
            files.push(match slot {
                Some(file) => Some(file.duplicate()?),
                None => None,
            });
        }
        Ok(Self {
            files: SpinLock::new(files),
            max_fds: self.max_fds,
        })
    }

    /// 已打开的描述符数量
    pub fn open_count(&self) -> usize {
        self.files.lock().iter().filter(|s| s.is_some()).count()
    }
}

impl Default for FDTable {
    fn default() -> Self {
        Self::new()
    }
}
