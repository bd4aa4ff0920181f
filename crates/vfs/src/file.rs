//! 文件抽象层 - VFS 会话层接口
//!
//! 所有打开的文件以 `Arc<dyn File>` 形式存储在进程的文件描述符表中。
//! `File` 是“有状态”的会话对象：它维护当前 offset 等打开状态。
//! 复制描述符时通过 [`File::duplicate`] 产生独立的会话副本，
//! 而不是共享同一个对象。

use alloc::sync::Arc;
use uapi::fcntl::{OpenFlags, SeekWhence};
use uapi::fs::Stat;

use crate::FsError;

/// 文件操作的统一接口
pub trait File: Send + Sync {
    /// 检查文件是否可读
    fn readable(&self) -> bool;

    /// 检查文件是否可写
    fn writable(&self) -> bool;

    /// 从当前偏移读取数据，并推进偏移
    ///
    /// 返回 0 表示已到达流末尾。
    fn read(&self, buf: &mut [u8]) -> Result<usize, FsError>;

    /// 向文件写入数据
    fn write(&self, buf: &[u8]) -> Result<usize, FsError>;

    /// 复制会话状态，得到一个独立的新文件对象（dup / fork）
    ///
    /// 新对象从复制时刻的偏移继续，此后双方互不影响。
    fn duplicate(&self) -> Result<Arc<dyn File>, FsError>;

    /// 获取文件元数据（fstat）
    fn stat(&self) -> Result<Stat, FsError>;

    /// 设置文件偏移量（可选方法）
    fn lseek(&self, _offset: isize, _whence: SeekWhence) -> Result<usize, FsError> {
        Err(FsError::IllegalSeek)
    }

    /// 获取当前偏移量（可选方法）
    fn offset(&self) -> usize {
        0
    }

    /// 获取打开标志（可选方法）
    fn flags(&self) -> OpenFlags {
        OpenFlags::empty()
    }

    /// 获取 Any trait 引用，用于安全的类型转换
    fn as_any(&self) -> &dyn core::any::Any;
}
