//! procfs 条目接口
//!
//! 伪文件系统的路径分发层按相对路径把请求路由到某个 [`ProcfsOperations`]，
//! 由条目自行创建会话对象并给出元数据。条目的内容在每次 `read` 时
//! 重新生成，读取位置只靠文件偏移恢复，因此生成端需要 [`procfs_memcpy`]
//! 跳过已经交付过的字节。

use alloc::sync::Arc;
use uapi::fcntl::OpenFlags;
use uapi::fs::Stat;

use crate::{File, FsError};

/// 单个 procfs 条目的操作表
pub trait ProcfsOperations: Send + Sync {
    /// 打开条目，返回新的会话对象
    fn open(&self, relpath: &str, flags: OpenFlags) -> Result<Arc<dyn File>, FsError>;

    /// 按路径获取元数据（不需要先打开）
    fn stat(&self, relpath: &str) -> Result<Stat, FsError>;
}

/// 把一段生成的内容拷贝到用户缓冲区，同时消耗跳过偏移
///
/// - 若 `*skip >= src.len()`：整段位于恢复点之前，`*skip` 减去 `src.len()`，不拷贝；
/// - 否则从 `src[*skip..]` 拷贝 `min(src.len() - *skip, dest.len())` 字节，并把 `*skip` 清零。
///
/// 返回实际拷贝的字节数。
pub fn procfs_memcpy(src: &[u8], dest: &mut [u8], skip: &mut usize) -> usize {
    if *skip >= src.len() {
        *skip -= src.len();
        return 0;
    }

    let tail = &src[*skip..];
    let copysize = tail.len().min(dest.len());
    dest[..copysize].copy_from_slice(&tail[..copysize]);
    *skip = 0;
    copysize
}
