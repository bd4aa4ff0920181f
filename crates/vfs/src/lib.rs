//! 内核虚拟文件系统层（精简）
//!
//! 此 crate 提供 procfs 条目所需的 VFS 抽象：
//!
//! - [`File`] trait - 有状态的文件会话接口
//! - [`ProcfsOperations`] trait - procfs 条目操作表
//! - [`procfs_memcpy`] - 带跳过偏移的内容拷贝原语
//! - [`FDTable`] - 文件描述符表
//! - [`FsError`] - POSIX 兼容错误码

#![no_std]

extern crate alloc;

pub mod error;

mod fd_table;
mod file;
mod mode;
mod procfs;

pub use error::FsError;
pub use fd_table::{DEFAULT_MAX_FDS, FDTable};
pub use file::File;
pub use mode::{FileMode, InodeType};
pub use procfs::{ProcfsOperations, procfs_memcpy};

// Re-export uapi types for convenience
pub use uapi::fcntl::{OpenFlags, SeekWhence};
pub use uapi::fs::Stat;
