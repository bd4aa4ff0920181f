//! 文件类型与权限位

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// 文件权限和类型（与 POSIX `st_mode` 兼容）
    pub struct FileMode: u32 {
        /// 文件类型掩码
        const S_IFMT   = 0o170000;
        /// 普通文件
        const S_IFREG  = 0o100000;
        /// 目录
        const S_IFDIR  = 0o040000;

        /// 用户读
        const S_IRUSR  = 0o400;
        /// 用户写
        const S_IWUSR  = 0o200;
        /// 组读
        const S_IRGRP  = 0o040;
        /// 组写
        const S_IWGRP  = 0o020;
        /// 其他读
        const S_IROTH  = 0o004;
        /// 其他写
        const S_IWOTH  = 0o002;
    }
}

impl FileMode {
    /// 只读普通文件：`-r--r--r--`
    pub const fn regular_readonly() -> Self {
        Self::from_bits_truncate(
            Self::S_IFREG.bits() | Self::S_IRUSR.bits() | Self::S_IRGRP.bits() | Self::S_IROTH.bits(),
        )
    }

    /// 文件类型
    pub fn inode_type(&self) -> Option<InodeType> {
        match self.bits() & Self::S_IFMT.bits() {
            b if b == Self::S_IFREG.bits() => Some(InodeType::File),
            b if b == Self::S_IFDIR.bits() => Some(InodeType::Directory),
            _ => None,
        }
    }

    /// 检查是否有读权限（暂时只检查用户权限）
    pub fn can_read(&self) -> bool {
        self.contains(FileMode::S_IRUSR)
    }

    /// 是否有任何写权限位
    pub fn any_write(&self) -> bool {
        self.intersects(FileMode::S_IWUSR | FileMode::S_IWGRP | FileMode::S_IWOTH)
    }
}

/// 文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InodeType {
    /// 普通文件
    File,
    /// 目录
    Directory,
}
