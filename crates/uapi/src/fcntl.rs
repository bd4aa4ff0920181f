//! 文件打开标志与 lseek 定位方式
//!
//! 数值与 Linux generic ABI 一致。

bitflags::bitflags! {
    /// `open(2)` 的标志位
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        /// 只读（值为 0，需要通过 [`OpenFlags::accmode`] 判断）
        const O_RDONLY    = 0o0;
        /// 只写
        const O_WRONLY    = 0o1;
        /// 读写
        const O_RDWR      = 0o2;
        /// 访问模式掩码
        const O_ACCMODE   = 0o3;
        const O_CREAT     = 0o100;
        const O_EXCL      = 0o200;
        const O_NOCTTY    = 0o400;
        const O_TRUNC     = 0o1000;
        const O_APPEND    = 0o2000;
        const O_NONBLOCK  = 0o4000;
        const O_DIRECTORY = 0o200000;
        const O_CLOEXEC   = 0o2000000;
    }
}

impl OpenFlags {
    /// 取出访问模式部分（`O_RDONLY` / `O_WRONLY` / `O_RDWR`）
    pub fn accmode(&self) -> u32 {
        self.bits() & Self::O_ACCMODE.bits()
    }

    /// 是否请求读权限
    pub fn readable(&self) -> bool {
        matches!(self.accmode(), 0o0 | 0o2)
    }

    /// 是否请求任何形式的写访问
    ///
    /// 除访问模式外，`O_CREAT`/`O_TRUNC`/`O_APPEND` 也隐含写意图。
    pub fn writable(&self) -> bool {
        self.accmode() != Self::O_RDONLY.bits()
            || self.intersects(Self::O_CREAT | Self::O_TRUNC | Self::O_APPEND)
    }
}

/// lseek 定位方式
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekWhence {
    Set = 0,
    Cur = 1,
    End = 2,
}

impl TryFrom<usize> for SeekWhence {
    type Error = ();

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SeekWhence::Set),
            1 => Ok(SeekWhence::Cur),
            2 => Ok(SeekWhence::End),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdonly_is_not_writable() {
        let flags = OpenFlags::O_RDONLY;
        assert!(flags.readable());
        assert!(!flags.writable());
    }

    #[test]
    fn test_write_intent_flags() {
        assert!(OpenFlags::O_WRONLY.writable());
        assert!(!OpenFlags::O_WRONLY.readable());
        assert!(OpenFlags::O_RDWR.writable());
        assert!(OpenFlags::O_RDWR.readable());
        assert!((OpenFlags::O_RDONLY | OpenFlags::O_TRUNC).writable());
        assert!((OpenFlags::O_RDONLY | OpenFlags::O_APPEND).writable());
        assert!((OpenFlags::O_RDONLY | OpenFlags::O_CREAT).writable());
    }

    #[test]
    fn test_non_write_flags_keep_rdonly() {
        let flags = OpenFlags::O_RDONLY | OpenFlags::O_CLOEXEC | OpenFlags::O_NONBLOCK;
        assert!(!flags.writable());
    }

    #[test]
    fn test_seek_whence_from_usize() {
        assert_eq!(SeekWhence::try_from(0), Ok(SeekWhence::Set));
        assert_eq!(SeekWhence::try_from(2), Ok(SeekWhence::End));
        assert!(SeekWhence::try_from(3).is_err());
    }
}
