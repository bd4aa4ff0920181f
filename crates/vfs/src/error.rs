//! VFS 错误类型
//!
//! 定义了与 POSIX 兼容的文件系统错误码，可通过 [`FsError::to_errno()`] 转换为系统调用错误码。

use uapi::errno;

/// VFS 错误类型
///
/// 各错误码对应标准 POSIX errno 值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    /// 文件不存在 (-ENOENT)
    NotFound,
    /// 是目录 (-EISDIR)
    IsDirectory,

    /// 权限被拒绝 (-EACCES)
    ///
    /// 只读伪文件以写方式打开时返回。
    PermissionDenied,

    /// 无效的文件描述符 (-EBADF)
    BadFileDescriptor,
    /// 打开的文件过多 (-EMFILE)
    TooManyOpenFiles,
    /// 内存不足 (-ENOMEM)
    OutOfMemory,

    /// 无效参数 (-EINVAL)
    InvalidArgument,
    /// 数值溢出 (-EOVERFLOW)
    ///
    /// 格式化结果超过固定行缓冲区容量时返回。
    Overflow,
    /// 不可定位 (-ESPIPE)
    IllegalSeek,

    /// I/O 错误 (-EIO)
    IoError,
    /// 操作不支持 (-ENOTSUP)
    NotSupported,
}

impl FsError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        let errno = match self {
            FsError::NotFound => errno::ENOENT,
            FsError::IsDirectory => errno::EISDIR,
            FsError::PermissionDenied => errno::EACCES,
            FsError::BadFileDescriptor => errno::EBADF,
            FsError::TooManyOpenFiles => errno::EMFILE,
            FsError::OutOfMemory => errno::ENOMEM,
            FsError::InvalidArgument => errno::EINVAL,
            FsError::Overflow => errno::EOVERFLOW,
            FsError::IllegalSeek => errno::ESPIPE,
            FsError::IoError => errno::EIO,
            FsError::NotSupported => errno::ENOTSUP,
        };
        -(errno as isize)
    }
}

impl core::fmt::Display for FsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            FsError::NotFound => "no such file or directory",
            FsError::IsDirectory => "is a directory",
            FsError::PermissionDenied => "permission denied",
            FsError::BadFileDescriptor => "bad file descriptor",
            FsError::TooManyOpenFiles => "too many open files",
            FsError::OutOfMemory => "out of memory",
            FsError::InvalidArgument => "invalid argument",
            FsError::Overflow => "value too large for defined data type",
            FsError::IllegalSeek => "illegal seek",
            FsError::IoError => "input/output error",
            FsError::NotSupported => "operation not supported",
        };
        f.write_str(msg)
    }
}

impl From<core::fmt::Error> for FsError {
    fn from(_: core::fmt::Error) -> Self {
        FsError::Overflow
    }
}

#[cfg(test)]
mod tests {
    use super::FsError;

    #[test]
    fn test_errno_values() {
        assert_eq!(FsError::NotFound.to_errno(), -2);
        assert_eq!(FsError::BadFileDescriptor.to_errno(), -9);
        assert_eq!(FsError::OutOfMemory.to_errno(), -12);
        assert_eq!(FsError::PermissionDenied.to_errno(), -13);
        assert_eq!(FsError::Overflow.to_errno(), -75);
    }

    #[test]
    fn test_fmt_error_maps_to_overflow() {
        assert_eq!(FsError::from(core::fmt::Error), FsError::Overflow);
    }
}
