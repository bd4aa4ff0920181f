//! 模块注册表错误类型

use uapi::errno;

/// 注册表插入/删除时的策略错误，只返回给加载器，不会出现在读者一侧
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleError {
    /// 同名模块已注册 (-EEXIST)
    DuplicateName,
    /// 模块未注册 (-ENOENT)
    NotFound,
    /// 模块名为空或超过 [`crate::config::MODULENAME_MAX`] (-EINVAL)
    InvalidName,
}

impl ModuleError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        let errno = match self {
            ModuleError::DuplicateName => errno::EEXIST,
            ModuleError::NotFound => errno::ENOENT,
            ModuleError::InvalidName => errno::EINVAL,
        };
        -(errno as isize)
    }
}

impl core::fmt::Display for ModuleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ModuleError::DuplicateName => f.write_str("module already loaded"),
            ModuleError::NotFound => f.write_str("module not loaded"),
            ModuleError::InvalidName => f.write_str("invalid module name"),
        }
    }
}
