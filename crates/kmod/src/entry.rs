//! 已加载模块的描述信息

use alloc::string::String;
use core::fmt;

/// 模块内的不透明地址（入口函数、参数、段基址）
///
/// 只用于展示，从不解引用或调用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ModAddr(pub usize);

impl ModAddr {
    /// 空地址
    pub const NULL: Self = Self(0);

    /// 定宽十六进制表示的总宽度（含 `0x` 前缀）
    pub const DISPLAY_WIDTH: usize = 2 + 2 * core::mem::size_of::<usize>();

    /// 偏移后的地址（回绕）
    pub const fn offset(self, bytes: usize) -> Self {
        Self(self.0.wrapping_add(bytes))
    }

    /// 是否为空地址
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl From<usize> for ModAddr {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for ModAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#0width$x}", self.0, width = Self::DISPLAY_WIDTH)
    }
}

/// 注册表中的一个已加载模块
///
/// 插入后不可修改，卸载时整体移除。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    /// 模块名（注册表内唯一）
    pub name: String,
    /// 初始化入口
    pub initializer: ModAddr,
    /// 卸载入口
    pub uninitializer: ModAddr,
    /// 传给入口函数的上下文
    pub arg: ModAddr,
    /// 代码段基址（整个模块分配的起点）
    pub alloc: ModAddr,
    /// 代码段大小（字节）
    pub textsize: usize,
    /// 数据段大小（字节）
    pub datasize: usize,
}

impl ModuleEntry {
    /// 只带名字和布局的条目，入口与参数为空
    pub fn new(name: impl Into<String>, alloc: ModAddr, textsize: usize, datasize: usize) -> Self {
        Self {
            name: name.into(),
            initializer: ModAddr::NULL,
            uninitializer: ModAddr::NULL,
            arg: ModAddr::NULL,
            alloc,
            textsize,
            datasize,
        }
    }

    /// 设置生命周期入口
    pub fn with_entry_points(mut self, initializer: ModAddr, uninitializer: ModAddr) -> Self {
        self.initializer = initializer;
        self.uninitializer = uninitializer;
        self
    }

    /// 设置入口参数
    pub fn with_arg(mut self, arg: ModAddr) -> Self {
        self.arg = arg;
        self
    }

    /// 数据段起始地址，紧跟在代码段之后
    pub fn data_addr(&self) -> ModAddr {
        self.alloc.offset(self.textsize)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn test_data_addr_follows_text() {
        let entry = ModuleEntry::new("netdrv", ModAddr(0x8000_0000), 0x1000, 0x200);
        assert_eq!(entry.data_addr(), ModAddr(0x8000_1000));
    }

    #[test]
    fn test_data_addr_wraps() {
        let entry = ModuleEntry::new("edge", ModAddr(usize::MAX), 2, 0);
        assert_eq!(entry.data_addr(), ModAddr(1));
    }

    #[test]
    fn test_addr_fixed_width() {
        let s = format!("{}", ModAddr(0xabc));
        assert_eq!(s.len(), ModAddr::DISPLAY_WIDTH);
        assert!(s.starts_with("0x"));
        assert!(s.ends_with("abc"));
        assert_eq!(format!("{}", ModAddr::NULL).len(), ModAddr::DISPLAY_WIDTH);
    }
}
