//! 定长行缓冲区

use core::fmt::{self, Write};

use crate::ModuleEntry;
use crate::config::{FIELD_DELIMITER, MOD_LINELEN};

/// 一次只容纳一行格式化文本的固定缓冲区，容量不会增长
///
/// 写入超出容量时 `fmt::Write` 返回错误，已写入部分保留但不应被使用。
#[derive(Clone)]
pub struct LineBuf {
    buf: [u8; MOD_LINELEN],
    len: usize,
}

impl LineBuf {
    /// 空缓冲区
    pub const fn new() -> Self {
        Self {
            buf: [0; MOD_LINELEN],
            len: 0,
        }
    }

    /// 清空内容
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// 当前内容
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// 当前长度
    pub fn len(&self) -> usize {
        self.len
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 把一个模块格式化成 `/proc/modules` 的一行
    ///
    /// 字段顺序：`name,initializer,uninitializer,arg,alloc,textsize,data_addr,datasize\n`。
    /// 地址为定宽十六进制，大小为十进制。名字中的分隔符不做转义。
    pub fn format_module(&mut self, entry: &ModuleEntry) -> fmt::Result {
        let d = FIELD_DELIMITER;
        self.clear();
        writeln!(
            self,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            entry.name,
            entry.initializer,
            entry.uninitializer,
            entry.arg,
            entry.alloc,
            entry.textsize,
            entry.data_addr(),
            entry.datasize,
        )
    }
}

impl Default for LineBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for LineBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len.checked_add(s.len()).ok_or(fmt::Error)?;
        if end > MOD_LINELEN {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

impl fmt::Debug for LineBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineBuf")
            .field("len", &self.len)
            .field("text", &core::str::from_utf8(self.as_bytes()))
            .finish()
    }
}
