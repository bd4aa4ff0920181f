//! 模块子系统配置常量

/// 模块名最大长度（字节，不含结尾）
pub const MODULENAME_MAX: usize = 32;

/// `/proc/modules` 单行格式化缓冲区大小
///
/// 需要容纳最长的一行：名字 + 5 个定宽十六进制地址 + 2 个十进制长度 + 分隔符。
/// 64 位下为 32 + 5 * 18 + 2 * 20 + 7 + 1 = 170。
pub const MOD_LINELEN: usize = 192;

/// `/proc/modules` 同时打开的描述符上限（含 dup 出来的副本）
pub const DEFAULT_MAX_OPEN: usize = 64;

/// 单行字段分隔符
pub const FIELD_DELIMITER: char = ',';
