//! # 可加载模块子系统 (kmod)
//!
//! 维护已加载内核模块的注册表，并通过 `/proc/modules` 以只读文本导出。
//!
//! - [`ModuleRegistry`] - 已加载模块集合，支持插入、删除和可提前终止的遍历
//! - [`ModProcfs`] / [`ModProcFile`] - 把注册表适配成 procfs 文件
//!
//! 模块的重定位、符号解析和段内存分配由加载器负责，不在本 crate 内。
//! 注册表是显式构造的长生命周期对象，由加载器和 procfs 条目共享同一个 `Arc`。
//!
//! ## `/proc/modules` 行格式
//!
//! ```text
//! name,initializer,uninitializer,arg,alloc,textsize,data_addr,datasize
//! ```
//!
//! 地址为定宽十六进制，大小为十进制，每个模块一行。

#![no_std]

extern crate alloc;

pub mod config;

mod entry;
mod error;
mod line;
mod procfs;
mod registry;

pub use entry::{ModAddr, ModuleEntry};
pub use error::ModuleError;
pub use line::LineBuf;
pub use procfs::{ModProcFile, ModProcfs};
pub use registry::ModuleRegistry;
