//! Mock 实现模块
//!
//! 各 crate 在 `cfg(test)` 下为这些类型实现自己的 trait（例如 `sync::ArchOps`）。

pub mod arch;
