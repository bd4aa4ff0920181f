//! 测试支持 crate
//!
//! 提供 host 端单元测试使用的 Mock 实现

#![no_std]

pub mod mock;
