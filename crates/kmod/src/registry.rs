//! 已加载模块注册表
//!
//! 加载器在模块加载/卸载时调用 [`ModuleRegistry::insert`] / [`ModuleRegistry::remove`]；
//! 读者（例如 `/proc/modules`）通过 [`ModuleRegistry::foreach`] 遍历。
//! 三者都在同一把注册表锁下执行。遍历期间一直持锁，因此访问者只能做
//! 有界的本地工作（格式化一行、拷贝到内存），不能等待任何 I/O。

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::ops::ControlFlow;

use sync::SpinLock;

use crate::config::MODULENAME_MAX;
use crate::{ModuleEntry, ModuleError};

/// 模块注册表
///
/// 以模块名为键，遍历顺序为名字的字典序。
#[derive(Debug)]
pub struct ModuleRegistry {
    modules: SpinLock<BTreeMap<String, ModuleEntry>>,
}

impl ModuleRegistry {
    /// 创建空注册表
    pub const fn new() -> Self {
        Self {
            modules: SpinLock::new(BTreeMap::new()),
        }
    }

    /// 登记一个已加载模块
    pub fn insert(&self, entry: ModuleEntry) -> Result<(), ModuleError> {
        if entry.name.is_empty() || entry.name.len() > MODULENAME_MAX {
            return Err(ModuleError::InvalidName);
        }

        let mut modules = self.modules.lock();
        if modules.contains_key(&entry.name) {
            log::warn!("kmod: module '{}' already registered", entry.name);
            return Err(ModuleError::DuplicateName);
        }
        log::debug!(
            "kmod: register '{}' at {} (text {}, data {})",
            entry.name,
            entry.alloc,
            entry.textsize,
            entry.datasize
        );
        modules.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// 注销模块，返回被移除的条目
    pub fn remove(&self, name: &str) -> Result<ModuleEntry, ModuleError> {
        let removed = self.modules.lock().remove(name);
        match removed {
            Some(entry) => {
                log::debug!("kmod: unregister '{}'", name);
                Ok(entry)
            }
            None => Err(ModuleError::NotFound),
        }
    }

    /// 按名字查找，返回条目副本
    pub fn find(&self, name: &str) -> Option<ModuleEntry> {
        self.modules.lock().get(name).cloned()
    }

    /// 是否已登记
    pub fn contains(&self, name: &str) -> bool {
        self.modules.lock().contains_key(name)
    }

    /// 已登记模块数量
    pub fn len(&self) -> usize {
        self.modules.lock().len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.modules.lock().is_empty()
    }

    /// 依次对每个模块调用 `visitor`
    ///
    /// 访问者返回 `ControlFlow::Break(())` 时立即停止，不再访问剩余条目；
    /// 返回 `Err` 时原样向上传播。成功时返回已访问的条目数（包含触发
    /// 停止的那一个）。
    pub fn foreach<F, E>(&self, mut visitor: F) -> Result<usize, E>
    where
        F: FnMut(&ModuleEntry) -> Result<ControlFlow<()>, E>,
    {
        let modules = self.modules.lock();
        let mut visited = 0;
        for entry in modules.values() {
            visited += 1;
            if visitor(entry)?.is_break() {
                break;
            }
        }
        Ok(visited)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::ModAddr;
    use crate::tests::init_sync_arch_ops;

    fn entry(name: &str) -> ModuleEntry {
        ModuleEntry::new(name, ModAddr(0x1000), 0x100, 0x40)
    }

    #[test]
    fn test_insert_and_find() {
        init_sync_arch_ops();
        let reg = ModuleRegistry::new();
        assert!(reg.is_empty());
        reg.insert(entry("netdrv")).unwrap();
        assert_eq!(reg.len(), 1);
        assert!(reg.contains("netdrv"));
        assert_eq!(reg.find("netdrv").unwrap().textsize, 0x100);
        assert!(reg.find("missing").is_none());
    }

    #[test]
    fn test_insert_duplicate_name() {
        init_sync_arch_ops();
        let reg = ModuleRegistry::new();
        reg.insert(entry("netdrv")).unwrap();
        assert_eq!(reg.insert(entry("netdrv")), Err(ModuleError::DuplicateName));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_insert_rejects_bad_names() {
        init_sync_arch_ops();
        let reg = ModuleRegistry::new();
        assert_eq!(reg.insert(entry("")), Err(ModuleError::InvalidName));
        let long = "x".repeat(MODULENAME_MAX + 1);
        assert_eq!(reg.insert(entry(&long)), Err(ModuleError::InvalidName));
        let max = "y".repeat(MODULENAME_MAX);
        assert_eq!(reg.insert(entry(&max)), Ok(()));
    }

    #[test]
    fn test_remove() {
        init_sync_arch_ops();
        let reg = ModuleRegistry::new();
        reg.insert(entry("a")).unwrap();
        assert_eq!(reg.remove("a").unwrap().name, "a");
        assert_eq!(reg.remove("a"), Err(ModuleError::NotFound));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_foreach_visits_all_in_name_order() {
        init_sync_arch_ops();
        let reg = ModuleRegistry::new();
        for name in ["charlie", "alpha", "bravo"] {
            reg.insert(entry(name)).unwrap();
        }
        let mut names = Vec::new();
        let visited = reg
            .foreach::<_, ()>(|e| {
                names.push(e.name.clone());
                Ok(ControlFlow::Continue(()))
            })
            .unwrap();
        assert_eq!(visited, 3);
        assert_eq!(names, ["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_foreach_stops_early() {
        init_sync_arch_ops();
        let reg = ModuleRegistry::new();
        for name in ["a", "b", "c", "d"] {
            reg.insert(entry(name)).unwrap();
        }
        let visited = reg
            .foreach::<_, ()>(|e| {
                if e.name == "b" {
                    Ok(ControlFlow::Break(()))
                } else {
                    Ok(ControlFlow::Continue(()))
                }
            })
            .unwrap();
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_foreach_propagates_error() {
        init_sync_arch_ops();
        let reg = ModuleRegistry::new();
        reg.insert(entry("a")).unwrap();
        reg.insert(entry("b")).unwrap();
        let mut calls = 0;
        let result = reg.foreach(|_| {
            calls += 1;
            Err::<ControlFlow<()>, _>("boom")
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_foreach_empty() {
        init_sync_arch_ops();
        let reg = ModuleRegistry::new();
        assert_eq!(reg.foreach::<_, ()>(|_| Ok(ControlFlow::Continue(()))), Ok(0));
    }
}
