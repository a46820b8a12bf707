//! 扩展器链

use di_abstractions::{DiContainer, Extender, Value};
use indexmap::IndexMap;
use infrastructure_common::ContainerResult;
use parking_lot::RwLock;

/// 按键保存的扩展器列表，键按首次注册顺序排列
#[derive(Default)]
pub(crate) struct ExtenderChain {
    entries: RwLock<IndexMap<String, Vec<Extender>>>,
}

impl ExtenderChain {
    pub(crate) fn push(&self, key: &str, extender: Extender) {
        self.entries
            .write()
            .entry(key.to_string())
            .or_default()
            .push(extender);
    }

    /// 收集匹配的扩展器
    ///
    /// 键等于 `ids` 中任一标识符，或 `matches_type` 认为值属于该键描述的类型时匹配。
    /// 返回快照，调用方在不持锁的情况下执行。
    pub(crate) fn matching<F>(&self, ids: &[&str], matches_type: F) -> Vec<Extender>
    where
        F: Fn(&str) -> bool,
    {
        self.entries
            .read()
            .iter()
            .filter(|(key, _)| ids.contains(&key.as_str()) || matches_type(key))
            .flat_map(|(_, extenders)| extenders.iter().cloned())
            .collect()
    }

    /// 依次执行扩展器，前一个的输出作为后一个的输入
    pub(crate) fn apply(
        extenders: &[Extender],
        mut value: Value,
        container: &dyn DiContainer,
    ) -> ContainerResult<Value> {
        for extender in extenders {
            value = extender(value, container)?;
        }
        Ok(value)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().values().map(Vec::len).sum()
    }
}
