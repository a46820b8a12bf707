//! 定义存储

use di_abstractions::{Definition, DefinitionInfo, Lifetime};
use indexmap::IndexMap;
use infrastructure_common::{ContainerError, ContainerResult};

/// 单个标识符的注册信息
#[derive(Debug, Clone)]
struct Entry {
    definition: Definition,
    tags: Vec<String>,
    lifetime: Lifetime,
}

/// 标识符 → 定义的只追加存储
///
/// 条目与别名都按注册顺序保存。
#[derive(Debug, Default)]
pub(crate) struct DefinitionStore {
    entries: IndexMap<String, Entry>,
    aliases: IndexMap<String, String>,
}

/// 校验标识符非空
pub(crate) fn ensure_id(callee: &'static str, position: usize, id: &str) -> ContainerResult<()> {
    if id.is_empty() {
        return Err(ContainerError::invalid_argument(
            callee,
            position,
            "non-empty-string, empty string given",
        ));
    }
    Ok(())
}

/// 校验标签列表中的每个标签都非空
pub(crate) fn ensure_tags(callee: &'static str, position: usize, tags: &[&str]) -> ContainerResult<()> {
    if let Some(index) = tags.iter().position(|tag| tag.is_empty()) {
        return Err(ContainerError::invalid_argument(
            callee,
            position,
            format!("list of non-empty-string, empty string given at index {index}"),
        ));
    }
    Ok(())
}

impl DefinitionStore {
    /// 新增定义，全部校验在写入之前完成
    pub(crate) fn insert(
        &mut self,
        callee: &'static str,
        id: &str,
        definition: Definition,
        tags: &[&str],
        lifetime: Lifetime,
    ) -> ContainerResult<()> {
        ensure_id(callee, 1, id)?;
        ensure_tags(callee, 3, tags)?;

        if self.is_taken(id) {
            return Err(ContainerError::already_defined(id));
        }

        self.entries.insert(
            id.to_string(),
            Entry {
                definition,
                tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
                lifetime,
            },
        );
        Ok(())
    }

    /// 为标识符登记别名，目标可以尚未定义
    ///
    /// 保存原始目标，解析时沿别名链查找，目标之后变为别名也能正确解析。
    pub(crate) fn insert_alias(&mut self, id: &str, alias: &str) -> ContainerResult<()> {
        ensure_id("DiContainer::symlink", 1, id)?;
        ensure_id("DiContainer::symlink", 2, alias)?;

        if id == alias || self.canonical(id) == alias {
            return Err(ContainerError::symlink_equals_id());
        }
        if self.is_taken(alias) {
            return Err(ContainerError::already_defined(alias));
        }

        self.aliases.insert(alias.to_string(), id.to_string());
        Ok(())
    }

    /// 沿别名链还原为真实标识符，非别名原样返回
    pub(crate) fn canonical<'a>(&'a self, id: &'a str) -> &'a str {
        let mut current = id;
        // 链长不会超过别名总数
        for _ in 0..=self.aliases.len() {
            match self.aliases.get(current) {
                Some(target) => current = target.as_str(),
                None => return current,
            }
        }
        current
    }

    /// 真实标识符及所有最终指向它的别名，按登记顺序
    pub(crate) fn names_of(&self, canonical: &str) -> Vec<String> {
        std::iter::once(canonical.to_string())
            .chain(
                self.aliases
                    .keys()
                    .filter(|alias| self.canonical(alias) == canonical)
                    .cloned(),
            )
            .collect()
    }

    /// 标识符或别名是否已被占用
    fn is_taken(&self, id: &str) -> bool {
        self.entries.contains_key(id) || self.aliases.contains_key(id)
    }

    /// 是否存在可解析的定义（别名指向的目标必须已定义）
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(self.canonical(id))
    }

    /// 查找定义及其生命周期
    pub(crate) fn lookup(&self, id: &str) -> Option<(Definition, Lifetime)> {
        self.entries
            .get(id)
            .map(|entry| (entry.definition.clone(), entry.lifetime))
    }

    /// 按注册顺序返回带有标签的标识符
    pub(crate) fn tagged(&self, tag: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.tags.iter().any(|t| t == tag))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// 全部定义的只读描述
    pub(crate) fn describe(&self) -> Vec<DefinitionInfo> {
        self.entries
            .iter()
            .map(|(id, entry)| DefinitionInfo {
                id: id.clone(),
                kind: entry.definition.kind(),
                lifetime: entry.lifetime,
                tags: entry.tags.clone(),
                aliases: self.names_of(id).into_iter().skip(1).collect(),
            })
            .collect()
    }
}
