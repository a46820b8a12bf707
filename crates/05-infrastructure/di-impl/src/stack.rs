//! 解析栈
//!
//! 值解析与自动装配规划共用同一个栈做循环检测。入栈返回守卫，
//! 守卫在任何退出路径（包括错误和 panic）上出栈。

use infrastructure_common::{ContainerError, ContainerResult};
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub(crate) struct ResolutionStack {
    frames: Mutex<Vec<String>>,
}

/// 栈帧守卫，析构时出栈
#[must_use = "栈帧在守卫析构时出栈"]
#[derive(Debug)]
pub(crate) struct StackFrame<'a> {
    stack: &'a ResolutionStack,
}

impl ResolutionStack {
    /// 循环与深度检查后入栈
    ///
    /// `limit` 为 0 时不限制深度。
    pub(crate) fn enter(&self, id: &str, limit: usize) -> ContainerResult<StackFrame<'_>> {
        let mut frames = self.frames.lock();
        if frames.iter().any(|frame| frame == id) {
            return Err(ContainerError::circular_dependency(frames.as_slice(), id));
        }
        if limit > 0 && frames.len() >= limit {
            return Err(ContainerError::DepthExceeded {
                id: id.to_string(),
                limit,
            });
        }
        frames.push(id.to_string());
        Ok(StackFrame { stack: self })
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.lock().len()
    }

    /// 当前路径，用于日志
    pub(crate) fn path(&self) -> String {
        self.frames.lock().join(" -> ")
    }
}

impl Drop for StackFrame<'_> {
    fn drop(&mut self) {
        self.stack.frames.lock().pop();
    }
}
