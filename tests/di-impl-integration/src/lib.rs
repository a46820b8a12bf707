//! 依赖注入引擎的集中测试工程，测试位于 `tests/` 目录。
