//! 自动装配派生宏的集中测试工程，测试位于 `tests/` 目录。
