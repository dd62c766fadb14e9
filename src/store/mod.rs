//! 会话存储
//!
//! 以字符串为键的键值存储。
//! 核心逻辑只依赖 [`SessionStore`]，测试用内存实现，命令行用文件实现。

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::QuizResult;

/// 题目集合（JSON 数组）
pub const TEST_QUESTIONS: &str = "testQuestions";
/// 作答记录（JSON 数组，元素为选项索引或 null）
pub const USER_ANSWERS: &str = "userAnswers";
/// 上传元数据
pub const SESSION_META: &str = "sessionMeta";

/// 会话级键值存储
///
/// 读写对调用方来说是同步且原子的。
pub trait SessionStore {
    fn get(&self, key: &str) -> QuizResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> QuizResult<()>;
    fn remove(&mut self, key: &str) -> QuizResult<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn get(&self, key: &str) -> QuizResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> QuizResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> QuizResult<()> {
        (**self).remove(key)
    }
}
