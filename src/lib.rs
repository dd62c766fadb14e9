//! # pdf_quiz
//!
//! 把问答格式的文档（PDF / 纯文本）转换成终端里的选择题测验
//!
//! ## 架构设计
//!
//! ### ① 基础设施层
//! - `document/` - 文档 → 文本（`pdf-extract`）
//! - `store/` - 会话键值存储（内存 / 文件）
//!
//! ### ② 核心层
//! - `parser/` - 文本 → 题目（标签切分 + 状态机）
//! - `quiz/` - 选项生成、答题状态机、评分
//!
//! ### ③ 业务能力层（Services）
//! - `SessionService` - 带类型的会话读写与页面进入检查
//! - `UploadService` - 读取文档 → 抽取 → 保存
//!
//! ### ④ 流程层（Workflow）
//! - `TestFlow` - 终端答题循环
//! - `results_view` - 结果页面
//!
//! ### ⑤ 应用层
//! - `App` - 子命令分发（upload / test / results / retry / status）

pub mod app;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod parser;
pub mod quiz;
pub mod services;
pub mod store;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{QuizError, QuizResult};
pub use models::{AnswerSelection, QuestionRecord, QuestionSet, SessionMeta};
pub use parser::extract;
pub use quiz::{score, synthesize, OptionPolicy, QuizState, ScoreReport, TestSession};
pub use services::{SessionService, UploadService};
pub use store::{FileStore, MemoryStore, SessionStore};
