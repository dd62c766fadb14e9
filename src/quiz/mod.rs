//! 测验核心
//!
//! - `options` - 为单道题生成选项（标准答案 + 干扰项）
//! - `session` - 答题状态机
//! - `scoring` - 评分与评语

pub mod options;
pub mod scoring;
pub mod session;

pub use options::{synthesize, OptionList, OptionPolicy};
pub use scoring::{score, QuestionOutcome, ScoreReport};
pub use session::{QuizState, TestSession};
