//! 文本 → 题目
//!
//! - `labels` - 把文本切成标签 / 文本 / 换行记号
//! - `extractor` - 在记号上运行状态机，产出 `QuestionSet`

pub mod extractor;
pub mod labels;

pub use extractor::extract;
