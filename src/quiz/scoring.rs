//! 评分
//!
//! 对每道题通过选项策略取一次选项列表，用保存的选项索引取出文本，
//! 与标准答案逐字比较。同一次评分里，分数和逐题结果使用同一份选项列表。

use crate::error::{QuizError, QuizResult};
use crate::models::{AnswerSelection, QuestionSet};
use crate::quiz::options::OptionPolicy;
use crate::store::TEST_QUESTIONS;
use serde::Serialize;
use tracing::debug;

/// 单道题的评分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    /// 题号（从 1 开始）
    pub number: usize,
    pub question: String,
    /// 用户所选选项的文本，未作答或索引无效时为 `None`
    pub chosen: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl QuestionOutcome {
    pub fn chosen_display(&self) -> &str {
        self.chosen.as_deref().unwrap_or("Not answered")
    }
}

/// 整份测验的评分报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub correct: usize,
    pub total: usize,
    /// 百分制得分，四舍五入
    pub percent: u32,
    pub outcomes: Vec<QuestionOutcome>,
}

impl ScoreReport {
    pub fn message(&self) -> &'static str {
        score_message(self.percent)
    }
}

/// 计算得分
///
/// # 参数
/// - `questions`: 题目集合
/// - `answers`: 保存的作答记录
/// - `policy`: 选项生成策略，决定评分时的选项是否与答题时一致
///
/// # 返回
/// 题目为空时返回 `MissingSessionData`
pub fn score(
    questions: &QuestionSet,
    answers: &AnswerSelection,
    policy: OptionPolicy,
) -> QuizResult<ScoreReport> {
    if questions.is_empty() {
        return Err(QuizError::missing(TEST_QUESTIONS));
    }

    let mut outcomes = Vec::with_capacity(questions.len());
    for (index, record) in questions.iter().enumerate() {
        let options = policy.options_for(questions, index)?;
        let chosen = answers
            .get(index)
            .and_then(|option| options.get(option))
            .cloned();
        let is_correct = chosen.as_deref() == Some(record.answer.as_str());

        debug!(
            "第 {} 题: 选择 {:?}, 正确答案 {:?}, {}",
            index + 1,
            chosen,
            record.answer,
            if is_correct { "✓" } else { "✗" }
        );

        outcomes.push(QuestionOutcome {
            number: index + 1,
            question: record.question.clone(),
            chosen,
            correct_answer: record.answer.clone(),
            is_correct,
        });
    }

    let correct = outcomes.iter().filter(|o| o.is_correct).count();
    let total = questions.len();

    Ok(ScoreReport {
        correct,
        total,
        percent: percent(correct, total),
        outcomes,
    })
}

/// `round(correct / total * 100)`，`total` 为 0 时返回 0
pub fn percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

/// 按得分区间给出评语
pub fn score_message(percent: u32) -> &'static str {
    match percent {
        80.. => "Excellent work!",
        60..=79 => "Good job!",
        40..=59 => "Keep practicing!",
        _ => "Try again!",
    }
}
