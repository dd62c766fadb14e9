//! 答题会话状态机
//!
//! ```text
//! NoQuestions ──upload──▶ AwaitingAnswer(0) ⇄ AwaitingAnswer(i) ⇄ AwaitingAnswer(last) ──submit──▶ Scored
//!                               ▲                                                              │
//!                               └──────────────────────────── retry ───────────────────────────┘
//! ```
//!
//! 每个转移都返回新的 [`TestSession`]，不修改调用方持有的旧值。

use crate::error::{QuizError, QuizResult};
use crate::models::{AnswerSelection, QuestionRecord, QuestionSet};
use crate::quiz::options::{OptionList, OptionPolicy, MAX_DISTRACTORS};
use crate::quiz::scoring::ScoreReport;
use crate::store::TEST_QUESTIONS;

/// 会话所处的页面状态
#[derive(Debug, Clone)]
pub enum QuizState {
    /// 还没有上传题目
    NoQuestions,
    /// 正在答第 `current` 题
    AwaitingAnswer(TestSession),
    /// 已提交并评分
    Scored(ScoreReport),
}

/// 答题中的会话
#[derive(Debug, Clone, PartialEq)]
pub struct TestSession {
    questions: QuestionSet,
    answers: AnswerSelection,
    current: usize,
    policy: OptionPolicy,
}

impl TestSession {
    /// 进入答题页面
    ///
    /// # 参数
    /// - `questions`: 已上传的题目
    /// - `answers`: 之前保存的作答（继续答题时），没有则全部未作答
    /// - `policy`: 选项生成策略
    ///
    /// # 返回
    /// 题目为空时返回 `MissingSessionData`
    pub fn start(
        questions: QuestionSet,
        answers: Option<AnswerSelection>,
        policy: OptionPolicy,
    ) -> QuizResult<Self> {
        if questions.is_empty() {
            return Err(QuizError::missing(TEST_QUESTIONS));
        }
        let answers = answers
            .map(|a| a.fit_to(questions.len()))
            .unwrap_or_else(|| AnswerSelection::unanswered(questions.len()));

        Ok(Self {
            questions,
            answers,
            current: 0,
            policy,
        })
    }

    /// 重新答题：保留题目，清空作答，回到第一题
    pub fn retry(questions: QuestionSet, policy: OptionPolicy) -> QuizResult<Self> {
        Self::start(questions, None, policy)
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSelection {
        &self.answers
    }

    pub fn policy(&self) -> OptionPolicy {
        self.policy
    }

    /// 当前题目索引（0-based）
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_record(&self) -> &QuestionRecord {
        &self.questions[self.current]
    }

    /// 当前题目的选项，每次调用都经过选项策略重新生成
    pub fn current_options(&self) -> QuizResult<OptionList> {
        self.policy.options_for(&self.questions, self.current)
    }

    /// 当前题目已选的选项
    pub fn selected(&self) -> Option<usize> {
        self.answers.get(self.current)
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        Some(self.current) == self.questions.last_index()
    }

    pub fn is_all_answered(&self) -> bool {
        self.answers.is_complete()
    }

    /// 进度条百分比，按"已到达第几题"计算
    pub fn progress_percent(&self) -> u32 {
        (((self.current + 1) as f64 / self.questions.len() as f64) * 100.0).round() as u32
    }

    /// 每道题的选项数量，只取决于题目总数
    pub fn option_count(&self) -> usize {
        self.questions.len().min(MAX_DISTRACTORS + 1)
    }

    /// 选择当前题目的某个选项
    pub fn select(&self, option: usize) -> QuizResult<Self> {
        let len = self.option_count();
        if option >= len {
            return Err(QuizError::IndexOutOfRange { index: option, len });
        }
        let mut next = self.clone();
        next.answers.set(self.current, option);
        Ok(next)
    }

    /// 上一题，已在第一题时保持不变
    pub fn previous(&self) -> Self {
        let mut next = self.clone();
        next.current = self.current.saturating_sub(1);
        next
    }

    /// 下一题
    ///
    /// 当前题目未作答时返回 `IncompleteAnswer`，已在最后一题时保持不变
    pub fn next(&self) -> QuizResult<Self> {
        if self.selected().is_none() {
            return Err(QuizError::IncompleteAnswer {
                index: self.current,
            });
        }
        let mut next = self.clone();
        if !self.is_last() {
            next.current += 1;
        }
        Ok(next)
    }

    /// 提交作答，只能在最后一题提交
    ///
    /// # 返回
    /// 需要持久化的作答记录
    pub fn submit(&self) -> QuizResult<AnswerSelection> {
        if !self.is_last() {
            return Err(QuizError::SubmitBeforeEnd {
                index: self.current,
            });
        }
        Ok(self.answers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session(n: usize) -> TestSession {
        let set: QuestionSet = (0..n)
            .map(|i| QuestionRecord::new(&format!("q{}", i), &format!("a{}", i)).unwrap())
            .collect();
        TestSession::start(set, None, OptionPolicy::Stable { seed: 11 }).unwrap()
    }

    #[test]
    fn test_start_requires_questions() {
        let err = TestSession::start(QuestionSet::default(), None, OptionPolicy::Reshuffle)
            .unwrap_err();
        assert!(matches!(err, QuizError::MissingSessionData { .. }));
    }

    #[test]
    fn test_start_is_all_unanswered() {
        let session = make_session(3);
        assert_eq!(session.current(), 0);
        assert_eq!(session.answers(), &AnswerSelection::unanswered(3));
        assert!(!session.is_all_answered());
    }

    #[test]
    fn test_previous_blocked_at_first() {
        let session = make_session(3);
        assert_eq!(session.previous(), session);
    }

    #[test]
    fn test_next_requires_selection() {
        let session = make_session(3);
        let err = session.next().unwrap_err();
        assert!(matches!(err, QuizError::IncompleteAnswer { index: 0 }));
        assert_eq!(session.current(), 0);

        let moved = session.select(1).unwrap().next().unwrap();
        assert_eq!(moved.current(), 1);
        assert_eq!(moved.previous().current(), 0);
    }

    #[test]
    fn test_next_blocked_at_last() {
        let session = make_session(2);
        let last = session.select(0).unwrap().next().unwrap();
        assert!(last.is_last());
        let still_last = last.select(1).unwrap().next().unwrap();
        assert_eq!(still_last.current(), 1);
    }

    #[test]
    fn test_select_checks_option_range() {
        let session = make_session(2);
        assert_eq!(session.option_count(), 2);
        assert!(matches!(
            session.select(2).unwrap_err(),
            QuizError::IndexOutOfRange { index: 2, len: 2 }
        ));

        let big = make_session(9);
        assert_eq!(big.option_count(), 4);
        assert!(big.select(3).is_ok());
    }

    #[test]
    fn test_submit_only_from_last() {
        let session = make_session(2).select(0).unwrap();
        assert!(matches!(
            session.submit().unwrap_err(),
            QuizError::SubmitBeforeEnd { index: 0 }
        ));

        let answers = session.next().unwrap().select(1).unwrap().submit().unwrap();
        assert_eq!(answers.get(0), Some(0));
        assert_eq!(answers.get(1), Some(1));
        assert!(answers.is_complete());
    }

    #[test]
    fn test_resume_with_saved_answers() {
        let set = make_session(3).questions().clone();
        let saved: AnswerSelection = serde_json::from_str("[2, 0]").unwrap();
        let session = TestSession::start(set, Some(saved), OptionPolicy::Reshuffle).unwrap();
        assert_eq!(session.answers().len(), 3);
        assert_eq!(session.selected(), Some(2));
        assert!(session.next().is_ok());
    }

    #[test]
    fn test_retry_resets_answers_only() {
        let session = make_session(2).select(1).unwrap();
        let retried = TestSession::retry(session.questions().clone(), session.policy()).unwrap();
        assert_eq!(retried.questions(), session.questions());
        assert_eq!(retried.answers(), &AnswerSelection::unanswered(2));
        assert_eq!(retried.current(), 0);
    }

    #[test]
    fn test_progress_percent() {
        let session = make_session(3);
        assert_eq!(session.progress_percent(), 33);
        let last = session.select(0).unwrap().next().unwrap().select(0).unwrap().next().unwrap();
        assert_eq!(last.progress_percent(), 100);
    }
}
