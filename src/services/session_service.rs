//! 会话服务 - 业务能力层
//!
//! 在 [`SessionStore`] 之上提供带类型的读写，以及三个页面的进入检查。

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{QuizError, QuizResult};
use crate::models::{AnswerSelection, QuestionSet, SessionMeta};
use crate::quiz::{score, OptionPolicy, QuizState, ScoreReport, TestSession};
use crate::store::{SessionStore, SESSION_META, TEST_QUESTIONS, USER_ANSWERS};

/// 会话服务
///
/// 职责：
/// - 持久化题目、作答和上传元数据
/// - 决定选项策略
/// - 进入答题 / 结果页面前检查前置数据
pub struct SessionService<S: SessionStore> {
    store: S,
    reshuffle_options: bool,
}

impl<S: SessionStore> SessionService<S> {
    /// # 参数
    /// - `store`: 底层键值存储
    /// - `reshuffle_options`: 为 `true` 时每次显示和评分都重新随机选项
    pub fn new(store: S, reshuffle_options: bool) -> Self {
        Self {
            store,
            reshuffle_options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ========== 读取 ==========

    pub fn questions(&self) -> QuizResult<Option<QuestionSet>> {
        self.read_json(TEST_QUESTIONS)
    }

    pub fn answers(&self) -> QuizResult<Option<AnswerSelection>> {
        self.read_json(USER_ANSWERS)
    }

    pub fn meta(&self) -> QuizResult<Option<SessionMeta>> {
        self.read_json(SESSION_META)
    }

    /// 当前会话的选项策略
    pub fn policy(&self) -> QuizResult<OptionPolicy> {
        if self.reshuffle_options {
            return Ok(OptionPolicy::Reshuffle);
        }
        match self.meta()? {
            Some(meta) => Ok(OptionPolicy::Stable {
                seed: meta.option_seed,
            }),
            None => {
                warn!("⚠️ 会话缺少元数据，使用默认选项种子");
                Ok(OptionPolicy::Stable { seed: 0 })
            }
        }
    }

    // ========== 写入 ==========

    /// 新的上传：整体替换题目和元数据，清除旧的作答
    pub fn replace_questions(
        &mut self,
        questions: &QuestionSet,
        meta: &SessionMeta,
    ) -> QuizResult<()> {
        self.write_json(TEST_QUESTIONS, questions)?;
        self.write_json(SESSION_META, meta)?;
        self.store.remove(USER_ANSWERS)?;
        info!("✓ 已保存 {} 道题目", questions.len());
        Ok(())
    }

    pub fn save_answers(&mut self, answers: &AnswerSelection) -> QuizResult<()> {
        self.write_json(USER_ANSWERS, answers)?;
        debug!("已保存作答: {}/{}", answers.answered_count(), answers.len());
        Ok(())
    }

    pub fn clear_answers(&mut self) -> QuizResult<()> {
        self.store.remove(USER_ANSWERS)
    }

    /// 清空整个会话
    pub fn clear_all(&mut self) -> QuizResult<()> {
        self.store.remove(TEST_QUESTIONS)?;
        self.store.remove(USER_ANSWERS)?;
        self.store.remove(SESSION_META)
    }

    // ========== 页面进入 ==========

    /// 进入答题页面，已有作答时继续之前的进度
    pub fn enter_test(&self) -> QuizResult<TestSession> {
        let questions = self
            .questions()?
            .filter(|q| !q.is_empty())
            .ok_or_else(|| QuizError::missing(TEST_QUESTIONS))?;
        TestSession::start(questions, self.answers()?, self.policy()?)
    }

    /// 进入结果页面并评分
    pub fn enter_results(&self) -> QuizResult<ScoreReport> {
        let questions = self
            .questions()?
            .ok_or_else(|| QuizError::missing(TEST_QUESTIONS))?;
        let answers = self
            .answers()?
            .ok_or_else(|| QuizError::missing(USER_ANSWERS))?;

        let report = score(&questions, &answers.fit_to(questions.len()), self.policy()?)?;
        info!(
            "📊 评分完成: {}/{} ({}%)",
            report.correct, report.total, report.percent
        );
        Ok(report)
    }

    /// 按已保存的数据推断当前所处的页面状态
    pub fn state(&self) -> QuizResult<QuizState> {
        match self.questions()? {
            Some(questions) if !questions.is_empty() => {
                if self.answers()?.is_some() {
                    Ok(QuizState::Scored(self.enter_results()?))
                } else {
                    Ok(QuizState::AwaitingAnswer(self.enter_test()?))
                }
            }
            _ => Ok(QuizState::NoQuestions),
        }
    }

    /// 重新答题：清除作答，题目保留
    pub fn retry(&mut self) -> QuizResult<TestSession> {
        self.clear_answers()?;
        let questions = self
            .questions()?
            .ok_or_else(|| QuizError::missing(TEST_QUESTIONS))?;
        TestSession::retry(questions, self.policy()?)
    }

    // ========== JSON 辅助 ==========

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> QuizResult<Option<T>> {
        match self.store.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| QuizError::store(key, e)),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> QuizResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| QuizError::store(key, e))?;
        self.store.set(key, &raw)
    }
}
