//! 题目抽取
//!
//! 在 [`tokenize`](super::labels::tokenize) 的结果上跑一个小状态机：
//!
//! ```text
//! SeekingQuestion → CapturingQuestion → SeekingAnswer → CapturingAnswer
//!        ↑                                   ↓   ↑            │
//!        │                               Unlabeled ──答案标签──┘
//!        └──────────── 空行 / 下一个题目标签 / 文本结束 ─────────┘
//! ```
//!
//! 题干在行尾或答案标签处结束。题干后面没有标签的行先暂存：
//! 之后出现答案标签，说明这些行是折行的题干；否则它们就是答案。
//! 答案到空行、下一个题目标签或文本结束为止。

use crate::models::{QuestionRecord, QuestionSet};
use crate::parser::labels::{tokenize, LabelKind, Token};
use crate::utils::logging::truncate_text;
use tracing::{debug, info};

#[derive(Debug)]
enum State {
    SeekingQuestion,
    CapturingQuestion { question: String },
    SeekingAnswer { question: String },
    /// 题干之后没有标签的行，还不能确定是题干还是答案
    Unlabeled { question: String, pending: String },
    CapturingAnswer { question: String, answer: String },
}

/// 逐个记号推进的抽取器
#[derive(Debug)]
struct Extractor {
    state: State,
    records: Vec<QuestionRecord>,
    discarded: usize,
}

impl Extractor {
    fn new() -> Self {
        Self {
            state: State::SeekingQuestion,
            records: Vec::new(),
            discarded: 0,
        }
    }

    fn feed(&mut self, token: Token<'_>) {
        let state = std::mem::replace(&mut self.state, State::SeekingQuestion);

        // 等待答案时，行首不带标点的 "Question ..." 是答案正文
        let token = match (&state, token) {
            (
                State::SeekingAnswer { .. } | State::Unlabeled { .. },
                Token::Label {
                    kind: LabelKind::Question,
                    raw,
                    bare: true,
                },
            ) => Token::Text(raw),
            (_, token) => token,
        };

        self.state = match (state, token) {
            // 题目标签在任何状态下都会开启新题目
            (
                State::CapturingAnswer { question, answer }
                | State::Unlabeled {
                    question,
                    pending: answer,
                },
                Token::Label {
                    kind: LabelKind::Question,
                    ..
                },
            ) => {
                self.emit(&question, &answer);
                State::CapturingQuestion {
                    question: String::new(),
                }
            }
            (
                pending,
                Token::Label {
                    kind: LabelKind::Question,
                    ..
                },
            ) => {
                if let State::CapturingQuestion { question } | State::SeekingAnswer { question } =
                    pending
                {
                    if !question.trim().is_empty() {
                        debug!("丢弃没有答案的题目: {}", truncate_text(question.trim(), 40));
                        self.discarded += 1;
                    }
                }
                State::CapturingQuestion {
                    question: String::new(),
                }
            }

            (State::SeekingQuestion, _) => State::SeekingQuestion,

            (State::CapturingQuestion { mut question }, Token::Text(text)) => {
                question.push_str(text);
                State::CapturingQuestion { question }
            }
            (
                State::CapturingQuestion { question },
                Token::Label {
                    kind: LabelKind::Answer,
                    ..
                },
            ) => State::CapturingAnswer {
                question,
                answer: String::new(),
            },
            (State::CapturingQuestion { question }, Token::LineBreak | Token::BlankLine) => {
                // 标签后面紧跟换行时，题干在下一行
                if question.trim().is_empty() {
                    State::CapturingQuestion { question }
                } else {
                    State::SeekingAnswer { question }
                }
            }

            (
                State::SeekingAnswer { question },
                Token::Label {
                    kind: LabelKind::Answer,
                    ..
                },
            ) => State::CapturingAnswer {
                question,
                answer: String::new(),
            },
            (State::SeekingAnswer { question }, Token::Text(text)) => {
                if text.trim().is_empty() {
                    State::SeekingAnswer { question }
                } else {
                    State::Unlabeled {
                        question,
                        pending: text.to_string(),
                    }
                }
            }
            (State::SeekingAnswer { question }, Token::LineBreak | Token::BlankLine) => {
                State::SeekingAnswer { question }
            }

            (State::Unlabeled { question, mut pending }, Token::Text(text)) => {
                pending.push_str(text);
                State::Unlabeled { question, pending }
            }
            (State::Unlabeled { question, mut pending }, Token::LineBreak) => {
                join_line(&mut pending);
                State::Unlabeled { question, pending }
            }
            (
                State::Unlabeled { question, pending },
                Token::Label {
                    kind: LabelKind::Answer,
                    ..
                },
            ) => {
                debug!("折行的题干: {}", truncate_text(pending.trim(), 40));
                State::CapturingAnswer {
                    question: format!("{} {}", question.trim_end(), pending.trim()),
                    answer: String::new(),
                }
            }
            (State::Unlabeled { question, pending }, Token::BlankLine) => {
                self.emit(&question, &pending);
                State::SeekingQuestion
            }

            (State::CapturingAnswer { question, mut answer }, Token::Text(text)) => {
                answer.push_str(text);
                State::CapturingAnswer { question, answer }
            }
            (
                State::CapturingAnswer { question, mut answer },
                Token::Label {
                    kind: LabelKind::Answer,
                    raw,
                    ..
                },
            ) => {
                answer.push_str(raw);
                State::CapturingAnswer { question, answer }
            }
            (State::CapturingAnswer { question, mut answer }, Token::LineBreak) => {
                join_line(&mut answer);
                State::CapturingAnswer { question, answer }
            }
            (State::CapturingAnswer { question, answer }, Token::BlankLine) => {
                self.emit(&question, &answer);
                State::SeekingQuestion
            }
        };
    }

    fn finish(mut self) -> (Vec<QuestionRecord>, usize) {
        match std::mem::replace(&mut self.state, State::SeekingQuestion) {
            State::CapturingAnswer { question, answer } => self.emit(&question, &answer),
            State::Unlabeled { question, pending } => self.emit(&question, &pending),
            State::CapturingQuestion { question } | State::SeekingAnswer { question }
                if !question.trim().is_empty() =>
            {
                self.discarded += 1;
            }
            _ => {}
        }
        (self.records, self.discarded)
    }

    fn emit(&mut self, question: &str, answer: &str) {
        match QuestionRecord::new(question, answer) {
            Some(record) => self.records.push(record),
            None => self.discarded += 1,
        }
    }
}

/// 换行处接一个空格，行尾多余空白合并掉
fn join_line(text: &mut String) {
    if !text.trim().is_empty() {
        let end = text.trim_end().len();
        text.truncate(end);
        text.push(' ');
    }
}

/// 从文档文本中抽取题目
///
/// 纯函数：没有识别到任何题目时返回空集合，不报错，
/// 由进入答题页面时的检查负责提示用户。
pub fn extract(text: &str) -> QuestionSet {
    let mut extractor = Extractor::new();
    for token in tokenize(text) {
        extractor.feed(token);
    }
    let (records, discarded) = extractor.finish();

    info!(
        "✓ 抽取完成: {} 道题目 (丢弃 {} 条不完整记录)",
        records.len(),
        discarded
    );

    QuestionSet::new(records)
}
