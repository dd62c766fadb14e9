use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::sync::Arc;

/// 单道题目：题干 + 唯一的标准答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub answer: String,
}

impl QuestionRecord {
    /// 创建题目记录，两个字段都会去掉首尾空白
    ///
    /// # 返回
    /// 题干或答案为空时返回 `None`
    pub fn new(question: &str, answer: &str) -> Option<Self> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return None;
        }
        Some(Self {
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }
}

/// 一次上传得到的题目集合
///
/// 按文档顺序排列，创建后不可变；新的上传会整体替换它。
/// 内部用 `Arc` 共享，克隆成本很低。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet {
    records: Arc<[QuestionRecord]>,
}

impl QuestionSet {
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionRecord> {
        self.records.iter()
    }

    /// 最后一题的索引，空集合返回 `None`
    pub fn last_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }
}

impl Index<usize> for QuestionSet {
    type Output = QuestionRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a QuestionRecord;
    type IntoIter = std::slice::Iter<'a, QuestionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<QuestionRecord> for QuestionSet {
    fn from_iter<T: IntoIterator<Item = QuestionRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
