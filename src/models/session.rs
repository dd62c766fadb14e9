use serde::{Deserialize, Serialize};

/// 用户的作答记录
///
/// 每道题一个槽位，`None` 表示尚未作答。序列化为 `[0, null, 2]` 这样的数组。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSelection {
    slots: Vec<Option<usize>>,
}

impl AnswerSelection {
    /// 创建全部未作答的记录
    pub fn unanswered(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 读取某道题的选项索引，越界或未作答都返回 `None`
    pub fn get(&self, index: usize) -> Option<usize> {
        self.slots.get(index).copied().flatten()
    }

    /// 写入某道题的选项索引，越界时忽略并返回 `false`
    pub fn set(&mut self, index: usize, option: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(option);
                true
            }
            None => false,
        }
    }

    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// 对齐题目数量：多余的截断，缺少的补未作答
    ///
    /// 存储里的作答记录可能来自旧的上传，长度不一定一致。
    pub fn fit_to(mut self, len: usize) -> Self {
        self.slots.resize(len, None);
        self
    }
}

/// 上传时记录的会话元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    /// 源文件名
    pub source: String,
    /// 上传时间（RFC 3339）
    pub uploaded_at: String,
    pub question_count: usize,
    /// 稳定选项模式下生成干扰项的种子
    pub option_seed: u64,
}

impl SessionMeta {
    pub fn new(source: impl Into<String>, question_count: usize, option_seed: u64) -> Self {
        Self {
            source: source.into(),
            uploaded_at: chrono::Local::now().to_rfc3339(),
            question_count,
            option_seed,
        }
    }

    /// 用于界面显示的上传时间
    pub fn uploaded_at_display(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.uploaded_at)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|_| self.uploaded_at.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_json_uses_null_for_unanswered() {
        let mut answers = AnswerSelection::unanswered(3);
        assert!(answers.set(0, 2));
        assert!(!answers.set(5, 1));

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, "[2,null,null]");
        assert_eq!(answers.answered_count(), 1);
        assert!(!answers.is_complete());
    }

    #[test]
    fn test_fit_to_pads_and_truncates() {
        let answers: AnswerSelection = serde_json::from_str("[1,0]").unwrap();
        assert_eq!(answers.clone().fit_to(3).get(2), None);
        assert_eq!(answers.clone().fit_to(3).len(), 3);
        assert_eq!(answers.fit_to(1).len(), 1);
    }

    #[test]
    fn test_meta_display_time() {
        let meta = SessionMeta {
            source: "deck.pdf".to_string(),
            uploaded_at: "2024-03-01T08:30:00+00:00".to_string(),
            question_count: 2,
            option_seed: 7,
        };
        assert_eq!(meta.uploaded_at_display(), "2024-03-01 08:30:00");

        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"uploadedAt\""));
        assert!(json.contains("\"optionSeed\":7"));
    }
}
