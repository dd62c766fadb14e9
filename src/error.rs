use thiserror::Error;

/// 测验程序的错误类型
#[derive(Debug, Error)]
pub enum QuizError {
    /// 文档读取或解析失败
    #[error("无法读取文档 {path}: {source}")]
    DocumentRead {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 进入页面时缺少前置的会话数据
    #[error("缺少会话数据: {what}")]
    MissingSessionData { what: String },

    /// 当前题目还没有作答
    #[error("第 {} 题尚未作答", .index + 1)]
    IncompleteAnswer { index: usize },

    /// 还没到最后一题就提交
    #[error("只能在最后一题提交 (当前第 {} 题)", .index + 1)]
    SubmitBeforeEnd { index: usize },

    /// 索引超出范围
    #[error("索引 {index} 超出范围 (共 {len} 项)")]
    IndexOutOfRange { index: usize, len: usize },

    /// 会话存储读写失败
    #[error("会话存储错误 ({key}): {source}")]
    Store {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 配置文件解析失败
    #[error("配置错误 ({path}): {message}")]
    Config { path: String, message: String },
}

impl QuizError {
    pub fn document_read(
        path: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        QuizError::DocumentRead {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn missing(what: impl Into<String>) -> Self {
        QuizError::MissingSessionData { what: what.into() }
    }

    pub fn store(
        key: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        QuizError::Store {
            key: key.into(),
            source: source.into(),
        }
    }

    /// 给用户看的提示语
    pub fn user_message(&self) -> String {
        match self {
            QuizError::DocumentRead { .. } => {
                "Error processing PDF. Please try another file.".to_string()
            }
            QuizError::MissingSessionData { what } if what == crate::store::USER_ANSWERS => {
                "No test results found. Please take the test first.".to_string()
            }
            QuizError::MissingSessionData { .. } => {
                "No questions found. Please upload a PDF first.".to_string()
            }
            QuizError::IncompleteAnswer { .. } => {
                "Please select an answer before continuing.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// 是否需要跳回上传页面
    pub fn redirects_to_upload(&self) -> bool {
        matches!(
            self,
            QuizError::MissingSessionData { .. } | QuizError::DocumentRead { .. }
        )
    }
}

/// 库内部统一的结果类型
pub type QuizResult<T> = Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based_for_questions() {
        let err = QuizError::IncompleteAnswer { index: 2 };
        assert_eq!(err.to_string(), "第 3 题尚未作答");
        assert!(!err.redirects_to_upload());
    }

    #[test]
    fn test_missing_data_redirects() {
        let err = QuizError::missing("testQuestions");
        assert!(err.redirects_to_upload());
        assert_eq!(
            err.user_message(),
            "No questions found. Please upload a PDF first."
        );
    }

    #[test]
    fn test_missing_answers_message() {
        let err = QuizError::missing("userAnswers");
        assert_eq!(
            err.user_message(),
            "No test results found. Please take the test first."
        );
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = QuizError::document_read("deck.pdf", io);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "gone");
    }
}
