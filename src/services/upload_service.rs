//! 上传服务 - 业务能力层
//!
//! 读取文档 → 抽取题目 → 写入会话

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::document::{read_document, reader_for_path, DocumentReader};
use crate::error::QuizResult;
use crate::models::{QuestionSet, SessionMeta};
use crate::parser::extract;
use crate::services::SessionService;
use crate::store::SessionStore;

/// 一次上传的结果
#[derive(Debug, Clone)]
pub struct UploadSummary {
    pub source: String,
    pub questions: QuestionSet,
}

impl UploadSummary {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// 上传服务
#[derive(Default)]
pub struct UploadService {
    /// 为空时按文件扩展名选择读取器
    reader: Option<Arc<dyn DocumentReader>>,
}

impl UploadService {
    pub fn new() -> Self {
        Self { reader: None }
    }

    /// 使用指定的读取器，忽略文件扩展名
    pub fn with_reader(reader: Arc<dyn DocumentReader>) -> Self {
        Self {
            reader: Some(reader),
        }
    }

    /// 处理上传的文档
    ///
    /// # 参数
    /// - `session`: 会话服务
    /// - `path`: 文档路径
    ///
    /// # 返回
    /// 读取失败时清空会话，保证不会用旧题目开始答题；
    /// 没有抽取到题目不算错误，进入答题页面时再提示。
    pub async fn upload<S: SessionStore>(
        &self,
        session: &mut SessionService<S>,
        path: &Path,
    ) -> QuizResult<UploadSummary> {
        let reader = self
            .reader
            .clone()
            .unwrap_or_else(|| reader_for_path(path));

        let text = match read_document(path, reader).await {
            Ok(text) => text,
            Err(e) => {
                error!("❌ 文档处理失败: {}", e);
                session.clear_all()?;
                return Err(e);
            }
        };

        let questions = extract(&text);
        if questions.is_empty() {
            warn!("⚠️ 文档中没有识别到任何题目");
        }

        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let meta = SessionMeta::new(&source, questions.len(), rand::random());
        session.replace_questions(&questions, &meta)?;

        info!("✓ 上传完成: {} ({} 道题目)", source, questions.len());
        Ok(UploadSummary { source, questions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizError;
    use crate::models::{AnswerSelection, QuestionRecord};
    use crate::store::MemoryStore;

    struct BrokenPdf;

    impl DocumentReader for BrokenPdf {
        fn extract_text(
            &self,
            _bytes: &[u8],
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Err("invalid file header".into())
        }
    }

    #[tokio::test]
    async fn test_upload_text_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.txt");
        std::fs::write(
            &path,
            "Question: What is 2+2?\nAnswer: 4\n\nQ: Capital of France?\nA: Paris\n\n",
        )
        .unwrap();

        let mut session = SessionService::new(MemoryStore::new(), false);
        let summary = UploadService::new().upload(&mut session, &path).await.unwrap();

        assert_eq!(summary.source, "deck.txt");
        assert_eq!(summary.question_count(), 2);
        assert_eq!(
            summary.questions[1],
            QuestionRecord::new("Capital of France?", "Paris").unwrap()
        );
        assert_eq!(session.questions().unwrap(), Some(summary.questions.clone()));
        assert_eq!(session.meta().unwrap().unwrap().question_count, 2);
    }

    #[tokio::test]
    async fn test_failed_read_clears_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        std::fs::write(&good, "Q: a?\nA: b\n").unwrap();
        let bad = dir.path().join("bad.pdf");
        std::fs::write(&bad, "%PDF-garbage").unwrap();

        let mut session = SessionService::new(MemoryStore::new(), false);
        UploadService::new().upload(&mut session, &good).await.unwrap();
        session.save_answers(&AnswerSelection::unanswered(1)).unwrap();

        let err = UploadService::with_reader(Arc::new(BrokenPdf))
            .upload(&mut session, &bad)
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::DocumentRead { .. }));
        assert_eq!(session.questions().unwrap(), None);
        assert_eq!(session.answers().unwrap(), None);
        assert!(session.enter_test().is_err());
    }

    #[tokio::test]
    async fn test_document_without_questions_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prose.txt");
        std::fs::write(&path, "Nothing but prose here.\n").unwrap();

        let mut session = SessionService::new(MemoryStore::new(), false);
        let summary = UploadService::new().upload(&mut session, &path).await.unwrap();
        assert_eq!(summary.question_count(), 0);

        let err = session.enter_test().unwrap_err();
        assert!(matches!(err, QuizError::MissingSessionData { .. }));
    }
}
