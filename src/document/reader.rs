use crate::error::{QuizError, QuizResult};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 文档文本提取能力
///
/// 按页顺序拼接的全文；文档损坏时返回错误。
pub trait DocumentReader: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, BoxError>;
}

/// PDF 文档
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, BoxError> {
        let text = pdf_extract::extract_text_from_mem(bytes)?;
        Ok(text)
    }
}

/// 纯文本文档，非法 UTF-8 字节会被替换
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReader;

impl DocumentReader for PlainTextReader {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, BoxError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// 按扩展名选择读取器，`.txt` / `.text` 按纯文本处理，其余按 PDF 处理
pub fn reader_for_path(path: &Path) -> Arc<dyn DocumentReader> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("txt") | Some("text") => Arc::new(PlainTextReader),
        _ => Arc::new(PdfReader),
    }
}

/// 读取文档并提取文本
///
/// 文件读取是异步的，PDF 解析放在阻塞线程池里执行；
/// 解析过程中的 panic 也按文档读取失败处理。
///
/// # 参数
/// - `path`: 文档路径
/// - `reader`: 文本提取器
pub async fn read_document(path: &Path, reader: Arc<dyn DocumentReader>) -> QuizResult<String> {
    let shown = path.display().to_string();
    info!("📄 正在读取文档: {}", shown);

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| QuizError::document_read(&shown, e))?;
    debug!("文档大小: {} 字节", bytes.len());

    let text = tokio::task::spawn_blocking(move || reader.extract_text(&bytes))
        .await
        .map_err(|e| QuizError::document_read(&shown, e))?
        .map_err(|e| QuizError::document_read(&shown, e))?;

    let text = clean_text(&text);
    info!("✓ 文本提取完成: {} 个字符", text.chars().count());
    Ok(text)
}

/// 去掉 PDF 文本里常见的空字符和 BOM
fn clean_text(text: &str) -> String {
    text.replace(['\u{0}', '\u{FEFF}'], "")
}
