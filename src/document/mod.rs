//! 文档读取
//!
//! 文档 → 纯文本。PDF 交给 `pdf-extract`，`.txt` 直接按 UTF-8 读取。

pub mod reader;

pub use reader::{read_document, reader_for_path, DocumentReader, PdfReader, PlainTextReader};
