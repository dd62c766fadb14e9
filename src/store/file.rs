use super::SessionStore;
use crate::error::{QuizError, QuizResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 文件存储
///
/// 所有键值保存在一个 JSON 对象文件里。每次写入都先写临时文件再重命名，
/// 文件不存在时视为空存储。
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// 打开（或新建）存储文件
    ///
    /// # 参数
    /// - `path`: 存储文件路径，父目录不存在时会在第一次写入时创建
    pub fn open(path: impl Into<PathBuf>) -> QuizResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| QuizError::store(path.display().to_string(), e))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .map_err(|e| QuizError::store(path.display().to_string(), e))?
            }
        } else {
            BTreeMap::new()
        };

        debug!("打开会话文件: {} ({} 个键)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str) -> QuizResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| QuizError::store(key, e))?;
            }
        }

        let content =
            serde_json::to_string_pretty(&self.entries).map_err(|e| QuizError::store(key, e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| QuizError::store(key, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| QuizError::store(key, e))?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> QuizResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> QuizResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush(key)
    }

    fn remove(&mut self, key: &str) -> QuizResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush(key)?;
        }
        Ok(())
    }
}
