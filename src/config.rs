use serde::Deserialize;
use std::path::Path;

use crate::error::{QuizError, QuizResult};

/// 默认的配置文件路径
pub const DEFAULT_CONFIG_FILE: &str = "pdf_quiz.toml";

/// 程序配置文件
///
/// 读取顺序：默认值 → TOML 配置文件 → 环境变量 → 命令行参数
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 会话文件路径
    pub session_file: String,
    /// 是否每次显示 / 评分都重新随机选项
    pub reshuffle_options: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_file: ".pdf_quiz/session.json".to_string(),
            reshuffle_options: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 只使用默认值和环境变量
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取配置文件（`QUIZ_CONFIG` 指定，默认 `pdf_quiz.toml`，不存在则跳过），再应用环境变量
    pub fn load() -> QuizResult<Self> {
        let path =
            std::env::var("QUIZ_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        if !Path::new(&path).exists() {
            return Ok(Self::from_env());
        }
        Ok(Self::from_toml_file(&path)?.with_env_overrides())
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: &str) -> QuizResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| QuizError::Config {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|message| QuizError::Config {
            path: path.to_string(),
            message,
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// 按 `QUIZ_*` 变量覆盖配置，无法解析的值保持原样
    fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            session_file: lookup("QUIZ_SESSION_FILE").unwrap_or(self.session_file),
            reshuffle_options: lookup("QUIZ_RESHUFFLE_OPTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.reshuffle_options),
            verbose_logging: lookup("QUIZ_VERBOSE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }
}
