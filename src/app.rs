use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::Commands;
use crate::config::Config;
use crate::quiz::{QuizState, TestSession};
use crate::services::{SessionService, UploadService};
use crate::store::FileStore;
use crate::workflow::{render_report, render_report_json, FlowOutcome, TestFlow};

/// 应用主结构
pub struct App {
    config: Config,
    session: SessionService<FileStore>,
}

impl App {
    /// 初始化应用：打开会话文件
    pub fn initialize(config: Config) -> Result<Self> {
        let store = FileStore::open(&config.session_file)
            .with_context(|| format!("无法打开会话文件: {}", config.session_file))?;
        let session = SessionService::new(store, config.reshuffle_options);

        Ok(Self { config, session })
    }

    pub fn session(&self) -> &SessionService<FileStore> {
        &self.session
    }

    /// 执行一个子命令
    ///
    /// # 参数
    /// - `command`: 子命令
    /// - `input`: 答题输入（终端或测试缓冲）
    /// - `output`: 界面输出
    pub async fn run<R: BufRead, W: Write>(
        &mut self,
        command: Commands,
        input: R,
        output: &mut W,
    ) -> Result<()> {
        match command {
            Commands::Upload { file, start } => {
                self.upload(&file, output).await?;
                if start {
                    self.test(input, output)?;
                }
            }
            Commands::Test => self.test(input, output)?,
            Commands::Results { json } => self.results(json, output)?,
            Commands::Retry => {
                let session = self.session.retry()?;
                info!("🔄 已清除作答，重新开始");
                self.take_test(session, input, output)?;
            }
            Commands::Status => self.status(output)?,
        }
        Ok(())
    }

    /// 上传页面
    async fn upload<W: Write>(&mut self, file: &Path, output: &mut W) -> Result<()> {
        writeln!(output, "Processing PDF...")?;

        let summary = UploadService::new().upload(&mut self.session, file).await?;

        writeln!(output, "PDF processed successfully!")?;
        if summary.question_count() == 0 {
            warn!("⚠️ {} 中没有题目", summary.source);
            writeln!(
                output,
                "No questions were recognized in {}.",
                summary.source
            )?;
        } else {
            writeln!(
                output,
                "{} questions loaded from {}. Run `pdf_quiz test` to start.",
                summary.question_count(),
                summary.source
            )?;
        }
        Ok(())
    }

    /// 答题页面，已有保存的作答时从中恢复
    fn test<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        let session = self.session.enter_test()?;
        self.take_test(session, input, output)
    }

    fn take_test<R: BufRead, W: Write>(
        &mut self,
        session: TestSession,
        input: R,
        output: &mut W,
    ) -> Result<()> {
        let outcome = TestFlow::new(input, &mut *output).run(session)?;

        match outcome {
            FlowOutcome::Submitted(answers) => {
                self.session.save_answers(&answers)?;
                self.results(false, output)
            }
            FlowOutcome::Quit(session) => {
                info!("⏸️ 答题中断于第 {} 题", session.current() + 1);
                writeln!(output, "Test left unfinished. Answers were not saved.")?;
                Ok(())
            }
        }
    }

    /// 结果页面
    fn results<W: Write>(&self, json: bool, output: &mut W) -> Result<()> {
        let report = self.session.enter_results()?;
        if json {
            render_report_json(output, &report)
        } else {
            let meta = self.session.meta()?;
            render_report(output, &report, meta.as_ref())
        }
    }

    fn status<W: Write>(&self, output: &mut W) -> Result<()> {
        writeln!(output, "Session file: {}", self.config.session_file)?;

        let Some(questions) = self.session.questions()? else {
            writeln!(output, "No document uploaded.")?;
            return Ok(());
        };
        if let Some(meta) = self.session.meta()? {
            writeln!(
                output,
                "Source: {} (uploaded {})",
                meta.source,
                meta.uploaded_at_display()
            )?;
        }
        writeln!(output, "Questions: {}", questions.len())?;
        match self.session.state()? {
            QuizState::NoQuestions => {
                writeln!(output, "State: no questions, upload another document")?
            }
            QuizState::AwaitingAnswer(_) => writeln!(output, "State: test not submitted yet")?,
            QuizState::Scored(report) => writeln!(
                output,
                "State: submitted, score {}% ({}/{})",
                report.percent, report.correct, report.total
            )?,
        }
        Ok(())
    }
}
