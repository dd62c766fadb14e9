//! 答题流程 - 流程层
//!
//! 在终端里逐题显示并读取用户输入，驱动 [`TestSession`] 的状态转移。
//! 输入输出都是泛型，测试时用内存缓冲代替终端。

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{debug, info};

use crate::error::QuizError;
use crate::models::AnswerSelection;
use crate::quiz::{OptionList, TestSession};
use crate::utils::logging::truncate_text;

/// 进度条宽度（字符数）
const BAR_WIDTH: usize = 20;

/// 答题结束方式
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// 在最后一题提交，返回需要保存的作答
    Submitted(AnswerSelection),
    /// 用户退出或输入结束，作答不保存
    Quit(TestSession),
}

/// 一条用户指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Select(usize),
    Next,
    Previous,
    Submit,
    Quit,
    Help,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_ascii_lowercase();
        if let Ok(n) = input.parse::<usize>() {
            return n.checked_sub(1).map(Command::Select);
        }
        match input.as_str() {
            "n" | "next" => Some(Command::Next),
            "p" | "prev" | "previous" => Some(Command::Previous),
            "s" | "submit" => Some(Command::Submit),
            "q" | "quit" | "exit" => Some(Command::Quit),
            "h" | "help" | "?" => Some(Command::Help),
            _ => None,
        }
    }
}

/// 终端答题流程
pub struct TestFlow<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TestFlow<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 运行答题循环，直到提交或退出
    pub fn run(&mut self, mut session: TestSession) -> Result<FlowOutcome> {
        info!("📝 开始答题: 共 {} 道题", session.questions().len());
        let mut options = self.render(&session)?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(FlowOutcome::Quit(session));
            }
            if line.trim().is_empty() {
                continue;
            }

            let Some(command) = Command::parse(&line) else {
                writeln!(self.output, "Unknown command. Type 'h' for help.")?;
                continue;
            };
            debug!("第 {} 题: {:?}", session.current() + 1, command);

            match command {
                Command::Select(option) => match session.select(option) {
                    Ok(next) => {
                        session = next;
                        let chosen = options.get(option).map(String::as_str).unwrap_or("");
                        writeln!(self.output, "Selected: {}", chosen)?;
                    }
                    Err(QuizError::IndexOutOfRange { len, .. }) => {
                        writeln!(self.output, "Please choose an option between 1 and {}.", len)?;
                    }
                    Err(e) => return Err(e.into()),
                },
                Command::Next => {
                    if session.is_last() {
                        writeln!(
                            self.output,
                            "This is the last question. Type 's' to submit."
                        )?;
                        continue;
                    }
                    match session.next() {
                        Ok(next) => {
                            session = next;
                            options = self.render(&session)?;
                        }
                        Err(e @ QuizError::IncompleteAnswer { .. }) => {
                            writeln!(self.output, "{}", e.user_message())?;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                Command::Previous => {
                    if session.is_first() {
                        writeln!(self.output, "Already at the first question.")?;
                        continue;
                    }
                    session = session.previous();
                    options = self.render(&session)?;
                }
                Command::Submit => match session.submit() {
                    Ok(answers) => {
                        info!(
                            "✓ 已提交: 作答 {}/{}",
                            answers.answered_count(),
                            answers.len()
                        );
                        return Ok(FlowOutcome::Submitted(answers));
                    }
                    Err(QuizError::SubmitBeforeEnd { .. }) => {
                        writeln!(
                            self.output,
                            "You can submit from the last question. Type 'n' to continue."
                        )?;
                    }
                    Err(e) => return Err(e.into()),
                },
                Command::Quit => return Ok(FlowOutcome::Quit(session)),
                Command::Help => self.print_help(&session)?,
            }
        }
    }

    /// 显示当前题目，返回本次显示的选项
    fn render(&mut self, session: &TestSession) -> Result<OptionList> {
        let total = session.questions().len();
        let record = session.current_record();
        let options = session.current_options()?;

        debug!(
            "显示第 {} 题: {}",
            session.current() + 1,
            truncate_text(&record.question, 40)
        );

        writeln!(self.output)?;
        writeln!(
            self.output,
            "Question {} of {}  {}",
            session.current() + 1,
            total,
            progress_bar(session.progress_percent())
        )?;
        writeln!(self.output, "{}", record.question)?;
        for (i, option) in options.iter().enumerate() {
            let marker = if session.selected() == Some(i) { '*' } else { ' ' };
            writeln!(self.output, " {} {}) {}", marker, i + 1, option)?;
        }
        self.print_hint(session)?;

        Ok(options)
    }

    fn print_hint(&mut self, session: &TestSession) -> Result<()> {
        let mut actions = vec![format!("[1-{}] select", session.option_count())];
        if !session.is_first() {
            actions.push("[p]revious".to_string());
        }
        if session.is_last() {
            actions.push("[s]ubmit".to_string());
        } else {
            actions.push("[n]ext".to_string());
        }
        actions.push("[q]uit".to_string());
        writeln!(self.output, "{}", actions.join("  "))?;
        Ok(())
    }

    fn print_help(&mut self, session: &TestSession) -> Result<()> {
        writeln!(self.output, "Commands:")?;
        writeln!(
            self.output,
            "  1-{}      choose an option",
            session.option_count()
        )?;
        writeln!(self.output, "  n, next  go to the next question")?;
        writeln!(self.output, "  p, prev  go to the previous question")?;
        writeln!(self.output, "  s        submit (last question only)")?;
        writeln!(self.output, "  q        quit without saving")?;
        Ok(())
    }
}

/// 文本进度条，例如 `[##########----------]  50%`
pub fn progress_bar(percent: u32) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}
