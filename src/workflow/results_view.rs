//! 结果页面

use std::io::Write;

use anyhow::Result;

use crate::models::SessionMeta;
use crate::quiz::ScoreReport;
use crate::workflow::test_flow::progress_bar;

/// 输出评分结果
///
/// # 参数
/// - `output`: 输出目标
/// - `report`: 评分报告
/// - `meta`: 上传元数据，存在时在标题下显示来源
pub fn render_report<W: Write>(
    output: &mut W,
    report: &ScoreReport,
    meta: Option<&SessionMeta>,
) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "Your score: {}%", report.percent)?;
    writeln!(output, "{}", progress_bar(report.percent))?;
    writeln!(output, "{}", report.message())?;
    writeln!(output, "{} of {} correct", report.correct, report.total)?;
    if let Some(meta) = meta {
        writeln!(
            output,
            "Source: {} (uploaded {})",
            meta.source,
            meta.uploaded_at_display()
        )?;
    }

    for outcome in &report.outcomes {
        writeln!(output)?;
        let mark = if outcome.is_correct { "✓" } else { "✗" };
        writeln!(
            output,
            "{} Question {}: {}",
            mark, outcome.number, outcome.question
        )?;
        writeln!(output, "  Your answer: {}", outcome.chosen_display())?;
        if !outcome.is_correct {
            writeln!(output, "  Correct answer: {}", outcome.correct_answer)?;
        }
    }

    writeln!(output)?;
    writeln!(output, "Run `pdf_quiz retry` to take the test again.")?;
    Ok(())
}

/// 以 JSON 格式输出评分结果
pub fn render_report_json<W: Write>(output: &mut W, report: &ScoreReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *output, report)?;
    writeln!(output)?;
    Ok(())
}
