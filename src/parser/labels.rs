//! 标签切分
//!
//! 把原始文本切成"标签 / 文本 / 换行 / 空行"四类记号，供抽取状态机使用。
//! 只有这里用到正则，状态机本身不关心标签长什么样。

use regex::Regex;
use std::sync::LazyLock;

/// 识别的标签写法：
/// - `Question:` `Q:` `Answer:` `A:`（冒号前可以有空白），行内任意位置
/// - 带编号的 `Q1.` `Question 2)` `A3:`，只认行首，避免 "Q4." "A1:" 这类正文被切开
/// - 行首完整单词 `Question` / `Answer`，冒号可省略
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)(?:^[ \t]*(?P<lead>question|answer)\b(?:[ \t]*\d*[ \t]*[:.)])?[ \t]*",
        r"|^[ \t]*(?P<num>q|a)[ \t]*\d+[ \t]*[:.)]",
        r"|\b(?P<tag>question|answer|q|a)[ \t]*:)",
    ))
    .expect("label regex is valid")
});

/// 标签类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Question,
    Answer,
}

/// 切分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// 标签，`raw` 保留原文，答案里重复出现的答案标签会按原文保留
    ///
    /// `bare` 表示行首的完整单词后面既没有编号也没有标点（`Question everything`），
    /// 等待答案时按普通文字处理
    Label {
        kind: LabelKind,
        raw: &'a str,
        bare: bool,
    },
    Text(&'a str),
    LineBreak,
    /// 只含空白的行
    BlankLine,
}

/// 把文本切分成记号序列
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            tokens.push(Token::BlankLine);
            continue;
        }

        let mut last = 0;
        for caps in LABEL_RE.captures_iter(line) {
            let Some(m) = caps.get(0) else { continue };
            let lead = caps.name("lead");
            let Some(name) = lead
                .or_else(|| caps.name("num"))
                .or_else(|| caps.name("tag"))
            else {
                continue;
            };
            let bare = lead.is_some() && m.as_str().trim_end().ends_with(char::is_alphabetic);

            if m.start() > last {
                tokens.push(Token::Text(&line[last..m.start()]));
            }
            tokens.push(Token::Label {
                kind: label_kind(name.as_str()),
                raw: m.as_str(),
                bare,
            });
            last = m.end();
        }

        if last < line.len() {
            tokens.push(Token::Text(&line[last..]));
        }
        tokens.push(Token::LineBreak);
    }

    tokens
}

fn label_kind(word: &str) -> LabelKind {
    if word.starts_with(['q', 'Q']) {
        LabelKind::Question
    } else {
        LabelKind::Answer
    }
}
