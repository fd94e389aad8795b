//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use std::io::Write;

use crate::api::HeadingLevel;

/// Markdown形式のフォーマッター
pub(crate) struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn heading<W: Write>(
        &self,
        writer: &mut W,
        text: &str,
        level: HeadingLevel,
        first: bool,
    ) -> std::io::Result<()> {
        separate(writer, first)?;
        let marks = "#".repeat(level.depth() as usize);
        writeln!(writer, "{} {}", marks, heading_line(text))
    }

    pub fn body<W: Write>(&self, writer: &mut W, text: &str, first: bool) -> std::io::Result<()> {
        separate(writer, first)?;
        writeln!(writer, "{}", escape_markdown_lines(text))
    }
}

/// ブロック間の空行
fn separate<W: Write>(writer: &mut W, first: bool) -> std::io::Result<()> {
    if first {
        Ok(())
    } else {
        writeln!(writer)
    }
}

/// HTML形式のフォーマッター
pub(crate) struct HtmlFormatter;

impl HtmlFormatter {
    pub fn heading<W: Write>(
        &self,
        writer: &mut W,
        text: &str,
        level: HeadingLevel,
    ) -> std::io::Result<()> {
        let depth = level.depth();
        writeln!(writer, "<h{}>{}</h{}>", depth, escape_html(text), depth)
    }

    pub fn body<W: Write>(&self, writer: &mut W, text: &str) -> std::io::Result<()> {
        writeln!(writer, "<p>{}</p>", escape_html(text).replace('\n', "<br>"))
    }
}

/// 見出しは1行に収める
///
/// 末尾の`#`の連続は閉じ記号として消えないよう`\`を付けます。
fn heading_line(text: &str) -> String {
    let line = text
        .split(|c: char| c == '\r' || c == '\n')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let content = line.trim_end();
    let run_start = content.trim_end_matches('#').len();
    let closes = run_start < content.len()
        && content[..run_start]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
    if closes {
        format!("{}\\{}", &line[..run_start], &line[run_start..])
    } else {
        line
    }
}

/// 行頭のブロック記法をエスケープ
///
/// 本文が見出しや引用、リストとして解釈されないよう、行頭の記号に`\`を付けます。
fn escape_markdown_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            match trimmed.chars().next() {
                Some('#' | '>' | '-' | '+' | '*' | '=' | '`') => {
                    format!("{}\\{}", indent, trimmed)
                }
                Some('0'..='9') => match ordered_marker_len(trimmed) {
                    Some(digits) => format!(
                        "{}{}\\{}",
                        indent,
                        &trimmed[..digits],
                        &trimmed[digits..]
                    ),
                    None => line.to_string(),
                },
                _ => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 行頭が順序付きリストの記号（`1. `、`2)`など）なら数字部分の長さを返す
fn ordered_marker_len(line: &str) -> Option<usize> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if !(1..=9).contains(&digits) {
        return None;
    }
    let mut rest = line[digits..].chars();
    match (rest.next(), rest.next()) {
        (Some('.' | ')'), None) => Some(digits),
        (Some('.' | ')'), Some(c)) if c.is_whitespace() => Some(digits),
        _ => None,
    }
}

/// HTML特殊文字をエスケープ
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
