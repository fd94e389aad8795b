//! Output Format Module
//!
//! ブロックをMarkdownまたはHTMLとして書き出すモジュール。

mod formatters;

use std::io::Write;

use crate::api::{HeadingLevel, OutputFormat};
use crate::error::SheetToDocError;
use crate::types::Block;

use formatters::{HtmlFormatter, MarkdownFormatter};

/// 出力フォーマッター（Strategy Pattern）
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Markdown,
    Html,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Markdown => OutputFormatter::Markdown,
            OutputFormat::Html => OutputFormatter::Html,
        }
    }

    /// 見出しを1つ出力する
    ///
    /// `first`が`false`の場合は、前のブロックとの区切りを先に出力します。
    pub fn render_heading<W: Write>(
        &self,
        writer: &mut W,
        text: &str,
        level: HeadingLevel,
        first: bool,
    ) -> std::io::Result<()> {
        match self {
            OutputFormatter::Markdown => MarkdownFormatter.heading(writer, text, level, first),
            OutputFormatter::Html => HtmlFormatter.heading(writer, text, level),
        }
    }

    /// 本文の段落を1つ出力する
    pub fn render_body<W: Write>(
        &self,
        writer: &mut W,
        text: &str,
        first: bool,
    ) -> std::io::Result<()> {
        match self {
            OutputFormatter::Markdown => MarkdownFormatter.body(writer, text, first),
            OutputFormatter::Html => HtmlFormatter.body(writer, text),
        }
    }
}

/// ブロック列をまとめて出力する
///
/// # 使用例
///
/// ```rust
/// use sheet2doc::{render_blocks, Block, HeadingLevel, OutputFormat};
///
/// # fn main() -> Result<(), sheet2doc::SheetToDocError> {
/// let blocks = vec![
///     Block::Heading("Question".to_string()),
///     Block::Body("Favorite color".to_string()),
/// ];
/// let mut out = Vec::new();
/// render_blocks(&mut out, &blocks, OutputFormat::Markdown, HeadingLevel::H2)?;
/// assert_eq!(String::from_utf8(out).unwrap(), "## Question\n\nFavorite color\n");
/// # Ok(())
/// # }
/// ```
pub fn render_blocks<W: Write>(
    writer: &mut W,
    blocks: &[Block],
    format: OutputFormat,
    level: HeadingLevel,
) -> Result<(), SheetToDocError> {
    let formatter = OutputFormatter::from_format(format);
    for (i, block) in blocks.iter().enumerate() {
        match block {
            Block::Heading(text) => formatter.render_heading(writer, text, level, i == 0)?,
            Block::Body(text) => formatter.render_body(writer, text, i == 0)?,
        }
    }
    writer.flush()?;
    Ok(())
}
