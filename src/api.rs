//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use serde::{Deserialize, Serialize};

/// 日付の出力形式
///
/// 日付・時刻セルを本文テキストに変換する際の出力形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601タイムスタンプ（UTC、ミリ秒精度）
    ///
    /// 例: `2024-01-15T00:00:00.000Z`
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheet2doc::{DateFormat, ExporterBuilder};
    ///
    /// # fn main() -> Result<(), sheet2doc::SheetToDocError> {
    /// let exporter = ExporterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

/// 見出しブロックのレベル（1〜6）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// 数値としてのレベル
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }
}

/// シート選択方式
///
/// ワークブックのどのシートを「アクティブシート」として扱うかを指定します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 最初のシート（デフォルト）
    First,

    /// インデックス指定（0始まり）
    Index(usize),

    /// シート名指定
    Name(String),
}

/// ローカルドキュメントの出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum OutputFormat {
    /// Markdown形式（デフォルト）
    ///
    /// ```markdown
    /// ## Question
    ///
    /// Favorite color
    /// ```
    Markdown,

    /// HTMLフラグメント形式
    ///
    /// ```html
    /// <h2>Question</h2>
    /// <p>Favorite color</p>
    /// ```
    Html,
}

impl OutputFormat {
    /// 生成するファイルの拡張子
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_depth() {
        assert_eq!(HeadingLevel::H1.depth(), 1);
        assert_eq!(HeadingLevel::H2.depth(), 2);
        assert_eq!(HeadingLevel::H6.depth(), 6);
    }

    #[test]
    fn test_output_extension() {
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::Html.extension(), "html");
    }
}
