//! Formatter Module
//!
//! セル値をドキュメントに書き込めるテキストへ正規化するモジュール。
//! 変換は全域関数であり、どのような値に対しても必ず何らかのテキストを返します。

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::api::DateFormat;
use crate::types::CellValue;

/// ISO 8601タイムスタンプ（ミリ秒、UTC）
const ISO_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// 値ノーマライザー
///
/// - 文字列: そのまま
/// - 日付・時刻: タイムスタンプ文字列
/// - その他（数値、論理値、構造化データ）: JSONテキスト
#[derive(Debug, Clone)]
pub struct ValueNormalizer {
    /// 日付フォーマッター
    date_formatter: DateFormatter,
}

impl ValueNormalizer {
    /// 新しいValueNormalizerインスタンスを生成
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            date_formatter: DateFormatter { date_format },
        }
    }

    /// セル値をテキストに変換
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheet2doc::{CellValue, ValueNormalizer};
    ///
    /// let normalizer = ValueNormalizer::default();
    /// assert_eq!(normalizer.normalize(&CellValue::from("abc")), "abc");
    /// assert_eq!(normalizer.normalize(&CellValue::Number(3.0)), "3");
    /// assert_eq!(normalizer.normalize(&CellValue::Bool(true)), "true");
    /// ```
    pub fn normalize(&self, value: &CellValue) -> String {
        match value {
            CellValue::String(s) => s.clone(),
            CellValue::DateTime(dt) => self.date_formatter.format(dt),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Structured(v) => v.to_string(),
            // エラー値はシート上の表示文字列をそのまま使う
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
            CellValue::Null => "null".to_string(),
        }
    }
}

impl Default for ValueNormalizer {
    fn default() -> Self {
        Self::new(DateFormat::Iso8601)
    }
}

/// 日付フォーマッター
#[derive(Debug, Clone)]
struct DateFormatter {
    date_format: DateFormat,
}

impl DateFormatter {
    fn format(&self, dt: &DateTime<Utc>) -> String {
        match &self.date_format {
            DateFormat::Iso8601 => dt.format(ISO_TIMESTAMP).to_string(),
            DateFormat::Custom(pattern) => {
                // 不正な書式指定子はDisplay時にエラーになるため、ISO形式にフォールバック
                let mut out = String::new();
                match write!(out, "{}", dt.format(pattern)) {
                    Ok(()) => out,
                    Err(_) => dt.format(ISO_TIMESTAMP).to_string(),
                }
            }
        }
    }
}

/// 数値をJSONの数値表記に変換
///
/// 整数値は小数点なし、非有限値は`null`。
fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        return format!("{:.0}", n);
    }
    serde_json::Value::from(n).to_string()
}

/// カスタム日付形式が有効かどうかを検証
pub(crate) fn is_valid_date_pattern(pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    let Some(sample) = DateTime::<Utc>::from_timestamp(0, 0) else {
        return false;
    };
    let mut out = String::new();
    write!(out, "{}", sample.format(pattern)).is_ok() && !out.is_empty()
}
