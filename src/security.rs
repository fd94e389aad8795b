//! Security Module
//!
//! ローカルファイルシステムへ書き込む名前の検証を行うモジュール。
//! パストラバーサルや入力サイズの上限を扱います。

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
    /// ファイル名（拡張子を除く）の最大文字数
    /// デフォルト: 200
    pub max_file_stem_chars: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
            max_file_stem_chars: 200,
        }
    }
}

/// フォルダ名の検証
///
/// 出力先フォルダ名は親フォルダ直下の1階層の名前でなければなりません。
///
/// # 戻り値
///
/// * `Ok(())` - 名前が安全な場合
/// * `Err(String)` - 空、`.`/`..`、パス区切りや制御文字を含む場合
pub(crate) fn validate_folder_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Empty folder name is not allowed".to_string());
    }

    if name == "." || name == ".." {
        return Err(format!("Path traversal detected: {}", name));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(format!("Path separator in folder name is not allowed: {}", name));
    }

    if name.chars().any(char::is_control) {
        return Err(format!("Control character in folder name: {:?}", name));
    }

    Ok(())
}

/// ドキュメントのタイトルをファイル名として安全な文字列に変換
///
/// パス区切り・予約文字・制御文字を`_`に置き換え、先頭末尾の空白とドットを除去します。
/// 結果が空になる場合は`"Untitled"`を返します。
pub(crate) fn sanitize_file_stem(title: &str, config: &SecurityConfig) -> String {
    let replaced: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .take(config.max_file_stem_chars)
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.is_empty() {
        "Untitled".to_string()
    } else {
        trimmed.to_string()
    }
}
