//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! 解析・プロファイル推定・指示文生成の各処理は失敗しません。
//! エラーが発生するのは、ファイル読み込みと設定の検証、JSON入出力のみです。

use thiserror::Error;

/// agentsheetクレート全体で使用するエラー型
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Parse`: スプレッドシートの解析中に発生したエラー（calamine由来）
/// - `Csv`: CSVの解析中に発生したエラー
/// - `Json`: キーワード定義の読み込みや解析結果の出力に失敗したエラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `SecurityViolation`: 入力サイズの上限を超えたエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use agentsheet::AgentSheetError;
/// use std::fs::File;
///
/// fn open_sheet(path: &str) -> Result<(), AgentSheetError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum AgentSheetError {
    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが
    /// 原因となります。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// CSVの解析中に発生したエラー
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// JSONの読み書きに失敗したエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `AnalyzerBuilder::build()`時に、空の会社名や空のキーワード群などが
    /// 検出された場合に発生します。
    ///
    /// ```rust,no_run
    /// use agentsheet::{AnalyzerBuilder, AgentSheetError};
    ///
    /// match AnalyzerBuilder::new().with_default_company("").build() {
    ///     Err(AgentSheetError::Config(msg)) => println!("設定エラー: {}", msg),
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

/// クレート共通のResult型
pub type Result<T> = std::result::Result<T, AgentSheetError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: AgentSheetError = io_err.into();

        match error {
            AgentSheetError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let error: AgentSheetError = calamine::Error::Msg("Corrupted file").into();
        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse spreadsheet"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_csv_error_conversion() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b\nc\n".as_bytes());
        let csv_err = reader
            .records()
            .find_map(|record| record.err())
            .expect("unequal row lengths");
        let error: AgentSheetError = csv_err.into();
        assert!(matches!(error, AgentSheetError::Csv(_)));
        assert!(error.to_string().starts_with("Failed to parse CSV"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: AgentSheetError = json_err.into();
        assert!(matches!(error, AgentSheetError::Json(_)));
        assert!(error.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<()> {
            let _file = std::fs::File::open("nonexistent_file.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(AgentSheetError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_all_error_formats() {
        let config_err = AgentSheetError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let security_err = AgentSheetError::SecurityViolation("too large".to_string());
        assert!(security_err.to_string().starts_with("Security violation"));
    }
}
