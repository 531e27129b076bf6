//! Security Module
//!
//! 入力ファイルに対する制限を定義するモジュール。

use crate::error::AgentSheetError;

/// 入力ファイルサイズのデフォルト上限（100MB）
pub(crate) const DEFAULT_MAX_INPUT_SIZE: u64 = 104_857_600;

/// セキュリティ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

impl SecurityConfig {
    /// 上限を指定して設定を作成
    pub fn with_max_input_size(max_input_file_size: u64) -> Self {
        Self {
            max_input_file_size,
        }
    }

    /// 読み込んだバイト数が上限以内かを検証
    pub fn check_input_size(&self, bytes_read: usize) -> Result<(), AgentSheetError> {
        if bytes_read as u64 > self.max_input_file_size {
            return Err(AgentSheetError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes_read, self.max_input_file_size
            )));
        }
        Ok(())
    }
}
