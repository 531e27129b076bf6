//! Public API Types
//!
//! 解析結果と、その出力形式を定義するモジュール。

use serde::Serialize;

use crate::classifier::ClassifiedContent;
use crate::error::Result;
use crate::profile::BusinessProfile;

/// 解析結果の出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// 最終的な指示文のみ（プレーンテキスト）
    #[default]
    Text,

    /// 解析結果全体（JSON）
    Json,

    /// プロファイルのみ（JSON）
    Profile,
}

/// 1回の解析で得られるすべての結果
///
/// `instructions`が音声エージェントにそのまま渡す最終的な指示文です。
/// その他の項目は、指示文を組み立てる途中の成果物として保持されます。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    /// 元のファイル名
    pub file_name: String,

    /// 推定されたプロファイル
    pub profile: BusinessProfile,

    /// 分類済みレコード
    pub records: ClassifiedContent,

    /// テンプレートにプロファイルを埋め込んだ指示文
    pub base_instructions: String,

    /// 分類済みレコードの一覧テキスト（無効化されている場合は`None`）
    pub data_summary: Option<String>,

    /// モード説明（該当する分類がなければ空文字列）
    pub context: String,

    /// 最終的な指示文
    pub instructions: String,
}

impl AgentConfig {
    /// 解析結果全体をJSON文字列に変換
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 指定された形式で出力文字列を生成
    ///
    /// ```rust
    /// use agentsheet::{AnalyzerBuilder, OutputFormat, SpreadsheetDocument};
    ///
    /// # fn main() -> Result<(), agentsheet::AgentSheetError> {
    /// let analyzer = AnalyzerBuilder::new().build()?;
    /// let config = analyzer.analyze_document(&SpreadsheetDocument::new("empty.xlsx"));
    /// let text = config.render(OutputFormat::Text)?;
    /// assert!(text.starts_with("System settings:"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.instructions.clone()),
            OutputFormat::Json => self.to_json(),
            OutputFormat::Profile => Ok(serde_json::to_string_pretty(&self.profile)?),
        }
    }
}
