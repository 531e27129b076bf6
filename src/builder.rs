//! Builder Module
//!
//! Fluent Builder APIを提供し、`Analyzer`インスタンスを段階的に構築する。

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use crate::api::AgentConfig;
use crate::classifier::classify;
use crate::context::annotate;
use crate::error::{AgentSheetError, Result};
use crate::keywords::Keywords;
use crate::parser::load_document;
use crate::profile::{BusinessProfiler, DEFAULT_COMPANY, DEFAULT_ROLE};
use crate::render::{render_data_summary, render_instructions};
use crate::security::SecurityConfig;
use crate::types::SpreadsheetDocument;

/// 解析処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct AnalysisConfig {
    /// キーワード表
    pub keywords: Keywords,

    /// 会社名が見つからない場合の会社名
    pub default_company: String,

    /// 業種が推定できない場合のロール
    pub default_role: String,

    /// 指示文に分類済みレコードの一覧を含めるか
    pub include_data_summary: bool,

    /// 指示文にモード説明を含めるか
    pub include_context: bool,

    /// 入力ファイルの制限
    pub security: SecurityConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            keywords: Keywords::default(),
            default_company: DEFAULT_COMPANY.to_string(),
            default_role: DEFAULT_ROLE.to_string(),
            include_data_summary: true,
            include_context: true,
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use agentsheet::AnalyzerBuilder;
///
/// # fn main() -> Result<(), agentsheet::AgentSheetError> {
/// let analyzer = AnalyzerBuilder::new()
///     .with_default_company("ワイ物産")
///     .include_data_summary(false)
///     .build()?;
/// let config = analyzer.analyze_path("sales.xlsx")?;
/// println!("{}", config.instructions);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AnalyzerBuilder {
    config: AnalysisConfig,
}

impl AnalyzerBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - キーワード表: `Keywords::default()`
    /// - 会社名: エックス商事
    /// - ロール: 営業担当
    /// - レコード一覧・モード説明: 含める
    /// - 入力サイズ上限: 100MB
    pub fn new() -> Self {
        Self::default()
    }

    /// キーワード表を指定する
    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.config.keywords = keywords;
        self
    }

    /// 会社情報シートに会社名がない場合の会社名を指定する
    pub fn with_default_company(mut self, company: impl Into<String>) -> Self {
        self.config.default_company = company.into();
        self
    }

    /// 業種が推定できない場合のロールを指定する
    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.config.default_role = role.into();
        self
    }

    /// 指示文に分類済みレコードの一覧を含めるかを指定する
    pub fn include_data_summary(mut self, include: bool) -> Self {
        self.config.include_data_summary = include;
        self
    }

    /// 指示文にモード説明を含めるかを指定する
    pub fn include_context(mut self, include: bool) -> Self {
        self.config.include_context = include;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security = SecurityConfig::with_max_input_size(bytes);
        self
    }

    /// 設定を検証し、`Analyzer`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `AgentSheetError::Config(String)`: 設定の検証に失敗した場合
    ///   * 会社名またはロールが空
    ///   * 入力サイズ上限が0
    ///   * キーワード表に空の条件が含まれる
    pub fn build(self) -> Result<Analyzer> {
        if self.config.default_company.trim().is_empty() {
            return Err(AgentSheetError::Config(
                "Default company name must not be empty".to_string(),
            ));
        }

        if self.config.default_role.trim().is_empty() {
            return Err(AgentSheetError::Config(
                "Default role must not be empty".to_string(),
            ));
        }

        if self.config.security.max_input_file_size == 0 {
            return Err(AgentSheetError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        self.config.keywords.validate()?;

        Ok(Analyzer::new(self.config))
    }
}

/// 解析処理のファサード
///
/// スプレッドシートを読み込み、分類・プロファイル推定・指示文生成を順に実行します。
/// 構築後は不変であり、複数スレッドから共有して使用できます。
#[derive(Debug)]
pub struct Analyzer {
    config: AnalysisConfig,
    profiler: BusinessProfiler,
}

impl Analyzer {
    pub(crate) fn new(config: AnalysisConfig) -> Self {
        let profiler = BusinessProfiler::new(config.keywords.clone())
            .with_default_company(config.default_company.clone())
            .with_default_role(config.default_role.clone());
        Self { config, profiler }
    }

    /// スプレッドシートを読み込んで解析する
    ///
    /// # 引数
    ///
    /// * `input` - スプレッドシートを読み込むためのリーダー
    /// * `file_name` - レコード一覧の見出しに使うファイル名
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use agentsheet::AnalyzerBuilder;
    /// use std::io::Cursor;
    ///
    /// # fn main() -> Result<(), agentsheet::AgentSheetError> {
    /// let analyzer = AnalyzerBuilder::new().build()?;
    /// let bytes: Vec<u8> = std::fs::read("sales.xlsx")?;
    /// let config = analyzer.analyze(Cursor::new(bytes), "sales.xlsx")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn analyze<R: Read + Seek>(&self, input: R, file_name: &str) -> Result<AgentConfig> {
        let document = self.load(input, file_name)?;
        Ok(self.analyze_document(&document))
    }

    /// ファイルパスを指定して解析する
    pub fn analyze_path<P: AsRef<Path>>(&self, path: P) -> Result<AgentConfig> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let file = File::open(path)?;
        self.analyze(file, &file_name)
    }

    /// スプレッドシートを読み込み、解析前のドキュメントを返す
    pub fn load<R: Read + Seek>(&self, input: R, file_name: &str) -> Result<SpreadsheetDocument> {
        load_document(input, file_name, &self.config.security)
    }

    /// 読み込み済みのドキュメントを解析する
    ///
    /// この処理は失敗しません。
    pub fn analyze_document(&self, document: &SpreadsheetDocument) -> AgentConfig {
        let keywords = &self.config.keywords;

        let records = classify(document, keywords);
        let profile = self.profiler.profile(document);
        let base_instructions = render_instructions(&profile);
        let data_summary = self
            .config
            .include_data_summary
            .then(|| render_data_summary(&records, document.file_name()));
        let context = if self.config.include_context {
            annotate(document, keywords)
        } else {
            String::new()
        };

        let mut instructions = base_instructions.clone();
        if let Some(summary) = &data_summary {
            instructions.push_str("\n\n");
            instructions.push_str(summary);
        }
        instructions.push_str(&context);

        tracing::info!(
            file = document.file_name(),
            sheets = document.sheet_count(),
            role = %profile.role,
            products = profile.products.len(),
            "analysis completed"
        );

        AgentConfig {
            file_name: document.file_name().to_string(),
            profile,
            records,
            base_instructions,
            data_summary,
            context,
            instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, TabularSheet};

    fn rice_document() -> SpreadsheetDocument {
        SpreadsheetDocument::new("rice.xlsx").with_sheet(
            "商品情報",
            TabularSheet::new(vec![
                vec![CellValue::from("商品名"), CellValue::from("価格")],
                vec![CellValue::from("新潮米"), CellValue::from("500円/kg")],
            ]),
        )
    }

    #[test]
    fn test_builder_defaults() {
        let builder = AnalyzerBuilder::new();
        assert_eq!(builder.config.default_company, DEFAULT_COMPANY);
        assert_eq!(builder.config.default_role, DEFAULT_ROLE);
        assert!(builder.config.include_data_summary);
        assert!(builder.config.include_context);
        assert_eq!(builder.config.keywords, Keywords::default());
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = AnalyzerBuilder::new()
            .with_default_company("ワイ物産")
            .with_default_role("販売担当")
            .include_data_summary(false)
            .include_context(false)
            .with_max_input_size(1024);

        assert_eq!(builder.config.default_company, "ワイ物産");
        assert_eq!(builder.config.default_role, "販売担当");
        assert!(!builder.config.include_data_summary);
        assert!(!builder.config.include_context);
        assert_eq!(builder.config.security.max_input_file_size, 1024);
    }

    #[test]
    fn test_build_rejects_empty_company() {
        match AnalyzerBuilder::new().with_default_company("  ").build() {
            Err(AgentSheetError::Config(msg)) => assert!(msg.contains("company")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_build_rejects_zero_input_size() {
        let result = AnalyzerBuilder::new().with_max_input_size(0).build();
        assert!(matches!(result, Err(AgentSheetError::Config(_))));
    }

    #[test]
    fn test_build_rejects_invalid_keywords() {
        let mut keywords = Keywords::default();
        keywords.product_families[1].role.clear();
        let result = AnalyzerBuilder::new().with_keywords(keywords).build();
        assert!(matches!(result, Err(AgentSheetError::Config(_))));
    }

    #[test]
    fn test_analyze_document_composes_instructions() {
        let analyzer = AnalyzerBuilder::new().build().unwrap();
        let config = analyzer.analyze_document(&rice_document());

        assert_eq!(config.profile.role, "米販売担当");
        assert!(config.instructions.starts_with(&config.base_instructions));
        let summary = config.data_summary.as_deref().unwrap();
        assert!(summary.starts_with("=== 営業データベース (rice.xlsx) ==="));
        assert!(config.instructions.contains(summary));
        assert!(config.instructions.ends_with(&config.context));
        assert!(config.context.contains("- 1種類の商品データが利用可能です"));
    }

    #[test]
    fn test_analyze_document_without_extras() {
        let analyzer = AnalyzerBuilder::new()
            .include_data_summary(false)
            .include_context(false)
            .build()
            .unwrap();
        let config = analyzer.analyze_document(&rice_document());

        assert!(config.data_summary.is_none());
        assert_eq!(config.context, "");
        assert_eq!(config.instructions, config.base_instructions);
    }

    #[test]
    fn test_custom_company_flows_into_instructions() {
        let analyzer = AnalyzerBuilder::new()
            .with_default_company("ワイ物産")
            .build()
            .unwrap();
        let config = analyzer.analyze_document(&rice_document());
        assert!(config.instructions.contains("- You are 米販売担当 from ワイ物産"));
    }

    #[test]
    fn test_analyze_invalid_input() {
        let analyzer = AnalyzerBuilder::new().build().unwrap();
        let result = analyzer.analyze(std::io::Cursor::new(Vec::<u8>::new()), "empty.xlsx");
        assert!(result.is_err());
    }

    #[test]
    fn test_analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
    }
}
