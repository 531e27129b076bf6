//! agentsheet - 営業用スプレッドシートから音声エージェントの指示文を生成する
//!
//! 商品・営業スクリプト・会社情報・FAQを含むスプレッドシートを読み込み、
//! シートの内容を分類して営業担当者のプロファイルを推定し、
//! 音声エージェントにそのまま渡せる指示文を生成します。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use agentsheet::AnalyzerBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = AnalyzerBuilder::new().build()?;
//!     let config = analyzer.analyze_path("営業データ.xlsx")?;
//!
//!     println!("{}", config.profile.role);
//!     println!("{}", config.instructions);
//!     Ok(())
//! }
//! ```
//!
//! 読み込み済みのドキュメントを直接解析することもできます:
//!
//! ```rust
//! use agentsheet::{AnalyzerBuilder, CellValue, SpreadsheetDocument, TabularSheet};
//!
//! # fn main() -> Result<(), agentsheet::AgentSheetError> {
//! let document = SpreadsheetDocument::new("rice.xlsx").with_sheet(
//!     "商品情報",
//!     TabularSheet::new(vec![
//!         vec![CellValue::from("商品名"), CellValue::from("価格")],
//!         vec![CellValue::from("新潮米"), CellValue::from("500円/kg")],
//!     ]),
//! );
//!
//! let config = AnalyzerBuilder::new().build()?.analyze_document(&document);
//! assert_eq!(config.profile.role, "米販売担当");
//! assert!(config.instructions.contains("エックス商事"));
//! # Ok(())
//! # }
//! ```
//!
//! # Pipeline
//!
//! 1. `parser`: calamine（CSVはcsvクレート）でシートをセルグリッドに展開
//! 2. `classifier`: シート名で分類し、行をレコードに振り分け
//! 3. `profile`: 商品名から業種を推定してプロファイルを構築
//! 4. `render`: テンプレートに埋め込んで指示文を生成
//! 5. `context`: 分類ごとのモード説明を末尾に追加

mod api;
mod builder;
mod classifier;
mod context;
mod error;
mod keywords;
pub mod logging;
mod parser;
mod profile;
mod render;
mod security;
mod types;

// 公開API
pub use api::{AgentConfig, OutputFormat};
pub use builder::{Analyzer, AnalyzerBuilder};
pub use classifier::{
    classify, ClassifiedContent, CompanyInfo, FaqRecord, OtherRecord, ProductRecord,
    SalesScriptRecord,
};
pub use context::{annotate, ContentSummary};
pub use error::{AgentSheetError, Result};
pub use keywords::{Keywords, ProductFamily, SheetCategory, SheetMarker};
pub use profile::{
    BusinessProfile, BusinessProfiler, DEFAULT_COMPANY, DEFAULT_CUSTOMER, DEFAULT_PRODUCT,
    DEFAULT_ROLE, DELIVERY_TERMS, PAYMENT_TERMS,
};
pub use render::{render_data_summary, render_instructions};
pub use types::{CellValue, SpreadsheetDocument, TabularSheet};
