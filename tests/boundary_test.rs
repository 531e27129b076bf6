//! Boundary Tests for agentsheet
//!
//! Empty sheets, header-only sheets, sparse rows and other edge shapes a real
//! sales workbook tends to have.

use rust_xlsxwriter::*;
use std::io::Cursor;
use agentsheet::{AgentConfig, AnalyzerBuilder, DEFAULT_COMPANY, DEFAULT_PRODUCT, DEFAULT_ROLE};

// Helper module for generating boundary test fixtures
mod fixtures {
    use super::*;

    /// Generate a workbook whose only sheet is empty
    pub fn generate_empty_sheet(name: &str) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a product sheet with only a header row
    pub fn generate_header_only() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("商品情報")?;
        worksheet.write_string(0, 0, "商品名")?;
        worksheet.write_string(0, 1, "価格")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a product sheet with gaps between rows
    pub fn generate_sparse_rows() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("商品情報")?;
        worksheet.write_string(0, 0, "商品名")?;
        worksheet.write_string(1, 0, "玉ねぎ")?;
        // Row 2 only has a price, rows 3-9 are missing
        worksheet.write_string(2, 1, "100円")?;
        worksheet.write_string(10, 0, "人参")?;
        worksheet.write_string(10, 6, "八百屋")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a product sheet with many rows
    pub fn generate_many_products(count: u32) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("商品")?;
        worksheet.write_string(0, 0, "商品名")?;
        for i in 1..=count {
            worksheet.write_string(i, 0, &format!("商品{}", i))?;
        }
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a company sheet whose name row has no value
    pub fn generate_company_without_name() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("会社情報")?;
        worksheet.write_string(0, 0, "項目")?;
        worksheet.write_string(1, 0, "会社名")?;
        worksheet.write_string(2, 0, "所在地")?;
        worksheet.write_string(2, 1, "札幌市")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate an unclassified sheet with whitespace-only cells
    pub fn generate_whitespace_cells() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("メモ")?;
        worksheet.write_string(0, 0, "見出し")?;
        worksheet.write_string(1, 0, "   ")?;
        worksheet.write_string(1, 1, "\t")?;
        worksheet.write_string(2, 0, "休業日")?;
        worksheet.write_string(2, 2, "土日祝")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate sheets whose names hit several categories at once
    pub fn generate_ambiguous_names() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name("営業情報")?;
        sheet.write_string(0, 0, "状況")?;
        sheet.write_string(1, 0, "受付")?;

        let sheet = workbook.add_worksheet();
        sheet.set_name("商品に関する質問")?;
        sheet.write_string(0, 0, "商品名")?;
        sheet.write_string(1, 0, "牛肉")?;

        Ok(workbook.save_to_buffer()?)
    }
}

fn analyze(data: Vec<u8>) -> AgentConfig {
    AnalyzerBuilder::new()
        .build()
        .unwrap()
        .analyze(Cursor::new(data), "boundary.xlsx")
        .unwrap()
}

#[test]
fn test_empty_unclassified_sheet() {
    let config = analyze(fixtures::generate_empty_sheet("Sheet1").unwrap());

    assert!(config.records.is_empty());
    assert_eq!(config.context, "");
    assert_eq!(config.profile.role, DEFAULT_ROLE);
    assert_eq!(config.profile.company, DEFAULT_COMPANY);
    assert_eq!(config.profile.products, vec![DEFAULT_PRODUCT]);
    assert_eq!(
        config.data_summary.as_deref(),
        Some("=== 営業データベース (boundary.xlsx) ===\n\n")
    );
}

#[test]
fn test_empty_product_sheet_still_announces_mode() {
    let config = analyze(fixtures::generate_empty_sheet("商品情報").unwrap());

    assert!(config.records.products.is_empty());
    assert!(config.context.contains("- 0種類の商品データが利用可能です"));
}

#[test]
fn test_header_only_sheet() {
    let config = analyze(fixtures::generate_header_only().unwrap());

    assert!(config.records.products.is_empty());
    assert_eq!(config.profile.products, vec![DEFAULT_PRODUCT]);
    assert_eq!(config.profile.target_customers, vec!["お客様"]);
    assert_eq!(config.profile.pricing, "");
    assert!(config.context.contains("- 0種類の商品データが利用可能です"));
}

#[test]
fn test_sparse_rows() {
    let config = analyze(fixtures::generate_sparse_rows().unwrap());
    let products = &config.records.products;

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "玉ねぎ");
    assert_eq!(products[1].name, "人参");
    assert_eq!(products[1].target, "八百屋");
    assert_eq!(config.profile.role, "野菜販売担当");
    // The orphan price row has no product name but is still a pricing candidate
    assert_eq!(config.profile.pricing, "価格は100円からとなっております");
    // Every row below the header is counted, including blank ones
    assert!(config.context.contains("- 10種類の商品データが利用可能です"));
}

#[test]
fn test_many_products() {
    let config = analyze(fixtures::generate_many_products(1000).unwrap());

    assert_eq!(config.records.products.len(), 1000);
    assert_eq!(config.profile.products.len(), 1000);
    assert_eq!(config.profile.products[999], "商品1000");
    assert!(config.context.contains("- 1000種類の商品データが利用可能です"));
}

#[test]
fn test_company_row_without_value_is_ignored() {
    let config = analyze(fixtures::generate_company_without_name().unwrap());

    assert_eq!(config.profile.company, DEFAULT_COMPANY);
    assert_eq!(config.records.company_info.len(), 1);
    assert_eq!(config.records.company_info.get("所在地"), Some("札幌市"));
    assert!(config.context.contains("=== 会社情報モード ==="));
}

#[test]
fn test_whitespace_cells_are_dropped_from_other_rows() {
    let config = analyze(fixtures::generate_whitespace_cells().unwrap());
    let others = &config.records.others;

    assert_eq!(others.len(), 1);
    assert_eq!(others[0].sheet_name, "メモ");
    assert_eq!(others[0].non_empty_cells, vec!["休業日", "土日祝"]);
}

#[test]
fn test_ambiguous_sheet_names_use_first_category() {
    let config = analyze(fixtures::generate_ambiguous_names().unwrap());

    assert_eq!(config.records.scripts.len(), 1);
    assert_eq!(config.records.scripts[0].situation, "受付");
    assert_eq!(config.records.products.len(), 1);
    assert!(config.records.faqs.is_empty());
    assert!(config.records.company_info.is_empty());
    assert_eq!(config.profile.role, "肉類販売担当");
}
