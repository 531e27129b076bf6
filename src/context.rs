//! Context Module
//!
//! シートの分類ごとに件数を集計し、指示文の末尾に付け加えるモード説明を生成するモジュール。
//! 分類器を通さずにシート名だけで判定するため、分類結果がなくても動作します。

use crate::keywords::{Keywords, SheetCategory};
use crate::types::SpreadsheetDocument;

/// 分類ごとの有無と件数
///
/// 件数はヘッダー行を除いた行数です（空行も数える）。
/// 同じ分類のシートが複数ある場合は、最後のシートの件数になります。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentSummary {
    pub has_products: bool,
    pub product_count: usize,
    pub has_scripts: bool,
    pub script_count: usize,
    pub has_company_info: bool,
    pub has_faq: bool,
    pub faq_count: usize,
}

impl ContentSummary {
    /// ドキュメントのシート名から集計する
    pub fn of(document: &SpreadsheetDocument, keywords: &Keywords) -> Self {
        let mut summary = Self::default();

        for (sheet_name, sheet) in document.sheets() {
            match SheetCategory::of(sheet_name, keywords) {
                SheetCategory::Product => {
                    summary.has_products = true;
                    summary.product_count = sheet.data_row_count();
                }
                SheetCategory::Script => {
                    summary.has_scripts = true;
                    summary.script_count = sheet.data_row_count();
                }
                SheetCategory::Company => summary.has_company_info = true,
                SheetCategory::Faq => {
                    summary.has_faq = true;
                    summary.faq_count = sheet.data_row_count();
                }
                SheetCategory::Other => {}
            }
        }

        summary
    }

    /// モード説明のテキストを生成する（該当する分類がなければ空文字列）
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.has_products {
            out.push_str(&format!(
                "\n=== 商品販売モード ===\n\
                 - {}種類の商品データが利用可能です\n\
                 - お客様のニーズに応じて適切な商品を紹介してください\n\
                 - 価格、特徴、メリットを自然に会話に織り込んでください\n",
                self.product_count
            ));
        }

        if self.has_scripts {
            out.push_str(&format!(
                "\n=== 営業会話モード ===\n\
                 - {}種類の会話パターンが利用可能です\n\
                 - お客様の反応に応じて適切な会話パターンを参考にしてください\n\
                 - スクリプトをそのまま読まず、自然に会話してください\n",
                self.script_count
            ));
        }

        if self.has_company_info {
            out.push_str(
                "\n=== 会社情報モード ===\n\
                 - 会社の信頼性を示す情報が利用可能です\n\
                 - 必要に応じて会社情報を自然に会話に含めてください\n",
            );
        }

        if self.has_faq {
            out.push_str(&format!(
                "\n=== FAQ対応モード ===\n\
                 - {}種類のよくある質問への回答が利用可能です\n\
                 - お客様の質問に対して適切な回答を提供してください\n",
                self.faq_count
            ));
        }

        out
    }
}

/// ドキュメントからモード説明を生成する
pub fn annotate(document: &SpreadsheetDocument, keywords: &Keywords) -> String {
    ContentSummary::of(document, keywords).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, TabularSheet};

    fn rows(n: usize) -> TabularSheet {
        TabularSheet::new((0..n).map(|i| vec![CellValue::from(i as f64)]).collect())
    }

    #[test]
    fn test_empty_document_has_no_annotation() {
        assert_eq!(annotate(&SpreadsheetDocument::new("e.xlsx"), &Keywords::default()), "");
    }

    #[test]
    fn test_product_count_excludes_header() {
        let doc = SpreadsheetDocument::new("a.xlsx").with_sheet("商品情報", rows(4));
        let text = annotate(&doc, &Keywords::default());
        assert!(text.starts_with("\n=== 商品販売モード ===\n- 3種類の商品データが利用可能です\n"));
    }

    #[test]
    fn test_header_only_and_empty_sheets_count_zero() {
        let doc = SpreadsheetDocument::new("a.xlsx")
            .with_sheet("商品", rows(1))
            .with_sheet("FAQ", TabularSheet::default());
        let summary = ContentSummary::of(&doc, &Keywords::default());
        assert!(summary.has_products);
        assert_eq!(summary.product_count, 0);
        assert!(summary.has_faq);
        assert_eq!(summary.faq_count, 0);
    }

    #[test]
    fn test_last_sheet_of_category_sets_count() {
        let doc = SpreadsheetDocument::new("a.xlsx")
            .with_sheet("営業スクリプト", rows(6))
            .with_sheet("営業トーク", rows(3));
        let summary = ContentSummary::of(&doc, &Keywords::default());
        assert_eq!(summary.script_count, 2);
    }

    #[test]
    fn test_all_modes_in_order() {
        let doc = SpreadsheetDocument::new("a.xlsx")
            .with_sheet("FAQ・回答", rows(3))
            .with_sheet("会社情報", rows(2))
            .with_sheet("営業スクリプト", rows(2))
            .with_sheet("商品情報", rows(2))
            .with_sheet("メモ", rows(9));
        let text = annotate(&doc, &Keywords::default());

        let order = ["商品販売モード", "営業会話モード", "会社情報モード", "FAQ対応モード"];
        let positions: Vec<usize> = order.iter().map(|m| text.find(m).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("- 2種類のよくある質問への回答が利用可能です\n"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_count_is_rows_minus_header(n in 0usize..50) {
                let doc = SpreadsheetDocument::new("p.xlsx").with_sheet("商品", rows(n));
                let summary = ContentSummary::of(&doc, &Keywords::default());
                prop_assert_eq!(summary.product_count, n.saturating_sub(1));
            }
        }
    }
}
