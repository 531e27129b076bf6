//! Classifier Module
//!
//! シート名から分類を決定し、各行を型付きレコードに振り分けるモジュール。
//!
//! 列が不足している行や、どの分類にも該当しないシートでもエラーにはなりません。
//! 欠けている項目は空文字列として扱われます。

use serde::Serialize;

use crate::keywords::{Keywords, SheetCategory};
use crate::types::{cell_at, text_at, CellValue, SpreadsheetDocument, TabularSheet};

/// 単位列が空の場合の既定値
pub const DEFAULT_UNIT: &str = "kg";

/// FAQのカテゴリ列が空の場合の既定値
pub const DEFAULT_FAQ_CATEGORY: &str = "一般";

/// 商品レコード（商品シートの1行）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: String,
    pub price: String,
    pub unit: String,
    pub features: String,
    pub description: String,
    pub benefits: String,
    pub target: String,
}

impl ProductRecord {
    fn from_row(row: &[CellValue]) -> Self {
        Self {
            name: text_at(row, 0),
            price: text_at(row, 1),
            unit: text_or(row, 2, DEFAULT_UNIT),
            features: text_at(row, 3),
            description: text_at(row, 4),
            benefits: text_at(row, 5),
            target: text_at(row, 6),
        }
    }
}

/// 営業スクリプトレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesScriptRecord {
    pub situation: String,
    pub script: String,
    pub key_points: String,
    pub response: String,
}

impl SalesScriptRecord {
    fn from_row(row: &[CellValue]) -> Self {
        Self {
            situation: text_at(row, 0),
            script: text_at(row, 1),
            key_points: text_at(row, 2),
            response: text_at(row, 3),
        }
    }
}

/// FAQレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqRecord {
    pub question: String,
    pub answer: String,
    pub category: String,
}

impl FaqRecord {
    fn from_row(row: &[CellValue]) -> Self {
        Self {
            question: text_at(row, 0),
            answer: text_at(row, 1),
            category: text_or(row, 2, DEFAULT_FAQ_CATEGORY),
        }
    }
}

/// 分類できなかった行
///
/// 出典のシート名と、空白でないセルの内容を保持します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherRecord {
    pub sheet_name: String,
    pub non_empty_cells: Vec<String>,
}

/// 会社情報（キー → 値）
///
/// 挿入順を保持します。同じキーを再度挿入すると、位置はそのままで値が上書きされます。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompanyInfo {
    entries: Vec<(String, String)>,
}

impl CompanyInfo {
    /// 値を設定（既存キーは上書き）
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// キーで値を取得
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 挿入順にキーと値を返す
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 分類結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedContent {
    pub products: Vec<ProductRecord>,
    pub scripts: Vec<SalesScriptRecord>,
    pub company_info: CompanyInfo,
    pub faqs: Vec<FaqRecord>,
    pub others: Vec<OtherRecord>,
}

impl ClassifiedContent {
    /// いずれのレコードも抽出されなかったか
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
            && self.scripts.is_empty()
            && self.company_info.is_empty()
            && self.faqs.is_empty()
            && self.others.is_empty()
    }
}

/// ドキュメント全体を分類する
///
/// シートはドキュメント内の順序で処理され、各シートのヘッダー行（0行目）は読み飛ばされます。
pub fn classify(document: &SpreadsheetDocument, keywords: &Keywords) -> ClassifiedContent {
    let mut content = ClassifiedContent::default();

    for (sheet_name, sheet) in document.sheets() {
        let category = SheetCategory::of(sheet_name, keywords);
        let extracted = classify_sheet(sheet_name, sheet, category, &mut content);
        tracing::debug!(
            sheet = sheet_name,
            category = category.as_str(),
            records = extracted,
            "classified sheet"
        );
    }

    content
}

/// 1シート分のレコードを抽出し、抽出件数を返す
fn classify_sheet(
    sheet_name: &str,
    sheet: &TabularSheet,
    category: SheetCategory,
    content: &mut ClassifiedContent,
) -> usize {
    let rows = sheet.data_rows();

    match category {
        SheetCategory::Product => {
            let before = content.products.len();
            content.products.extend(
                rows.filter(|row| has_first_cell(row))
                    .map(ProductRecord::from_row),
            );
            content.products.len() - before
        }
        SheetCategory::Script => {
            let before = content.scripts.len();
            content.scripts.extend(
                rows.filter(|row| has_first_cell(row))
                    .map(SalesScriptRecord::from_row),
            );
            content.scripts.len() - before
        }
        SheetCategory::Company => {
            let mut count = 0;
            for row in rows {
                if cell_at(row, 0).is_empty() || cell_at(row, 1).is_empty() {
                    continue;
                }
                content
                    .company_info
                    .insert(text_at(row, 0), text_at(row, 1));
                count += 1;
            }
            count
        }
        SheetCategory::Faq => {
            let before = content.faqs.len();
            content.faqs.extend(
                rows.filter(|row| has_first_cell(row))
                    .map(FaqRecord::from_row),
            );
            content.faqs.len() - before
        }
        SheetCategory::Other => {
            let before = content.others.len();
            for row in rows {
                let non_empty_cells: Vec<String> = row
                    .iter()
                    .filter(|cell| !cell.is_blank())
                    .map(CellValue::as_text)
                    .collect();
                if non_empty_cells.is_empty() {
                    continue;
                }
                content.others.push(OtherRecord {
                    sheet_name: sheet_name.to_string(),
                    non_empty_cells,
                });
            }
            content.others.len() - before
        }
    }
}

fn has_first_cell(row: &&[CellValue]) -> bool {
    !cell_at(row, 0).is_empty()
}

fn text_or(row: &[CellValue], col: usize, default: &str) -> String {
    let cell = cell_at(row, col);
    if cell.is_empty() {
        default.to_string()
    } else {
        cell.as_text()
    }
}
