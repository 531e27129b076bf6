//! Keywords Module
//!
//! シート名・商品名の判定に使うキーワード表と、シート分類関数を定義するモジュール。
//! キーワード表はこのクレートの設定面であり、JSONから読み込むこともできます。
//!
//! 判定はすべて大文字小文字を区別する部分一致です。

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{AgentSheetError, Result};

/// シート名の判定条件
///
/// シート名が`name`と完全一致するか、`contains`のいずれかを含む場合に一致します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetMarker {
    /// 完全一致するシート名
    #[serde(default)]
    pub name: String,
    /// 部分一致するキーワード
    #[serde(default)]
    pub contains: Vec<String>,
}

impl SheetMarker {
    /// 判定条件を生成
    pub fn new(name: &str, contains: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            contains: contains.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// シート名が条件に一致するか
    pub fn matches(&self, sheet_name: &str) -> bool {
        (!self.name.is_empty() && sheet_name == self.name)
            || contains_any(sheet_name, &self.contains)
    }
}

/// 商品名から業種を推定するためのキーワード群
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFamily {
    /// 業種の識別名（例: `rice`）
    pub family: String,
    /// 商品名に含まれるキーワード
    pub keywords: Vec<String>,
    /// 一致した場合の担当者ロール
    pub role: String,
    /// 一致した場合に追加するターゲット顧客
    pub target_customers: Vec<String>,
}

impl ProductFamily {
    fn new(family: &str, keywords: &[&str], role: &str, target_customers: &[&str]) -> Self {
        Self {
            family: family.to_string(),
            keywords: to_strings(keywords),
            role: role.to_string(),
            target_customers: to_strings(target_customers),
        }
    }

    /// 商品名がこの業種に一致するか
    pub fn matches(&self, product_name: &str) -> bool {
        contains_any(product_name, &self.keywords)
    }
}

/// キーワード表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Keywords {
    /// 商品シート
    pub product_sheet: SheetMarker,
    /// 営業スクリプトシート
    pub script_sheet: SheetMarker,
    /// 会社情報シート
    pub company_sheet: SheetMarker,
    /// FAQシート
    pub faq_sheet: SheetMarker,
    /// 価格を探索するシート名のキーワード
    pub pricing_sheet: Vec<String>,
    /// 会社名を表す行キーのキーワード
    pub company_name_keys: Vec<String>,
    /// 価格とみなす通貨記号
    pub currency_markers: Vec<String>,
    /// 業種推定ルール（先頭から順に評価）
    pub product_families: Vec<ProductFamily>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            product_sheet: SheetMarker::new("商品情報", &["商品"]),
            script_sheet: SheetMarker::new("営業スクリプト", &["営業", "スクリプト"]),
            company_sheet: SheetMarker::new("会社情報", &["会社", "情報"]),
            faq_sheet: SheetMarker::new("FAQ・回答", &["FAQ", "質問"]),
            pricing_sheet: to_strings(&["商品", "価格"]),
            company_name_keys: to_strings(&["会社名", "社名"]),
            currency_markers: to_strings(&["円", "¥"]),
            product_families: vec![
                ProductFamily::new(
                    "rice",
                    &["米", "ライス", "ご飯"],
                    "米販売担当",
                    &["お弁当屋", "レストラン", "食堂"],
                ),
                ProductFamily::new(
                    "produce",
                    &["野菜", "キャベツ", "人参", "玉ねぎ"],
                    "野菜販売担当",
                    &["レストラン", "食堂", "スーパー", "青果店"],
                ),
                ProductFamily::new(
                    "meat",
                    &["肉", "牛肉", "豚肉", "鶏肉"],
                    "肉類販売担当",
                    &["レストラン", "食堂", "精肉店"],
                ),
                ProductFamily::new(
                    "seafood",
                    &["魚", "海鮮", "刺身"],
                    "海鮮販売担当",
                    &["寿司屋", "レストラン", "食堂"],
                ),
            ],
        }
    }
}

impl Keywords {
    /// JSONからキーワード表を読み込む
    ///
    /// 省略した項目はデフォルト値で補われます。
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// キーワード表の整合性を検証
    pub fn validate(&self) -> Result<()> {
        let markers = [
            ("productSheet", &self.product_sheet),
            ("scriptSheet", &self.script_sheet),
            ("companySheet", &self.company_sheet),
            ("faqSheet", &self.faq_sheet),
        ];
        for (label, marker) in markers {
            if marker.name.is_empty() && marker.contains.is_empty() {
                return Err(AgentSheetError::Config(format!(
                    "Sheet marker '{}' has neither a name nor keywords",
                    label
                )));
            }
            if marker.contains.iter().any(String::is_empty) {
                return Err(AgentSheetError::Config(format!(
                    "Sheet marker '{}' contains an empty keyword",
                    label
                )));
            }
        }

        for family in &self.product_families {
            if family.keywords.is_empty() || family.keywords.iter().any(String::is_empty) {
                return Err(AgentSheetError::Config(format!(
                    "Product family '{}' needs at least one non-empty keyword",
                    family.family
                )));
            }
            if family.role.is_empty() {
                return Err(AgentSheetError::Config(format!(
                    "Product family '{}' has an empty role",
                    family.family
                )));
            }
        }

        Ok(())
    }

    /// 商品シートかどうか
    pub fn is_product_sheet(&self, sheet_name: &str) -> bool {
        self.product_sheet.matches(sheet_name)
    }

    /// 営業スクリプトシートかどうか
    pub fn is_script_sheet(&self, sheet_name: &str) -> bool {
        self.script_sheet.matches(sheet_name)
    }

    /// 会社情報シートかどうか
    pub fn is_company_sheet(&self, sheet_name: &str) -> bool {
        self.company_sheet.matches(sheet_name)
    }

    /// FAQシートかどうか
    pub fn is_faq_sheet(&self, sheet_name: &str) -> bool {
        self.faq_sheet.matches(sheet_name)
    }

    /// 価格探索の対象シートかどうか
    pub fn is_pricing_sheet(&self, sheet_name: &str) -> bool {
        contains_any(sheet_name, &self.pricing_sheet)
    }

    /// 会社名を表す行キーかどうか（キーは小文字化して比較）
    pub fn is_company_name_key(&self, key: &str) -> bool {
        contains_any(&key.to_lowercase(), &self.company_name_keys)
    }

    /// 通貨記号を含むかどうか
    pub fn has_currency_marker(&self, value: &str) -> bool {
        contains_any(value, &self.currency_markers)
    }

    /// 商品名に最初に一致する業種ルール
    pub fn match_family(&self, product_name: &str) -> Option<&ProductFamily> {
        self.product_families
            .iter()
            .find(|family| family.matches(product_name))
    }
}

/// シートの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetCategory {
    /// 商品情報
    Product,
    /// 営業スクリプト
    Script,
    /// 会社情報
    Company,
    /// よくある質問
    Faq,
    /// いずれにも該当しない
    Other,
}

impl SheetCategory {
    /// シート名から分類を決定する
    ///
    /// 商品 → スクリプト → 会社情報 → FAQ の順に評価し、最初に一致した分類を返します。
    pub fn of(sheet_name: &str, keywords: &Keywords) -> Self {
        if keywords.is_product_sheet(sheet_name) {
            SheetCategory::Product
        } else if keywords.is_script_sheet(sheet_name) {
            SheetCategory::Script
        } else if keywords.is_company_sheet(sheet_name) {
            SheetCategory::Company
        } else if keywords.is_faq_sheet(sheet_name) {
            SheetCategory::Faq
        } else {
            SheetCategory::Other
        }
    }

    /// ログ出力用の名前
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetCategory::Product => "product",
            SheetCategory::Script => "script",
            SheetCategory::Company => "company",
            SheetCategory::Faq => "faq",
            SheetCategory::Other => "other",
        }
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| !needle.is_empty() && haystack.contains(needle.as_str()))
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
