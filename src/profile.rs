//! Profile Module
//!
//! 商品名から業種を推定し、営業担当者のプロファイルを組み立てるモジュール。
//!
//! プロファイラは分類済みレコードではなく生のシートを走査します。
//! 商品名（0列目）と価格（1列目）だけを参照するためです。

use serde::Serialize;

use crate::keywords::Keywords;
use crate::types::{cell_at, text_at, SpreadsheetDocument};

/// 既定の担当者ロール
pub const DEFAULT_ROLE: &str = "営業担当";

/// 既定の会社名
pub const DEFAULT_COMPANY: &str = "エックス商事";

/// 商品が1件も見つからなかった場合の商品名
pub const DEFAULT_PRODUCT: &str = "高品質な商品";

/// ターゲット顧客が推定できなかった場合の顧客名
pub const DEFAULT_CUSTOMER: &str = "お客様";

/// 配送条件（シートの内容にかかわらず固定）
pub const DELIVERY_TERMS: &str = "全国配送対応、関東圏内は翌日配送";

/// 支払条件（シートの内容にかかわらず固定）
pub const PAYMENT_TERMS: &str = "月末締め翌月20日払いの掛取引";

/// 営業アプローチのルール（ロールに含まれる文字列 → 方針と訴求点）
struct ApproachRule {
    role_marker: Option<&'static str>,
    sales_approach: [&'static str; 4],
    key_features: [&'static str; 4],
}

/// 先頭から順に評価し、最後の要素は必ず一致する
const APPROACH_RULES: &[ApproachRule] = &[
    ApproachRule {
        role_marker: Some("野菜"),
        sales_approach: [
            "新鮮な野菜の品質をアピール",
            "産地直送のメリットを説明",
            "季節の野菜の提案",
            "栄養価の高さを強調",
        ],
        key_features: ["新鮮さ", "産地直送", "季節感", "栄養価"],
    },
    ApproachRule {
        role_marker: Some("肉"),
        sales_approach: [
            "肉の品質と安全性をアピール",
            "トレーサビリティの説明",
            "調理方法の提案",
            "保存方法のアドバイス",
        ],
        key_features: ["品質", "安全性", "トレーサビリティ", "鮮度"],
    },
    ApproachRule {
        role_marker: Some("海鮮"),
        sales_approach: [
            "鮮度の良さをアピール",
            "産地の説明",
            "調理方法の提案",
            "保存方法のアドバイス",
        ],
        key_features: ["鮮度", "産地", "品質", "安全性"],
    },
    ApproachRule {
        role_marker: None,
        sales_approach: [
            "商品の品質をアピール",
            "お客様のニーズに合わせた提案",
            "価格の妥当性を説明",
            "アフターサービスの充実",
        ],
        key_features: ["品質", "価格", "サービス", "信頼性"],
    },
];

fn approach_for(role: &str) -> &'static ApproachRule {
    APPROACH_RULES
        .iter()
        .find(|rule| rule.role_marker.map_or(true, |marker| role.contains(marker)))
        .unwrap_or(&APPROACH_RULES[APPROACH_RULES.len() - 1])
}

/// 推定された営業担当者のプロファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub role: String,
    pub company: String,
    pub products: Vec<String>,
    /// 重複は除去しない（複数商品が同じ業種に一致すると同じ顧客が繰り返し現れる）
    pub target_customers: Vec<String>,
    pub sales_approach: Vec<String>,
    pub key_features: Vec<String>,
    /// 価格が見つからなかった場合は空文字列
    pub pricing: String,
    pub delivery: String,
    pub payment: String,
}

/// ビジネスプロファイラ
#[derive(Debug, Clone)]
pub struct BusinessProfiler {
    keywords: Keywords,
    default_role: String,
    default_company: String,
}

impl Default for BusinessProfiler {
    fn default() -> Self {
        Self::new(Keywords::default())
    }
}

impl BusinessProfiler {
    /// キーワード表を指定してプロファイラを生成
    pub fn new(keywords: Keywords) -> Self {
        Self {
            keywords,
            default_role: DEFAULT_ROLE.to_string(),
            default_company: DEFAULT_COMPANY.to_string(),
        }
    }

    /// 会社名シートが無い場合に使う会社名を指定
    pub fn with_default_company(mut self, company: impl Into<String>) -> Self {
        self.default_company = company.into();
        self
    }

    /// 業種が推定できなかった場合のロールを指定
    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.default_role = role.into();
        self
    }

    /// ドキュメントからプロファイルを推定する
    ///
    /// # 推定ルール
    ///
    /// - 商品シートの各行の商品名を業種ルールと照合し、一致した行ごとにロールを上書きする
    ///   （最後に一致した行のロールが残る）
    /// - 会社情報シートで会社名を表すキーの行があれば会社名を上書きする
    /// - 価格シートごとに最初に通貨記号を含む価格を採用する
    ///   （複数のシートで見つかった場合は後のシートが上書きする）
    /// - 配送条件と支払条件は常に固定値
    pub fn profile(&self, document: &SpreadsheetDocument) -> BusinessProfile {
        let mut role = self.default_role.clone();
        let mut company = self.default_company.clone();
        let mut products = Vec::new();
        let mut target_customers = Vec::new();
        let mut pricing: Option<String> = None;

        for (sheet_name, sheet) in document.sheets() {
            if self.keywords.is_product_sheet(sheet_name) {
                for row in sheet.data_rows() {
                    if cell_at(row, 0).is_empty() {
                        continue;
                    }
                    let product_name = text_at(row, 0);

                    if let Some(family) = self.keywords.match_family(&product_name) {
                        tracing::debug!(
                            product = %product_name,
                            family = %family.family,
                            "matched product family"
                        );
                        role = family.role.clone();
                        target_customers.extend(family.target_customers.iter().cloned());
                    }
                    products.push(product_name);
                }
            }

            if self.keywords.is_company_sheet(sheet_name) {
                for row in sheet.data_rows() {
                    if cell_at(row, 0).is_empty() || cell_at(row, 1).is_empty() {
                        continue;
                    }
                    if self.keywords.is_company_name_key(&text_at(row, 0)) {
                        company = text_at(row, 1);
                    }
                }
            }

            if self.keywords.is_pricing_sheet(sheet_name) {
                let found = sheet
                    .data_rows()
                    .filter(|row| !cell_at(row, 1).is_empty())
                    .map(|row| text_at(row, 1))
                    .find(|price| self.keywords.has_currency_marker(price));
                if let Some(price) = found {
                    pricing = Some(format!("価格は{}からとなっております", price));
                }
            }
        }

        if products.is_empty() {
            products.push(DEFAULT_PRODUCT.to_string());
        }
        if target_customers.is_empty() {
            target_customers.push(DEFAULT_CUSTOMER.to_string());
        }

        let approach = approach_for(&role);

        BusinessProfile {
            role,
            company,
            products,
            target_customers,
            sales_approach: approach.sales_approach.iter().map(|s| s.to_string()).collect(),
            key_features: approach.key_features.iter().map(|s| s.to_string()).collect(),
            pricing: pricing.unwrap_or_default(),
            delivery: DELIVERY_TERMS.to_string(),
            payment: PAYMENT_TERMS.to_string(),
        }
    }
}
