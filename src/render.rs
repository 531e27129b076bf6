//! Render Module
//!
//! プロファイルから音声エージェント向けの指示文を生成するモジュール。
//! あわせて、分類済みレコードを人が読める形式で書き出す診断用の出力も提供します。
//!
//! どちらも純粋関数であり、同じ入力からは常に同じ文字列を生成します。
//! 値のエスケープは行いません。

use std::fmt::Write;

use crate::classifier::ClassifiedContent;
use crate::profile::BusinessProfile;

/// リスト項目の区切り文字
pub const LIST_SEPARATOR: &str = "、";

/// プロファイルを指示文テンプレートに埋め込む
///
/// リスト項目は`、`で連結し、文字列項目はそのまま埋め込みます。
pub fn render_instructions(profile: &BusinessProfile) -> String {
    let role = &profile.role;
    let company = &profile.company;
    let products = profile.products.join(LIST_SEPARATOR);
    let customers = profile.target_customers.join(LIST_SEPARATOR);
    let features = profile.key_features.join(LIST_SEPARATOR);
    let pricing = &profile.pricing;
    let payment = &profile.payment;
    let delivery = &profile.delivery;

    format!(
        "System settings:
Tool use: enabled.

Instructions:
- You are {role} from {company}
- You MUST respond ONLY in native Japanese (日本語)
- Never use English or any other language - only Japanese
- You are calling {customers} to introduce {products}
- Be professional, friendly, and sales-oriented
- Use natural Japanese business conversation patterns
- Focus on {products} sales and product information
- Be persistent but not pushy
- Always maintain a professional tone
- WAIT for user responses before continuing - don't read long scripts
- Respond naturally to what the user says
- Keep responses concise and conversational

Personality:
- Professional and courteous (礼儀正しく、プロフェッショナル)
- Friendly but business-focused (親しみやすいがビジネス重視)
- Use natural Japanese business expressions
- Speak clearly and at a moderate pace
- Show enthusiasm for your products
- Be conversational, not scripted

Sales Approach:
- Start with a brief, polite introduction
- Introduce yourself as {role} from {company}
- Explain that you sell {products} to {customers}
- Present your recommended products briefly
- Focus on: {features}
- Offer free samples
- Listen to user responses and respond appropriately
- Handle objections professionally
- Collect customer information naturally through conversation
- Don't read long scripts - have natural dialogue

Product Knowledge:
- You sell {products} specifically for {customers}
- Main products include: {products}
- {pricing}
- Minimum order varies by product
- Payment terms: {payment}
- Delivery: {delivery}
- Orders via email
- Closed on weekends and holidays

IMPORTANT:\x20
- You are a {role} waiting for the customer to speak first
- Wait for the user to say something before responding
- When the user speaks, respond naturally and professionally
- Don't start the conversation automatically - let the user initiate
- Respond to what the user actually says
- Keep the conversation natural and interactive
- Be ready to help when the user speaks
- Use the spreadsheet data to provide accurate, relevant information"
    )
}

/// 分類済みレコードを見出し付きのテキストとして書き出す
///
/// レコードが1件もない区分は見出しごと省略し、空の項目は行を出力しません。
pub fn render_data_summary(content: &ClassifiedContent, file_name: &str) -> String {
    let mut out = String::new();
    // Stringへの書き込みは失敗しない
    let _ = write_data_summary(&mut out, content, file_name);
    out
}

fn write_data_summary(
    out: &mut String,
    content: &ClassifiedContent,
    file_name: &str,
) -> std::fmt::Result {
    writeln!(out, "=== 営業データベース ({}) ===\n", file_name)?;

    if !content.products.is_empty() {
        writeln!(out, "=== 商品情報 ===")?;
        for (index, product) in content.products.iter().enumerate() {
            writeln!(out, "商品{}: {}", index + 1, product.name)?;
            if !product.price.is_empty() {
                writeln!(out, "価格: {}円/{}", product.price, product.unit)?;
            }
            write_field(out, "特徴", &product.features)?;
            write_field(out, "説明", &product.description)?;
            write_field(out, "メリット", &product.benefits)?;
            write_field(out, "対象", &product.target)?;
            writeln!(out)?;
        }
    }

    if !content.scripts.is_empty() {
        writeln!(out, "=== 営業会話パターン ===")?;
        for (index, script) in content.scripts.iter().enumerate() {
            writeln!(out, "パターン{}: {}", index + 1, script.situation)?;
            write_field(out, "会話例", &script.script)?;
            write_field(out, "ポイント", &script.key_points)?;
            write_field(out, "想定回答", &script.response)?;
            writeln!(out)?;
        }
    }

    if !content.company_info.is_empty() {
        writeln!(out, "=== 会社情報 ===")?;
        for (key, value) in content.company_info.iter() {
            writeln!(out, "{}: {}", key, value)?;
        }
        writeln!(out)?;
    }

    if !content.faqs.is_empty() {
        writeln!(out, "=== よくある質問 ===")?;
        for (index, faq) in content.faqs.iter().enumerate() {
            writeln!(out, "Q{}: {}", index + 1, faq.question)?;
            writeln!(out, "A: {}", faq.answer)?;
            write_field(out, "カテゴリ", &faq.category)?;
            writeln!(out)?;
        }
    }

    if !content.others.is_empty() {
        writeln!(out, "=== その他の情報 ===")?;
        for other in &content.others {
            writeln!(
                out,
                "{}: {}",
                other.sheet_name,
                other.non_empty_cells.join(" | ")
            )?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn write_field(out: &mut String, label: &str, value: &str) -> std::fmt::Result {
    if value.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}: {}", label, value)
}
