//! CSV Parser
//!
//! CSVファイルを1シートのドキュメントとして読み込みます。
//! 先頭行はワークブックと同様にヘッダーとして扱われます。

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::Result;
use crate::security::SecurityConfig;
use crate::types::{CellValue, SpreadsheetDocument, TabularSheet};

/// ファイル名からシート名を決められない場合のシート名
pub(crate) const DEFAULT_SHEET_NAME: &str = "Sheet1";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSVを読み込み、ファイル名の拡張子を除いた部分をシート名とするドキュメントを返す
///
/// 列数が揃っていない行も受け付けます。UTF-8として不正なバイトは置換文字になります。
pub(crate) fn load_csv<R: Read>(
    mut reader: R,
    file_name: &str,
    security: &SecurityConfig,
) -> Result<SpreadsheetDocument> {
    let mut buffer = Vec::new();
    let bytes_read = reader.read_to_end(&mut buffer)?;
    security.check_input_size(bytes_read)?;

    let sheet = parse_csv(&buffer)?;
    let sheet_name = sheet_name_for(file_name);
    tracing::debug!(sheet = %sheet_name, rows = sheet.row_count(), "loaded csv");

    Ok(SpreadsheetDocument::new(file_name).with_sheet(sheet_name, sheet))
}

fn parse_csv(bytes: &[u8]) -> Result<TabularSheet> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        rows.push(record.iter().map(convert_field).collect());
    }

    Ok(TabularSheet::new(rows))
}

fn convert_field(field: &[u8]) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(String::from_utf8_lossy(field).into_owned())
    }
}

fn sheet_name_for(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string())
}
