//! Parser Module
//!
//! calamineを使用したスプレッドシート読み込みと、csvクレートによるCSV読み込みの実装。
//! 各シートをヘッダー行を含むセルグリッドとして展開します。

mod delimited;
mod workbook;

use std::io::{Read, Seek};
use std::path::Path;

use crate::error::Result;
use crate::security::SecurityConfig;
use crate::types::SpreadsheetDocument;

/// 入力を読み込み、ドキュメントを返す
///
/// 拡張子が`.csv`の場合はCSVとして、それ以外はワークブックとして読み込みます。
pub(crate) fn load_document<R: Read + Seek>(
    reader: R,
    file_name: &str,
    security: &SecurityConfig,
) -> Result<SpreadsheetDocument> {
    if is_csv(file_name) {
        delimited::load_csv(reader, file_name, security)
    } else {
        workbook::load_workbook(reader, file_name, security)
    }
}

fn is_csv(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"))
}
