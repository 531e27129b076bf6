//! Workbook Parser
//!
//! calamineを使用してスプレッドシートを読み込み、`SpreadsheetDocument`に変換します。

use std::io::{Cursor, Read, Seek};

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::error::Result;
use crate::security::SecurityConfig;
use crate::types::{CellValue, SpreadsheetDocument, TabularSheet};

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブック全体をメモリ上のセルグリッドに展開します。
/// 形式（XLSX / XLSM / XLSB / XLS / ODS）はファイル内容から自動判定されます。
pub(crate) struct WorkbookParser {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートを読み込むためのリーダー
    /// * `security` - 入力サイズの制限
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(AgentSheetError::SecurityViolation)` - 入力が上限を超えた場合
    /// * `Err(AgentSheetError::Parse)` - 形式を判定できない、または破損している場合
    pub fn open<R: Read + Seek>(mut reader: R, security: &SecurityConfig) -> Result<Self> {
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;
        security.check_input_size(bytes_read)?;

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名を取得（ワークブック内の順序）
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// ワークブック全体をドキュメントに変換する
    ///
    /// 読み込めないシートは警告を出力して読み飛ばします。
    pub fn into_document(mut self, file_name: &str) -> SpreadsheetDocument {
        let mut document = SpreadsheetDocument::new(file_name);

        for sheet_name in self.sheet_names() {
            match self.workbook.worksheet_range(&sheet_name) {
                Ok(range) => {
                    let sheet = range_to_sheet(&range);
                    tracing::debug!(
                        sheet = %sheet_name,
                        rows = sheet.row_count(),
                        "loaded sheet"
                    );
                    document = document.with_sheet(sheet_name, sheet);
                }
                Err(e) => {
                    tracing::warn!(sheet = %sheet_name, error = %e, "skipping unreadable sheet");
                }
            }
        }

        document
    }
}

/// ワークブックを読み込み、ドキュメントを返す
pub(crate) fn load_workbook<R: Read + Seek>(
    reader: R,
    file_name: &str,
    security: &SecurityConfig,
) -> Result<SpreadsheetDocument> {
    let parser = WorkbookParser::open(reader, security)?;
    Ok(parser.into_document(file_name))
}

/// calamineの範囲をシートに変換する
///
/// calamineの範囲は最初の非空セルから始まるため、A1からの位置を保つよう
/// 先頭の行・列を空セルで補います。
fn range_to_sheet(range: &Range<Data>) -> TabularSheet {
    let (row_offset, col_offset) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => return TabularSheet::default(),
    };

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; col_offset];
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }

    TabularSheet::new(rows)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}
