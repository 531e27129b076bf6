//! Types Module
//!
//! 読み込んだスプレッドシートを表す共通データ型を定義するモジュール。
//! シートはすべてメモリ上に展開され、解析処理からは読み取り専用で扱われます。

use std::fmt;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 文字列
    Text(String),

    /// 数値（f64）
    Number(f64),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    ///
    /// `Empty`と空文字列を空とみなします。空白のみの文字列は空ではありません。
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 前後の空白を除いた表示文字列が空かどうかを判定
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            other => other.is_empty(),
        }
    }

    /// 値を文字列として取得
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// 1シート分のセルグリッド（行優先、0行目はヘッダー）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularSheet {
    rows: Vec<Vec<CellValue>>,
}

impl TabularSheet {
    /// 行データからシートを生成
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// ヘッダーを含む行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// ヘッダーを除いたデータ行数（0未満にはならない）
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// すべての行
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// ヘッダー行を除いたデータ行
    pub fn data_rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }

    /// 指定座標のセル。範囲外の場合は空セルを返す
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

/// 行内のセルを取得（範囲外は空セル）
pub(crate) fn cell_at(row: &[CellValue], col: usize) -> &CellValue {
    row.get(col).unwrap_or(&EMPTY_CELL)
}

/// 行内のセルを文字列として取得（範囲外は空文字列）
pub(crate) fn text_at(row: &[CellValue], col: usize) -> String {
    cell_at(row, col).as_text()
}

/// 読み込み済みのスプレッドシート全体
///
/// シート名の順序はワークブック内の順序を保持します。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpreadsheetDocument {
    file_name: String,
    sheets: Vec<(String, TabularSheet)>,
}

impl SpreadsheetDocument {
    /// 空のドキュメントを生成
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            sheets: Vec::new(),
        }
    }

    /// シートを追加したドキュメントを返す
    ///
    /// 同名のシートが既に存在する場合は内容を置き換えます（位置は維持）。
    pub fn with_sheet(mut self, name: impl Into<String>, sheet: TabularSheet) -> Self {
        let name = name.into();
        match self.sheets.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = sheet,
            None => self.sheets.push((name, sheet)),
        }
        self
    }

    /// 元のファイル名
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// シート名とシートの組を順番に返す
    pub fn sheets(&self) -> impl Iterator<Item = (&str, &TabularSheet)> {
        self.sheets.iter().map(|(name, sheet)| (name.as_str(), sheet))
    }

    /// シート名の一覧
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// 名前でシートを取得
    pub fn sheet(&self, name: &str) -> Option<&TabularSheet> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, sheet)| sheet)
    }

    /// シート数
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// シートが1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
