//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use crate::error::UigfToXlsxError;
use crate::types::{Row, SheetTable};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Serialize;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// Excelの列幅の上限
const MAX_COLUMN_WIDTH: usize = 255;

/// XLSX形式のフォーマッター
///
/// テーブルごとに1枚のワークシートを作成します。
/// すべてのセルは文字列として書き込み、時刻や星級を数値・日付に変換しません。
pub struct XlsxFormatter;

impl XlsxFormatter {
    pub fn render<W: Write>(
        &self,
        tables: &[SheetTable],
        writer: &mut W,
    ) -> Result<(), UigfToXlsxError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for table in tables {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&table.title)?;
            write_table(worksheet, table, &header_format)?;
        }

        let buffer = workbook.save_to_buffer()?;
        writer.write_all(&buffer)?;
        writer.flush()?;

        Ok(())
    }
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &SheetTable,
    header_format: &Format,
) -> Result<(), UigfToXlsxError> {
    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = u32::try_from(row_idx).map_err(|_| {
            UigfToXlsxError::SecurityViolation(format!(
                "Sheet '{}' has too many rows",
                table.title
            ))
        })?;

        for (col_idx, cell) in row.iter().enumerate() {
            let col_num = col_idx as u16;
            if row_idx == 0 {
                worksheet.write_string_with_format(row_num, col_num, cell, header_format)?;
            } else {
                worksheet.write_string(row_num, col_num, cell)?;
            }
        }
    }

    // 見出し行を固定
    worksheet.set_freeze_panes(1, 0)?;

    for (col_idx, width) in column_widths(&table.rows).into_iter().enumerate() {
        worksheet.set_column_width(col_idx as u16, width as f64)?;
    }

    Ok(())
}

/// 各列の表示幅（全角文字は2として数える）に余白を加えた列幅
fn column_widths(rows: &[Row]) -> [usize; 4] {
    let mut widths = [0usize; 4];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }
    widths.map(|w| (w + 2).min(MAX_COLUMN_WIDTH))
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    sheets: &'a [SheetTable],
}

/// JSON形式のフォーマッター
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        tables: &[SheetTable],
        writer: &mut W,
    ) -> Result<(), UigfToXlsxError> {
        serde_json::to_writer_pretty(&mut *writer, &JsonOutput { sheets: tables })?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryCode;

    fn table() -> SheetTable {
        SheetTable {
            title: "角色活动祈愿".to_string(),
            category: CategoryCode(301),
            rows: vec![
                ["时间", "名称", "类别", "星级"].map(str::to_string),
                ["2023-01-01 00:00:00", "迪希雅", "角色", "5"].map(str::to_string),
            ],
        }
    }

    #[test]
    fn test_column_widths_count_wide_chars() {
        let widths = column_widths(&table().rows);
        // "2023-01-01 00:00:00" = 19
        assert_eq!(widths[0], 21);
        // "迪希雅" = 6
        assert_eq!(widths[1], 8);
        // "时间"/"类别"/"星级" = 4
        assert_eq!(widths[2], 6);
        assert_eq!(widths[3], 6);
    }

    #[test]
    fn test_column_widths_capped() {
        let long = "x".repeat(1000);
        let rows = vec![[long.clone(), long.clone(), long.clone(), long]];
        assert_eq!(column_widths(&rows), [MAX_COLUMN_WIDTH; 4]);
    }

    #[test]
    fn test_xlsx_render_produces_zip() {
        let mut output = Vec::new();
        XlsxFormatter.render(&[table()], &mut output).unwrap();
        // XLSXはZIPコンテナ
        assert!(output.starts_with(b"PK"));
    }

    #[test]
    fn test_xlsx_render_rejects_invalid_sheet_name() {
        let mut bad = table();
        bad.title = "a/b".to_string();
        let result = XlsxFormatter.render(&[bad], &mut Vec::new());
        assert!(matches!(result, Err(UigfToXlsxError::Xlsx(_))));
    }

    #[test]
    fn test_json_render() {
        let mut output = Vec::new();
        JsonFormatter.render(&[table()], &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["sheets"][0]["title"], "角色活动祈愿");
        assert_eq!(value["sheets"][0]["category"], 301);
        assert_eq!(value["sheets"][0]["rows"][1][1], "迪希雅");
    }
}
