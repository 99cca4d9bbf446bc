//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use crate::api::OutputFormat;
use crate::error::UigfToXlsxError;
use crate::types::SheetTable;
use std::io::Write;

pub use formatters::*;

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（XLSX, JSON）をenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub enum OutputFormatter {
    Xlsx,
    Json,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => OutputFormatter::Xlsx,
            OutputFormat::Json => OutputFormatter::Json,
        }
    }

    /// シートテーブルを指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `tables` - 出力するテーブル（シート順）
    /// * `writer` - 出力先のライター
    pub fn render<W: Write>(
        &self,
        tables: &[SheetTable],
        writer: &mut W,
    ) -> Result<(), UigfToXlsxError> {
        match self {
            OutputFormatter::Xlsx => XlsxFormatter.render(tables, writer),
            OutputFormatter::Json => JsonFormatter.render(tables, writer),
        }
    }
}
