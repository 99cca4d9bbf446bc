//! Sheet Projector
//!
//! カテゴリごとの行を、レイアウトで宣言された順序のシートテーブルに投影する。

use crate::api::{SheetLayout, HEADER};
use crate::types::{CategoryBucket, SheetTable, ValidatedRow};

/// レイアウトの各シートについて、見出し行＋該当カテゴリの行を持つテーブルを作る
///
/// 戻り値の長さは常に `layout.len()` で、順序もレイアウトと同じです。
/// 該当する行がないシートは見出し行のみになります。
/// レイアウトにないカテゴリの行は出力されません。
pub fn project(bucket: &CategoryBucket, layout: &SheetLayout) -> Vec<SheetTable> {
    layout
        .specs()
        .iter()
        .map(|spec| {
            let mut table = SheetTable::with_header(&spec.title, spec.category, &HEADER);
            if let Some(rows) = bucket.get(spec.category) {
                table
                    .rows
                    .extend(rows.iter().cloned().map(ValidatedRow::into_row));
            }
            table
        })
        .collect()
}
