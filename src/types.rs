//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! 入力側（UIGFドキュメント）はserdeで直接デシリアライズし、
//! 任意フィールドは`Option`で表現する。

use crate::api::SheetLayout;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 出力テーブルの1行（時間, 名称, 類別, 星級）
pub type Row = [String; 4];

/// UIGFエクスポートのドキュメント全体
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UigfDocument {
    /// エクスポート情報
    pub info: UigfInfo,
    /// 祈願記録（エクスポート順）
    pub list: Vec<RawRecord>,
}

/// `info` オブジェクト
///
/// `lang` と `uigf_version` 以外は検証に使用しない。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UigfInfo {
    pub lang: String,
    pub uigf_version: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub export_time: Option<String>,
    #[serde(default)]
    pub export_timestamp: Option<u64>,
    #[serde(default)]
    pub export_app: Option<String>,
    #[serde(default)]
    pub export_app_version: Option<String>,
}

/// `list` の1レコード
///
/// `item_type` と `rank_type` はUIGF上は任意だが、この変換では必須。
/// `name` と `item_id` はUIGF v2.2以前とv2.3でどちらか一方が必須となる。
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: String,
    /// 出力先シートを決めるカテゴリコード（数値文字列）
    pub uigf_gacha_type: String,
    /// 記録時刻（解釈せずそのまま出力する）
    pub time: String,
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub rank_type: Option<String>,
    // null は欠落と同じ扱い（キーの有無ではなく値で判定する）
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub gacha_type: Option<String>,
    #[serde(default)]
    pub count: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

/// 祈願カテゴリコード（例: 301 = 角色活动祈愿）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryCode(pub i64);

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CategoryCode {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

/// 必須フィールドの検証を通過したレコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRow {
    pub time: String,
    pub name: String,
    pub item_type: String,
    pub rank_type: String,
}

impl ValidatedRow {
    /// 出力テーブルの列順に並べ替える
    pub fn into_row(self) -> Row {
        [self.time, self.name, self.item_type, self.rank_type]
    }
}

/// カテゴリコードごとの行の集まり
///
/// 各カテゴリ内の行は入力順を保つ。変換ごとに新しく構築され、
/// 投影後に破棄される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBucket {
    rows: BTreeMap<CategoryCode, Vec<ValidatedRow>>,
}

impl CategoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// 行を末尾に追加する（カテゴリが初出なら作成）
    pub fn push(&mut self, category: CategoryCode, row: ValidatedRow) {
        self.rows.entry(category).or_default().push(row);
    }

    /// 指定カテゴリの行（入力順）
    pub fn get(&self, category: CategoryCode) -> Option<&[ValidatedRow]> {
        self.rows.get(&category).map(Vec::as_slice)
    }

    /// レイアウトに含まれないため投影時に捨てられるカテゴリ
    pub fn unmapped_categories(&self, layout: &SheetLayout) -> Vec<CategoryCode> {
        self.categories()
            .filter(|category| !layout.contains(*category))
            .collect()
    }

    /// 出現したカテゴリコード（昇順）
    pub fn categories(&self) -> impl Iterator<Item = CategoryCode> + '_ {
        self.rows.keys().copied()
    }

    /// 全カテゴリの行数の合計
    pub fn len(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 出力ワークブックの1シート分
///
/// 変換で作られたテーブルでは `rows[0]` が見出し行。
/// `rows` は公開フィールドのため、空のテーブルも扱えるようにしている。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetTable {
    pub title: String,
    pub category: CategoryCode,
    pub rows: Vec<Row>,
}

impl SheetTable {
    /// 見出し行のみのテーブルを作成
    pub(crate) fn with_header(title: &str, category: CategoryCode, header: &[&str; 4]) -> Self {
        Self {
            title: title.to_string(),
            category,
            rows: vec![header.map(str::to_string)],
        }
    }

    /// 見出し行（`rows` が空なら `None`）
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// 見出し行を除いたデータ行
    pub fn records(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or_default()
    }
}
