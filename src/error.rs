//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// uigf2xlsxクレート全体で使用するエラー型
///
/// UIGFドキュメントの読み込み、検証、グループ化、ワークブック出力の
/// すべての段階で発生するエラーを統一的に扱います。
/// どのエラーも変換全体を中断し、部分的な出力は生成されません。
///
/// # エラーの種類
///
/// - `Io` / `Utf8` / `Json`: 入力の読み込み・デコードの失敗
/// - `UnsupportedLocale` / `UnsupportedFormatVersion`: ドキュメント単位の検証失敗
/// - `MissingRequiredFields` / `UnsupportedLookupRequired` / `MissingNameAndId`
///   / `InvalidCategoryCode`: レコード単位の検証失敗
/// - `Config`: ビルダー設定の検証失敗
/// - `SecurityViolation`: 入力サイズ制限の違反
/// - `Xlsx`: ワークブック書き出しの失敗
///
/// # 使用例
///
/// ```rust,no_run
/// use uigf2xlsx::{ConverterBuilder, UigfToXlsxError};
///
/// let converter = ConverterBuilder::new().build().unwrap();
/// match converter.convert_to_tables(r#"{"info":{"lang":"en-us","uigf_version":"v2.3"},"list":[]}"#) {
///     Err(UigfToXlsxError::UnsupportedLocale(lang)) => println!("unsupported: {}", lang),
///     _ => {}
/// }
/// ```
#[derive(Error, Debug)]
pub enum UigfToXlsxError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 入力がUTF-8として不正
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// JSONとして不正、またはドキュメントの最低限の形（`info`、`list`など）を満たさない
    #[error("Failed to parse UIGF document: {0}")]
    Json(#[from] serde_json::Error),

    /// サポートされていない言語
    ///
    /// `info.lang` が唯一サポートされるロケール（`zh-cn`）と一致しない場合に発生します。
    #[error("Unsupported language: {0}")]
    UnsupportedLocale(String),

    /// サポートされていないUIGFバージョン
    ///
    /// `info.uigf_version` が `v2` で始まらない場合に発生します。
    #[error("Unsupported UIGF version: {0}")]
    UnsupportedFormatVersion(String),

    /// `item_type` または `rank_type` が欠落したレコード
    ///
    /// 出力フォーマットの「類別」「星級」列に必要なため、1件でも欠落していれば
    /// 変換全体を中断します。
    #[error(
        "Record #{index} (id '{id}') is missing item_type or rank_type; \
         the output workbook requires both but the UIGF document does not provide them"
    )]
    MissingRequiredFields {
        /// `list` 内の0始まりの位置
        index: usize,
        /// レコードの `id`（欠落時は空文字列）
        id: String,
    },

    /// `name` がなく `item_id` のみを持つレコード
    ///
    /// `item_id` から名称を引くにはUIGF-APIの呼び出しが必要ですが、
    /// この機能は実装していません。
    #[error(
        "Record #{index} (id '{id}') has no name but provides item_id '{item_id}'; \
         resolving names through UIGF-API is not implemented"
    )]
    UnsupportedLookupRequired {
        index: usize,
        id: String,
        item_id: String,
    },

    /// `name` も `item_id` も持たないレコード
    #[error(
        "Record #{index} (id '{id}') provides neither name nor item_id; \
         this violates UIGF v2.2 and earlier as well as v2.3"
    )]
    MissingNameAndId { index: usize, id: String },

    /// `uigf_gacha_type` が数値として解釈できない
    #[error("Record #{index}: uigf_gacha_type '{value}' is not a number")]
    InvalidCategoryCode { index: usize, value: String },

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、シートレイアウトが空の場合や、
    /// シート名がExcelの制約に違反している場合などです。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use uigf2xlsx::{ConverterBuilder, SheetLayout, UigfToXlsxError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_sheet_layout(SheetLayout::new(vec![]))
    ///     .build();
    ///
    /// match result {
    ///     Err(UigfToXlsxError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// 入力制限に違反したエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// ワークブックの書き出し中に発生したエラー（rust_xlsxwriter由来）
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
