//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::{OutputFormat, SheetLayout};
use crate::error::UigfToXlsxError;
use crate::security::{self, InputLimits};
use crate::transform;
use crate::types::{SheetTable, UigfDocument};
use std::collections::HashSet;
use std::io::{Read, Write};

const LOG_TARGET: &str = "uigf2xlsx::convert";

/// Excelのシート名の最大文字数
const MAX_SHEET_NAME_CHARS: usize = 31;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct ConversionConfig {
    /// 出力シートの並び
    pub sheet_layout: SheetLayout,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// 入力制限
    pub input_limits: InputLimits,
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use uigf2xlsx::{ConverterBuilder, OutputFormat};
///
/// # fn main() -> Result<(), uigf2xlsx::UigfToXlsxError> {
/// let converter = ConverterBuilder::new()
///     .with_output_format(OutputFormat::Json)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シートレイアウト: 標準の4シート（301, 302, 100, 200）
    /// - 出力フォーマット: XLSX
    /// - 入力制限: 256MB / 5,000,000レコード
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 出力シートの並びを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use uigf2xlsx::{ConverterBuilder, SheetLayout, SheetSpec};
    ///
    /// let builder = ConverterBuilder::new().with_sheet_layout(SheetLayout::new(vec![
    ///     SheetSpec::new("角色活动祈愿", 301),
    ///     SheetSpec::new("集录祈愿", 500),
    /// ]));
    /// ```
    pub fn with_sheet_layout(mut self, layout: SheetLayout) -> Self {
        self.config.sheet_layout = layout;
        self
    }

    /// 出力フォーマットを指定する
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// 入力制限を指定する
    pub fn with_input_limits(mut self, limits: InputLimits) -> Self {
        self.config.input_limits = limits;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `UigfToXlsxError::Config(String)`: 設定の検証に失敗した場合
    ///   * シートレイアウトが空
    ///   * カテゴリコードまたはシート名の重複
    ///   * シート名がExcelの制約に違反
    pub fn build(self) -> Result<Converter, UigfToXlsxError> {
        validate_layout(&self.config.sheet_layout)?;

        if self.config.input_limits.max_input_size == 0 {
            return Err(UigfToXlsxError::Config(
                "max_input_size must be greater than 0".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

fn validate_layout(layout: &SheetLayout) -> Result<(), UigfToXlsxError> {
    if layout.is_empty() {
        return Err(UigfToXlsxError::Config("Sheet layout is empty".to_string()));
    }

    let mut categories = HashSet::new();
    let mut titles = HashSet::new();

    for spec in layout.specs() {
        validate_sheet_name(&spec.title)?;

        if !categories.insert(spec.category) {
            return Err(UigfToXlsxError::Config(format!(
                "Duplicate category code in sheet layout: {}",
                spec.category
            )));
        }

        // Excelはシート名の大文字小文字を区別しない
        if !titles.insert(spec.title.to_lowercase()) {
            return Err(UigfToXlsxError::Config(format!(
                "Duplicate sheet title in sheet layout: '{}'",
                spec.title
            )));
        }
    }

    Ok(())
}

fn validate_sheet_name(title: &str) -> Result<(), UigfToXlsxError> {
    let char_count = title.chars().count();
    if char_count == 0 || char_count > MAX_SHEET_NAME_CHARS {
        return Err(UigfToXlsxError::Config(format!(
            "Sheet title must be 1 to {} characters: '{}'",
            MAX_SHEET_NAME_CHARS, title
        )));
    }

    if let Some(c) = title.chars().find(|c| "[]:*?/\\".contains(*c)) {
        return Err(UigfToXlsxError::Config(format!(
            "Sheet title contains invalid character '{}': '{}'",
            c, title
        )));
    }

    if title.starts_with('\'') || title.ends_with('\'') {
        return Err(UigfToXlsxError::Config(format!(
            "Sheet title must not start or end with an apostrophe: '{}'",
            title
        )));
    }

    if title.eq_ignore_ascii_case("history") {
        return Err(UigfToXlsxError::Config(
            "Sheet title 'History' is reserved by Excel".to_string(),
        ));
    }

    Ok(())
}

/// 変換処理のファサード
///
/// UIGFドキュメント（JSON）を読み込み、検証・グループ化・投影を行って
/// 指定フォーマットで出力するメインエントリーポイントです。
/// 構築後は不変なので、複数スレッドから共有できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use uigf2xlsx::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), uigf2xlsx::UigfToXlsxError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("uigf.json")?;
/// let output = File::create("output.xlsx")?;
/// converter.convert(input, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// UIGFドキュメントを読み込み、設定されたフォーマットで書き出す
    ///
    /// # 処理フロー
    ///
    /// 1. 入力制限付きで読み込み、JSONとしてデコード
    /// 2. ドキュメントの検証（言語・バージョン）
    /// 3. レコードのグループ化
    /// 4. シートテーブルへの投影
    /// 5. 出力フォーマッターで書き出し
    ///
    /// 1〜4のいずれかで失敗した場合、`output`には何も書き込みません。
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<(), UigfToXlsxError> {
        let text = security::read_limited(input, &self.config.input_limits)?;
        let tables = self.convert_to_tables(&text)?;

        let formatter = crate::output::OutputFormatter::from_format(self.config.output_format);
        formatter.render(&tables, &mut output)?;

        tracing::debug!(
            target: LOG_TARGET,
            format = ?self.config.output_format,
            sheets = tables.len(),
            "output written"
        );

        Ok(())
    }

    /// 変換結果をバイト列として返す
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use uigf2xlsx::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), uigf2xlsx::UigfToXlsxError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let xlsx = converter.convert_to_bytes(File::open("uigf.json")?)?;
    /// std::fs::write("output.xlsx", xlsx)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_to_bytes<R: Read>(&self, input: R) -> Result<Vec<u8>, UigfToXlsxError> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;
        Ok(buffer)
    }

    /// JSON文字列からシートテーブルを作る（出力フォーマットは使用しない）
    ///
    /// 戻り値は常にシートレイアウトと同じ長さ・順序です。
    pub fn convert_to_tables(&self, json: &str) -> Result<Vec<SheetTable>, UigfToXlsxError> {
        let doc: UigfDocument = serde_json::from_str(json)?;
        self.tables_from_document(&doc)
    }

    /// デコード済みのドキュメントからシートテーブルを作る
    pub fn tables_from_document(
        &self,
        doc: &UigfDocument,
    ) -> Result<Vec<SheetTable>, UigfToXlsxError> {
        let doc = transform::validate(doc)?;
        security::check_record_count(doc.list.len(), &self.config.input_limits)?;
        tracing::debug!(
            target: LOG_TARGET,
            lang = %doc.info.lang,
            uigf_version = %doc.info.uigf_version,
            export_app = doc.info.export_app.as_deref().unwrap_or(""),
            export_app_version = doc.info.export_app_version.as_deref().unwrap_or(""),
            records = doc.list.len(),
            "document validated"
        );

        let bucket = transform::group(doc)?;
        let layout = &self.config.sheet_layout;

        let unmapped = bucket.unmapped_categories(layout);
        if !unmapped.is_empty() {
            tracing::debug!(
                target: LOG_TARGET,
                categories = ?unmapped,
                "records outside the sheet layout are not exported"
            );
        }

        let tables = transform::project(&bucket, layout);
        tracing::debug!(
            target: LOG_TARGET,
            rows = bucket.len(),
            sheets = tables.len(),
            "records grouped"
        );

        Ok(tables)
    }

    /// 構築時に設定されたシートレイアウト
    pub fn sheet_layout(&self) -> &SheetLayout {
        &self.config.sheet_layout
    }
}
