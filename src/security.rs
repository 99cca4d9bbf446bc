//! Security Module
//!
//! 入力サイズの制限を実装するモジュール。
//!
//! メモリ使用量を抑えるのは入力サイズの上限です（読み込み時に検査）。
//! レコード数はJSONのデコード後にしか分からないため、その上限は
//! 出力ワークブックの大きさに対する事後的な目安として扱います。

use crate::error::UigfToXlsxError;
use std::io::Read;

/// 入力制限の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    /// 入力ドキュメントの最大サイズ（バイト）
    /// デフォルト: 256MB (268_435_456 bytes)
    pub max_input_size: u64,
    /// `list` の最大レコード数
    /// デフォルト: 5_000_000
    pub max_record_count: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_input_size: 268_435_456, // 256MB
            max_record_count: 5_000_000,
        }
    }
}

impl InputLimits {
    /// デフォルトの入力制限を作成
    pub fn new() -> Self {
        Self::default()
    }
}

/// 制限付きで入力を読み込み、UTF-8文字列として返す
///
/// 上限+1バイトまでしか読まないため、巨大な入力でも全体を読み込む前に拒否します。
/// 先頭のUTF-8 BOMは取り除きます。
pub(crate) fn read_limited<R: Read>(
    input: R,
    limits: &InputLimits,
) -> Result<String, UigfToXlsxError> {
    let mut buffer = Vec::new();
    let bytes_read = input
        .take(limits.max_input_size.saturating_add(1))
        .read_to_end(&mut buffer)?;

    if bytes_read as u64 > limits.max_input_size {
        return Err(UigfToXlsxError::SecurityViolation(format!(
            "Input size exceeds maximum: more than {} bytes",
            limits.max_input_size
        )));
    }

    let text = std::str::from_utf8(&buffer)?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}

/// レコード数の検証（デコードと文書の検証が済んだ後に呼ぶ）
pub(crate) fn check_record_count(
    count: usize,
    limits: &InputLimits,
) -> Result<(), UigfToXlsxError> {
    if count > limits.max_record_count {
        return Err(UigfToXlsxError::SecurityViolation(format!(
            "Too many records: {} (max: {})",
            count, limits.max_record_count
        )));
    }
    Ok(())
}
