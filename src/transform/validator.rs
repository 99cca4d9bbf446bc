//! Document Validator
//!
//! ドキュメント単位の前提条件（言語とUIGFバージョン）を検証する。

use crate::api::{SUPPORTED_LOCALE, SUPPORTED_VERSION_PREFIX};
use crate::error::UigfToXlsxError;
use crate::types::UigfDocument;

/// ドキュメントのロケールとバージョンを検証する
///
/// 検査は次の順に行い、最初の違反でエラーを返します。
///
/// 1. `info.lang` が `zh-cn` であること → `UnsupportedLocale`
/// 2. `info.uigf_version` が `v2` で始まること → `UnsupportedFormatVersion`
///
/// それ以外のフィールドは参照しません。
pub fn validate(doc: &UigfDocument) -> Result<&UigfDocument, UigfToXlsxError> {
    if doc.info.lang != SUPPORTED_LOCALE {
        return Err(UigfToXlsxError::UnsupportedLocale(doc.info.lang.clone()));
    }

    if !doc.info.uigf_version.starts_with(SUPPORTED_VERSION_PREFIX) {
        return Err(UigfToXlsxError::UnsupportedFormatVersion(
            doc.info.uigf_version.clone(),
        ));
    }

    Ok(doc)
}
