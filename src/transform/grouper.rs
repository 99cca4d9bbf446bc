//! Record Grouper
//!
//! 各レコードの必須フィールドを検証し、名称を決定して、
//! カテゴリコードごとに入力順で振り分ける。

use crate::error::UigfToXlsxError;
use crate::types::{CategoryBucket, CategoryCode, RawRecord, UigfDocument, ValidatedRow};

/// `list` の全レコードをカテゴリごとにまとめる
///
/// 1件でも不正なレコードがあれば、その時点で変換全体を中断します
/// （スキップして続行することはありません）。
///
/// # 処理フロー（レコードごと）
///
/// 1. `item_type` と `rank_type` の存在確認
/// 2. 名称の決定（`name` → `item_id` → エラー）
/// 3. `uigf_gacha_type` を数値として解釈
/// 4. 該当カテゴリの末尾に追加（整数でないコードはどのシートにも
///    一致しないため、この時点で除外）
pub fn group(doc: &UigfDocument) -> Result<CategoryBucket, UigfToXlsxError> {
    let mut bucket = CategoryBucket::new();

    for (index, record) in doc.list.iter().enumerate() {
        let (item_type, rank_type) = match (&record.item_type, &record.rank_type) {
            (Some(item_type), Some(rank_type)) => (item_type, rank_type),
            _ => {
                return Err(UigfToXlsxError::MissingRequiredFields {
                    index,
                    id: record.id.clone(),
                })
            }
        };

        let name = resolve_name(index, record)?;
        let Some(category) = parse_category(index, &record.uigf_gacha_type)? else {
            continue;
        };

        bucket.push(
            category,
            ValidatedRow {
                time: record.time.clone(),
                name: name.to_string(),
                item_type: item_type.clone(),
                rank_type: rank_type.clone(),
            },
        );
    }

    Ok(bucket)
}

/// 表示名を決定する
///
/// `name` があればそのまま使う。`item_id` のみの場合は名称の逆引きが必要だが、
/// 逆引きは行わずエラーとする。
fn resolve_name(index: usize, record: &RawRecord) -> Result<&str, UigfToXlsxError> {
    match (&record.name, &record.item_id) {
        (Some(name), _) => Ok(name.as_str()),
        (None, Some(item_id)) if is_numeric(item_id) => {
            Err(UigfToXlsxError::UnsupportedLookupRequired {
                index,
                id: record.id.clone(),
                item_id: item_id.clone(),
            })
        }
        _ => Err(UigfToXlsxError::MissingNameAndId {
            index,
            id: record.id.clone(),
        }),
    }
}

/// 数値として解釈できる文字列か（前後の空白は無視、空文字列は0とみなす）
fn is_numeric(value: &str) -> bool {
    parse_number(value).is_some()
}

/// 文字列を数値として解釈する
///
/// 前後の空白を除いた空文字列は0、`0x`/`0o`/`0b` 接頭辞は整数リテラル、
/// `Infinity` は無限大として扱う。それ以外は10進数表記のみ受け付ける。
/// 数値でない場合は `None`（NaNを返すことはない）。
fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let digits = trimmed
            .strip_prefix(prefix)
            .or_else(|| trimmed.strip_prefix(&prefix.to_ascii_uppercase()));
        if let Some(digits) = digits {
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        // 単語表記は `Infinity` のみ（`inf` や `NaN` は数値ではない）
        return (unsigned == "Infinity").then(|| {
            if trimmed.starts_with('-') {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        });
    }

    trimmed.parse::<f64>().ok()
}

/// `uigf_gacha_type` をカテゴリコードに変換する
///
/// `"301"`、`"301.0"`、`"3.01e2"` はいずれも301になる。空文字列は0。
/// 整数でない数値（`"3.5"` など）はどのカテゴリにも一致しないため `None`。
/// 数値でなければエラー。
fn parse_category(index: usize, value: &str) -> Result<Option<CategoryCode>, UigfToXlsxError> {
    let number = parse_number(value).ok_or_else(|| UigfToXlsxError::InvalidCategoryCode {
        index,
        value: value.to_string(),
    })?;

    // i64 の範囲外は 2^63 で判定する（i64::MAX as f64 は切り上がるため）
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let whole = number.is_finite() && number.fract() == 0.0 && (-LIMIT..LIMIT).contains(&number);
    Ok(whole.then(|| CategoryCode(number as i64)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UigfInfo;

    fn record(category: &str, name: &str) -> RawRecord {
        RawRecord {
            id: format!("{}-{}", category, name),
            uigf_gacha_type: category.to_string(),
            time: "2023-01-01 00:00:00".to_string(),
            item_type: Some("角色".to_string()),
            rank_type: Some("5".to_string()),
            name: Some(name.to_string()),
            ..RawRecord::default()
        }
    }

    fn doc(list: Vec<RawRecord>) -> UigfDocument {
        UigfDocument {
            info: UigfInfo {
                lang: "zh-cn".to_string(),
                uigf_version: "v2.3".to_string(),
                uid: None,
                export_time: None,
                export_timestamp: None,
                export_app: None,
                export_app_version: None,
            },
            list,
        }
    }

    fn names(bucket: &CategoryBucket, category: i64) -> Vec<String> {
        bucket
            .get(CategoryCode(category))
            .unwrap_or_default()
            .iter()
            .map(|row| row.name.clone())
            .collect()
    }

    #[test]
    fn test_groups_by_category_in_input_order() {
        let bucket = group(&doc(vec![
            record("301", "a"),
            record("200", "b"),
            record("301", "c"),
            record("302", "d"),
            record("200", "e"),
        ]))
        .unwrap();

        assert_eq!(names(&bucket, 301), vec!["a", "c"]);
        assert_eq!(names(&bucket, 200), vec!["b", "e"]);
        assert_eq!(names(&bucket, 302), vec!["d"]);
        assert_eq!(bucket.len(), 5);
    }

    #[test]
    fn test_empty_list() {
        let bucket = group(&doc(vec![])).unwrap();
        assert!(bucket.is_empty());
    }

    #[test]
    fn test_row_fields_passed_through_verbatim() {
        let mut rec = record("100", "安柏");
        rec.time = "2020/9/28 10:00".to_string();
        rec.rank_type = Some("4".to_string());
        let bucket = group(&doc(vec![rec])).unwrap();

        let row = &bucket.get(CategoryCode(100)).unwrap()[0];
        assert_eq!(row.time, "2020/9/28 10:00");
        assert_eq!(row.name, "安柏");
        assert_eq!(row.item_type, "角色");
        assert_eq!(row.rank_type, "4");
    }

    #[test]
    fn test_missing_item_type_aborts() {
        let mut bad = record("301", "x");
        bad.item_type = None;

        match group(&doc(vec![record("301", "a"), bad])) {
            Err(UigfToXlsxError::MissingRequiredFields { index, id }) => {
                assert_eq!(index, 1);
                assert_eq!(id, "301-x");
            }
            other => panic!("Expected MissingRequiredFields, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_rank_type_aborts() {
        let mut bad = record("301", "x");
        bad.rank_type = None;

        assert!(matches!(
            group(&doc(vec![bad])),
            Err(UigfToXlsxError::MissingRequiredFields { index: 0, .. })
        ));
    }

    // 必須フィールドの検査は名称の検査より先に行う
    #[test]
    fn test_required_fields_checked_before_name() {
        let mut bad = record("301", "x");
        bad.name = None;
        bad.item_type = None;

        assert!(matches!(
            group(&doc(vec![bad])),
            Err(UigfToXlsxError::MissingRequiredFields { .. })
        ));
    }

    #[test]
    fn test_name_wins_over_item_id() {
        let mut rec = record("302", "薙草之稻光");
        rec.item_id = Some("13509".to_string());

        let bucket = group(&doc(vec![rec])).unwrap();
        assert_eq!(names(&bucket, 302), vec!["薙草之稻光"]);
    }

    #[test]
    fn test_numeric_item_id_without_name() {
        let mut rec = record("301", "x");
        rec.name = None;
        rec.item_id = Some("12345".to_string());

        match group(&doc(vec![rec])) {
            Err(UigfToXlsxError::UnsupportedLookupRequired { item_id, .. }) => {
                assert_eq!(item_id, "12345");
            }
            other => panic!("Expected UnsupportedLookupRequired, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_item_id_without_name() {
        let mut rec = record("301", "x");
        rec.name = None;
        rec.item_id = Some("abc".to_string());

        assert!(matches!(
            group(&doc(vec![rec])),
            Err(UigfToXlsxError::MissingNameAndId { .. })
        ));
    }

    #[test]
    fn test_neither_name_nor_item_id() {
        let mut rec = record("301", "x");
        rec.name = None;

        assert!(matches!(
            group(&doc(vec![rec])),
            Err(UigfToXlsxError::MissingNameAndId { index: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_category_code() {
        match group(&doc(vec![record("character", "x")])) {
            Err(UigfToXlsxError::InvalidCategoryCode { index, value, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(value, "character");
            }
            other => panic!("Expected InvalidCategoryCode, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_category_is_still_grouped() {
        let bucket = group(&doc(vec![record("999", "x")])).unwrap();
        assert_eq!(names(&bucket, 999), vec!["x"]);
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("12345"));
        assert!(is_numeric(" 42 "));
        assert!(is_numeric("1.5"));
        assert!(is_numeric(""));
        assert!(is_numeric("0x1F"));
        assert!(is_numeric("-Infinity"));
        assert!(!is_numeric("abc"));
        assert!(!is_numeric("NaN"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("12a"));
        assert!(!is_numeric("0x"));
        assert!(!is_numeric("."));
    }

    #[test]
    fn test_parse_category_trims_whitespace() {
        assert_eq!(parse_category(0, " 301 ").unwrap(), Some(CategoryCode(301)));
        assert_eq!(parse_category(0, "\t200\n").unwrap(), Some(CategoryCode(200)));
    }

    #[test]
    fn test_parse_category_accepts_any_number_notation() {
        assert_eq!(parse_category(0, "301.0").unwrap(), Some(CategoryCode(301)));
        assert_eq!(parse_category(0, "3.01e2").unwrap(), Some(CategoryCode(301)));
        assert_eq!(parse_category(0, "+302").unwrap(), Some(CategoryCode(302)));
        assert_eq!(parse_category(0, "0x64").unwrap(), Some(CategoryCode(100)));
        assert_eq!(parse_category(0, "-0").unwrap(), Some(CategoryCode(0)));
    }

    #[test]
    fn test_parse_category_empty_is_zero() {
        assert_eq!(parse_category(0, "").unwrap(), Some(CategoryCode(0)));
        assert_eq!(parse_category(0, "   ").unwrap(), Some(CategoryCode(0)));
    }

    #[test]
    fn test_parse_category_non_integer_matches_nothing() {
        assert_eq!(parse_category(0, "3.5").unwrap(), None);
        assert_eq!(parse_category(0, "Infinity").unwrap(), None);
        assert_eq!(parse_category(0, "1e300").unwrap(), None);
    }

    #[test]
    fn test_parse_category_rejects_non_numbers() {
        for value in ["character", "NaN", "301a", "0xZZ"] {
            assert!(
                matches!(
                    parse_category(3, value),
                    Err(UigfToXlsxError::InvalidCategoryCode { index: 3, .. })
                ),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_decimal_category_lands_on_integer_sheet() {
        let bucket = group(&doc(vec![
            record("301", "a"),
            record("301.0", "b"),
            record("3.01e2", "c"),
        ]))
        .unwrap();
        assert_eq!(names(&bucket, 301), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_fractional_category_is_dropped_not_rejected() {
        let bucket = group(&doc(vec![record("3.5", "x"), record("", "y")])).unwrap();
        assert_eq!(bucket.len(), 1);
        assert_eq!(names(&bucket, 0), vec!["y"]);
    }
}
