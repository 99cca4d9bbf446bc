//! WebAssembly bindings
//!
//! ブラウザからファイル内容（文字列）を渡してXLSXのバイト列を受け取るためのエントリーポイント。

use crate::builder::ConverterBuilder;
use wasm_bindgen::prelude::*;

/// UIGFドキュメント（JSON文字列）をXLSXに変換する
///
/// 失敗した場合はエラーメッセージを文字列として返します。
#[wasm_bindgen(js_name = convertUigf)]
pub fn convert_uigf(json: &str) -> Result<Vec<u8>, JsValue> {
    ConverterBuilder::new()
        .build()
        .and_then(|converter| converter.convert_to_bytes(json.as_bytes()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
