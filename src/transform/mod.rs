//! Transform Module
//!
//! UIGFドキュメントからシートテーブルを作る変換処理の中核。
//! 検証 → グループ化 → 投影 の順に実行し、どの段階で失敗しても
//! 部分的な結果は返しません。

mod grouper;
mod projector;
mod validator;

pub use grouper::group;
pub use projector::project;
pub use validator::validate;
