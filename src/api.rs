//! Public API Types
//!
//! 公開APIで使用する設定型と固定値を定義するモジュール。

use crate::types::CategoryCode;

/// サポートする唯一のロケール
pub const SUPPORTED_LOCALE: &str = "zh-cn";

/// サポートするUIGFのメジャーバージョン接頭辞
pub const SUPPORTED_VERSION_PREFIX: &str = "v2";

/// 全シート共通の見出し行（時间, 名称, 类别, 星级）
pub const HEADER: [&str; 4] = ["时间", "名称", "类别", "星级"];

/// 出力シート1枚分の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSpec {
    /// シート名
    pub title: String,
    /// このシートに振り分けるカテゴリコード
    pub category: CategoryCode,
}

impl SheetSpec {
    pub fn new(title: impl Into<String>, category: i64) -> Self {
        Self {
            title: title.into(),
            category: CategoryCode(category),
        }
    }
}

/// 出力シートの並び
///
/// 変換結果のシートは常にこの順序で、この枚数だけ生成されます。
/// レイアウトにないカテゴリコードのレコードは出力されません。
///
/// # 使用例
///
/// ```rust
/// use uigf2xlsx::SheetLayout;
///
/// let layout = SheetLayout::standard();
/// assert_eq!(layout.len(), 4);
/// assert_eq!(layout.specs()[0].title, "角色活动祈愿");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    specs: Vec<SheetSpec>,
}

impl SheetLayout {
    pub fn new(specs: Vec<SheetSpec>) -> Self {
        Self { specs }
    }

    /// 標準の4シート構成
    ///
    /// | シート名 | カテゴリコード |
    /// | -------- | -------------- |
    /// | 角色活动祈愿 | 301 |
    /// | 武器活动祈愿 | 302 |
    /// | 新手祈愿 | 100 |
    /// | 常驻祈愿 | 200 |
    pub fn standard() -> Self {
        Self::new(vec![
            SheetSpec::new("角色活动祈愿", 301),
            SheetSpec::new("武器活动祈愿", 302),
            SheetSpec::new("新手祈愿", 100),
            SheetSpec::new("常驻祈愿", 200),
        ])
    }

    pub fn specs(&self) -> &[SheetSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// カテゴリコードがレイアウトに含まれるか
    pub fn contains(&self, category: CategoryCode) -> bool {
        self.specs.iter().any(|spec| spec.category == category)
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self::standard()
    }
}

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// Excelワークブック（.xlsx）
    ///
    /// シートごとに1枚のワークシートを作成し、見出し行を固定表示します。
    #[default]
    Xlsx,

    /// JSON形式
    ///
    /// # 出力例
    ///
    /// ```json
    /// {
    ///   "sheets": [
    ///     {"title": "角色活动祈愿", "category": 301, "rows": [["时间", "名称", "类别", "星级"]]}
    ///   ]
    /// }
    /// ```
    Json,
}
