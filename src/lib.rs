//! uigf2xlsx - Convert UIGF v2 wish history exports into Excel workbooks
//!
//! This crate reads a wish history export in the UIGF interchange format
//! (version 2.x, `zh-cn`), validates every record, groups the records by
//! wish category and writes one worksheet per category: character event,
//! weapon event, beginner and standard wishes.
//!
//! The conversion is all-or-nothing: the first invalid record aborts the
//! whole run and nothing is written.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use uigf2xlsx::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("uigf.json")?;
//!     let output = File::create("output.xlsx")?;
//!
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Working with the tables directly
//!
//! ```rust
//! use uigf2xlsx::ConverterBuilder;
//!
//! # fn main() -> Result<(), uigf2xlsx::UigfToXlsxError> {
//! let json = r#"{
//!     "info": {"lang": "zh-cn", "uigf_version": "v2.3"},
//!     "list": [{"id": "1", "uigf_gacha_type": "301", "time": "2023-01-01 00:00:00",
//!               "item_type": "角色", "rank_type": "5", "name": "迪希雅"}]
//! }"#;
//!
//! let converter = ConverterBuilder::new().build()?;
//! let tables = converter.convert_to_tables(json)?;
//!
//! assert_eq!(tables.len(), 4);
//! assert_eq!(tables[0].title, "角色活动祈愿");
//! assert_eq!(tables[0].records()[0][1], "迪希雅");
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod output;
mod security;
mod transform;
mod types;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod wasm;

// 公開API
pub use api::{
    OutputFormat, SheetLayout, SheetSpec, HEADER, SUPPORTED_LOCALE, SUPPORTED_VERSION_PREFIX,
};
pub use builder::{Converter, ConverterBuilder};
pub use error::UigfToXlsxError;
pub use security::InputLimits;
pub use transform::{group, project, validate};
pub use types::{
    CategoryBucket, CategoryCode, RawRecord, Row, SheetTable, UigfDocument, UigfInfo,
    ValidatedRow,
};
