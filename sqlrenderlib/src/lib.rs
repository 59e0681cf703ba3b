//! # sqlrenderlib
//!
//! Render the output of a single relational query into the formats people
//! hand to other tools: ASCII tables, markdown, HTML, CSV, JSON, YAML, XML,
//! Excel workbooks and plain `name=value` lines.
//!
//! ## Overview
//!
//! The pipeline has two stages:
//!
//! - **Data** ([`data`]): a [`ResultSet`] of ordered [`Column`]s and rows of
//!   typed [`Value`]s, built once from query output and never mutated.
//! - **Output** ([`output`]): a [`Renderer`] per format, looked up by name in
//!   a [`RendererRegistry`], producing a self-contained byte buffer.
//!
//! Rendering is pure: the same result set and options always produce the
//! same bytes, and a failed render produces none.
//!
//! ## Format notes
//!
//! - `table` appends a `Total` footer once a result has more than 10 rows.
//! - `csv` starts with a UTF-8 byte-order mark.
//! - `xml` carries the query text in the root `statement` attribute.
//! - `xlsx` addresses columns with single letters by default, so only the
//!   first 26 columns are written; see [`ColumnAddressing`].
//!
//! ## Example
//!
//! ```rust
//! use sqlrenderlib::{render, RenderOptions, ResultSet, Value};
//!
//! let rs = ResultSet::build(
//!     vec!["id".to_string(), "name".to_string()],
//!     vec![
//!         vec![Value::from(1), Value::from("alpha")],
//!         vec![Value::from(2), Value::Null],
//!     ],
//! )
//! .unwrap();
//!
//! let json = render(&rs, "json", &RenderOptions::new()).unwrap();
//! assert_eq!(json, br#"[{"id":1,"name":"alpha"},{"id":2,"name":null}]"#);
//!
//! let options = RenderOptions::new().statement("SELECT id, name FROM t");
//! let xml = render(&rs, "xml", &options).unwrap();
//! assert!(String::from_utf8(xml).unwrap().contains("statement=\"SELECT id, name FROM t\""));
//! ```

pub mod data;
pub mod error;
pub mod options;
pub mod output;

pub use data::{project, Cell, Column, ResultSet, Row, Value};
pub use error::RenderError;
pub use options::{ColumnAddressing, Format, RenderOptions};
pub use output::{render, Renderer, RendererRegistry};

/// Result type for sqlrenderlib operations
pub type Result<T> = std::result::Result<T, RenderError>;
