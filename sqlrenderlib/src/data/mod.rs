//! Result model: the in-memory shape of one query result.
//!
//! - **Value**: a closed set of scalar types a cell can hold
//! - **ResultSet**: ordered columns plus rows keyed by column name
//! - **project**: the single place where rows are read back in column order
//!
//! ## Example
//!
//! ```rust
//! use sqlrenderlib::data::{project, ResultSet, Value};
//!
//! let rs = ResultSet::build(
//!     vec!["id".to_string(), "name".to_string()],
//!     vec![vec![Value::from(1), Value::Null]],
//! )
//! .unwrap();
//!
//! let cells = project(&rs.rows()[0], rs.columns());
//! assert_eq!(cells[0], Some(&Value::Integer(1)));
//! assert_eq!(cells[1], None);
//! ```

pub mod projector;
pub mod result_set;
pub mod value;

pub use projector::{cell_text, project, Cell};
pub use result_set::{Column, ResultSet, Row};
pub use value::Value;
