//! Parses JSON text into an owned tree of [`Node`]s and looks values up by
//! key, position, or dotted path.
//!
//! ```
//! let root = jsontree::parse(r#"{"user": {"tags": ["a", "b"]}}"#).unwrap();
//! let tag = root.get_nested("user.tags.1").and_then(|x| x.as_str());
//! assert_eq!(tag, Some("b"));
//! root.release();
//! ```

mod alloc;
mod error;
mod format;
mod node;
mod parse;

pub use crate::alloc::ParseOptions;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::node::{Kind, Node, Value};
pub use crate::parse::{parse, parse_reader, parse_with};
