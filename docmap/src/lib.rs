//! Declarative mapping between plain Rust records and structured documents.
//!
//! A type implements [`Record`] by listing its fields once with
//! [`field!`] and [`fields!`]. The same table then drives decoding from
//! JSON, XML, BSON and TOML configuration, encoding back to each of them,
//! presence tracking through [`Tracked`], and Go struct generation through
//! [`gocode`].
//!
//! ```
//! use docmap::{Indent, Record, Source, field, fields, from_json, to_json};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Record for Point {
//!     const TYPE_NAME: &'static str = "Point";
//!     fields!(Point => [field!(Point, x).mandatory(), field!(Point, y)]);
//! }
//!
//! # fn main() -> docmap::DocResult<()> {
//! let point = from_json::<Point>(Source::Text(r#"{"x": 3}"#))?;
//! assert!(point.was_set("x"));
//! assert!(!point.was_set("y"));
//! assert_eq!(to_json(&*point, "", Indent::Compact)?, r#"{"x":3,"y":0}"#);
//! # Ok(())
//! # }
//! ```

mod alias;
mod api;
mod condition;
mod context;
mod convert;
mod descriptor;
pub mod document;
pub mod engine;
mod error;
pub mod format;
pub mod gocode;
mod presence;
mod record;
pub mod schema;
mod writer;

pub use alias::{Alias, AliasSpec, Lookup, resolve_key, write_name};
pub use api::{Source, decode, decode_document, encode};
#[cfg(feature = "bson")]
pub use api::{from_bson, load_bson, to_bson};
#[cfg(feature = "config")]
pub use api::{from_config, from_config_at, load_config, load_config_at, to_config};
#[cfg(feature = "json")]
pub use api::{from_json, load_json, to_json};
#[cfg(feature = "xml")]
pub use api::{from_xml, load_xml, to_xml};
pub use condition::{Condition, EncodeScope};
pub use context::{DecodeContext, EncodeContext};
pub use convert::{Binary, Decode, Describe, Encode};
pub use descriptor::{Field, Policy};
pub use document::{Node, NodeKind, Object, Value};
pub use error::{DocError, DocResult};
pub use format::{Adapter, Format, Indent};
pub use gocode::{GoTags, to_go_code};
pub use presence::{PresenceSet, Tracked};
pub use record::Record;
pub use writer::DocumentWriter;
