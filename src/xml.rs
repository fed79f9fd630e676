//! Conversion between API response bodies and the element model.
//!
//! Every body the API speaks is an `<osm>` envelope wrapping zero or more
//! `node`, `way`, `relation`, `changeset` or `user` records.

pub mod parse;
pub mod write;

pub use parse::{parse_element, parse_elements, parse_id, parse_user};
pub use write::write_element;
