//! Client for the OpenStreetMap editing API (v0.6).
//!
//! Fetches nodes, ways, relations and changesets, and submits edits inside a
//! changeset tracked by a caller-owned [`Session`].
//!
//! ```no_run
//! use osm_edit::{BasicAuth, Client, ClientConfig, ElementType, Session};
//!
//! fn main() -> osm_edit::Result<()> {
//!     let client = Client::from_config(&ClientConfig::default())
//!         .with_credentials(BasicAuth::new("mapper", "secret"));
//!     let mut session = Session::new();
//!
//!     let mut node = client.find(ElementType::Node, 1234)?;
//!     node.tags_mut().insert("wheelchair".into(), "yes".into());
//!
//!     client.ensure_current(&mut session)?;
//!     client.save(&session, node)?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod data;
pub mod errors;
pub mod session;
pub mod xml;

pub use api::{Authenticator, BasicAuth, Method, Request, Response, TokenAuth, Transport, UreqTransport};
pub use client::Client;
pub use config::{ClientConfig, CredentialsConfig};
pub use data::osm::{Changeset, Member, Meta, Node, OsmId, Relation, User, Way};
pub use data::{Element, ElementType, Tags};
pub use errors::{classify, Error, ErrorKind, Result};
pub use session::{ChangesetState, Session};
