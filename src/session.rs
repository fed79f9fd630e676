//! The changeset a client session edits in.
//!
//! A [`Session`] is owned by the caller and passed to the client's editing
//! calls. Its state only moves through [`Client::ensure_current`]:
//!
//! ```text
//! NoChangeset ──lookup──────────────────────▶ OpenRemote
//!      │                                         ▲
//!      └──▶ Pending ──create on the server──────┘
//! ```

use log::info;

use crate::api::Transport;
use crate::client::Client;
use crate::data::osm::{Changeset, OsmId};
use crate::data::Element;
use crate::errors::{Error, ErrorKind, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ChangesetState {
    #[default]
    NoChangeset,
    /// Built locally, not yet acknowledged by the server.
    Pending(Changeset),
    /// Has an id and the server reports it open.
    OpenRemote(Changeset),
    /// Known to be closed. Never reached by this crate on its own.
    Closed(Changeset),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: ChangesetState,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Continues with a changeset obtained elsewhere.
    pub fn resume(changeset: Changeset) -> Self {
        let state = match changeset.id {
            None => ChangesetState::Pending(changeset),
            Some(_) if changeset.open => ChangesetState::OpenRemote(changeset),
            Some(_) => ChangesetState::Closed(changeset),
        };
        Session { state }
    }

    pub fn state(&self) -> &ChangesetState {
        &self.state
    }

    pub fn current(&self) -> Option<&Changeset> {
        match &self.state {
            ChangesetState::NoChangeset => None,
            ChangesetState::Pending(changeset)
            | ChangesetState::OpenRemote(changeset)
            | ChangesetState::Closed(changeset) => Some(changeset),
        }
    }

    /// Id of the current changeset if it can take edits.
    pub fn open_changeset_id(&self) -> Option<OsmId> {
        match &self.state {
            ChangesetState::OpenRemote(changeset) if changeset.open => changeset.id,
            _ => None,
        }
    }
}

impl<T: Transport> Client<T> {
    /// Makes sure the session has an open changeset and returns it.
    ///
    /// Reuses the session's changeset without touching the network when it
    /// is already open, and submits it when it is a pending draft. Otherwise
    /// adopts the first open changeset the server lists for the authenticated
    /// user, or creates a new one. On failure the session is left without a
    /// changeset.
    pub fn ensure_current<'s>(&self, session: &'s mut Session) -> Result<&'s Changeset> {
        if session.open_changeset_id().is_none() {
            match self.adopt_or_create(session) {
                Ok(changeset) => {
                    info!(changeset_id = changeset.id.unwrap_or_default(); "Changeset is now current");
                    session.state = ChangesetState::OpenRemote(changeset);
                },
                Err(err) => {
                    session.state = ChangesetState::NoChangeset;
                    return Err(err);
                },
            }
        }

        match &session.state {
            ChangesetState::OpenRemote(changeset) => Ok(changeset),
            _ => Err(Error::new(ErrorKind::ChangesetMissing, "no open changeset")),
        }
    }

    fn adopt_or_create(&self, session: &mut Session) -> Result<Changeset> {
        // A resumed draft is submitted as is, without looking for another one.
        let pending = match &session.state {
            ChangesetState::Pending(draft) => Some(draft.clone()),
            _ => None,
        };
        let draft = match pending {
            Some(draft) => draft,
            None => {
                let user_id = self.find_user_id()?;
                if let Some(mut changeset) = self.find_open_changesets(user_id)?.into_iter().next() {
                    info!(changeset_id = changeset.id.unwrap_or_default(), user_id = user_id; "Adopting open changeset");
                    changeset.open = true;
                    return Ok(changeset);
                }
                let draft = Changeset::default();
                session.state = ChangesetState::Pending(draft.clone());
                draft
            },
        };

        match self.create(session, Element::Changeset(draft))? {
            Element::Changeset(mut changeset) => {
                changeset.open = true;
                Ok(changeset)
            },
            other => Err(format!("expected a changeset, got a {}", other.element_type()).into()),
        }
    }
}
