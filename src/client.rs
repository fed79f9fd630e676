use log::{debug, info, warn};

use crate::api::{Authenticator, Method, Request, Transport, UreqTransport};
use crate::config::ClientConfig;
use crate::data::osm::{Changeset, OsmId, User};
use crate::data::{Element, ElementType};
use crate::errors::{classify, Error, ErrorKind, Result};
use crate::session::Session;
use crate::xml;

/// Entry point for reading and editing map data.
///
/// Reads are anonymous. Anything that writes, or asks about the
/// authenticated user, needs an [`Authenticator`]. Edits are made inside the
/// changeset tracked by a caller-owned [`Session`].
pub struct Client<T: Transport = UreqTransport> {
    transport: T,
    authenticator: Option<Box<dyn Authenticator>>,
}

impl Client<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        let client = Client::new(UreqTransport::new(config));
        match &config.credentials {
            Some(credentials) => client.with_authenticator(credentials.authenticator()),
            None => client,
        }
    }
}

fn positive_id(id: i64) -> Result<OsmId> {
    match OsmId::try_from(id) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::new(ErrorKind::InvalidArgument, format!("id must be a positive integer, got {id}"))),
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Client {
            transport,
            authenticator: None,
        }
    }

    pub fn with_credentials(self, authenticator: impl Authenticator + 'static) -> Self {
        self.with_authenticator(Box::new(authenticator))
    }

    pub fn with_authenticator(mut self, authenticator: Box<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.authenticator.is_some()
    }

    fn require_credentials(&self) -> Result<&dyn Authenticator> {
        self.authenticator
            .as_deref()
            .ok_or_else(|| Error::new(ErrorKind::CredentialsMissing, "this call needs credentials"))
    }

    /// Executes the request and fails on anything but a 200.
    fn send(&self, request: &Request) -> Result<String> {
        let response = self.transport.execute(request)?;
        if let Err(err) = classify(response.status, &response.body) {
            warn!(
                method = request.method.as_str(),
                path = request.path.as_str(),
                status = response.status;
                "Request failed"
            );
            return Err(err);
        }
        Ok(response.body)
    }

    fn send_authenticated(&self, mut request: Request) -> Result<String> {
        self.require_credentials()?.authorize(&mut request)?;
        self.send(&request)
    }

    /// Fetches one element. Does not need credentials.
    pub fn find(&self, kind: ElementType, id: i64) -> Result<Element> {
        let id = positive_id(id)?;
        let body = self.send(&Request::get(format!("/{kind}/{id}")))?;
        let element = xml::parse_element(&body)?;
        if element.element_type() != kind {
            return Err(format!("asked for a {kind}, got a {}", element.element_type()).into());
        }
        Ok(element)
    }

    /// Like [`Client::find`], from unparsed type and id text.
    pub fn find_str(&self, type_name: &str, id: &str) -> Result<Element> {
        let kind: ElementType = type_name.parse()?;
        let id: i64 = id
            .trim()
            .parse()
            .map_err(|_| Error::new(ErrorKind::InvalidArgument, format!("id must be a positive integer, got {id:?}")))?;
        self.find(kind, id)
    }

    pub fn find_user(&self) -> Result<User> {
        let body = self.send_authenticated(Request::get("/user/details"))?;
        xml::parse_user(&body)
    }

    pub fn find_user_id(&self) -> Result<u64> {
        Ok(self.find_user()?.id)
    }

    /// Open changesets of `user_id`, in the order the server lists them.
    pub fn find_open_changesets(&self, user_id: u64) -> Result<Vec<Changeset>> {
        let request = Request::get("/changesets")
            .with_query("open", "true")
            .with_query("user", user_id.to_string());
        let body = self.send_authenticated(request)?;
        let changesets = xml::parse_elements(&body)?
            .into_iter()
            .filter_map(|element| match element {
                Element::Changeset(changeset) => Some(changeset),
                _ => None,
            })
            .collect();
        Ok(changesets)
    }

    /// Creates drafts and updates everything else.
    pub fn save(&self, session: &Session, element: Element) -> Result<Element> {
        if element.is_draft() {
            self.create(session, element)
        } else {
            self.update(session, element)
        }
    }

    /// Submits a new element and returns it with its assigned id. Does not
    /// need an open changeset, but uses one if the session has it.
    pub fn create(&self, session: &Session, mut element: Element) -> Result<Element> {
        self.require_credentials()?;
        let kind = element.element_type();
        if let Some(changeset_id) = session.open_changeset_id() {
            element.set_changeset(changeset_id);
        }

        let request = Request::new(Method::Put, format!("/{kind}/create")).with_body(xml::write_element(&element)?);
        let body = self.send_authenticated(request)?;
        let id = xml::parse_id(&body)?;

        element.set_id(id);
        if let Some(meta) = element.meta_mut() {
            meta.version = Some(1);
        }
        info!(element_type = kind.as_str(), id = id; "Created element");
        Ok(element)
    }

    /// Submits changes to a persisted element inside the session's open
    /// changeset. Never opens a changeset by itself.
    pub fn update(&self, session: &Session, mut element: Element) -> Result<Element> {
        self.require_credentials()?;
        let changeset_id = session
            .open_changeset_id()
            .ok_or_else(|| Error::new(ErrorKind::ChangesetMissing, "update needs an open changeset"))?;
        let kind = element.element_type();
        let id = element
            .id()
            .ok_or_else(|| Error::new(ErrorKind::InvalidArgument, "cannot update an element without an id"))?;
        element.set_changeset(changeset_id);

        let request = Request::new(Method::Post, format!("/{kind}/{id}")).with_body(xml::write_element(&element)?);
        let body = self.send_authenticated(request)?;

        // The server answers with either the new version or the full record.
        match xml::parse_id(&body) {
            Ok(version) => {
                if let Some(meta) = element.meta_mut() {
                    meta.version = Some(version);
                }
            },
            Err(_) => element = xml::parse_element(&body)?,
        }
        debug!(element_type = kind.as_str(), id = id, changeset = changeset_id; "Updated element");
        Ok(element)
    }

    /// Deletes a persisted element inside the session's open changeset and
    /// returns the version of the deleted element.
    pub fn delete(&self, session: &Session, mut element: Element) -> Result<u64> {
        self.require_credentials()?;
        let changeset_id = session
            .open_changeset_id()
            .ok_or_else(|| Error::new(ErrorKind::ChangesetMissing, "delete needs an open changeset"))?;
        let kind = element.element_type();
        let id = element
            .id()
            .ok_or_else(|| Error::new(ErrorKind::InvalidArgument, "cannot delete an element without an id"))?;
        element.set_changeset(changeset_id);

        let request = Request::new(Method::Delete, format!("/{kind}/{id}")).with_body(xml::write_element(&element)?);
        let body = self.send_authenticated(request)?;
        let version = xml::parse_id(&body)?;
        info!(element_type = kind.as_str(), id = id, changeset = changeset_id; "Deleted element");
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_ids_only() {
        assert_eq!(positive_id(1).unwrap(), 1);
        assert_eq!(positive_id(0).unwrap_err().kind, ErrorKind::InvalidArgument);
        assert_eq!(positive_id(-3).unwrap_err().kind, ErrorKind::InvalidArgument);
    }
}
