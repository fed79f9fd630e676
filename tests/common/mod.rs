#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use osm_edit::{BasicAuth, Client, Error, ErrorKind, Request, Response, Result, Transport};

pub const USER_DETAILS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6"><user id="42" display_name="mapper" account_created="2020-01-01T00:00:00Z"/></osm>"#;

pub const NO_CHANGESETS: &str = r#"<osm version="0.6"></osm>"#;

pub const NODE_1234: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="stub">
  <node id="1234" visible="true" version="2" changeset="10" timestamp="2024-05-01T12:00:00Z" user="mapper" uid="42" lat="51.5" lon="-0.12">
    <tag k="wheelchair" v="no"/>
  </node>
</osm>"#;

/// Answers requests from a script and records what it was asked.
#[derive(Default)]
pub struct StubTransport {
    responses: RefCell<VecDeque<Response>>,
    requests: RefCell<Vec<Request>>,
}

impl StubTransport {
    pub fn new() -> Self {
        StubTransport::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses.borrow_mut().push_back(Response::new(status, body));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Request {
        self.requests.borrow().last().cloned().expect("no request was made")
    }
}

impl Transport for StubTransport {
    fn execute(&self, request: &Request) -> Result<Response> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::new(ErrorKind::GenericError, "stub has no scripted response"))
    }
}

pub fn anonymous(stub: &StubTransport) -> Client<&StubTransport> {
    Client::new(stub)
}

pub fn authenticated(stub: &StubTransport) -> Client<&StubTransport> {
    Client::new(stub).with_credentials(BasicAuth::new("mapper", "secret"))
}
