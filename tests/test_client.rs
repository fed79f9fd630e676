use osm_edit::{Changeset, Element, ElementType, ErrorKind, Method, Node, Session, TokenAuth};

mod common;
use common::{anonymous, authenticated, StubTransport, NODE_1234, USER_DETAILS};

fn open_session(id: u64) -> Session {
    Session::resume(Changeset { id: Some(id), open: true, ..Default::default() })
}

#[test]
fn find_node() {
    let stub = StubTransport::new();
    stub.respond(200, NODE_1234);

    let element = anonymous(&stub).find(ElementType::Node, 1234).unwrap();

    assert_eq!(element.element_type(), ElementType::Node);
    assert_eq!(element.id(), Some(1234));
    let request = stub.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "/node/1234");
    assert_eq!(request.header("Authorization"), None);
}

#[test]
fn find_not_found_carries_body() {
    let stub = StubTransport::new();
    stub.respond(404, "Node 1234 not found");

    let err = anonymous(&stub).find(ElementType::Node, 1234).unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "Node 1234 not found");
}

#[test]
fn find_gone_and_unknown_status() {
    let stub = StubTransport::new();
    stub.respond(410, "deleted").respond(503, "maintenance");
    let client = anonymous(&stub);

    assert_eq!(client.find(ElementType::Way, 1).unwrap_err().kind, ErrorKind::Gone);
    assert_eq!(client.find(ElementType::Way, 1).unwrap_err().kind, ErrorKind::GenericError);
}

#[test]
fn find_rejects_non_positive_ids_without_io() {
    let stub = StubTransport::new();
    let client = anonymous(&stub);

    assert_eq!(client.find(ElementType::Node, 0).unwrap_err().kind, ErrorKind::InvalidArgument);
    assert_eq!(client.find(ElementType::Node, -5).unwrap_err().kind, ErrorKind::InvalidArgument);
    assert_eq!(client.find_str("node", "12a").unwrap_err().kind, ErrorKind::InvalidArgument);
    assert_eq!(client.find_str("node", "1.5").unwrap_err().kind, ErrorKind::InvalidArgument);
    assert_eq!(client.find_str("building", "3").unwrap_err().kind, ErrorKind::InvalidArgument);
    assert_eq!(stub.calls(), 0);
}

#[test]
fn find_str_parses_type_and_id() {
    let stub = StubTransport::new();
    stub.respond(200, NODE_1234);

    let element = anonymous(&stub).find_str("node", "1234").unwrap();

    assert_eq!(element.id(), Some(1234));
    assert_eq!(stub.last_request().path, "/node/1234");
}

#[test]
fn find_rejects_mismatched_record() {
    let stub = StubTransport::new();
    stub.respond(200, NODE_1234);

    let err = anonymous(&stub).find(ElementType::Way, 1234).unwrap_err();
    assert_eq!(err.kind, ErrorKind::GenericError);
}

#[test]
fn find_user_id_needs_credentials() {
    let stub = StubTransport::new();
    stub.respond(200, USER_DETAILS);

    let err = anonymous(&stub).find_user_id().unwrap_err();

    assert_eq!(err.kind, ErrorKind::CredentialsMissing);
    assert_eq!(stub.calls(), 0);
}

#[test]
fn find_user_id_with_token() {
    let stub = StubTransport::new();
    stub.respond(200, USER_DETAILS);
    let client = anonymous(&stub).with_credentials(TokenAuth::new("tok"));

    assert_eq!(client.find_user_id().unwrap(), 42);
    let request = stub.last_request();
    assert_eq!(request.path, "/user/details");
    assert_eq!(request.header("Authorization"), Some("Bearer tok"));
}

#[test]
fn unauthorized_surfaces_as_error() {
    let stub = StubTransport::new();
    stub.respond(401, "Couldn't authenticate you");

    let err = authenticated(&stub).find_user().unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.message, "Couldn't authenticate you");
}

#[test]
fn create_changeset_draft() {
    let stub = StubTransport::new();
    stub.respond(200, "5");

    let created = authenticated(&stub)
        .create(&Session::new(), Element::Changeset(Changeset::default()))
        .unwrap();

    assert_eq!(created, Element::Changeset(Changeset { id: Some(5), ..Default::default() }));
    let request = stub.last_request();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.path, "/changeset/create");
    assert!(request.header("Authorization").unwrap().starts_with("Basic "));
}

#[test]
fn create_rejects_zero_id() {
    let stub = StubTransport::new();
    stub.respond(200, "0");

    let err = authenticated(&stub)
        .create(&Session::new(), Node::new(1.0, 2.0).into())
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::GenericError);
}

#[test]
fn create_does_not_need_changeset() {
    let stub = StubTransport::new();
    stub.respond(200, "99");

    let created = authenticated(&stub)
        .create(&Session::new(), Node::new(1.0, 2.0).with_tag("amenity", "bench").into())
        .unwrap();

    assert_eq!(created.id(), Some(99));
    assert_eq!(created.meta().unwrap().version, Some(1));
    assert_eq!(created.meta().unwrap().changeset, None);
    assert_eq!(stub.last_request().path, "/node/create");
}

#[test]
fn create_stamps_open_changeset() {
    let stub = StubTransport::new();
    stub.respond(200, "99");

    let created = authenticated(&stub)
        .create(&open_session(7), Node::new(1.0, 2.0).into())
        .unwrap();

    assert_eq!(created.meta().unwrap().changeset, Some(7));
    assert!(stub.last_request().body.unwrap().contains(r#"changeset="7""#));
}

#[test]
fn create_without_credentials_makes_no_call() {
    let stub = StubTransport::new();

    let err = anonymous(&stub).create(&Session::new(), Node::new(0.0, 0.0).into()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::CredentialsMissing);
    assert_eq!(stub.calls(), 0);
}

#[test]
fn update_needs_changeset() {
    let stub = StubTransport::new();
    let client = authenticated(&stub);
    let mut node = Node::new(1.0, 2.0);
    node.id = Some(1234);

    let err = client.update(&Session::new(), node.clone().into()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ChangesetMissing);

    let closed = Session::resume(Changeset { id: Some(3), open: false, ..Default::default() });
    let err = client.update(&closed, node.into()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ChangesetMissing);

    assert_eq!(stub.calls(), 0);
}

#[test]
fn update_posts_to_element() {
    let stub = StubTransport::new();
    stub.respond(200, "3");
    let mut node = Node::new(51.5, -0.12).with_tag("wheelchair", "yes");
    node.id = Some(1234);
    node.meta.version = Some(2);

    let updated = authenticated(&stub).update(&open_session(11), node.into()).unwrap();

    assert_eq!(updated.meta().unwrap().version, Some(3));
    assert_eq!(updated.meta().unwrap().changeset, Some(11));
    let request = stub.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/node/1234");
    let body = request.body.unwrap();
    assert!(body.contains(r#"changeset="11""#));
    assert!(body.contains(r#"<tag k="wheelchair" v="yes"/>"#));
}

#[test]
fn update_accepts_full_record() {
    let stub = StubTransport::new();
    stub.respond(200, NODE_1234);
    let mut node = Node::new(51.5, -0.12);
    node.id = Some(1234);

    let updated = authenticated(&stub).update(&open_session(11), node.into()).unwrap();

    assert_eq!(updated.tags().get("wheelchair").map(String::as_str), Some("no"));
}

#[test]
fn update_conflict() {
    let stub = StubTransport::new();
    stub.respond(409, "Version mismatch: Provided 1, server had: 2");
    let mut node = Node::new(0.0, 0.0);
    node.id = Some(1);

    let err = authenticated(&stub).update(&open_session(4), node.into()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.starts_with("Version mismatch"));
}

#[test]
fn save_routes_by_id() {
    let stub = StubTransport::new();
    stub.respond(200, "500").respond(200, "8");
    let client = authenticated(&stub);
    let session = open_session(2);

    let created = client.save(&session, Node::new(1.0, 1.0).into()).unwrap();
    assert_eq!(created.id(), Some(500));
    assert_eq!(stub.last_request().path, "/node/create");

    let updated = client.save(&session, created).unwrap();
    assert_eq!(updated.id(), Some(500));
    assert_eq!(updated.meta().unwrap().version, Some(8));
    let request = stub.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/node/500");
}

#[test]
fn save_persisted_without_changeset_fails() {
    let stub = StubTransport::new();
    let mut node = Node::new(0.0, 0.0);
    node.id = Some(77);

    let err = authenticated(&stub).save(&Session::new(), node.into()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::ChangesetMissing);
    assert_eq!(stub.calls(), 0);
}

#[test]
fn delete_returns_version() {
    let stub = StubTransport::new();
    stub.respond(200, "4");
    let mut node = Node::new(0.0, 0.0);
    node.id = Some(77);
    node.meta.version = Some(3);

    let version = authenticated(&stub).delete(&open_session(6), node.into()).unwrap();

    assert_eq!(version, 4);
    let request = stub.last_request();
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.path, "/node/77");
}

#[test]
fn delete_needs_changeset_and_id() {
    let stub = StubTransport::new();
    let client = authenticated(&stub);

    let mut node = Node::new(0.0, 0.0);
    node.id = Some(77);
    assert_eq!(client.delete(&Session::new(), node.into()).unwrap_err().kind, ErrorKind::ChangesetMissing);

    let draft = Node::new(0.0, 0.0);
    assert_eq!(client.delete(&open_session(1), draft.into()).unwrap_err().kind, ErrorKind::InvalidArgument);
    assert_eq!(stub.calls(), 0);
}
