//! Connection behaviour against an in-memory transport.

use plainsearch_client::{
    ClientError, Commands, ConnectionConfig, ElasticConnection, JsonSerializer, Method, Result,
    Transport,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
struct Recorded {
    method: Method,
    path: String,
    body: Option<String>,
}

#[derive(Debug, Default)]
struct FakeTransport {
    requests: RefCell<Vec<Recorded>>,
    responses: RefCell<VecDeque<Result<String>>>,
}

impl FakeTransport {
    fn respond(self, response: Result<String>) -> Self {
        self.responses.borrow_mut().push_back(response);
        self
    }
}

impl Transport for FakeTransport {
    fn send(&self, method: Method, path: &str, body: Option<&str>) -> Result<String> {
        self.requests.borrow_mut().push(Recorded {
            method,
            path: path.to_string(),
            body: body.map(str::to_string),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok("{}".to_string()))
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Product {
    #[serde(rename = "Name")]
    name: String,
}

fn connection(transport: FakeTransport) -> ElasticConnection<FakeTransport> {
    ElasticConnection::with_transport(ConnectionConfig::default(), transport).unwrap()
}

#[test]
fn test_index_then_get_round_trip() {
    let transport = FakeTransport::default()
        .respond(Ok(r#"{"_index":"shop","_type":"product","_id":"1","_version":1,"created":true}"#.into()))
        .respond(Ok(r#"{"_index":"shop","_type":"product","_id":"1","found":true,"_source":{"Name":"lamp"}}"#.into()));
    let conn = connection(transport);
    let serializer = JsonSerializer;

    let body = serializer.to_json(&Product { name: "lamp".into() }).unwrap();
    let command = Commands::index("shop", "product", Some("1")).unwrap().refresh(true);
    let indexed = serializer
        .parse_index_result(&conn.put(&command, &body).unwrap())
        .unwrap();
    assert!(indexed.is_created());

    let fetched = serializer
        .parse_get_result::<Product>(&conn.get(&Commands::get("shop", "product", "1").unwrap()).unwrap())
        .unwrap();
    assert_eq!(fetched.source, Some(Product { name: "lamp".into() }));

    let requests = conn.transport().requests.borrow();
    assert_eq!(
        requests[0],
        Recorded {
            method: Method::Put,
            path: "/shop/product/1?refresh=true".into(),
            body: Some(r#"{"Name":"lamp"}"#.into()),
        }
    );
    assert_eq!(requests[1].method, Method::Get);
    assert_eq!(requests[1].path, "/shop/product/1");
    assert_eq!(requests[1].body, None);
}

#[test]
fn test_head_maps_not_found_to_false() {
    let transport = FakeTransport::default()
        .respond(Ok(String::new()))
        .respond(Err(ClientError::Server {
            status: 404,
            reason: "Not Found".into(),
        }))
        .respond(Err(ClientError::Server {
            status: 500,
            reason: "boom".into(),
        }));
    let conn = connection(transport);
    let command = Commands::index_exists("shop").unwrap();

    assert!(conn.head(&command).unwrap());
    assert!(!conn.head(&command).unwrap());
    assert!(matches!(
        conn.head(&command),
        Err(ClientError::Server { status: 500, .. })
    ));
}

#[test]
fn test_search_with_body() {
    let transport = FakeTransport::default().respond(Ok(
        r#"{"took":2,"timed_out":false,"hits":{"total":2,"max_score":1.0,"hits":[
            {"_index":"shop","_type":"product","_id":"1","_score":1.0,"_source":{"Name":"lamp"}},
            {"_index":"shop","_type":"product","_id":"2","_score":0.5,"_source":{"Name":"lamp shade"}}]}}"#
            .into(),
    ));
    let conn = connection(transport);

    let body = r#"{"query":{"query_string":{"query":"lamp"}}}"#;
    let response = conn
        .post(&Commands::search(&["shop"], &["product"]).unwrap(), body)
        .unwrap();
    let result = JsonSerializer.parse_search_result::<Product>(&response).unwrap();

    assert_eq!(result.total(), 2);
    let names: Vec<&str> = result.documents().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["lamp", "lamp shade"]);
    assert_eq!(conn.transport().requests.borrow()[0].path, "/shop/product/_search");
}

#[test]
fn test_with_transport_validates_config() {
    let err = ElasticConnection::with_transport(ConnectionConfig::new(" "), FakeTransport::default())
        .unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));
}

#[test]
fn test_default_index() {
    let conn = ElasticConnection::with_transport(
        ConnectionConfig::default().with_default_index("shop"),
        FakeTransport::default(),
    )
    .unwrap();
    assert_eq!(conn.default_index().unwrap(), "shop");

    let conn = connection(FakeTransport::default());
    assert!(matches!(
        conn.default_index(),
        Err(ClientError::MissingArgument("index"))
    ));
}
