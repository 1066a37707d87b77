//! Blocking client side of plainsearch.
//!
//! The query builders produce request bodies as text; this crate supplies the
//! rest of a round trip: connection settings, request paths, a blocking HTTP
//! transport and typed parsing of the responses.
//!
//! ```rust,no_run
//! use plainsearch_client::{Commands, ConnectionConfig, ElasticConnection, JsonSerializer};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Product {
//!     #[serde(rename = "Name")]
//!     name: String,
//! }
//!
//! let connection = ElasticConnection::new(ConnectionConfig::new("localhost"))?;
//! let body = r#"{"query":{"term":{"Name":"lamp"}}}"#;
//! let response = connection.post(&Commands::search(&["shop"], &["product"])?, body)?;
//!
//! let result = JsonSerializer.parse_search_result::<Product>(&response)?;
//! for product in result.documents() {
//!     println!("{}", product.name);
//! }
//! # Ok::<(), plainsearch_client::ClientError>(())
//! ```

#![warn(missing_docs)]

pub mod commands;
pub mod config;
pub mod connection;
pub mod error;
pub mod results;
pub mod serializer;
pub mod transport;

pub use commands::{Command, Commands};
pub use config::ConnectionConfig;
pub use connection::ElasticConnection;
pub use error::{ClientError, Result};
pub use results::{
    BulkItem, BulkItemStatus, BulkResult, CountResult, DeleteResult, GetResult, Hit, Hits,
    IndexResult, SearchResult, Shards, TotalHits,
};
pub use serializer::JsonSerializer;
pub use transport::{HttpTransport, Method, Transport};
