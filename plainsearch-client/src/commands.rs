//! Request paths for the server's REST endpoints.
//!
//! ```rust
//! use plainsearch_client::Commands;
//!
//! let path = Commands::get("shop", "product", "42")?.routing("eu").build()?;
//! assert_eq!(path, "/shop/product/42?routing=eu");
//!
//! let path = Commands::search(&["shop", "archive"], &[])?.build()?;
//! assert_eq!(path, "/shop,archive/_search");
//!
//! assert!(Commands::get("shop", "", "42").is_err());
//! # Ok::<(), plainsearch_client::ClientError>(())
//! ```

use crate::error::{ClientError, Result};
use std::fmt;

/// A request path with query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    segments: Vec<String>,
    params: Vec<(String, String)>,
}

impl Command {
    fn new() -> Self {
        Self::default()
    }

    /// Add one path segment, percent-encoded.
    fn segment(mut self, segment: &str) -> Self {
        self.segments.push(urlencoding::encode(segment).into_owned());
        self
    }

    /// Add a comma-separated segment; nothing when `names` is empty.
    fn list(mut self, names: &[&str]) -> Self {
        let encoded: Vec<String> = names
            .iter()
            .filter(|name| !name.is_empty())
            .map(|name| urlencoding::encode(name).into_owned())
            .collect();
        if !encoded.is_empty() {
            self.segments.push(encoded.join(","));
        }
        self
    }

    /// Endpoint segment such as `_search`, added as-is.
    fn endpoint(mut self, endpoint: &'static str) -> Self {
        self.segments.push(endpoint.to_string());
        self
    }

    /// Query parameter. Empty values are skipped.
    pub fn param(mut self, key: &str, value: impl fmt::Display) -> Self {
        let value = value.to_string();
        if !key.is_empty() && !value.is_empty() {
            self.params.push((key.to_string(), value));
        }
        self
    }

    /// `routing` parameter.
    pub fn routing(self, routing: &str) -> Self {
        self.param("routing", routing)
    }

    /// `parent` parameter.
    pub fn parent(self, parent: &str) -> Self {
        self.param("parent", parent)
    }

    /// `refresh` parameter.
    pub fn refresh(self, refresh: bool) -> Self {
        self.param("refresh", refresh)
    }

    /// `version` parameter.
    pub fn version(self, version: i64) -> Self {
        self.param("version", version)
    }

    /// `pretty` parameter.
    pub fn pretty(self) -> Self {
        self.param("pretty", true)
    }

    /// `/seg/seg?key=value`.
    pub fn build(&self) -> Result<String> {
        let mut path = format!("/{}", self.segments.join("/"));
        if !self.params.is_empty() {
            path.push('?');
            path.push_str(&serde_urlencoded::to_string(&self.params)?);
        }
        Ok(path)
    }
}

fn required(value: &str, name: &'static str) -> Result<()> {
    if value.is_empty() {
        Err(ClientError::MissingArgument(name))
    } else {
        Ok(())
    }
}

/// Path formatting for each supported endpoint.
///
/// Required arguments are checked here, so a missing index or id fails
/// before anything is sent.
pub struct Commands;

impl Commands {
    /// Index a document. Without an id the server assigns one (`POST`).
    pub fn index(index: &str, doc_type: &str, id: Option<&str>) -> Result<Command> {
        required(index, "index")?;
        required(doc_type, "doc_type")?;
        let command = Command::new().segment(index).segment(doc_type);
        Ok(match id.filter(|id| !id.is_empty()) {
            Some(id) => command.segment(id),
            None => command,
        })
    }

    /// Create a document, failing if the id exists.
    pub fn create(index: &str, doc_type: &str, id: &str) -> Result<Command> {
        required(index, "index")?;
        required(doc_type, "doc_type")?;
        required(id, "id")?;
        Ok(Command::new()
            .segment(index)
            .segment(doc_type)
            .segment(id)
            .endpoint("_create"))
    }

    /// Fetch a document by id.
    pub fn get(index: &str, doc_type: &str, id: &str) -> Result<Command> {
        required(index, "index")?;
        required(doc_type, "doc_type")?;
        required(id, "id")?;
        Ok(Command::new().segment(index).segment(doc_type).segment(id))
    }

    /// Delete a document by id.
    pub fn delete(index: &str, doc_type: &str, id: &str) -> Result<Command> {
        Self::get(index, doc_type, id)
    }

    /// Search. No indices searches `_all`; no types searches every type.
    pub fn search(indices: &[&str], doc_types: &[&str]) -> Result<Command> {
        Ok(Self::scoped(indices, doc_types).endpoint("_search"))
    }

    /// Count matching documents.
    pub fn count(indices: &[&str], doc_types: &[&str]) -> Result<Command> {
        Ok(Self::scoped(indices, doc_types).endpoint("_count"))
    }

    /// Delete the documents matching a query.
    pub fn delete_by_query(indices: &[&str], doc_types: &[&str]) -> Result<Command> {
        Ok(Self::scoped(indices, doc_types).endpoint("_query"))
    }

    /// Bulk endpoint, optionally scoped to a default index.
    pub fn bulk(index: Option<&str>) -> Result<Command> {
        let command = match index.filter(|index| !index.is_empty()) {
            Some(index) => Command::new().segment(index),
            None => Command::new(),
        };
        Ok(command.endpoint("_bulk"))
    }

    /// Create an index (body carries settings and mappings).
    pub fn create_index(index: &str) -> Result<Command> {
        required(index, "index")?;
        Ok(Command::new().segment(index))
    }

    /// Delete an index.
    pub fn delete_index(index: &str) -> Result<Command> {
        Self::create_index(index)
    }

    /// Check whether an index exists (`HEAD`).
    pub fn index_exists(index: &str) -> Result<Command> {
        Self::create_index(index)
    }

    /// Put a mapping for a type.
    pub fn put_mapping(index: &str, doc_type: &str) -> Result<Command> {
        required(index, "index")?;
        required(doc_type, "doc_type")?;
        Ok(Command::new()
            .segment(index)
            .segment(doc_type)
            .endpoint("_mapping"))
    }

    /// Get the mapping of an index, or of one type in it.
    pub fn get_mapping(index: &str, doc_type: Option<&str>) -> Result<Command> {
        required(index, "index")?;
        let command = Command::new().segment(index);
        let command = match doc_type.filter(|t| !t.is_empty()) {
            Some(doc_type) => command.segment(doc_type),
            None => command,
        };
        Ok(command.endpoint("_mapping"))
    }

    /// Refresh indices; none refreshes all of them.
    pub fn refresh(indices: &[&str]) -> Result<Command> {
        Ok(Command::new().list(indices).endpoint("_refresh"))
    }

    fn scoped(indices: &[&str], doc_types: &[&str]) -> Command {
        let command = if indices.iter().any(|i| !i.is_empty()) {
            Command::new().list(indices)
        } else {
            Command::new().endpoint("_all")
        };
        command.list(doc_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_paths() {
        assert_eq!(Commands::index("shop", "product", Some("1")).unwrap().build().unwrap(), "/shop/product/1");
        assert_eq!(Commands::index("shop", "product", None).unwrap().build().unwrap(), "/shop/product");
        assert_eq!(Commands::index("shop", "product", Some("")).unwrap().build().unwrap(), "/shop/product");
        assert_eq!(
            Commands::create("shop", "product", "1").unwrap().build().unwrap(),
            "/shop/product/1/_create"
        );
        assert_eq!(Commands::delete("shop", "product", "1").unwrap().build().unwrap(), "/shop/product/1");
    }

    #[test]
    fn test_missing_arguments() {
        assert!(matches!(Commands::index("", "product", None), Err(ClientError::MissingArgument("index"))));
        assert!(matches!(Commands::create("shop", "product", ""), Err(ClientError::MissingArgument("id"))));
        assert!(matches!(Commands::put_mapping("shop", ""), Err(ClientError::MissingArgument("doc_type"))));
        assert!(matches!(Commands::delete_index(""), Err(ClientError::MissingArgument("index"))));
    }

    #[test]
    fn test_segments_are_encoded() {
        let path = Commands::get("my index", "doc", "a/b?c").unwrap().build().unwrap();
        assert_eq!(path, "/my%20index/doc/a%2Fb%3Fc");
    }

    #[test]
    fn test_scoped_endpoints() {
        assert_eq!(Commands::search(&[], &[]).unwrap().build().unwrap(), "/_all/_search");
        assert_eq!(Commands::count(&["shop"], &["product", "offer"]).unwrap().build().unwrap(), "/shop/product,offer/_count");
        assert_eq!(Commands::delete_by_query(&["", "logs"], &[]).unwrap().build().unwrap(), "/logs/_query");
        assert_eq!(Commands::refresh(&[]).unwrap().build().unwrap(), "/_refresh");
        assert_eq!(Commands::bulk(Some("shop")).unwrap().build().unwrap(), "/shop/_bulk");
        assert_eq!(Commands::bulk(None).unwrap().build().unwrap(), "/_bulk");
        assert_eq!(Commands::get_mapping("shop", None).unwrap().build().unwrap(), "/shop/_mapping");
    }

    #[test]
    fn test_params() {
        let path = Commands::index("shop", "product", Some("1"))
            .unwrap()
            .refresh(true)
            .parent("")
            .param("op_type", "create")
            .param("q", "name:lamp & shade")
            .build()
            .unwrap();
        assert_eq!(path, "/shop/product/1?refresh=true&op_type=create&q=name%3Alamp+%26+shade");
    }
}
