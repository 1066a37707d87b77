//! Bulk request bodies built from streaming sources.
//!
//! A source is turned into rendered actions one item at a time, and those
//! renders are joined into size-bounded batches. Nothing is buffered beyond
//! the batch currently being filled.
//!
//! ```rust
//! use plainsearch::{BulkBuilder, JoinInBatches};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Product {
//!     id: u32,
//!     name: String,
//! }
//!
//! let products = (1..=5).map(|id| Product { id, name: format!("item {id}") });
//!
//! let bulk = BulkBuilder::for_index("shop")?.doc_type("product");
//! let batches: Vec<String> = bulk
//!     .pipeline_collection(products, |action, p| Ok(action.index(&p)?.id(p.id)))
//!     .join_in_batches(2)?
//!     .collect::<plainsearch::Result<_>>()?;
//!
//! assert_eq!(batches.len(), 3);
//! assert!(batches[0].starts_with(
//!     "{\"index\":{\"_index\":\"shop\",\"_type\":\"product\",\"_id\":1}}\n{\"id\":1,"
//! ));
//! # Ok::<(), plainsearch::BuilderError>(())
//! ```

use crate::error::{BuilderError, Result};
use crate::json::{self, JsonLiteral};
use plainsearch_log::trace;
use serde::Serialize;

/// Action metadata. Each slot holds a rendered literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkMeta {
    index: Option<String>,
    doc_type: Option<String>,
    id: Option<String>,
    routing: Option<String>,
    parent: Option<String>,
    version: Option<String>,
    version_type: Option<String>,
}

fn set(slot: &mut Option<String>, value: impl JsonLiteral) {
    if let Some(rendered) = value.to_literal() {
        *slot = Some(rendered);
    }
}

impl BulkMeta {
    fn render(&self) -> String {
        let members = [
            ("_index", &self.index),
            ("_type", &self.doc_type),
            ("_id", &self.id),
            ("_routing", &self.routing),
            ("_parent", &self.parent),
            ("_version", &self.version),
            ("_version_type", &self.version_type),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| json::property(key, v)));

        format!("{{{}}}", json::join(members))
    }
}

/// One bulk action, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkAction {
    /// Index (create or replace) a document.
    Index {
        /// Serialized document.
        data: String,
        /// Action metadata.
        meta: BulkMeta,
    },
    /// Create a document, failing if it exists.
    Create {
        /// Serialized document.
        data: String,
        /// Action metadata.
        meta: BulkMeta,
    },
    /// Delete a document.
    Delete {
        /// Action metadata.
        meta: BulkMeta,
    },
}

impl BulkAction {
    /// Action name as it appears in the header line.
    pub fn kind(&self) -> &'static str {
        match self {
            BulkAction::Index { .. } => "index",
            BulkAction::Create { .. } => "create",
            BulkAction::Delete { .. } => "delete",
        }
    }

    /// Metadata of this action.
    pub fn meta(&self) -> &BulkMeta {
        match self {
            BulkAction::Index { meta, .. }
            | BulkAction::Create { meta, .. }
            | BulkAction::Delete { meta } => meta,
        }
    }

    fn meta_mut(&mut self) -> &mut BulkMeta {
        match self {
            BulkAction::Index { meta, .. }
            | BulkAction::Create { meta, .. }
            | BulkAction::Delete { meta } => meta,
        }
    }

    /// Document id (`_id`).
    pub fn id(mut self, id: impl JsonLiteral) -> Self {
        set(&mut self.meta_mut().id, id);
        self
    }

    /// Target index (`_index`), overriding the builder default.
    pub fn index(mut self, index: impl JsonLiteral) -> Self {
        set(&mut self.meta_mut().index, index);
        self
    }

    /// Document type (`_type`), overriding the builder default.
    pub fn doc_type(mut self, doc_type: impl JsonLiteral) -> Self {
        set(&mut self.meta_mut().doc_type, doc_type);
        self
    }

    /// Routing value (`_routing`).
    pub fn routing(mut self, routing: impl JsonLiteral) -> Self {
        set(&mut self.meta_mut().routing, routing);
        self
    }

    /// Parent document id (`_parent`).
    pub fn parent(mut self, parent: impl JsonLiteral) -> Self {
        set(&mut self.meta_mut().parent, parent);
        self
    }

    /// Expected version (`_version`).
    pub fn version(mut self, version: impl JsonLiteral) -> Self {
        set(&mut self.meta_mut().version, version);
        self
    }

    /// Version type (`_version_type`), e.g. `external`.
    pub fn version_type(mut self, version_type: impl JsonLiteral) -> Self {
        set(&mut self.meta_mut().version_type, version_type);
        self
    }

    /// A delete must name its document.
    fn check(&self) -> Result<()> {
        match self {
            BulkAction::Delete { meta } if meta.id.is_none() => {
                Err(BuilderError::MissingArgument("id"))
            }
            _ => Ok(()),
        }
    }

    /// Header line plus the document line for index and create.
    ///
    /// Every line ends with `\n`, including the last.
    pub fn render(&self) -> String {
        let header = json::object(&json::property(self.kind(), &self.meta().render()));
        match self {
            BulkAction::Index { data, .. } | BulkAction::Create { data, .. } => {
                format!("{header}\n{data}\n")
            }
            BulkAction::Delete { .. } => format!("{header}\n"),
        }
    }
}

/// Starting point for one action, carrying the builder's defaults.
#[derive(Debug, Clone, Default)]
pub struct ActionBuilder {
    meta: BulkMeta,
}

impl ActionBuilder {
    /// Index `data`.
    pub fn index<T: Serialize + ?Sized>(self, data: &T) -> Result<BulkAction> {
        Ok(BulkAction::Index {
            data: serde_json::to_string(data)?,
            meta: self.meta,
        })
    }

    /// Create `data`.
    pub fn create<T: Serialize + ?Sized>(self, data: &T) -> Result<BulkAction> {
        Ok(BulkAction::Create {
            data: serde_json::to_string(data)?,
            meta: self.meta,
        })
    }

    /// Delete the document `id`.
    ///
    /// Fails with [`BuilderError::MissingArgument`] when `id` is absent.
    pub fn delete(self, id: impl JsonLiteral) -> Result<BulkAction> {
        let action = BulkAction::Delete { meta: self.meta }.id(id);
        action.check()?;
        Ok(action)
    }
}

/// Bulk body builder.
#[derive(Debug, Clone, Default)]
pub struct BulkBuilder {
    defaults: BulkMeta,
}

impl BulkBuilder {
    /// Builder without a default index; every action names its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder whose actions target `index` unless they override it.
    pub fn for_index(index: &str) -> Result<Self> {
        if index.is_empty() {
            return Err(BuilderError::MissingArgument("index"));
        }
        let mut builder = Self::default();
        set(&mut builder.defaults.index, index);
        Ok(builder)
    }

    /// Default document type.
    pub fn doc_type(mut self, doc_type: impl JsonLiteral) -> Self {
        set(&mut self.defaults.doc_type, doc_type);
        self
    }

    /// Fresh action builder carrying the defaults.
    pub fn action(&self) -> ActionBuilder {
        ActionBuilder {
            meta: self.defaults.clone(),
        }
    }

    /// Lazily render one action per source item.
    pub fn pipeline_collection<I, T, F>(&self, source: I, action: F) -> Pipeline<I::IntoIter, F>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(ActionBuilder, T) -> Result<BulkAction>,
    {
        Pipeline {
            defaults: self.defaults.clone(),
            source: source.into_iter(),
            action,
        }
    }

    /// Render the whole source into one body.
    pub fn build_collection<I, T, F>(&self, source: I, action: F) -> Result<String>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(ActionBuilder, T) -> Result<BulkAction>,
    {
        self.pipeline_collection(source, action).collect()
    }
}

/// Lazy sequence of rendered actions. See [`BulkBuilder::pipeline_collection`].
#[derive(Debug)]
pub struct Pipeline<I, F> {
    defaults: BulkMeta,
    source: I,
    action: F,
}

impl<I, T, F> Iterator for Pipeline<I, F>
where
    I: Iterator<Item = T>,
    F: FnMut(ActionBuilder, T) -> Result<BulkAction>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.source.next()?;
        let builder = ActionBuilder {
            meta: self.defaults.clone(),
        };
        let rendered = (self.action)(builder, item).and_then(|action| {
            action.check()?;
            Ok(action.render())
        });
        Some(rendered)
    }
}

/// Group rendered actions into bodies of at most `batch_size` actions.
pub trait JoinInBatches: Iterator<Item = Result<String>> + Sized {
    /// Fails with [`BuilderError::InvalidBatchSize`] when `batch_size` is zero.
    fn join_in_batches(self, batch_size: usize) -> Result<Batches<Self>> {
        if batch_size == 0 {
            return Err(BuilderError::InvalidBatchSize(batch_size));
        }
        Ok(Batches {
            actions: self,
            batch_size,
            done: false,
            emitted: 0,
        })
    }
}

impl<I> JoinInBatches for I where I: Iterator<Item = Result<String>> {}

/// Iterator over joined batch bodies.
///
/// An error from the underlying actions ends the current batch with that
/// error; the iterator yields nothing afterwards.
#[derive(Debug)]
pub struct Batches<I> {
    actions: I,
    batch_size: usize,
    done: bool,
    emitted: usize,
}

impl<I> Iterator for Batches<I>
where
    I: Iterator<Item = Result<String>>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut body = String::new();
        let mut count = 0;
        while count < self.batch_size {
            match self.actions.next() {
                Some(Ok(rendered)) => {
                    body.push_str(&rendered);
                    count += 1;
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if count == 0 {
            return None;
        }

        self.emitted += 1;
        trace!("bulk batch {} with {} actions", self.emitted, count);
        Some(Ok(body))
    }
}

impl<I> std::iter::FusedIterator for Batches<I> where I: Iterator<Item = Result<String>> {}
