//! Immutable document store

use std::collections::HashMap;

use tracing::{debug, info};

/// A single named unit of text content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Opaque identifier, usually a relative file path
    pub id: String,
    /// Full text body, never parsed
    pub content: String,
}

/// Insertion-ordered mapping of document id to content
///
/// Built once; nothing is added, removed, or changed afterwards. Supplying
/// the same id twice is not an error: the later content replaces the earlier
/// one and the entry keeps its first position.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
    positions: HashMap<String, usize>,
}

impl DocumentStore {
    /// Build a store from `(id, content)` pairs
    pub fn from_documents<I, K, V>(documents: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        debug!("DocumentStore::from_documents: called");
        let mut store = Self::default();

        for (id, content) in documents {
            let id = id.into();
            let content = content.into();
            match store.positions.get(&id) {
                Some(&position) => {
                    debug!(%id, "DocumentStore::from_documents: duplicate id, later content replaces earlier");
                    store.documents[position].content = content;
                }
                None => {
                    store.positions.insert(id.clone(), store.documents.len());
                    store.documents.push(Document { id, content });
                }
            }
        }

        info!(document_count = store.documents.len(), "Document store built");
        store
    }

    /// Exact-match lookup by id
    pub fn get(&self, id: &str) -> Option<&str> {
        debug!(%id, "DocumentStore::get: called");
        self.positions
            .get(id)
            .map(|&position| self.documents[position].content.as_str())
    }

    /// Whether a document with this exact id exists
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Every `(id, content)` pair in insertion order
    pub fn list_all(&self) -> impl Iterator<Item = (&str, &str)> {
        self.documents
            .iter()
            .map(|doc| (doc.id.as_str(), doc.content.as_str()))
    }

    /// Documents in insertion order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DocumentStore {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_documents(iter)
    }
}
