//! In-memory [`DocumentStore`] for tests.
//!
//! ## Supported Query Subset
//! ```text
//! filter      { "a.b.c": value }      equality, descends through arrays
//!             { "a": { "$eq": v } }
//!             { "a": { "$in": [..] } }
//! projection  top-level fields, all-exclusion or all-inclusion
//! sort        any number of keys, 1 / -1, dates numbers and strings
//! limit       positive or negative (absolute value), 0 = unlimited
//! ```
//! Anything else in a filter never matches.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use tokio::sync::Mutex;

use super::{index_name, DocumentStore, FindQuery};
use crate::error::{DbError, DbResult};

const ID_INDEX: &str = "_id_";

#[derive(Debug, Default)]
struct MemoryCollection {
    docs: Vec<Document>,
    /// Canonical extended JSON of every stored `_id`.
    ids: HashSet<String>,
    indexes: Vec<String>,
}

impl MemoryCollection {
    fn new() -> Self {
        MemoryCollection {
            docs: Vec::new(),
            ids: HashSet::new(),
            indexes: vec![ID_INDEX.to_string()],
        }
    }
}

/// Collections held in a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, MemoryCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the collections that currently exist.
    pub async fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.lock().await.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn drop_collection(&self, collection: &str) -> DbResult<()> {
        self.collections.lock().await.remove(collection);
        Ok(())
    }

    async fn insert_many(&self, collection: &str, docs: Vec<Document>) -> DbResult<usize> {
        let mut collections = self.collections.lock().await;
        let target = collections
            .entry(collection.to_string())
            .or_insert_with(MemoryCollection::new);

        let count = docs.len();
        for mut doc in docs {
            let id = match doc.get("_id") {
                Some(id) => id.clone(),
                None => {
                    let id = Bson::ObjectId(ObjectId::new());
                    doc.insert("_id", id.clone());
                    id
                }
            };
            let key = id.clone().into_canonical_extjson().to_string();
            if !target.ids.insert(key) {
                return Err(DbError::insert_failed(
                    collection,
                    format!("duplicate key _id: {id}"),
                ));
            }
            target.docs.push(doc);
        }

        Ok(count)
    }

    async fn find(&self, collection: &str, query: FindQuery) -> DbResult<Vec<Document>> {
        let collections = self.collections.lock().await;
        let Some(source) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut found: Vec<Document> = source
            .docs
            .iter()
            .filter(|doc| matches(doc, &query.filter))
            .cloned()
            .collect();
        drop(collections);

        if let Some(sort) = &query.sort {
            found.sort_by(|a, b| compare_by(a, b, sort));
        }

        if let Some(limit) = query.limit {
            let limit = limit.unsigned_abs() as usize;
            if limit > 0 {
                found.truncate(limit);
            }
        }

        if let Some(projection) = &query.projection {
            found = found.into_iter().map(|doc| project(doc, projection)).collect();
        }

        Ok(found)
    }

    async fn estimated_document_count(&self, collection: &str) -> DbResult<u64> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .map_or(0, |c| c.docs.len() as u64))
    }

    async fn count_documents(&self, collection: &str, filter: Document) -> DbResult<u64> {
        let collections = self.collections.lock().await;
        Ok(collections.get(collection).map_or(0, |c| {
            c.docs.iter().filter(|doc| matches(doc, &filter)).count() as u64
        }))
    }

    async fn create_index(&self, collection: &str, keys: Document) -> DbResult<String> {
        if keys.is_empty() {
            return Err(DbError::index_failed(collection, "index keys are empty"));
        }

        let name = index_name(&keys);
        let mut collections = self.collections.lock().await;
        let target = collections
            .entry(collection.to_string())
            .or_insert_with(MemoryCollection::new);
        if !target.indexes.contains(&name) {
            target.indexes.push(name.clone());
        }
        Ok(name)
    }

    async fn index_names(&self, collection: &str) -> DbResult<Vec<String>> {
        let collections = self.collections.lock().await;
        collections
            .get(collection)
            .map(|c| c.indexes.clone())
            .ok_or_else(|| DbError::QueryFailed(format!("ns does not exist: {collection}")))
    }

    async fn ping(&self) -> DbResult<()> {
        Ok(())
    }
}

// =============================================================================
// Query Evaluation
// =============================================================================

/// Every value reachable at a dotted path. Arrays contribute themselves and
/// their elements.
fn lookup<'a>(doc: &'a Document, path: &str) -> Vec<&'a Bson> {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };

    let mut out = Vec::new();
    if let Some(value) = doc.get(head) {
        collect_path(value, rest, &mut out);
    }
    out
}

fn collect_path<'a>(value: &'a Bson, rest: Option<&str>, out: &mut Vec<&'a Bson>) {
    match (value, rest) {
        (Bson::Array(items), None) => {
            out.push(value);
            out.extend(items.iter());
        }
        (_, None) => out.push(value),
        (Bson::Document(inner), Some(rest)) => out.extend(lookup(inner, rest)),
        (Bson::Array(items), Some(rest)) => {
            for item in items {
                if let Bson::Document(inner) = item {
                    out.extend(lookup(inner, rest));
                }
            }
        }
        _ => {}
    }
}

fn is_operator_doc(value: &Bson) -> Option<&Document> {
    match value {
        Bson::Document(ops) if ops.keys().next().is_some_and(|k| k.starts_with('$')) => Some(ops),
        _ => None,
    }
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(path, condition)| {
        let values = lookup(doc, path);
        match is_operator_doc(condition) {
            Some(ops) => ops.iter().all(|(op, arg)| match (op.as_str(), arg) {
                ("$eq", expected) => values.iter().any(|v| *v == expected),
                ("$in", Bson::Array(options)) => values.iter().any(|v| options.contains(v)),
                _ => false,
            }),
            None => values.iter().any(|v| *v == condition),
        }
    })
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

fn compare_bson(a: &Bson, b: &Bson) -> Ordering {
    match (a, b) {
        (Bson::DateTime(a), Bson::DateTime(b)) => a.cmp(b),
        (Bson::String(a), Bson::String(b)) => a.cmp(b),
        (Bson::ObjectId(a), Bson::ObjectId(b)) => a.cmp(b),
        _ => match (as_f64(a), as_f64(b)) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
    }
}

fn compare_by(a: &Document, b: &Document, sort: &Document) -> Ordering {
    for (field, direction) in sort {
        let left = lookup(a, field).into_iter().next();
        let right = lookup(b, field).into_iter().next();

        let ordering = match (left, right) {
            (Some(l), Some(r)) => compare_bson(l, r),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        let descending = as_f64(direction).is_some_and(|d| d < 0.0);
        let ordering = if descending { ordering.reverse() } else { ordering };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn is_truthy(value: &Bson) -> bool {
    match value {
        Bson::Boolean(b) => *b,
        other => as_f64(other).is_some_and(|v| v != 0.0),
    }
}

fn project(doc: Document, projection: &Document) -> Document {
    let inclusive = projection.iter().any(|(_, flag)| is_truthy(flag));

    if inclusive {
        let keep_id = projection.get("_id").map_or(true, is_truthy);
        doc.into_iter()
            .filter(|(field, _)| {
                if field == "_id" {
                    keep_id
                } else {
                    projection.get(field).is_some_and(is_truthy)
                }
            })
            .collect()
    } else {
        doc.into_iter()
            .filter(|(field, _)| !projection.contains_key(field))
            .collect()
    }
}
