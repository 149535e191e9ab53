//! # Document Store
//!
//! In-process document collections with store-assigned ids, a text index,
//! unique indexes, and `$set`-style partial updates.

mod collection;
mod errors;
mod object_id;
mod text_index;

pub use collection::{
    CollectionSpec, Document, DocumentStore, Filter, MemoryCollection, ReturnDocument, ID_FIELD,
};
pub use errors::{StoreError, StoreResult};
pub use object_id::{ObjectId, ObjectIdGenerator};
pub use text_index::{tokenize, TextIndex, TextQuery};
