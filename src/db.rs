pub mod document_store;
pub use document_store::{Collection, DocumentStore};
pub mod entity_repo;
pub use entity_repo::EntityRepository;
pub mod memory_store;
pub use memory_store::MemoryDocumentStore;
pub mod pg_store;
pub use pg_store::PgDocumentStore;
pub mod object_store;
pub use object_store::{LocalObjectStore, MemoryObjectStore, ObjectStore};
