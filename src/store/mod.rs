//! # Record Store
//!
//! Owns the cafe collection. Backends implement [`CafeStore`]; the request
//! handler only ever talks to the trait.

pub mod errors;
pub mod file;
pub mod memory;
pub mod record;

pub use errors::{StoreError, StoreResult};
pub use file::JsonFileCafeStore;
pub use memory::InMemoryCafeStore;
pub use record::{CafeId, CafeRecord, NewCafe};

/// Query and mutation surface over the cafe collection.
///
/// Every call is atomic with respect to its caller. Writers are serialized,
/// readers may run concurrently.
pub trait CafeStore: Send + Sync {
    /// Assign a fresh id and persist the record.
    ///
    /// Fails with [`StoreError::DuplicateName`] if the name is taken.
    fn insert(&self, cafe: NewCafe) -> StoreResult<CafeId>;

    /// Every record, in insertion order
    fn list_all(&self) -> StoreResult<Vec<CafeRecord>>;

    /// First record (store order) whose location equals `location` exactly
    fn find_by_location(&self, location: &str) -> StoreResult<Option<CafeRecord>>;

    fn get_by_id(&self, id: CafeId) -> StoreResult<Option<CafeRecord>>;

    /// Returns false if no record has this id
    fn update_price(&self, id: CafeId, price: Option<String>) -> StoreResult<bool>;

    /// Returns false if no record has this id
    fn delete_by_id(&self, id: CafeId) -> StoreResult<bool>;
}
