//! # In-Memory Store
//!
//! The collection lives in a `Vec` so that store order is insertion order.
//! One `RwLock` serializes writers; readers share the lock.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use super::record::{CafeId, CafeRecord, NewCafe};
use super::CafeStore;

/// The unlocked collection state, shared by every store backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Collection {
    /// Next id to hand out. Only ever grows, so ids are never reused.
    pub next_id: CafeId,
    pub cafes: Vec<CafeRecord>,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            next_id: 1,
            cafes: Vec::new(),
        }
    }
}

impl Collection {
    pub fn insert(&mut self, cafe: NewCafe) -> StoreResult<CafeId> {
        if self.cafes.iter().any(|c| c.name == cafe.name) {
            return Err(StoreError::DuplicateName(cafe.name));
        }

        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Corrupt(format!("id space exhausted at {}", id)))?;
        self.cafes.push(cafe.into_record(id));
        Ok(id)
    }

    pub fn find_by_location(&self, location: &str) -> Option<&CafeRecord> {
        self.cafes.iter().find(|c| c.location == location)
    }

    pub fn get_by_id(&self, id: CafeId) -> Option<&CafeRecord> {
        self.cafes.iter().find(|c| c.id == id)
    }

    pub fn update_price(&mut self, id: CafeId, price: Option<String>) -> bool {
        match self.cafes.iter_mut().find(|c| c.id == id) {
            Some(cafe) => {
                cafe.coffee_price = price;
                true
            }
            None => false,
        }
    }

    pub fn delete_by_id(&mut self, id: CafeId) -> bool {
        match self.cafes.iter().position(|c| c.id == id) {
            Some(idx) => {
                self.cafes.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Check the invariants a loaded snapshot must satisfy
    pub fn validate(&self) -> StoreResult<()> {
        if self.next_id < 1 {
            return Err(StoreError::Corrupt(format!(
                "next_id must be positive, got {}",
                self.next_id
            )));
        }
        for (i, cafe) in self.cafes.iter().enumerate() {
            if cafe.id >= self.next_id {
                return Err(StoreError::Corrupt(format!(
                    "cafe id {} is not below next_id {}",
                    cafe.id, self.next_id
                )));
            }
            for other in &self.cafes[i + 1..] {
                if other.id == cafe.id {
                    return Err(StoreError::Corrupt(format!("duplicate id {}", cafe.id)));
                }
                if other.name == cafe.name {
                    return Err(StoreError::Corrupt(format!(
                        "duplicate name '{}'",
                        cafe.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Volatile store, used for tests and when no data file is configured
#[derive(Debug, Default)]
pub struct InMemoryCafeStore {
    data: RwLock<Collection>,
}

impl InMemoryCafeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CafeStore for InMemoryCafeStore {
    fn insert(&self, cafe: NewCafe) -> StoreResult<CafeId> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.insert(cafe)
    }

    fn list_all(&self) -> StoreResult<Vec<CafeRecord>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.cafes.clone())
    }

    fn find_by_location(&self, location: &str) -> StoreResult<Option<CafeRecord>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.find_by_location(location).cloned())
    }

    fn get_by_id(&self, id: CafeId) -> StoreResult<Option<CafeRecord>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.get_by_id(id).cloned())
    }

    fn update_price(&self, id: CafeId, price: Option<String>) -> StoreResult<bool> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.update_price(id, price))
    }

    fn delete_by_id(&self, id: CafeId) -> StoreResult<bool> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.delete_by_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn cafe(name: &str, location: &str) -> NewCafe {
        NewCafe {
            name: name.to_string(),
            map_url: format!("https://maps.example/{}", name),
            img_url: format!("https://img.example/{}.jpg", name),
            location: location.to_string(),
            seats: "10-20".to_string(),
            has_toilet: true,
            has_wifi: false,
            has_sockets: true,
            can_take_calls: false,
            coffee_price: Some("£2.50".to_string()),
        }
    }

    #[test]
    fn test_insert_then_list() {
        let store = InMemoryCafeStore::new();
        let id = store.insert(cafe("Nova", "Berlin")).unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], cafe("Nova", "Berlin").into_record(id));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let store = InMemoryCafeStore::new();
        store.insert(cafe("Nova", "Berlin")).unwrap();

        let result = store.insert(cafe("Nova", "Paris"));
        assert_eq!(result, Err(StoreError::DuplicateName("Nova".to_string())));

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].location, "Berlin");
    }

    #[test]
    fn test_find_by_location_returns_first_match() {
        let store = InMemoryCafeStore::new();
        let first = store.insert(cafe("A", "Shoreditch")).unwrap();
        store.insert(cafe("B", "Peckham")).unwrap();
        store.insert(cafe("C", "Shoreditch")).unwrap();

        let found = store.find_by_location("Shoreditch").unwrap().unwrap();
        assert_eq!(found.id, first);
        assert!(store.find_by_location("Hackney").unwrap().is_none());
        assert!(store.find_by_location("shoreditch").unwrap().is_none());
    }

    #[test]
    fn test_update_price() {
        let store = InMemoryCafeStore::new();
        let id = store.insert(cafe("Nova", "Berlin")).unwrap();

        assert!(store.update_price(id, Some("€3".to_string())).unwrap());
        assert_eq!(
            store.get_by_id(id).unwrap().unwrap().coffee_price.as_deref(),
            Some("€3")
        );

        assert!(!store.update_price(id + 100, Some("€9".to_string())).unwrap());
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_removes_only_target() {
        let store = InMemoryCafeStore::new();
        let a = store.insert(cafe("A", "X")).unwrap();
        let b = store.insert(cafe("B", "Y")).unwrap();

        assert!(store.delete_by_id(a).unwrap());
        assert!(!store.delete_by_id(a).unwrap());

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, b);
    }

    #[test]
    fn test_ids_never_reused() {
        let store = InMemoryCafeStore::new();
        store.insert(cafe("A", "X")).unwrap();
        let b = store.insert(cafe("B", "X")).unwrap();
        store.delete_by_id(b).unwrap();

        let c = store.insert(cafe("C", "X")).unwrap();
        assert!(c > b);
    }

    #[test]
    fn test_concurrent_inserts_get_distinct_ids() {
        let store = Arc::new(InMemoryCafeStore::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..25)
                        .map(|i| store.insert(cafe(&format!("cafe-{}-{}", t, i), "X")).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<CafeId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_exhausted_ids_fail_without_panicking() {
        let mut collection = Collection {
            next_id: CafeId::MAX,
            cafes: Vec::new(),
        };

        let result = collection.insert(cafe("A", "X"));
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
        assert!(collection.cafes.is_empty());
        assert_eq!(collection.next_id, CafeId::MAX);
    }

    #[test]
    fn test_validate_rejects_non_positive_next_id() {
        let collection = Collection {
            next_id: 0,
            cafes: Vec::new(),
        };
        assert!(matches!(collection.validate(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let mut collection = Collection::default();
        collection.cafes.push(cafe("A", "X").into_record(1));
        collection.cafes.push(cafe("A", "Y").into_record(2));
        collection.next_id = 3;

        assert!(matches!(collection.validate(), Err(StoreError::Corrupt(_))));
    }
}
