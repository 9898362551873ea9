//! # Cafe Records
//!
//! The single entity held by the store. Serialization enumerates the fixed
//! field set in wire order; `coffee_price` is emitted as `null` when unset.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store on insert
pub type CafeId = i64;

/// A persisted cafe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CafeRecord {
    pub id: CafeId,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// Insert payload: every record field except the id
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl NewCafe {
    /// Attach a store-assigned id
    pub fn into_record(self, id: CafeId) -> CafeRecord {
        CafeRecord {
            id,
            name: self.name,
            map_url: self.map_url,
            img_url: self.img_url,
            location: self.location,
            seats: self.seats,
            has_toilet: self.has_toilet,
            has_wifi: self.has_wifi,
            has_sockets: self.has_sockets,
            can_take_calls: self.can_take_calls,
            coffee_price: self.coffee_price,
        }
    }
}
