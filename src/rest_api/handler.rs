//! # REST API Handler
//!
//! Translates request parameters into store calls and shapes the results.
//! Holds no state across requests beyond the injected store and secret.

use std::collections::HashMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use subtle::ConstantTimeEq;

use crate::store::{CafeId, CafeStore, NewCafe};

use super::coercion::str_to_bool;
use super::errors::{ApiError, ApiResult};
use super::response::{AckResponse, CafeListResponse, CafeResponse};

const NO_CAFE_AT_LOCATION: &str = "Sorry, we don't have a cafe at that location.";
const NO_CAFE_WITH_ID: &str = "Sorry a cafe with that id was not found in the database.";
const DELETE_ID_MISSING: &str = "we didint found that id.";

/// Request handler over a cafe store
pub struct CafeHandler<S: CafeStore> {
    store: Arc<S>,
    api_key: String,
}

impl<S: CafeStore> CafeHandler<S> {
    pub fn new(store: Arc<S>, api_key: impl Into<String>) -> Self {
        Self {
            store,
            api_key: api_key.into(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Uniformly random cafe from the current snapshot
    pub fn random_cafe(&self) -> ApiResult<CafeResponse> {
        let cafes = self.store.list_all()?;
        let cafe = cafes
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(ApiError::EmptyStore)?;
        Ok(CafeResponse::new(cafe))
    }

    pub fn all_cafes(&self) -> ApiResult<CafeListResponse> {
        Ok(CafeListResponse::new(self.store.list_all()?))
    }

    /// First cafe at exactly `location`. A missing parameter never matches.
    pub fn search_by_location(&self, location: Option<&str>) -> ApiResult<CafeResponse> {
        let not_found = || ApiError::NotFound(NO_CAFE_AT_LOCATION.to_string());

        let location = location.ok_or_else(not_found)?;
        let cafe = self
            .store
            .find_by_location(location)?
            .ok_or_else(not_found)?;
        Ok(CafeResponse::new(cafe))
    }

    /// Create a cafe from raw query parameters
    pub fn add_cafe(&self, params: &HashMap<String, String>) -> ApiResult<AckResponse> {
        let cafe = new_cafe_from_params(params)?;
        let name = cafe.name.clone();

        let id = self.store.insert(cafe).map_err(|e| {
            tracing::info!(name = %name, error = %e, "cafe insert rejected");
            ApiError::from(e)
        })?;

        tracing::info!(id, name = %name, "cafe added");
        Ok(AckResponse::success("Successfully added the new cafe"))
    }

    /// Set the coffee price. `None` clears it.
    ///
    /// `raw_id` comes straight from the path; anything that is not a plain
    /// decimal id cannot name a cafe and is reported as not found.
    pub fn update_price(&self, raw_id: &str, new_price: Option<String>) -> ApiResult<AckResponse> {
        let not_found = || ApiError::NotFound(NO_CAFE_WITH_ID.to_string());

        let id = parse_id(raw_id).ok_or_else(not_found)?;
        if !self.store.update_price(id, new_price)? {
            return Err(not_found());
        }

        tracing::info!(id, "cafe price updated");
        Ok(AckResponse::success("Successfully updated the price."))
    }

    /// Delete a cafe reported as closed.
    ///
    /// The key is checked before the store is consulted, so a bad key never
    /// reveals whether the id exists.
    pub fn delete_cafe(&self, raw_id: &str, provided_key: Option<&str>) -> ApiResult<AckResponse> {
        if !self.key_matches(provided_key) {
            tracing::warn!(id = raw_id, "cafe delete rejected: bad api key");
            return Err(ApiError::Unauthorized);
        }

        let not_found = || ApiError::NotFound(DELETE_ID_MISSING.to_string());

        let id = parse_id(raw_id).ok_or_else(not_found)?;
        if !self.store.delete_by_id(id)? {
            return Err(not_found());
        }

        tracing::info!(id, "cafe deleted");
        Ok(AckResponse::success("Successfully deleted the cafe."))
    }

    fn key_matches(&self, provided: Option<&str>) -> bool {
        match provided {
            Some(key) => key.as_bytes().ct_eq(self.api_key.as_bytes()).into(),
            None => false,
        }
    }
}

/// Plain decimal ids only: no sign, no whitespace, no overflow
pub fn parse_id(raw: &str) -> Option<CafeId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn required(params: &HashMap<String, String>, field: &'static str) -> ApiResult<String> {
    params
        .get(field)
        .cloned()
        .ok_or(ApiError::MissingField(field))
}

fn flag(params: &HashMap<String, String>, field: &str) -> bool {
    str_to_bool(params.get(field).map(String::as_str))
}

/// Build an insert payload. Strings pass through verbatim.
pub fn new_cafe_from_params(params: &HashMap<String, String>) -> ApiResult<NewCafe> {
    Ok(NewCafe {
        name: required(params, "name")?,
        map_url: required(params, "map_url")?,
        img_url: required(params, "img_url")?,
        location: required(params, "location")?,
        seats: required(params, "seats")?,
        has_toilet: flag(params, "has_toilet"),
        has_wifi: flag(params, "has_wifi"),
        has_sockets: flag(params, "has_sockets"),
        can_take_calls: flag(params, "can_take_calls"),
        coffee_price: params.get("coffee_price").cloned(),
    })
}
