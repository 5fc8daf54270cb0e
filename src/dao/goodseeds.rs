use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::instrument;

use crate::dao::allocator::IdentityAllocator;
use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::{GoodSeedDetailType, GoodSeedInputType},
};

/**
 * Mutable state of the good seed collection. The allocator and the record map
 * live behind the same mutex so that identifier allocation and insertion are
 * a single atomic step.
 */
#[derive(Debug)]
struct GoodSeedStore {
    /**
     * Records keyed by identifier. Identifiers are issued monotonically, so
     * iteration in key order is insertion order.
     */
    records: BTreeMap<i64, GoodSeedDetailType>,
    /**
     * The identifier allocator for this collection.
     */
    allocator: IdentityAllocator,
}

/**
 * In-memory DAO for good seed records.
 *
 * The store lives for the lifetime of the process and is lost on restart.
 * Callers receive owned copies of records; the store never hands out
 * references to its internal state.
 */
#[derive(Debug)]
pub struct GoodSeedDao {
    store: Mutex<GoodSeedStore>,
}

impl GoodSeedDao {
    /**
     * Creates a new, empty good seed store.
     *
     * # Returns
     * A new instance of `GoodSeedDao`.
     */
    pub fn new() -> Self {
        GoodSeedDao { store: Mutex::new(GoodSeedStore { records: BTreeMap::new(), allocator: IdentityAllocator::new() }) }
    }

    /**
     * Retrieves a good seed by its identifier.
     *
     * # Arguments
     * `id`: The identifier to look up.
     *
     * # Returns
     * The record if present. Absence is a normal outcome, not an error.
     */
    pub fn get(&self, id: i64) -> Result<Option<GoodSeedDetailType>, ApplicationError> {
        let store = self.lock()?;
        Ok(store.records.get(&id).cloned())
    }

    /**
     * Retrieves all good seeds in insertion order.
     *
     * # Returns
     * A fresh snapshot of the collection.
     */
    pub fn list(&self) -> Result<Vec<GoodSeedDetailType>, ApplicationError> {
        let store = self.lock()?;
        Ok(store.records.values().cloned().collect())
    }

    /**
     * Creates a new good seed from validated input.
     *
     * Allocates the next identifier, stamps the creation time and stores the
     * record. Validation happens upstream; this operation always succeeds.
     *
     * # Arguments
     * `input`: The validated input fields.
     *
     * # Returns
     * The stored record, including its identifier and creation time.
     */
    #[instrument(skip(self, input))]
    pub fn create(&self, input: GoodSeedInputType) -> Result<GoodSeedDetailType, ApplicationError> {
        let mut store = self.lock()?;
        let id = store.allocator.next();
        let record = GoodSeedDetailType {
            id,
            district: input.district,
            transport_type: input.transport_type,
            good_name: input.good_name,
            route_address: input.route_address,
            street: input.street,
            city: input.city,
            state: input.state,
            pincode: input.pincode,
            latitude: input.latitude,
            longitude: input.longitude,
            created_at: Utc::now(),
        };
        store.records.insert(id, record.clone());
        Ok(record)
    }

    /**
     * Replaces an existing good seed with validated input.
     *
     * The identifier and creation time are pinned; every other field is
     * overwritten with the new input. Optional fields absent from the input
     * are cleared rather than carried over from the old record. An update on
     * a missing identifier never inserts.
     *
     * # Arguments
     * `id`: The identifier of the record to replace.
     * `input`: The validated replacement fields.
     *
     * # Returns
     * The updated record, or `None` if the identifier is absent.
     */
    #[instrument(skip(self, input))]
    pub fn update(&self, id: i64, input: GoodSeedInputType) -> Result<Option<GoodSeedDetailType>, ApplicationError> {
        let mut store = self.lock()?;
        let Some(existing) = store.records.get(&id) else {
            return Ok(None);
        };
        let record = GoodSeedDetailType {
            id,
            district: input.district,
            transport_type: input.transport_type,
            good_name: input.good_name,
            route_address: input.route_address,
            street: input.street,
            city: input.city,
            state: input.state,
            pincode: input.pincode,
            latitude: input.latitude,
            longitude: input.longitude,
            created_at: existing.created_at,
        };
        store.records.insert(id, record.clone());
        Ok(Some(record))
    }

    /**
     * Deletes a good seed by its identifier. The identifier is not recycled.
     *
     * # Arguments
     * `id`: The identifier of the record to delete.
     *
     * # Returns
     * `true` if a record existed and was removed, `false` otherwise.
     */
    #[instrument(skip(self))]
    pub fn delete(&self, id: i64) -> Result<bool, ApplicationError> {
        let mut store = self.lock()?;
        Ok(store.records.remove(&id).is_some())
    }

    /**
     * Returns the number of records currently stored.
     */
    pub fn count(&self) -> Result<usize, ApplicationError> {
        let store = self.lock()?;
        Ok(store.records.len())
    }

    /**
     * Acquires the store lock. A poisoned lock means a panic happened while
     * mutating the store and is surfaced as an internal error.
     */
    fn lock(&self) -> Result<MutexGuard<'_, GoodSeedStore>, ApplicationError> {
        self.store.lock().map_err(|err| ApplicationError::new(ErrorType::Internal, format!("Good seed store lock poisoned: {err}")))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn input(name: &str) -> GoodSeedInputType {
        GoodSeedInputType {
            district: "Hyderabad".to_string(),
            transport_type: "Truck".to_string(),
            good_name: name.to_string(),
            route_address: "123 Main St".to_string(),
            street: None,
            city: None,
            state: None,
            pincode: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_create_then_get_returns_stored_record() {
        let dao = GoodSeedDao::new();
        let created = dao.create(input("Rice")).unwrap();
        assert_eq!(created.id, 1);
        let fetched = dao.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.good_name, "Rice");
    }

    #[test]
    fn test_get_absent_returns_none() {
        let dao = GoodSeedDao::new();
        assert!(dao.get(42).unwrap().is_none());
    }

    #[test]
    fn test_ids_are_monotonic_across_deletes() {
        let dao = GoodSeedDao::new();
        let first = dao.create(input("Rice")).unwrap();
        let second = dao.create(input("Wheat")).unwrap();
        assert!(dao.delete(second.id).unwrap());
        let third = dao.create(input("Maize")).unwrap();
        assert!(third.id > second.id);
        assert!(second.id > first.id);
    }

    #[test]
    fn test_list_is_insertion_order() {
        let dao = GoodSeedDao::new();
        dao.create(input("Rice")).unwrap();
        let second = dao.create(input("Wheat")).unwrap();
        dao.create(input("Maize")).unwrap();
        assert!(dao.delete(second.id).unwrap());
        dao.create(input("Barley")).unwrap();
        let names: Vec<String> = dao.list().unwrap().into_iter().map(|record| record.good_name).collect();
        assert_eq!(names, vec!["Rice".to_string(), "Maize".to_string(), "Barley".to_string()]);
    }

    #[test]
    fn test_update_preserves_id_and_created_at() {
        let dao = GoodSeedDao::new();
        let created = dao.create(input("Rice")).unwrap();
        let mut replacement = input("Wheat");
        replacement.district = "Bangalore".to_string();
        let updated = dao.update(created.id, replacement).unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.good_name, "Wheat");
        assert_eq!(updated.district, "Bangalore");
    }

    #[test]
    fn test_update_clears_optional_fields_not_present_in_input() {
        let dao = GoodSeedDao::new();
        let mut with_address = input("Rice");
        with_address.street = Some("123 Main St".to_string());
        with_address.city = Some("Hyderabad".to_string());
        let created = dao.create(with_address).unwrap();
        let updated = dao.update(created.id, input("Rice")).unwrap().unwrap();
        assert!(updated.street.is_none());
        assert!(updated.city.is_none());
    }

    #[test]
    fn test_update_absent_id_does_not_insert() {
        let dao = GoodSeedDao::new();
        assert!(dao.update(9999, input("Rice")).unwrap().is_none());
        assert_eq!(dao.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_twice_reports_absence_second_time() {
        let dao = GoodSeedDao::new();
        let created = dao.create(input("Rice")).unwrap();
        assert!(dao.delete(created.id).unwrap());
        assert!(dao.get(created.id).unwrap().is_none());
        assert!(!dao.delete(created.id).unwrap());
    }
}
