use std::sync::Arc;

use crate::{
    dao::goodseeds::GoodSeedDao,
    model::{
        apperror::ApplicationError,
        models::{GoodSeedDetailType, GoodSeedInputType},
    },
};

/**
 * Represents the service for managing good seeds.
 */
pub struct GoodSeedService {
    /**
     * The DAO for good seed operations.
     */
    good_seed_dao: Arc<GoodSeedDao>,
}

impl GoodSeedService {
    /**
     * Creates a new instance of `GoodSeedService`.
     *
     * # Arguments
     * `good_seed_dao`: The DAO for good seed operations.
     *
     * # Returns
     * A new instance of `GoodSeedService`.
     */
    pub fn new(good_seed_dao: Arc<GoodSeedDao>) -> Self {
        GoodSeedService { good_seed_dao }
    }

    /**
     * Retrieves all good seeds in insertion order.
     *
     * # Returns
     * A Result containing the records or an `ApplicationError`.
     */
    pub fn get_good_seed_list(&self) -> Result<Vec<GoodSeedDetailType>, ApplicationError> {
        self.good_seed_dao.list()
    }

    /**
     * Retrieves a good seed by its identifier.
     *
     * # Arguments
     * `good_seed_id`: The identifier of the good seed.
     *
     * # Returns
     * A Result containing the record if present or an `ApplicationError`.
     */
    pub fn get_good_seed(&self, good_seed_id: i64) -> Result<Option<GoodSeedDetailType>, ApplicationError> {
        self.good_seed_dao.get(good_seed_id)
    }

    /**
     * Adds a new good seed.
     *
     * # Arguments
     * `good_seed_input`: The validated input for the good seed to be added.
     *
     * # Returns
     * A Result containing the stored record or an `ApplicationError`.
     */
    pub fn add_good_seed(&self, good_seed_input: GoodSeedInputType) -> Result<GoodSeedDetailType, ApplicationError> {
        self.good_seed_dao.create(good_seed_input)
    }

    /**
     * Updates an existing good seed.
     *
     * # Arguments
     * `good_seed_id`: The identifier of the good seed to be updated.
     * `good_seed_input`: The validated replacement input.
     *
     * # Returns
     * A Result containing the updated record if present or an `ApplicationError`.
     */
    pub fn update_good_seed(&self, good_seed_id: i64, good_seed_input: GoodSeedInputType) -> Result<Option<GoodSeedDetailType>, ApplicationError> {
        self.good_seed_dao.update(good_seed_id, good_seed_input)
    }

    /**
     * Deletes a good seed by its identifier.
     *
     * # Arguments
     * `good_seed_id`: The identifier of the good seed to be deleted.
     *
     * # Returns
     * A Result containing `true` if a record was removed or an `ApplicationError`.
     */
    pub fn delete_good_seed(&self, good_seed_id: i64) -> Result<bool, ApplicationError> {
        self.good_seed_dao.delete(good_seed_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn input() -> GoodSeedInputType {
        GoodSeedInputType {
            district: "Hyderabad".to_string(),
            transport_type: "Truck".to_string(),
            good_name: "Rice".to_string(),
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
    fn test_service_roundtrip() {
        let service = GoodSeedService::new(Arc::new(GoodSeedDao::new()));
        let created = service.add_good_seed(input()).unwrap();
        assert_eq!(service.get_good_seed(created.id).unwrap().unwrap(), created);
        assert_eq!(service.get_good_seed_list().unwrap().len(), 1);
        assert!(service.delete_good_seed(created.id).unwrap());
        assert!(service.get_good_seed(created.id).unwrap().is_none());
    }

    #[test]
    fn test_service_update_absent_returns_none() {
        let service = GoodSeedService::new(Arc::new(GoodSeedDao::new()));
        assert!(service.update_good_seed(9999, input()).unwrap().is_none());
    }
}
