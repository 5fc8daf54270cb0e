use crate::service::{goodseeds::GoodSeedService, users::UserService};

/**
* Represents the application state shared across the Actix web application.
*/
pub struct AppState {
    /**
     * The service for good seed operations.
     */
    pub good_seed_service: GoodSeedService,
    /**
     * The service for user operations.
     */
    pub user_service: UserService,
}

/**
 * Creates a new instance of `AppState`.
 *
 * # Arguments
 * `good_seed_service`: The service for good seed operations.
 * `user_service`: The service for user operations.
 */
impl AppState {
    pub fn new(good_seed_service: GoodSeedService, user_service: UserService) -> Self {
        AppState { good_seed_service, user_service }
    }
}
