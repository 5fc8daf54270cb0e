use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use tracing::instrument;

use crate::dao::allocator::IdentityAllocator;
use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::{UserDetailType, UserInputType},
};

/**
 * Mutable state of the user collection. The username index mirrors the record
 * map and is maintained on every mutation.
 */
#[derive(Debug)]
struct UserStore {
    records: BTreeMap<i64, UserDetailType>,
    /**
     * Secondary index from username to identifier. Replaces a linear scan for
     * username lookup and makes the uniqueness check O(1).
     */
    username_index: HashMap<String, i64>,
    allocator: IdentityAllocator,
}

/**
 * In-memory DAO for user records. Has its own identifier sequence,
 * independent of other collections.
 */
#[derive(Debug)]
pub struct UserDao {
    store: Mutex<UserStore>,
}

impl UserDao {
    /**
     * Creates a new, empty user store.
     *
     * # Returns
     * A new instance of `UserDao`.
     */
    pub fn new() -> Self {
        UserDao { store: Mutex::new(UserStore { records: BTreeMap::new(), username_index: HashMap::new(), allocator: IdentityAllocator::new() }) }
    }

    /**
     * Retrieves a user by identifier.
     *
     * # Arguments
     * `id`: The identifier to look up.
     *
     * # Returns
     * The user if present.
     */
    pub fn get(&self, id: i64) -> Result<Option<UserDetailType>, ApplicationError> {
        let store = self.lock()?;
        Ok(store.records.get(&id).cloned())
    }

    /**
     * Retrieves a user by username via the secondary index.
     *
     * # Arguments
     * `username`: The username to look up.
     *
     * # Returns
     * The user if present.
     */
    pub fn get_by_username(&self, username: &str) -> Result<Option<UserDetailType>, ApplicationError> {
        let store = self.lock()?;
        Ok(store.username_index.get(username).and_then(|id| store.records.get(id)).cloned())
    }

    /**
     * Creates a new user from validated input. The username must not already
     * be taken; the check and the insertion happen under the same lock.
     *
     * # Arguments
     * `input`: The validated input fields.
     *
     * # Returns
     * The stored user, or a conflict error if the username is taken.
     */
    #[instrument(skip(self, input))]
    pub fn create(&self, input: UserInputType) -> Result<UserDetailType, ApplicationError> {
        let mut store = self.lock()?;
        if store.username_index.contains_key(&input.username) {
            return Err(ApplicationError::new(ErrorType::Conflict, "Username already exists".to_string()));
        }
        let id = store.allocator.next();
        let user = UserDetailType { id, username: input.username, password: input.password };
        store.username_index.insert(user.username.clone(), id);
        store.records.insert(id, user.clone());
        Ok(user)
    }

    /**
     * Returns the number of users currently stored.
     */
    pub fn count(&self) -> Result<usize, ApplicationError> {
        let store = self.lock()?;
        Ok(store.records.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserStore>, ApplicationError> {
        self.store.lock().map_err(|err| ApplicationError::new(ErrorType::Internal, format!("User store lock poisoned: {err}")))
    }
}
