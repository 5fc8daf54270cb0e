use std::sync::Arc;

use crate::{
    dao::users::UserDao,
    model::{
        apperror::ApplicationError,
        models::{UserDetailType, UserInputType},
    },
};

/**
 * Represents the service for managing users.
 */
pub struct UserService {
    /**
     * The DAO for user operations.
     */
    user_dao: Arc<UserDao>,
}

impl UserService {
    /**
     * Creates a new instance of `UserService`.
     *
     * # Arguments
     * `user_dao`: The DAO for user operations.
     *
     * # Returns
     * A new instance of `UserService`.
     */
    pub fn new(user_dao: Arc<UserDao>) -> Self {
        UserService { user_dao }
    }

    /**
     * Retrieves a user by identifier.
     *
     * # Arguments
     * `user_id`: The identifier of the user.
     *
     * # Returns
     * A Result containing the user if present or an `ApplicationError`.
     */
    pub fn get_user(&self, user_id: i64) -> Result<Option<UserDetailType>, ApplicationError> {
        self.user_dao.get(user_id)
    }

    /**
     * Retrieves a user by username.
     *
     * # Arguments
     * `username`: The username of the user.
     *
     * # Returns
     * A Result containing the user if present or an `ApplicationError`.
     */
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserDetailType>, ApplicationError> {
        self.user_dao.get_by_username(username)
    }

    /**
     * Adds a new user. Fails with a conflict error if the username is taken.
     *
     * # Arguments
     * `user_input`: The validated input for the user to be added.
     *
     * # Returns
     * A Result containing the stored user or an `ApplicationError`.
     */
    pub fn add_user(&self, user_input: UserInputType) -> Result<UserDetailType, ApplicationError> {
        self.user_dao.create(user_input)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::apperror::ErrorType;

    #[test]
    fn test_add_and_lookup_user() {
        let service = UserService::new(Arc::new(UserDao::new()));
        let created = service.add_user(UserInputType { username: "admin".to_string(), password: "secret".to_string() }).unwrap();
        assert_eq!(service.get_user(created.id).unwrap().unwrap(), created);
        assert_eq!(service.get_user_by_username("admin").unwrap().unwrap(), created);
    }

    #[test]
    fn test_duplicate_username_is_a_conflict() {
        let service = UserService::new(Arc::new(UserDao::new()));
        service.add_user(UserInputType { username: "admin".to_string(), password: "secret".to_string() }).unwrap();
        let error = service.add_user(UserInputType { username: "admin".to_string(), password: "other".to_string() }).unwrap_err();
        assert_eq!(error.error_type, ErrorType::Conflict);
    }
}
