use chrono::{DateTime, Utc};

use crate::model::apperror::{ApplicationError, FieldError};

/**
 * A stored good seed record. `id` and `created_at` are assigned by the store
 * at creation and never change afterwards.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct GoodSeedDetailType {
    pub id: i64,
    pub district: String,
    pub transport_type: String,
    pub good_name: String,
    pub route_address: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/**
 * Raw good seed input as received from the API, before validation. All fields
 * are optional here so that a single validation pass can report every missing
 * field at once. Coordinates arrive as raw JSON values so that a wrong-typed
 * coordinate is reported as a field error instead of failing deserialization.
 */
#[derive(Debug, Clone)]
pub struct GoodSeedUpsertInputType {
    pub district: Option<String>,
    pub transport_type: Option<String>,
    pub good_name: Option<String>,
    pub route_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub latitude: Option<serde_json::Value>,
    pub longitude: Option<serde_json::Value>,
}

impl GoodSeedUpsertInputType {
    /**
     * Validates the raw input and produces a validated record.
     *
     * Required fields must be present and non-empty. No trimming is applied;
     * only emptiness is checked. Optional fields pass through unchanged.
     * Latitude and longitude are not range checked.
     *
     * # Returns
     * A `GoodSeedInputType` with all required fields present, or a validation
     * `ApplicationError` listing every failed field.
     */
    pub fn validate(self) -> Result<GoodSeedInputType, ApplicationError> {
        let mut field_errors: Vec<FieldError> = Vec::new();
        let district = require_string(&mut field_errors, self.district, "district", "District is required");
        let transport_type = require_string(&mut field_errors, self.transport_type, "transportType", "Transport type is required");
        let good_name = require_string(&mut field_errors, self.good_name, "goodName", "Good name is required");
        let route_address = require_string(&mut field_errors, self.route_address, "routeAddress", "Route address is required");
        let latitude = optional_number(&mut field_errors, self.latitude, "latitude", "Latitude must be a number");
        let longitude = optional_number(&mut field_errors, self.longitude, "longitude", "Longitude must be a number");
        if !field_errors.is_empty() {
            return Err(ApplicationError::validation("Validation error".to_string(), field_errors));
        }
        Ok(GoodSeedInputType {
            district: district.unwrap_or_default(),
            transport_type: transport_type.unwrap_or_default(),
            good_name: good_name.unwrap_or_default(),
            route_address: route_address.unwrap_or_default(),
            street: self.street,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            latitude,
            longitude,
        })
    }
}

/**
 * A validated good seed input, accepted by the store for create and update.
 */
#[derive(Debug, Clone)]
pub struct GoodSeedInputType {
    pub district: String,
    pub transport_type: String,
    pub good_name: String,
    pub route_address: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/**
 * A stored user record.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetailType {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/**
 * Raw user input before validation.
 */
#[derive(Debug, Clone)]
pub struct UserAddInputType {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UserAddInputType {
    /**
     * Validates the raw input. Username and password must be present and
     * non-empty. Username uniqueness is enforced by the store, not here.
     *
     * # Returns
     * A `UserInputType` or a validation `ApplicationError` listing every
     * failed field.
     */
    pub fn validate(self) -> Result<UserInputType, ApplicationError> {
        let mut field_errors: Vec<FieldError> = Vec::new();
        let username = require_string(&mut field_errors, self.username, "username", "Username is required");
        let password = require_string(&mut field_errors, self.password, "password", "Password is required");
        if !field_errors.is_empty() {
            return Err(ApplicationError::validation("Validation error".to_string(), field_errors));
        }
        Ok(UserInputType { username: username.unwrap_or_default(), password: password.unwrap_or_default() })
    }
}

/**
 * A validated user input, accepted by the store for create.
 */
#[derive(Debug, Clone)]
pub struct UserInputType {
    pub username: String,
    pub password: String,
}

/**
 * Checks that a required string field is present and non-empty, recording a
 * field error otherwise.
 */
fn require_string(field_errors: &mut Vec<FieldError>, value: Option<String>, field: &str, reason: &str) -> Option<String> {
    match value {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            field_errors.push(FieldError::new(field, reason));
            None
        }
    }
}

/**
 * Checks that an optional field, when present, is a JSON number, recording a
 * field error otherwise. No range check is applied.
 */
fn optional_number(field_errors: &mut Vec<FieldError>, value: Option<serde_json::Value>, field: &str, reason: &str) -> Option<f64> {
    match value {
        None => None,
        Some(value) => match value.as_f64() {
            Some(number) => Some(number),
            None => {
                field_errors.push(FieldError::new(field, reason));
                None
            }
        },
    }
}
