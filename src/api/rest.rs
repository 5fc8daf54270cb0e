use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    apperror::{ApplicationError, ErrorType, FieldError},
    models::{GoodSeedDetailType, GoodSeedUpsertInputType, UserAddInputType, UserDetailType},
};

/***************** Good seed models *********************/

/**
 * Request structure for creating or replacing a good seed.
 *
 * Every field is optional at this layer; required-field enforcement happens in
 * the validation gate so that all missing fields are reported together. The
 * coordinates are taken as raw JSON values so that a wrong-typed coordinate
 * reaches the gate and comes back as a field error.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodSeedUpsertRequest {
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

/**
 * Converts the inbound request body into the raw input type handed to the
 * validation gate.
 */
impl From<web::Json<GoodSeedUpsertRequest>> for GoodSeedUpsertInputType {
    fn from(request_body: web::Json<GoodSeedUpsertRequest>) -> Self {
        let request_body = request_body.into_inner();
        GoodSeedUpsertInputType {
            district: request_body.district,
            transport_type: request_body.transport_type,
            good_name: request_body.good_name,
            route_address: request_body.route_address,
            street: request_body.street,
            city: request_body.city,
            state: request_body.state,
            pincode: request_body.pincode,
            latitude: request_body.latitude,
            longitude: request_body.longitude,
        }
    }
}

/**
 * Represents a good seed in API responses.
 *
 * Optional fields that are absent from the record are omitted from the JSON
 * output rather than serialized as null.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodSeedDetailElement {
    /**
     * The unique identifier for the good seed.
     */
    id: i64,
    /**
     * The district the route belongs to.
     */
    district: String,
    /**
     * The transport type used on the route.
     */
    transport_type: String,
    /**
     * The name of the good being shipped.
     */
    good_name: String,
    /**
     * The primary route address.
     */
    route_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    /**
     * The timestamp when the good seed was created.
     */
    created_at: DateTime<Utc>,
}

/**
 * Converts from the internal record type into a response element.
 */
impl From<GoodSeedDetailType> for GoodSeedDetailElement {
    fn from(record: GoodSeedDetailType) -> Self {
        GoodSeedDetailElement {
            id: record.id,
            district: record.district,
            transport_type: record.transport_type,
            good_name: record.good_name,
            route_address: record.route_address,
            street: record.street,
            city: record.city,
            state: record.state,
            pincode: record.pincode,
            latitude: record.latitude,
            longitude: record.longitude,
            created_at: record.created_at,
        }
    }
}

/***************** User models *********************/

/**
 * Request structure for creating a user.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAddRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl From<web::Json<UserAddRequest>> for UserAddInputType {
    fn from(request_body: web::Json<UserAddRequest>) -> Self {
        let request_body = request_body.into_inner();
        UserAddInputType { username: request_body.username, password: request_body.password }
    }
}

/**
 * Represents a user in API responses. The password is never serialized.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailElement {
    /**
     * The unique identifier for the user.
     */
    id: i64,
    /**
     * The username.
     */
    username: String,
}

impl From<UserDetailType> for UserDetailElement {
    fn from(user: UserDetailType) -> Self {
        UserDetailElement { id: user.id, username: user.username }
    }
}

/***************** Error models *********************/

/**
 * Custom error response for the application.
 */
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /**
     * A human-readable message describing the error.
     */
    pub message: String,
    /**
     * Field-level validation errors. Omitted unless present.
     */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldErrorElement>>,
}

/**
 * A single field-level error in an error response.
 */
#[derive(Debug, Serialize)]
pub struct FieldErrorElement {
    /**
     * The name of the offending field.
     */
    pub field: String,
    /**
     * The reason the field was rejected.
     */
    pub reason: String,
}

impl From<FieldError> for FieldErrorElement {
    fn from(field_error: FieldError) -> Self {
        FieldErrorElement { field: field_error.field, reason: field_error.reason }
    }
}

impl ResponseError for ApplicationError {
    /**
     * Generates an error response for the application error.
     */
    fn error_response(&self) -> HttpResponse {
        let errors = if self.field_errors.is_empty() { None } else { Some(self.field_errors.iter().cloned().map(FieldErrorElement::from).collect()) };
        let error_response = ErrorResponse { message: self.message.clone(), errors };
        HttpResponse::build(get_statuscode(&self.error_type)).json(&error_response)
    }
}

/**
* Maps application errors to HTTP status codes.
*
* # Arguments
* `application_error`: The type of error that occurred.
*
* # Returns
* The corresponding HTTP status code.
*/
fn get_statuscode(application_error: &ErrorType) -> StatusCode {
    match application_error {
        ErrorType::Validation => StatusCode::BAD_REQUEST,
        ErrorType::NotFound => StatusCode::NOT_FOUND,
        ErrorType::Conflict => StatusCode::CONFLICT,
        ErrorType::Initialization => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_good_seed_response_omits_absent_optional_fields() {
        let record = GoodSeedDetailType {
            id: 1,
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
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(GoodSeedDetailElement::from(record)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["transportType"], "Truck");
        assert!(json.get("street").is_none());
        assert!(json.get("latitude").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_user_response_never_contains_password() {
        let user = UserDetailType { id: 3, username: "admin".to_string(), password: "secret".to_string() };
        let json = serde_json::to_value(UserDetailElement::from(user)).unwrap();
        assert_eq!(json["username"], "admin");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_error_response_status_mapping() {
        let not_found = ApplicationError::new(ErrorType::NotFound, "Good seed not found".to_string());
        assert_eq!(not_found.error_response().status(), StatusCode::NOT_FOUND);
        let conflict = ApplicationError::new(ErrorType::Conflict, "Username already exists".to_string());
        assert_eq!(conflict.error_response().status(), StatusCode::CONFLICT);
        let validation = ApplicationError::validation("Validation error".to_string(), vec![FieldError::new("district", "District is required")]);
        assert_eq!(validation.error_response().status(), StatusCode::BAD_REQUEST);
    }
}
