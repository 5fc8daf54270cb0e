use std::fmt;

/**
 * Represents the type of error that can occur within the application.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    Initialization,
    Validation,
    NotFound,
    Conflict,
    Internal,
}

/**
 * A single field-level validation failure.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /**
     * Name of the offending field as it appears in the API.
     */
    pub field: String,
    /**
     * Reason the field was rejected.
     */
    pub reason: String,
}

impl FieldError {
    /**
     * Creates a new FieldError.
     *
     * #Arguments
     * `field`: The name of the offending field.
     * `reason`: A description of why the field was rejected.
     */
    pub fn new(field: &str, reason: &str) -> Self {
        FieldError { field: field.to_string(), reason: reason.to_string() }
    }
}

/**
 * Represents an error that occurs within the application.
 */
#[derive(Debug, Clone)]
pub struct ApplicationError {
    /**
     * Error type.
     */
    pub error_type: ErrorType,
    /**
     * Error message describing problem.
     */
    pub message: String,
    /**
     * Field-level errors. Only populated for validation errors.
     */
    pub field_errors: Vec<FieldError>,
}

impl ApplicationError {
    /**
     * Creates a new ApplicationError.
     *
     * #Arguments
     * `error_type`: The type of error.
     * `message`: A description of the error.
     */
    pub fn new(error_type: ErrorType, message: String) -> Self {
        ApplicationError { error_type, message, field_errors: Vec::new() }
    }

    /**
     * Creates a new validation error carrying field-level errors.
     *
     * #Arguments
     * `message`: A description of the error.
     * `field_errors`: The individual field failures.
     */
    pub fn validation(message: String, field_errors: Vec<FieldError>) -> Self {
        ApplicationError { error_type: ErrorType::Validation, message, field_errors }
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_has_no_field_errors() {
        let error = ApplicationError::new(ErrorType::NotFound, "Good seed not found".to_string());
        assert!(error.field_errors.is_empty());
        assert_eq!(error.to_string(), "Good seed not found");
    }

    #[test]
    fn test_validation_carries_field_errors() {
        let error = ApplicationError::validation("Validation error".to_string(), vec![FieldError::new("district", "District is required")]);
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.field_errors.len(), 1);
        assert_eq!(error.field_errors[0].field, "district");
    }
}
