use actix_web::{
    HttpRequest, HttpResponse, delete, get, post, put,
    web::{self, Path},
};
use tracing::instrument;

use crate::{
    api::{
        rest::{GoodSeedDetailElement, GoodSeedUpsertRequest, UserAddRequest, UserDetailElement},
        state::AppState,
    },
    model::{
        apperror::{ApplicationError, ErrorType},
        models::{GoodSeedUpsertInputType, UserAddInputType},
    },
};

/**
 * Endpoint to retrieve all good seeds.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listGoodSeeds", trace_id = get_trace_id(&http_request), result))]
#[get("/api/good-seeds")]
pub async fn good_seeds_list(http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let good_seeds = app_state.good_seed_service.get_good_seed_list()?;
    let elements: Vec<GoodSeedDetailElement> = good_seeds.into_iter().map(GoodSeedDetailElement::from).collect();
    Ok(HttpResponse::Ok().json(elements))
}

/**
 * Endpoint to retrieve a single good seed by its identifier.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "getGoodSeed", trace_id = get_trace_id(&http_request), result))]
#[get("/api/good-seeds/{goodSeedId}")]
pub async fn good_seed_get(path: Path<String>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let good_seed_id = parse_id(&path.into_inner())?;
    let good_seed = app_state.good_seed_service.get_good_seed(good_seed_id)?.ok_or_else(good_seed_not_found)?;
    Ok(HttpResponse::Ok().json(GoodSeedDetailElement::from(good_seed)))
}

/**
 * Endpoint to add a new good seed.
 */
#[instrument(level = "info", skip(http_request, app_state, request_body), fields(service = "addGoodSeed", trace_id = get_trace_id(&http_request), result))]
#[post("/api/good-seeds")]
pub async fn good_seed_add(http_request: HttpRequest, request_body: web::Json<GoodSeedUpsertRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let good_seed_input = GoodSeedUpsertInputType::from(request_body).validate()?;
    let good_seed = app_state.good_seed_service.add_good_seed(good_seed_input)?;
    Ok(HttpResponse::Created().json(GoodSeedDetailElement::from(good_seed)))
}

/**
 * Endpoint to replace an existing good seed.
 */
#[instrument(level = "info", skip(http_request, app_state, request_body), fields(service = "updateGoodSeed", trace_id = get_trace_id(&http_request), result))]
#[put("/api/good-seeds/{goodSeedId}")]
pub async fn good_seed_update(path: Path<String>, http_request: HttpRequest, request_body: web::Json<GoodSeedUpsertRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let good_seed_id = parse_id(&path.into_inner())?;
    let good_seed_input = GoodSeedUpsertInputType::from(request_body).validate()?;
    let good_seed = app_state.good_seed_service.update_good_seed(good_seed_id, good_seed_input)?.ok_or_else(good_seed_not_found)?;
    Ok(HttpResponse::Ok().json(GoodSeedDetailElement::from(good_seed)))
}

/**
 * Endpoint to delete a good seed.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "deleteGoodSeed", trace_id = get_trace_id(&http_request), result))]
#[delete("/api/good-seeds/{goodSeedId}")]
pub async fn good_seed_delete(path: Path<String>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let good_seed_id = parse_id(&path.into_inner())?;
    if !app_state.good_seed_service.delete_good_seed(good_seed_id)? {
        return Err(good_seed_not_found());
    }
    Ok(HttpResponse::NoContent().finish())
}

/**
 * Endpoint to add a new user. Duplicate usernames are rejected.
 */
#[instrument(level = "info", skip(http_request, app_state, request_body), fields(service = "addUser", trace_id = get_trace_id(&http_request), result))]
#[post("/api/users")]
pub async fn user_add(http_request: HttpRequest, request_body: web::Json<UserAddRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let user_input = UserAddInputType::from(request_body).validate()?;
    let user = app_state.user_service.add_user(user_input)?;
    Ok(HttpResponse::Created().json(UserDetailElement::from(user)))
}

/**
 * Endpoint to retrieve a user by identifier.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "getUser", trace_id = get_trace_id(&http_request), result))]
#[get("/api/users/{userId}")]
pub async fn user_get(path: Path<String>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let user_id = parse_id(&path.into_inner())?;
    let user = app_state.user_service.get_user(user_id)?.ok_or_else(|| ApplicationError::new(ErrorType::NotFound, "User not found".to_string()))?;
    Ok(HttpResponse::Ok().json(UserDetailElement::from(user)))
}

/**
 * Json extractor configuration mapping malformed request bodies to the
 * application error shape instead of the actix default.
 */
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| ApplicationError::new(ErrorType::Validation, format!("Invalid request body: {err}")).into())
}

/**
 * Parses a path identifier. An unparsable identifier is a validation error,
 * distinct from a missing record.
 */
fn parse_id(raw_id: &str) -> Result<i64, ApplicationError> {
    raw_id.parse::<i64>().map_err(|_err| ApplicationError::new(ErrorType::Validation, "Invalid ID".to_string()))
}

fn good_seed_not_found() -> ApplicationError {
    ApplicationError::new(ErrorType::NotFound, "Good seed not found".to_string())
}

/**
 * Retrieves the trace ID from the HTTP request headers.
 * If the trace ID is not present, a new UUID is generated.
 */
fn get_trace_id(http_request: &HttpRequest) -> String {
    http_request.headers().get("X-Trace-ID")
        .and_then(|v| v.to_str().ok().map(std::string::ToString::to_string))
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}
