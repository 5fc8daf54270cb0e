use actix_web::{body::MessageBody, dev::{ServiceRequest, ServiceResponse}, middleware::Next, Error};
use tracing::debug;

/**
 * Middleware timing every request.
 *
 * Logs method, path, status and elapsed time under the `timing` target,
 * tagged with the same trace ID the endpoint handlers record: the value of
 * the `X-Trace-ID` header, or a fresh UUID when the caller sent none.
 */
pub async fn timing_middleware(
    request: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let start_time = std::time::Instant::now();
    let method = request.method().to_string();
    let path = request.path().to_string();
    let trace_id = request
        .headers()
        .get("X-Trace-ID")
        .and_then(|value| value.to_str().ok().map(std::string::ToString::to_string))
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let response = next.call(request).await;
    let status = match &response {
        Ok(service_response) => service_response.status().as_u16(),
        Err(err) => err.as_response_error().status_code().as_u16(),
    };
    let elapsed_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);
    debug!(target: "timing", %trace_id, %method, %path, status, elapsed_ms, "Request processed");
    response
}

#[cfg(test)]
mod test {
    use actix_web::{App, HttpResponse, http::StatusCode, middleware::from_fn, test, test::TestRequest, web};

    use super::*;

    #[actix_web::test]
    async fn test_timing_middleware_passes_response_through() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(timing_middleware))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let response = test::call_service(&app, TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_timing_middleware_accepts_trace_id_header() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(timing_middleware))
                .route("/ping", web::get().to(|| async { HttpResponse::NoContent().finish() })),
        )
        .await;
        let request = TestRequest::get().uri("/ping").insert_header(("X-Trace-ID", "test")).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
