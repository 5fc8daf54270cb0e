mod api;
mod dao;
mod model;
mod service;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::api::endpoints::{good_seed_add, good_seed_delete, good_seed_get, good_seed_update, good_seeds_list, json_config, user_add, user_get};
use crate::api::middleware::timing_middleware;
use crate::api::state::AppState;
use crate::dao::goodseeds::GoodSeedDao;
use crate::dao::users::UserDao;
use crate::model::apperror::{ApplicationError, ErrorType};
use crate::model::config::{ApplicationArguments, Config, HttpsConfig, LoggingConfig};
use crate::model::models::GoodSeedInputType;
use crate::service::goodseeds::GoodSeedService;
use crate::service::users::UserService;

use actix_web::{App, HttpServer, middleware::from_fn, web};
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use clap::Parser;
use prometheus::IntGauge;
use rustls::pki_types::PrivateKeyDer;
use rustls::{ServerConfig, SupportedProtocolVersion};
use rustls_pemfile::{certs, pkcs8_private_keys};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/**
 * Main entry point for the application.
 */
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = ApplicationArguments::parse();

    let config = get_config(&args.config_file)?;

    init_tracing(&config.logging)?;

    let good_seed_dao = Arc::new(GoodSeedDao::new());
    let user_dao = Arc::new(UserDao::new());

    let good_seed_service = GoodSeedService::new(good_seed_dao.clone());
    let user_service = UserService::new(user_dao.clone());

    if config.server.seed_demo_data {
        seed_demo_data(&good_seed_service).map_err(|err| std::io::Error::other(format!("Failed to seed demo data: {err}")))?;
    }

    let state = web::Data::new(AppState::new(good_seed_service, user_service));

    let prometheus = PrometheusMetricsBuilder::new("")
        .endpoint("/metrics")
        .mask_unmatched_patterns("UNKNOWN")
        .build()
        .map_err(|err| std::io::Error::other(format!("Failed to create Prometheus metrics: {err}")))?;

    // Initialize custom metrics
    let good_seeds_gauge = IntGauge::new("good_seeds_count", "Number of good seed records stored").map_err(|err| std::io::Error::other(format!("Failed to create good_seeds_count gauge: {err}")))?;
    let users_gauge = IntGauge::new("users_count", "Number of user records stored").map_err(|err| std::io::Error::other(format!("Failed to create users_count gauge: {err}")))?;
    register_prometheus_metrics(&prometheus, &good_seeds_gauge)?;
    register_prometheus_metrics(&prometheus, &users_gauge)?;

    gather_store_metrics(good_seeds_gauge, users_gauge, good_seed_dao, user_dao);

    let server_init = HttpServer::new(move || {
        App::new()
            .wrap(prometheus.clone())
            .wrap(from_fn(timing_middleware))
            .app_data(json_config())
            .app_data(state.clone())
            .service(good_seeds_list)
            .service(good_seed_get)
            .service(good_seed_add)
            .service(good_seed_update)
            .service(good_seed_delete)
            .service(user_add)
            .service(user_get)
    });

    let server_init = if let Some(http_port) = &config.server.http_port { server_init.bind(("127.0.0.1", *http_port))? } else { server_init };
    let server_init = if let Some(https_config) = &config.server.https_config {
        let ssl_builder = ssl_builder(https_config).map_err(|err| std::io::Error::other(format!("Failed to create SSL/TLS configuration: {err}")))?;
        server_init.bind_rustls_0_23("127.0.0.1:".to_string() + &https_config.port.to_string(), ssl_builder).map_err(|err| std::io::Error::other(format!("Failed to bind HTTPS server: {err}")))?
    } else {
        server_init
    };

    server_init.workers(config.server.workers).run().await
}

/**
 * Initializes tracing for the application.
 *
 * #Arguments
 * `logging_config`: The logging configuration.
 *
 * #Returns
 * A `Result` indicating success or failure.
 */
fn init_tracing(logging_config: &LoggingConfig) -> Result<(), std::io::Error> {
    let mut env_filter = EnvFilter::from_default_env();
    for directive in &logging_config.directives {
        env_filter = env_filter.add_directive(directive.parse().map_err(|err| std::io::Error::other(format!("Invalid logging directive '{directive}': {err}")))?);
    }
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(logging_config.target)
        .with_thread_ids(logging_config.thread_ids)
        .with_thread_names(logging_config.thread_names)
        .with_line_number(logging_config.line_number)
        .with_level(logging_config.level)
        .with_ansi(logging_config.ansi);
    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();
    Ok(())
}

/**
 * Registers custom Prometheus metrics.
 *
 * #Arguments
 * `prometheus_metrics`: The Prometheus metrics instance to register the gauge with.
 * `gauge`: The gauge to register.
 */
fn register_prometheus_metrics(prometheus_metrics: &PrometheusMetrics, gauge: &IntGauge) -> Result<(), std::io::Error> {
    prometheus_metrics.registry.register(Box::new(gauge.clone())).map_err(|err| std::io::Error::other(format!("Failed to register Prometheus gauge: {err}")))?;
    Ok(())
}

/**
 * Gathers store metrics in a separate thread.
 *
 * #Arguments
 * `good_seeds_gauge`: Gauge for the good seed collection size.
 * `users_gauge`: Gauge for the user collection size.
 * `good_seed_dao`: The good seed store to gather metrics from.
 * `user_dao`: The user store to gather metrics from.
 */
fn gather_store_metrics(good_seeds_gauge: IntGauge, users_gauge: IntGauge, good_seed_dao: Arc<GoodSeedDao>, user_dao: Arc<UserDao>) {
    thread::spawn(move || {
        loop {
            if let Ok(count) = good_seed_dao.count() {
                good_seeds_gauge.set(i64::try_from(count).unwrap_or(i64::MAX));
            }
            if let Ok(count) = user_dao.count() {
                users_gauge.set(i64::try_from(count).unwrap_or(i64::MAX));
            }
            thread::sleep(Duration::from_secs(1));
        }
    });
}

/**
 * Seeds the store with the demo records used by the dashboard.
 *
 * #Arguments
 * `good_seed_service`: The good seed service to seed through.
 *
 * #Returns
 * A `Result` indicating success or failure.
 */
fn seed_demo_data(good_seed_service: &GoodSeedService) -> Result<(), ApplicationError> {
    let demo_records = vec![
        GoodSeedInputType {
            district: "Hyderabad".to_string(),
            transport_type: "Truck".to_string(),
            good_name: "Rice".to_string(),
            route_address: "123 Main St, Hyderabad".to_string(),
            street: Some("123 Main St".to_string()),
            city: Some("Hyderabad".to_string()),
            state: Some("Telangana".to_string()),
            pincode: Some("500001".to_string()),
            latitude: Some(17.385044),
            longitude: Some(78.486671),
        },
        GoodSeedInputType {
            district: "Bangalore".to_string(),
            transport_type: "Train".to_string(),
            good_name: "Wheat".to_string(),
            route_address: "456 Park Ave, Bangalore".to_string(),
            street: Some("456 Park Ave".to_string()),
            city: Some("Bangalore".to_string()),
            state: Some("Karnataka".to_string()),
            pincode: Some("560001".to_string()),
            latitude: Some(12.971599),
            longitude: Some(77.594563),
        },
    ];
    for demo_record in demo_records {
        good_seed_service.add_good_seed(demo_record)?;
    }
    Ok(())
}

/**
 * Initializes the SSL/TLS configuration for the server.
 *
 * #Arguments
 * `https_config`: The HTTPS configuration containing the certificate and private key files.
 *
 * #Returns
 * A `Result` containing the initialized `ServerConfig` or an `ApplicationError` if initialization fails.
 */
fn ssl_builder(https_config: &HttpsConfig) -> Result<ServerConfig, ApplicationError> {
    let config_builder = ServerConfig::builder_with_protocol_versions(&get_protocol_versions());
    let cert_file = &mut std::io::BufReader::new(
        std::fs::File::open(https_config.clone().certificate_file).map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to read certificate file: {err}")))?,
    );
    let key_file = &mut std::io::BufReader::new(
        std::fs::File::open(https_config.clone().private_key_file).map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to read private key file: {err}")))?,
    );
    let cert_chain = certs(cert_file).collect::<Result<Vec<_>, _>>().map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to convert certificate to der: {err}")))?;
    let mut keys = pkcs8_private_keys(key_file)
        .map(|key| key.map(PrivateKeyDer::Pkcs8))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to convert private key to der: {err}")))?;
    if keys.is_empty() {
        return Err(ApplicationError::new(ErrorType::Initialization, "No private key found in key file".to_string()));
    }
    let config = config_builder
        .with_no_client_auth()
        .with_single_cert(cert_chain, keys.remove(0))
        .map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to create server config: {err}")))?;
    Ok(config)
}

/**
 * Returns the supported TLS protocol versions.
 *
 * #Returns
 * A vector of supported protocol versions.
 */
fn get_protocol_versions() -> Vec<&'static SupportedProtocolVersion> {
    vec![&rustls::version::TLS13]
}

/**
 * Reads the configuration from the specified file.
 *
 * #Arguments
 * `config_file`: The path to the configuration file.
 *
 * #Returns
 * A `Result` containing the parsed `Config` or an `std::io::Error` if reading or parsing fails.
*/
fn get_config(config_file: &str) -> Result<Config, std::io::Error> {
    let config_str: String = std::fs::read_to_string(config_file).map_err(|err| std::io::Error::other(format!("Failed to read config file: {err}")))?;
    let config: Config = toml::from_str(&config_str).map_err(|err| std::io::Error::other(format!("Failed to parse config file: {err}")))?;
    Ok(config)
}
