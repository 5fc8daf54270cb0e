use clap::{Parser, command};
use serde::{Deserialize, Serialize};

/**
 * Command-line arguments for the application.
 */
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ApplicationArguments {
    /**
     * Path to the configuration file.
     */
    #[arg(short, long)]
    pub config_file: String,
}

/**
 * Represents the configuration for the application.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /**
     * Logging configuration for the application.
     */
    pub logging: LoggingConfig,
    /**
     * Server configuration for the application.
     */
    pub server: Server,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /**
     * Whether to log the target of the log message.
     */
    pub target: bool,
    /**
     * Whether to log thread IDs .
     */
    pub thread_ids: bool,
    /**
     * Whether to log thread names.
     */
    pub thread_names: bool,
    /**
     * Whether to log line numbers.
     */
    pub line_number: bool,
    /**
     * Whether to log the log level.
     */
    pub level: bool,
    /**
     * Whether to use ANSI colors in logs.
     */
    pub ansi: bool,
    /**
     * Additional directives for logging configuration.
     */
    pub directives: Vec<String>,
}

/**
 * Server configuration.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /**
     * The HTTP port to bind to. No HTTP listener is started if absent.
     */
    pub http_port: Option<u16>,
    /**
     * HTTPS configuration. No HTTPS listener is started if absent.
     */
    pub https_config: Option<HttpsConfig>,
    /**
     * Number of server workers.
     */
    pub workers: usize,
    /**
     * Whether to seed the store with demo records at startup.
     */
    #[serde(default)]
    pub seed_demo_data: bool,
}

/**
 * HTTPS configuration.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpsConfig {
    /**
     * The HTTPS port to bind to.
     */
    pub port: u16,
    /**
     * Path to the certificate file in PEM format.
     */
    pub certificate_file: String,
    /**
     * Path to the private key file in PEM format.
     */
    pub private_key_file: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_config_parses_minimal_toml() {
        let config_str = r#"
            [logging]
            target = true
            thread_ids = false
            thread_names = false
            line_number = true
            level = true
            ansi = false
            directives = ["logistics_api=debug"]

            [server]
            httpPort = 8080
            workers = 2
        "#;
        let config: Config = toml::from_str(config_str).unwrap();
        assert_eq!(config.server.http_port, Some(8080));
        assert_eq!(config.server.workers, 2);
        assert!(!config.server.seed_demo_data);
        assert!(config.server.https_config.is_none());
        assert_eq!(config.logging.directives, vec!["logistics_api=debug".to_string()]);
    }

    #[test]
    fn test_config_parses_https_and_seed_flag() {
        let config_str = r#"
            [logging]
            target = true
            thread_ids = true
            thread_names = true
            line_number = true
            level = true
            ansi = true
            directives = []

            [server]
            workers = 4
            seedDemoData = true

            [server.httpsConfig]
            port = 8443
            certificateFile = "/etc/certs/server.pem"
            privateKeyFile = "/etc/certs/server.key"
        "#;
        let config: Config = toml::from_str(config_str).unwrap();
        assert!(config.server.seed_demo_data);
        let https_config = config.server.https_config.unwrap();
        assert_eq!(https_config.port, 8443);
        assert_eq!(https_config.certificate_file, "/etc/certs/server.pem");
    }
}
