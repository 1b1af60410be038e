use std::{env, str::FromStr, sync::Arc};

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// How bearer tokens are turned into principals.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthMode {
    /// Ask the external authentication service to validate the token.
    Remote {
        service_url: String,
        api_key: String,
    },
    /// Verify HS256 tokens locally with a shared secret.
    Jwt { secret: String },
}

/// Where the usage procedures live.
#[derive(Clone, Debug, PartialEq)]
pub enum UsageBackend {
    /// Call the procedures over a direct Postgres connection.
    Postgres {
        database_url: String,
        ssl_mode: String,
        max_connections: u32,
    },
    /// Call the procedures through a PostgREST-style `/rest/v1/rpc` endpoint.
    Rest {
        rpc_url: String,
        api_key: String,
        user_arg: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProcedureNames {
    /// Read-only procedure answering whether the user may generate.
    pub check: String,
    /// Mutating procedure returning the new usage count.
    pub increment: String,
}

impl Default for ProcedureNames {
    fn default() -> Self {
        ProcedureNames {
            check: "can_generate".to_string(),
            increment: "increment_usage".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// This struct holds all the parameters required to initialize and run
/// the server: bind address, worker count, CORS settings, logging
/// preferences, how callers are authenticated and where the usage
/// procedures are invoked.
pub struct Config {
    // development or production
    pub environment: String,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Optional file that receives a copy of every log line.
    pub log_file: Option<String>,
    pub auth: AuthMode,
    pub usage_backend: UsageBackend,
    pub procedures: ProcedureNames,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    /// See [`Config::from_lookup`] for the variables read.
    pub fn from_env() -> Result<Arc<Self>, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok()).map(Arc::new)
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`
    /// - `AUTH_SERVICE_URL` and `AUTH_API_KEY` when `AUTH_MODE=remote` (default)
    /// - `JWT_SECRET` when `AUTH_MODE=jwt`
    /// - `DATABASE_URL` when `USAGE_BACKEND=postgres` (default)
    /// - `RPC_URL` and `RPC_API_KEY` when `USAGE_BACKEND=rest`
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `LOG_FILE`: Additional log file (default: none)
    /// - `DB_SSL_MODE`: sqlx SSL mode name (default: "prefer")
    /// - `DB_MAX_CONNECTIONS`: Pool size (default: 10)
    /// - `RPC_USER_ARG`: JSON argument carrying the user id (default: "user_id")
    /// - `USAGE_CHECK_PROCEDURE` (default: "can_generate")
    /// - `USAGE_INCREMENT_PROCEDURE` (default: "increment_usage")
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let auth = match or_default("AUTH_MODE", "remote").to_lowercase().as_str() {
            "remote" => AuthMode::Remote {
                service_url: required("AUTH_SERVICE_URL")?,
                api_key: required("AUTH_API_KEY")?,
            },
            "jwt" => AuthMode::Jwt {
                secret: required("JWT_SECRET")?,
            },
            other => {
                return Err(ConfigError::Invalid {
                    key: "AUTH_MODE",
                    value: other.to_string(),
                });
            }
        };

        let usage_backend = match or_default("USAGE_BACKEND", "postgres").to_lowercase().as_str() {
            "postgres" => UsageBackend::Postgres {
                database_url: required("DATABASE_URL")?,
                ssl_mode: or_default("DB_SSL_MODE", "prefer"),
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            },
            "rest" => UsageBackend::Rest {
                rpc_url: required("RPC_URL")?,
                api_key: required("RPC_API_KEY")?,
                user_arg: or_default("RPC_USER_ARG", "user_id"),
            },
            other => {
                return Err(ConfigError::Invalid {
                    key: "USAGE_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        let defaults = ProcedureNames::default();

        Ok(Config {
            environment: required("ENVIRONMENT")?,
            server_host: or_default("IP", "127.0.0.1"),
            server_port: parse_or(&lookup, "PORT", 8080)?,
            num_workers: parse_or(&lookup, "WORKERS", 4)?,
            cors_allowed_origin: or_default("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            console_logging_enabled: or_default("ENABLE_CONSOLE_LOGGING", "true").to_lowercase()
                == "true",
            log_file: lookup("LOG_FILE").filter(|path| !path.trim().is_empty()),
            auth,
            usage_backend,
            procedures: ProcedureNames {
                check: or_default("USAGE_CHECK_PROCEDURE", &defaults.check),
                increment: or_default("USAGE_INCREMENT_PROCEDURE", &defaults.increment),
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
