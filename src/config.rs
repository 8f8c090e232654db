use std::env;

/// Which backend service the storefront talks to.
#[derive(Clone)]
pub enum BackendConfig {
    /// Self-hosted PostgreSQL with locally issued JWT sessions.
    Postgres {
        database_url: String,
        jwt_secret: String,
        jwt_expiration_hours: i64,
    },
    /// Hosted PostgREST data API with a GoTrue-style auth API.
    Rest { base_url: String, api_key: String },
}

#[derive(Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let backend = match env::var("BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .as_str()
        {
            "rest" => BackendConfig::Rest {
                base_url: env::var("BACKEND_URL").expect("BACKEND_URL must be set"),
                api_key: env::var("BACKEND_API_KEY").expect("BACKEND_API_KEY must be set"),
            },
            "postgres" => BackendConfig::Postgres {
                database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
                jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
                jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                    .unwrap_or_else(|_| "24".to_string())
                    .parse()
                    .expect("JWT_EXPIRATION_HOURS must be a number"),
            },
            other => panic!("BACKEND must be `postgres` or `rest`, got `{}`", other),
        };

        Self {
            backend,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
