//! Environment-driven configuration, loaded once at startup and passed
//! down explicitly instead of living behind module-level globals.

use bcrypt::{hash, DEFAULT_COST};

/// Default admin credentials for local development only. Production
/// startup warns loudly when these are still in effect.
const DEV_ADMIN_USERNAME: &str = "nexlet";
const DEV_ADMIN_PASSWORD: &str = "nexlet5216";

const DEFAULT_JWT_SECRET: &str = "default-jwt-secret-change-in-production";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub admin_username: String,
    pub admin_password_hash: String,
    /// Whether the admin credential is still the development fallback.
    /// Captured at load time so a hand-built `Config` answers from its
    /// own fields, not from ambient process state.
    pub default_admin_credentials: bool,
    pub jwt_secret: String,
    pub environment: String,
}

impl Config {
    /// Read configuration from the process environment, falling back to
    /// development defaults where a value is absent.
    pub fn from_env() -> Self {
        let database_url = compose_database_url(
            &std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgresql://localhost/nexlet".to_string()),
            std::env::var("DB_NAME").ok().as_deref(),
        );

        let cors_origins = std::env::var("CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let admin_username =
            std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| DEV_ADMIN_USERNAME.to_string());
        let supplied_hash = std::env::var("ADMIN_PASSWORD_HASH").ok();
        let supplied_password = std::env::var("ADMIN_PASSWORD").ok();
        let default_admin_credentials = admin_username == DEV_ADMIN_USERNAME
            && supplied_hash.is_none()
            && supplied_password.is_none();

        // Prefer a pre-hashed value, then a plain password hashed at
        // startup, then the development fallback.
        let admin_password_hash = match (supplied_hash, supplied_password) {
            (Some(hashed), _) => hashed,
            (None, Some(plain)) => hash(&plain, DEFAULT_COST).unwrap_or_default(),
            (None, None) => hash(DEV_ADMIN_PASSWORD, DEFAULT_COST).unwrap_or_default(),
        };

        Self {
            database_url,
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3001),
            cors_origins,
            admin_username,
            admin_password_hash,
            default_admin_credentials,
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// True when the JWT secret is still the insecure built-in default.
    pub fn has_default_jwt_secret(&self) -> bool {
        self.jwt_secret.is_empty() || self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// True when the admin account is still the development fallback.
    pub fn has_default_admin_credentials(&self) -> bool {
        self.default_admin_credentials
    }
}

/// Append `DB_NAME` to a connection string that carries no database path.
/// Leaves URLs that already name a database untouched.
fn compose_database_url(url: &str, db_name: Option<&str>) -> String {
    let Some(db_name) = db_name else {
        return url.to_string();
    };

    let has_db_path = url
        .splitn(2, "://")
        .nth(1)
        .and_then(|rest| rest.splitn(2, '/').nth(1))
        .is_some_and(|path| !path.is_empty());

    if has_db_path {
        url.to_string()
    } else {
        format!("{}/{}", url.trim_end_matches('/'), db_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_url_appends_db_name_when_missing() {
        assert_eq!(
            compose_database_url("postgresql://localhost", Some("nexlet")),
            "postgresql://localhost/nexlet"
        );
        assert_eq!(
            compose_database_url("postgresql://localhost/", Some("nexlet")),
            "postgresql://localhost/nexlet"
        );
    }

    #[test]
    fn test_compose_url_keeps_existing_db_name() {
        assert_eq!(
            compose_database_url("postgresql://localhost/other", Some("nexlet")),
            "postgresql://localhost/other"
        );
    }

    #[test]
    fn test_compose_url_without_db_name_is_identity() {
        assert_eq!(
            compose_database_url("postgresql://localhost", None),
            "postgresql://localhost"
        );
    }

    #[test]
    fn test_default_credential_flag_is_captured_not_reread() {
        // A hand-built Config must answer from its own fields even when
        // the ambient environment says otherwise.
        let mut config = Config::from_env();

        config.default_admin_credentials = false;
        assert!(!config.has_default_admin_credentials());

        config.default_admin_credentials = true;
        assert!(config.has_default_admin_credentials());
    }

    #[test]
    fn test_from_env_has_sane_defaults() {
        let config = Config::from_env();
        assert!(!config.database_url.is_empty());
        assert!(!config.admin_username.is_empty());
        assert!(!config.admin_password_hash.is_empty());
        assert!(!config.cors_origins.is_empty());
        assert!(config.port > 0);
    }
}
