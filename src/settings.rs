use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinkfolioSettings {
    pub application: ApplicationSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Deployment environment; "production" turns on the secure cookie
    /// attribute
    pub environment: String,
    pub cors_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Session (and cookie) lifetime in days
    pub session_duration_days: i64,
    /// Secret the session cookie signing key is derived from.
    /// Auto-generated with a warning when left empty.
    pub session_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: "development".to_string(),
            cors_origins: "http://localhost:3000,http://localhost:8080".to_string(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            session_duration_days: 30,
            session_secret: String::new(), // Will be generated if empty
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LinkfolioSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Logger initialization fails
    /// - Settings file cannot be read or parsed
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::initialize_environment()?;

        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);

        Ok(settings)
    }

    /// Initialize environment variables and logging
    fn initialize_environment() -> Result<(), Box<dyn std::error::Error>> {
        Self::load_env_file();
        env_logger::try_init()?;
        Ok(())
    }

    /// Load base settings from TOML file(s) or use defaults.
    /// Priority (highest to lowest):
    /// 1. Environment variables (applied after loading base settings)
    /// 2. Settings.toml in `LINKFOLIO_SECRETS_DIR` (if set and present)
    /// 3. Settings.toml in the current directory (if present)
    /// 4. Default settings
    fn load_base_settings() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::default();

        let default_config_path = std::path::PathBuf::from("Settings.toml");
        if default_config_path.exists() {
            let toml_content = fs::read_to_string(&default_config_path)?;
            settings = basic_toml::from_str(&toml_content)?;
            println!(
                "✓ Loaded base settings from {}",
                default_config_path.display()
            );
        }

        if let Ok(secrets_dir) = std::env::var("LINKFOLIO_SECRETS_DIR") {
            let secrets_path = std::path::Path::new(&secrets_dir).join("Settings.toml");
            if secrets_path.exists() {
                let secrets_toml_content = fs::read_to_string(&secrets_path)?;
                settings = basic_toml::from_str(&secrets_toml_content)?;
                println!("✓ Overriding settings from {}", secrets_path.display());
            } else {
                println!(
                    "ℹ LINKFOLIO_SECRETS_DIR set but no Settings.toml found at: {}",
                    secrets_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Apply environment variable overrides to settings
    fn apply_env_overrides(settings: &mut Self) {
        Self::apply_application_env_overrides(&mut settings.application);
        Self::apply_session_env_overrides(&mut settings.session);
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    fn apply_application_env_overrides(app_settings: &mut ApplicationSettings) {
        if let Ok(host) = std::env::var("HOST") {
            app_settings.host = host;
        }
        if let Ok(port_str) = std::env::var("PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                app_settings.port = port;
            }
        }
        if let Ok(environment) = std::env::var("ENVIRONMENT") {
            app_settings.environment = environment;
        }
        if let Ok(cors_origins) = std::env::var("CORS_ORIGINS") {
            app_settings.cors_origins = cors_origins;
        }
    }

    /// Apply environment overrides for session settings
    pub fn apply_session_env_overrides(session_settings: &mut SessionSettings) {
        if let Ok(days_str) = std::env::var("SESSION_DURATION_DAYS") {
            if let Ok(days) = days_str.parse::<i64>() {
                session_settings.session_duration_days = days;
            }
        }

        Self::handle_session_secret_override(session_settings);
    }

    /// Handle session secret environment override and generation
    fn handle_session_secret_override(session_settings: &mut SessionSettings) {
        let env_secret_set = std::env::var("SESSION_SECRET").is_ok_and(|secret| {
            if secret.is_empty() {
                false
            } else {
                session_settings.session_secret = secret;
                true
            }
        });

        if !env_secret_set && session_settings.session_secret.is_empty() {
            session_settings.session_secret = Self::generate_random_session_secret();
            Self::warn_about_generated_secret();
        }
    }

    /// Generate a cryptographically secure random session secret
    /// (32 bytes of entropy, base64-encoded)
    fn generate_random_session_secret() -> String {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        general_purpose::STANDARD.encode(secret)
    }

    fn warn_about_generated_secret() {
        eprintln!("⚠️  WARNING: Using an auto-generated session secret");
        eprintln!("🔒 Every restart invalidates all session cookies until you set");
        eprintln!("   the SESSION_SECRET environment variable or session_secret in");
        eprintln!("   Settings.toml");
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }

    /// Get the bind address for the server
    #[must_use]
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }

    /// Get CORS origins as a vector of strings
    #[must_use]
    pub fn get_cors_origins(&self) -> Vec<String> {
        self.application
            .cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .collect()
    }

    /// Whether this deployment runs in production mode.
    /// Gates the session cookie's secure attribute.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.application.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clean_env_vars() {
        std::env::remove_var("SESSION_SECRET");
        std::env::remove_var("SESSION_DURATION_DAYS");
        std::env::remove_var("ENVIRONMENT");
        std::env::remove_var("LINKFOLIO_SECRETS_DIR");
    }

    #[test]
    fn test_defaults() {
        let settings = LinkfolioSettings::default();
        assert_eq!(settings.session.session_duration_days, 30);
        assert_eq!(settings.session.session_secret, "");
        assert_eq!(settings.application.environment, "development");
        assert!(!settings.is_production());
    }

    #[test]
    #[serial]
    fn test_session_secret_env_override() {
        clean_env_vars();

        let mut session_settings = SessionSettings {
            session_duration_days: 30,
            session_secret: "default-secret".to_string(),
        };

        std::env::set_var("SESSION_SECRET", "env-override-secret");
        LinkfolioSettings::apply_session_env_overrides(&mut session_settings);
        assert_eq!(session_settings.session_secret, "env-override-secret");

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_session_duration_env_override() {
        clean_env_vars();

        let mut session_settings = SessionSettings {
            session_duration_days: 30,
            session_secret: "test-secret".to_string(),
        };

        std::env::set_var("SESSION_DURATION_DAYS", "7");
        LinkfolioSettings::apply_session_env_overrides(&mut session_settings);

        assert_eq!(session_settings.session_duration_days, 7);
        assert_eq!(session_settings.session_secret, "test-secret"); // unchanged

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_session_secret_auto_generation() {
        clean_env_vars();

        let mut session_settings = SessionSettings {
            session_duration_days: 30,
            session_secret: String::new(),
        };
        LinkfolioSettings::apply_session_env_overrides(&mut session_settings);

        assert!(!session_settings.session_secret.is_empty());
        assert!(session_settings.session_secret.len() > 40); // base64 of 32 bytes

        let mut second = SessionSettings {
            session_duration_days: 30,
            session_secret: String::new(),
        };
        LinkfolioSettings::apply_session_env_overrides(&mut second);
        assert_ne!(session_settings.session_secret, second.session_secret);

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_production_flag_from_environment() {
        clean_env_vars();

        let mut settings = LinkfolioSettings::default();
        std::env::set_var("ENVIRONMENT", "production");
        LinkfolioSettings::apply_env_overrides(&mut settings);
        assert!(settings.is_production());

        clean_env_vars();
    }

    #[test]
    fn test_bind_address_and_cors_origins() {
        let settings = LinkfolioSettings::default();
        assert_eq!(settings.get_bind_address(), "0.0.0.0:8080");
        assert_eq!(
            settings.get_cors_origins(),
            vec![
                "http://localhost:3000".to_string(),
                "http://localhost:8080".to_string()
            ]
        );
    }
}
