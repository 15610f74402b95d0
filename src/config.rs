use serde::Deserialize;

/// Password hashing policy: an optional fixed pepper mixed into every
/// hash plus the argon2 cost parameters, treated as fixed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    pub pepper: Option<String>,
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl PasswordConfig {
    /// Argon2 crate defaults for the cost parameters.
    pub fn with_defaults(pepper: Option<String>) -> Self {
        Self {
            pepper,
            m_cost: 19456,
            t_cost: 2,
            p_cost: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub hmac_secret: String,
    pub password: PasswordConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let database_url = std::env::var("DATABASE_URL")?;
        let hmac_secret = std::env::var("HMAC_SECRET")?;
        let password = PasswordConfig {
            pepper: std::env::var("PASSWORD_PEPPER").ok().filter(|p| !p.is_empty()),
            m_cost: std::env::var("ARGON2_M_COST")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(19456),
            t_cost: std::env::var("ARGON2_T_COST")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(2),
            p_cost: std::env::var("ARGON2_P_COST")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(1),
        };
        Ok(Self {
            database_url,
            hmac_secret,
            password,
        })
    }
}
