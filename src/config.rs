use serde::Deserialize;

use crate::services::collaborative::DuplicatePolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// CSV file with `movieId,title,genres` rows
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// CSV file with `userId,movieId,rating,timestamp` rows
    #[serde(default = "default_ratings_path")]
    pub ratings_path: String,

    /// Number of nearest neighbor users considered by collaborative filtering
    #[serde(default = "default_neighbor_count")]
    pub neighbor_count: usize,

    /// Weight of the collaborative signal in hybrid ranking (0.0 - 1.0)
    #[serde(default = "default_cf_weight")]
    pub cf_weight: f64,

    /// Number of recommendations returned when the client does not ask for a count
    #[serde(default = "default_top_n")]
    pub default_top_n: i64,

    /// How repeated ratings of the same item by the same user are folded
    #[serde(default)]
    pub duplicate_ratings: DuplicatePolicy,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_movies_path() -> String {
    "data/movies.csv".to_string()
}

fn default_ratings_path() -> String {
    "data/ratings.csv".to_string()
}

fn default_neighbor_count() -> usize {
    5
}

fn default_cf_weight() -> f64 {
    0.7
}

fn default_top_n() -> i64 {
    5
}

/// Tuning knobs handed to the rankers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingConfig {
    pub neighbor_count: usize,
    pub cf_weight: f64,
    pub duplicate_ratings: DuplicatePolicy,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            neighbor_count: default_neighbor_count(),
            cf_weight: default_cf_weight(),
            duplicate_ratings: DuplicatePolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the rankers cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.cf_weight) {
            anyhow::bail!("CF_WEIGHT must be within [0, 1], got {}", self.cf_weight);
        }
        if self.neighbor_count == 0 {
            anyhow::bail!("NEIGHBOR_COUNT must be at least 1");
        }
        if self.default_top_n <= 0 {
            anyhow::bail!("DEFAULT_TOP_N must be at least 1, got {}", self.default_top_n);
        }
        Ok(())
    }

    pub fn ranking(&self) -> RankingConfig {
        RankingConfig {
            neighbor_count: self.neighbor_count,
            cf_weight: self.cf_weight,
            duplicate_ratings: self.duplicate_ratings,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
