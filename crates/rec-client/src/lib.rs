//! HTTP client for the two-stage movie recommendation service.
//!
//! This crate provides a Rust client for the FastAPI backend that runs
//! retrieval and ranking. It handles:
//! - Health probing of the service root
//! - Fetching dataset statistics, cached for 60 seconds
//! - Requesting recommendations and mapping failures to [`ClientError`]
//!
//! Each call is a single attempt with its own timeout. Nothing is retried.

pub mod cache;
pub mod error;
pub mod types;

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

pub use cache::{Clock, StatsCache, SystemClock, STATS_TTL};
pub use error::{ClientError, Result, CONNECTION_FAILURE_MESSAGE, UNKNOWN_ERROR_MESSAGE};
pub use types::{
    ContractWarning, Gender, MovieId, RecommendRequest, RecommendResponse, RecommendedMovie,
    StatsResponse, UserId,
};

/// Default location of the recommendation service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);
pub const STATS_TIMEOUT: Duration = Duration::from_secs(5);
pub const RECOMMEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`RecommenderClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub health_timeout: Duration,
    pub stats_timeout: Duration,
    pub recommend_timeout: Duration,
    pub stats_ttl: Duration,
}

impl ClientConfig {
    /// Default timeouts against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            health_timeout: HEALTH_TIMEOUT,
            stats_timeout: STATS_TIMEOUT,
            recommend_timeout: RECOMMEND_TIMEOUT,
            stats_ttl: STATS_TTL,
        }
    }
}

/// Client for the recommendation service.
///
/// Cloning is cheap and clones share the connection pool and the stats
/// cache.
#[derive(Clone)]
pub struct RecommenderClient {
    http: reqwest::Client,
    config: ClientConfig,
    stats_cache: Arc<Mutex<StatsCache>>,
    clock: Arc<dyn Clock>,
}

impl RecommenderClient {
    /// Build a client using the system clock.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build a client whose stats cache reads time from `clock`.
    pub fn with_clock(mut config: ClientConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        if config.base_url.is_empty() {
            return Err(ClientError::InvalidConfig("base URL is empty".into()));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        info!("Recommendation service at {}", config.base_url);
        Ok(Self {
            http,
            stats_cache: Arc::new(Mutex::new(StatsCache::new(config.stats_ttl))),
            config,
            clock,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// Probe `GET /`. True only on a 2xx status; every failure is `false`.
    pub async fn check_health(&self) -> bool {
        let url = self.url("/");
        debug!("Health check against {}", url);

        match self
            .http
            .get(&url)
            .timeout(self.config.health_timeout)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                warn!("Health check returned status {}", resp.status());
                false
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                false
            }
        }
    }

    /// Dataset statistics from `GET /stats`, served from cache while fresh.
    ///
    /// Returns `None` on any failure. A failure is cached for the TTL like
    /// a snapshot, so an offline backend is probed at most once per window.
    pub async fn fetch_stats(&self) -> Option<StatsResponse> {
        let cached = self.stats_cache.lock().get(self.clock.now());
        if let Some(stats) = cached {
            debug!("Serving stats from cache");
            return stats;
        }

        let stats = self.request_stats().await;
        self.stats_cache.lock().store(stats, self.clock.now());
        stats
    }

    async fn request_stats(&self) -> Option<StatsResponse> {
        let url = self.url("/stats");
        debug!("Fetching stats from {}", url);

        let resp = match self
            .http
            .get(&url)
            .timeout(self.config.stats_timeout)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Stats unavailable: {}", e);
                return None;
            }
        };

        if !resp.status().is_success() {
            warn!("Stats request returned status {}", resp.status());
            return None;
        }

        match resp.json::<StatsResponse>().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!("Stats response could not be decoded: {}", e);
                None
            }
        }
    }

    /// Request recommendations via `POST /recommend`.
    ///
    /// # Arguments
    /// * `user_id` - The user to recommend for
    /// * `top_k` - Number of retrieval candidates (stage 1)
    /// * `top_n` - Number of final recommendations (stage 2)
    ///
    /// # Returns
    /// The decoded response, in the order the backend ranked it
    pub async fn fetch_recommendations(
        &self,
        user_id: UserId,
        top_k: u32,
        top_n: u32,
    ) -> Result<RecommendResponse> {
        let request = RecommendRequest::new(user_id, top_k, top_n);
        let timeout = self.config.recommend_timeout;
        let start = Instant::now();
        debug!(
            "Requesting {} recommendations from {} candidates for user {}",
            top_n, top_k, user_id
        );

        let resp = self
            .http
            .post(self.url("/recommend"))
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Recommend request for user {} failed: {}", user_id, e);
                ClientError::from_transport(e, timeout)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .bytes()
                .await
                .map_err(|e| ClientError::from_transport(e, timeout))?;
            let err = ClientError::from_error_body(status.as_u16(), &body);
            error!("Recommend for user {} returned {}: {}", user_id, status, err);
            return Err(err);
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ClientError::from_transport(e, timeout))?;
        let response: RecommendResponse = serde_json::from_slice(&body).map_err(|e| {
            error!("Recommend response for user {} was invalid: {}", user_id, e);
            ClientError::from_decode(e)
        })?;

        info!(
            "Received {} recommendations for user {} in {:.2?}",
            response.recommendations.len(),
            user_id,
            start.elapsed()
        );
        Ok(response)
    }

    /// Base URL this client sends requests to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
