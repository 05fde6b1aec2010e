//! HTTP client for the Overpass map-data API.
//!
//! Builds one Overpass QL query per category (a union of tag selectors
//! around the origin point) and fetches the matching elements, with
//! automatic retry on transient errors. Rate limiting (429) and other
//! non-2xx responses surface as typed errors so the retry layer can
//! distinguish "slow down" from generic failure.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use huni_core::Category;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::retry::{retry_with_backoff, RetryPolicy};

/// One raw element from an Overpass response.
///
/// Nodes carry `lat`/`lon` directly; ways and areas carry a `center`
/// sub-object when the query asks for `out center`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    pub id: u64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<RawElement>,
}

/// Tag selectors per query bucket. Each entry becomes one `nwr[...]`
/// clause in the query union.
fn selectors(category: Category) -> &'static [&'static str] {
    match category {
        Category::Health => {
            &[r#"["amenity"~"^(hospital|clinic|doctors|dentist|pharmacy|veterinary)$"]"#]
        }
        Category::Education => {
            &[r#"["amenity"~"^(school|university|college|kindergarten|library)$"]"#]
        }
        Category::Market => &[
            r#"["shop"]"#,
            r#"["amenity"~"^(restaurant|cafe|fast_food|food_court|bar|pub|ice_cream|marketplace|fuel)$"]"#,
        ],
        Category::Transport => &[
            r#"["public_transport"~"^(platform|station|stop_position)$"]"#,
            r#"["highway"="bus_stop"]"#,
            r#"["railway"~"^(station|halt|tram_stop)$"]"#,
        ],
        Category::Walkability => &[
            r#"["highway"~"^(footway|pedestrian|path|steps|bridleway|living_street)$"]"#,
            r#"["highway"~"^(street_lamp|crossing)$"]"#,
            r#"["amenity"~"^(bench|drinking_water)$"]"#,
            r#"["sidewalk"]"#,
            r#"["traffic_calming"]"#,
        ],
        Category::Recreation => &[
            r#"["leisure"~"^(park|playground|sports_centre|fitness_centre|swimming_pool|garden)$"]"#,
            r#"["amenity"~"^(cinema|theatre|community_centre)$"]"#,
        ],
        Category::Safety => &[
            r#"["amenity"="fire_station"]"#,
            r#"["man_made"="surveillance"]"#,
            r#"["lit"="yes"]"#,
        ],
        Category::Accessibility => &[
            r#"["kerb"~"^(lowered|flush)$"]"#,
            r#"["highway"="elevator"]"#,
            r#"["tactile_paving"="yes"]"#,
            r#"["wheelchair"~"^(yes|designated)$"]"#,
        ],
        Category::Police => &[r#"["amenity"="police"]"#],
        Category::Religious => &[r#"["amenity"="place_of_worship"]"#],
    }
}

/// Build the Overpass QL query for one category around an origin.
#[must_use]
pub fn category_query(category: Category, lat: f64, lng: f64, radius_m: f64) -> String {
    let mut query = String::from("[out:json][timeout:25];\n(\n");
    for selector in selectors(category) {
        query.push_str(&format!(
            "  nwr{selector}(around:{radius_m:.0},{lat},{lng});\n"
        ));
    }
    query.push_str(");\nout center 200;");
    query
}

/// Client for the Overpass interpreter endpoint.
pub struct OverpassClient {
    client: Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl OverpassClient {
    /// Creates a client with the configured timeout, user agent, and
    /// retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            retry: RetryPolicy {
                max_retries: config.max_retries,
                backoff_base_secs: config.backoff_base_secs,
                rate_limit_backoff_secs: config.rate_limit_backoff_secs,
            },
        })
    }

    /// Executes one Overpass query and returns its elements, retrying
    /// transient failures per the configured policy.
    ///
    /// # Errors
    ///
    /// - [`EngineError::RateLimited`] — HTTP 429 after all retries.
    /// - [`EngineError::UnexpectedStatus`] — non-2xx status (5xx retried,
    ///   4xx not) after all retries.
    /// - [`EngineError::Http`] — network failure after all retries.
    /// - [`EngineError::Deserialize`] — body is not a valid Overpass
    ///   response (not retried).
    pub async fn fetch_elements(&self, query: &str) -> Result<Vec<RawElement>, EngineError> {
        retry_with_backoff(self.retry, || {
            let query = query.to_owned();
            async move {
                let response = self
                    .client
                    .post(&self.endpoint)
                    .form(&[("data", query.as_str())])
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(5);
                    return Err(EngineError::RateLimited {
                        host: extract_host(&self.endpoint),
                        retry_after_secs,
                    });
                }

                if !status.is_success() {
                    return Err(EngineError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: self.endpoint.clone(),
                    });
                }

                let body = response.text().await?;
                let parsed = serde_json::from_str::<OverpassResponse>(&body).map_err(|e| {
                    EngineError::Deserialize {
                        context: format!("overpass response from {}", self.endpoint),
                        source: e,
                    }
                })?;
                Ok(parsed.elements)
            }
        })
        .await
    }
}

/// Hostname of the endpoint for error messages; falls back to the full
/// string when it does not parse.
fn extract_host(endpoint: &str) -> String {
    reqwest::Url::parse(endpoint)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| endpoint.to_owned())
}

#[cfg(test)]
#[path = "overpass_test.rs"]
mod tests;
