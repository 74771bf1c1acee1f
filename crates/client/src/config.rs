use eyre::{eyre, Result, WrapErr};
use std::env;
use std::time::Duration;

use crate::search::SearchPolicy;

/// Configuration for talking to the timetable API.
///
/// This struct holds everything a portal client needs: where the API lives,
/// how long to wait for it, how overlapping searches are resolved and how long
/// a dismissed install prompt stays hidden.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the `/api/v1/...` paths are appended to
    pub api_base_url: String,
    /// Policy applied when a search is issued while another is in flight
    pub search_policy: SearchPolicy,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    /// Hours a dismissed install prompt stays hidden
    pub install_reminder_hours: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            search_policy: SearchPolicy::default(),
            request_timeout: 10,
            install_reminder_hours: 24,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - KAIRO_SEARCH_POLICY is not a known policy
    /// - KAIRO_REQUEST_TIMEOUT_SECONDS is not an unsigned integer
    /// - KAIRO_INSTALL_REMINDER_HOURS is not a non-negative hour count that
    ///   fits in a duration
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("KAIRO_API_BASE_URL").unwrap_or(defaults.api_base_url);

        let search_policy = match lookup("KAIRO_SEARCH_POLICY") {
            Some(raw) => raw.parse().map_err(|_| {
                eyre!("KAIRO_SEARCH_POLICY must be 'last-response-wins' or 'ignore-overlapping'")
            })?,
            None => defaults.search_policy,
        };

        let request_timeout = match lookup("KAIRO_REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .parse()
                .wrap_err("Invalid KAIRO_REQUEST_TIMEOUT_SECONDS value")?,
            None => defaults.request_timeout,
        };

        let install_reminder_hours = match lookup("KAIRO_INSTALL_REMINDER_HOURS") {
            Some(raw) => {
                let hours = raw
                    .parse::<i64>()
                    .wrap_err("Invalid KAIRO_INSTALL_REMINDER_HOURS value")?;
                check_reminder_hours(hours)?
            }
            None => defaults.install_reminder_hours,
        };

        Ok(Self {
            api_base_url,
            search_policy,
            request_timeout,
            install_reminder_hours,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// How long a dismissal keeps the install prompt hidden.
    ///
    /// Negative hours count as zero; values beyond the duration range
    /// saturate.
    pub fn install_reminder(&self) -> chrono::Duration {
        chrono::Duration::try_hours(self.install_reminder_hours.max(0))
            .unwrap_or(chrono::Duration::MAX)
    }
}

fn check_reminder_hours(hours: i64) -> Result<i64> {
    if hours < 0 {
        return Err(eyre!("KAIRO_INSTALL_REMINDER_HOURS must not be negative, got {}", hours));
    }
    if chrono::Duration::try_hours(hours).is_none() {
        return Err(eyre!("KAIRO_INSTALL_REMINDER_HOURS is out of range, got {}", hours));
    }
    Ok(hours)
}
