//! Server configuration and environment variable handling.

use std::env;
use std::time::Duration;

use rand::Rng;

/// HTTP server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port (default: 80, matching the container port mapping)
    pub port: u16,
    /// Delay range for simulated order execution
    pub execution: ExecutionPolicy,
}

impl ServerConfig {
    /// Create a new server configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST` (optional, default: 0.0.0.0): Bind host
    /// - `PORT` (optional, default: 80): Bind port
    /// - `EXECUTION_DELAY_MIN_MS` (optional, default: 100): Minimum execution delay
    /// - `EXECUTION_DELAY_MAX_MS` (optional, default: 1000): Maximum execution delay
    ///
    /// # Errors
    /// Returns an error if a variable is set but cannot be parsed, or if the
    /// delay range is inverted.
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_env("PORT", 80)?;
        let execution = ExecutionPolicy::from_env()?;

        Ok(Self {
            host,
            port,
            execution,
        })
    }
}

/// Delay range for the simulated execution of an order.
///
/// Production samples uniformly from a 100-1000 ms window; tests shrink the
/// range so the suite never waits that long.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionPolicy {
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl ExecutionPolicy {
    /// Create a policy from an explicit delay range.
    ///
    /// # Errors
    /// Returns an error if `min_delay` exceeds `max_delay`.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Result<Self, String> {
        if min_delay > max_delay {
            return Err(format!(
                "invalid execution delay range: min {:?} exceeds max {:?}",
                min_delay, max_delay
            ));
        }
        Ok(Self {
            min_delay,
            max_delay,
        })
    }

    /// Load the delay range from `EXECUTION_DELAY_MIN_MS` / `EXECUTION_DELAY_MAX_MS`.
    pub fn from_env() -> Result<Self, String> {
        let min_ms: u64 = parse_env("EXECUTION_DELAY_MIN_MS", 100)?;
        let max_ms: u64 = parse_env("EXECUTION_DELAY_MAX_MS", 1000)?;
        Self::new(
            Duration::from_millis(min_ms),
            Duration::from_millis(max_ms),
        )
    }

    /// Sample a delay uniformly from the configured range.
    pub fn sample_delay(&self) -> Duration {
        if self.min_delay >= self.max_delay {
            return self.min_delay;
        }
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1000),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| format!("invalid value for {}: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rejects_inverted_range() {
        let result = ExecutionPolicy::new(Duration::from_millis(500), Duration::from_millis(100));
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_stays_within_range() {
        let policy =
            ExecutionPolicy::new(Duration::from_millis(10), Duration::from_millis(20)).unwrap();
        for _ in 0..100 {
            let delay = policy.sample_delay();
            assert!(delay >= policy.min_delay);
            assert!(delay <= policy.max_delay);
        }
    }

    #[test]
    fn test_sample_degenerate_range() {
        let policy =
            ExecutionPolicy::new(Duration::from_millis(5), Duration::from_millis(5)).unwrap();
        assert_eq!(policy.sample_delay(), Duration::from_millis(5));
    }
}
