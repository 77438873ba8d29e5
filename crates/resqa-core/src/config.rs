//! Assessment configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::{Error, Result};

/// How often an assessment should be refreshed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckFrequency {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl CheckFrequency {
    pub fn period(&self) -> chrono::Duration {
        match self {
            CheckFrequency::Hourly => chrono::Duration::hours(1),
            CheckFrequency::Daily => chrono::Duration::days(1),
            CheckFrequency::Weekly => chrono::Duration::days(7),
            CheckFrequency::Monthly => chrono::Duration::days(30),
        }
    }
}

impl fmt::Display for CheckFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CheckFrequency::Hourly => "hourly",
            CheckFrequency::Daily => "daily",
            CheckFrequency::Weekly => "weekly",
            CheckFrequency::Monthly => "monthly",
        };
        f.write_str(label)
    }
}

impl FromStr for CheckFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hourly" => Ok(CheckFrequency::Hourly),
            "daily" => Ok(CheckFrequency::Daily),
            "weekly" => Ok(CheckFrequency::Weekly),
            "monthly" => Ok(CheckFrequency::Monthly),
            other => Err(Error::Configuration(format!(
                "unknown check frequency '{}'",
                other
            ))),
        }
    }
}

/// Which checks run and the thresholds applied to their outcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QAConfig {
    pub check_links: bool,
    pub analyze_content: bool,
    pub check_authority: bool,
    pub detect_duplicates: bool,
    pub detect_spam: bool,
    pub check_frequency: CheckFrequency,
    /// Results scoring below this are flagged
    pub quality_threshold: f64,
    /// Results scoring below this should be dropped
    pub auto_remove_threshold: f64,
    #[serde(with = "duration_secs")]
    pub link_timeout: Duration,
    #[serde(with = "duration_secs")]
    pub authority_timeout: Duration,
}

impl Default for QAConfig {
    fn default() -> Self {
        Self {
            check_links: true,
            analyze_content: true,
            check_authority: true,
            detect_duplicates: true,
            detect_spam: true,
            check_frequency: CheckFrequency::Daily,
            quality_threshold: 0.7,
            auto_remove_threshold: 0.3,
            link_timeout: Duration::from_secs(10),
            authority_timeout: Duration::from_secs(5),
        }
    }
}

impl QAConfig {
    /// Configuration with every check switched off
    pub fn no_checks() -> Self {
        Self {
            check_links: false,
            analyze_content: false,
            check_authority: false,
            detect_duplicates: false,
            detect_spam: false,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file; missing keys take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: QAConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `RESQA_*` environment variables (and a `.env` file, if present)
    pub fn apply_env(mut self) -> Result<Self> {
        dotenvy::dotenv().ok();

        if let Some(value) = env_flag("RESQA_CHECK_LINKS")? {
            self.check_links = value;
        }
        if let Some(value) = env_flag("RESQA_ANALYZE_CONTENT")? {
            self.analyze_content = value;
        }
        if let Some(value) = env_flag("RESQA_CHECK_AUTHORITY")? {
            self.check_authority = value;
        }
        if let Some(value) = env_flag("RESQA_DETECT_DUPLICATES")? {
            self.detect_duplicates = value;
        }
        if let Some(value) = env_flag("RESQA_DETECT_SPAM")? {
            self.detect_spam = value;
        }
        if let Ok(value) = env::var("RESQA_CHECK_FREQUENCY") {
            self.check_frequency = value.parse()?;
        }
        if let Some(value) = env_number("RESQA_QUALITY_THRESHOLD")? {
            self.quality_threshold = value;
        }
        if let Some(value) = env_number("RESQA_AUTO_REMOVE_THRESHOLD")? {
            self.auto_remove_threshold = value;
        }
        if let Some(value) = env_number("RESQA_LINK_TIMEOUT_SECS")? {
            self.link_timeout = Duration::from_secs_f64(value.max(0.0));
        }
        if let Some(value) = env_number("RESQA_AUTHORITY_TIMEOUT_SECS")? {
            self.authority_timeout = Duration::from_secs_f64(value.max(0.0));
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("quality_threshold", self.quality_threshold),
            ("auto_remove_threshold", self.auto_remove_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.auto_remove_threshold > self.quality_threshold {
            return Err(Error::Configuration(
                "auto_remove_threshold must not exceed quality_threshold".to_string(),
            ));
        }

        if self.link_timeout.is_zero() || self.authority_timeout.is_zero() {
            return Err(Error::Configuration("check timeouts must be non-zero".to_string()));
        }

        Ok(())
    }
}

fn env_flag(key: &str) -> Result<Option<bool>> {
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        other => Err(Error::Configuration(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

fn env_number(key: &str) -> Result<Option<f64>> {
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| Error::Configuration(format!("{} must be a number, got '{}'", key, raw)))
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom("duration must be a non-negative number of seconds"));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}
