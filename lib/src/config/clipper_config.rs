//! Runtime settings for the clipping layer.

use crate::clipper::CLIPPER_SAFETY_OFFSET;
use crate::{Coord, Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime settings for the clipping layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipperConfig {
    /// A raw offset running longer than this logs a warning (ms).
    /// Zero disables the alarm.
    pub soft_time_limit_ms: u64,

    /// Number of polygons each worker unions before the partial results
    /// are merged.
    pub parallel_union_chunk_size: usize,

    /// Below this many input polygons the parallel union runs serially.
    pub parallel_union_min_polygons: usize,

    /// Distance the clip operand is grown by when a safety offset is
    /// requested (scaled units).
    pub safety_offset: Coord,
}

impl ClipperConfig {
    /// Soft time limit as a duration, if enabled.
    pub fn soft_time_limit(&self) -> Option<Duration> {
        (self.soft_time_limit_ms > 0).then(|| Duration::from_millis(self.soft_time_limit_ms))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_union_chunk_size < 2 {
            return Err(Error::Config(
                "parallel union chunk size must be at least 2".into(),
            ));
        }
        if self.safety_offset <= 0 {
            return Err(Error::Config("safety offset must be positive".into()));
        }
        Ok(())
    }
}

impl Default for ClipperConfig {
    fn default() -> Self {
        Self {
            soft_time_limit_ms: 500,
            parallel_union_chunk_size: 64,
            parallel_union_min_polygons: 256,
            safety_offset: CLIPPER_SAFETY_OFFSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ClipperConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.safety_offset, CLIPPER_SAFETY_OFFSET);
        assert_eq!(config.soft_time_limit(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_invalid_values() {
        let config = ClipperConfig {
            parallel_union_chunk_size: 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = ClipperConfig {
            safety_offset: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_alarm() {
        let config = ClipperConfig {
            soft_time_limit_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.soft_time_limit(), None);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ClipperConfig =
            serde_json::from_str(r#"{ "parallel_union_chunk_size": 16 }"#).unwrap();
        assert_eq!(config.parallel_union_chunk_size, 16);
        assert_eq!(config.safety_offset, CLIPPER_SAFETY_OFFSET);
    }
}
