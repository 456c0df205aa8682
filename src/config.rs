//! Session pacing options.
//!
//! The engine has exactly three timing knobs, all of them presentation pacing
//! rather than hard contracts:
//!
//! - `reveal_delay`: gap between "all active rules pass" and the next rule
//!   becoming active.
//! - `win_delay`: gap between the final rule passing and the won state.
//! - `tick_interval`: how often drivers should call
//!   [`Session::on_periodic_tick`](crate::Session::on_periodic_tick).
//!
//! Each can be overridden from the environment, see [`Options::from_env`].

use crate::error::ConfigError;
use std::time::Duration;

pub const REVEAL_DELAY_VAR: &str = "PASSWORD_RULES_REVEAL_DELAY_MS";
pub const WIN_DELAY_VAR: &str = "PASSWORD_RULES_WIN_DELAY_MS";
pub const TICK_INTERVAL_VAR: &str = "PASSWORD_RULES_TICK_INTERVAL_MS";

const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(500);
const DEFAULT_WIN_DELAY: Duration = Duration::from_millis(1000);
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Options that affect session pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub reveal_delay: Duration,
    pub win_delay: Duration,
    pub tick_interval: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self { reveal_delay: DEFAULT_REVEAL_DELAY, win_delay: DEFAULT_WIN_DELAY, tick_interval: DEFAULT_TICK_INTERVAL }
    }
}

impl Options {
    /// No staged pacing: reveals and wins become due immediately.
    pub fn instant() -> Self {
        Self { reveal_delay: Duration::ZERO, win_delay: Duration::ZERO, ..Self::default() }
    }

    /// Defaults, overridden by any of the `PASSWORD_RULES_*_MS` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`Options::from_env`] but with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut options = Self::default();

        if let Some(value) = lookup(REVEAL_DELAY_VAR) {
            options.reveal_delay = parse_millis(REVEAL_DELAY_VAR, &value)?;
        }
        if let Some(value) = lookup(WIN_DELAY_VAR) {
            options.win_delay = parse_millis(WIN_DELAY_VAR, &value)?;
        }
        if let Some(value) = lookup(TICK_INTERVAL_VAR) {
            let interval = parse_millis(TICK_INTERVAL_VAR, &value)?;
            if interval.is_zero() {
                return Err(ConfigError::ZeroInterval { var: TICK_INTERVAL_VAR });
            }
            options.tick_interval = interval;
        }

        Ok(options)
    }
}

fn parse_millis(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let millis = value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidMillis { var, value: value.to_string() })?;

    // Deadlines are computed with chrono, which caps spans well below u64::MAX ms.
    let duration = Duration::from_millis(millis);
    chrono::TimeDelta::from_std(duration).map_err(|_| ConfigError::OutOfRange { var })?;
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |var| map.get(var).map(|v| v.to_string())
    }

    #[test]
    fn defaults_match_staged_pacing() {
        let options = Options::default();
        assert_eq!(options.reveal_delay, Duration::from_millis(500));
        assert_eq!(options.win_delay, Duration::from_millis(1000));
        assert_eq!(options.tick_interval, Duration::from_secs(5));
    }

    #[test]
    fn lookup_overrides_only_present_values() {
        let options = Options::from_lookup(lookup_from(&[(WIN_DELAY_VAR, " 250 ")])).unwrap();
        assert_eq!(options.win_delay, Duration::from_millis(250));
        assert_eq!(options.reveal_delay, Duration::from_millis(500));
    }

    #[test]
    fn rejects_garbage_and_zero_tick() {
        let err = Options::from_lookup(lookup_from(&[(REVEAL_DELAY_VAR, "soon")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidMillis { var: REVEAL_DELAY_VAR, value: "soon".to_string() });

        let err = Options::from_lookup(lookup_from(&[(TICK_INTERVAL_VAR, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroInterval { var: TICK_INTERVAL_VAR });
    }
}
