use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TimeExprError {
    #[error("invalid duration '{0}': {1}")]
    Duration(String, String),
    #[error("invalid time '{0}': {1}")]
    Time(String, String),
}

/// A query start time: `now`, `T+10m`, `T-5m`, an RFC 3339 instant, or an
/// RFC 3339 instant with an offset (`2026-01-12T10:00:00Z + 90s`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeExpr {
    Relative(Duration),
    Absolute(DateTime<Utc>),
}

impl TimeExpr {
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimeExprError> {
        match self {
            TimeExpr::Relative(d) => shift(now, *d),
            TimeExpr::Absolute(dt) => Ok(*dt),
        }
    }
}

fn shift(base: DateTime<Utc>, offset: Duration) -> Result<DateTime<Utc>, TimeExprError> {
    base.checked_add_signed(offset).ok_or_else(|| {
        TimeExprError::Time(
            format!("{} + {}s", base.to_rfc3339(), offset.num_seconds()),
            "out of range".to_string(),
        )
    })
}

impl FromStr for TimeExpr {
    type Err = TimeExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("now") {
            return Ok(TimeExpr::Relative(Duration::zero()));
        }

        // Relative: T+10s, T-5m
        if s.starts_with(['t', 'T']) {
            let (neg, rest) = split_sign(&s[1..]);
            let dur = parse_duration(rest)?;
            return Ok(TimeExpr::Relative(if neg { -dur } else { dur }));
        }

        // Absolute with offset: 2026-01-12T10:00:00Z - 10s
        if let Some(idx) = s.rfind(['+', '-']) {
            if idx > 10 {
                if let Ok(base) = DateTime::parse_from_rfc3339(s[..idx].trim()) {
                    let (neg, rest) = split_sign(&s[idx..]);
                    let dur = parse_duration(rest)?;
                    let offset = if neg { -dur } else { dur };
                    return shift(base.with_timezone(&Utc), offset).map(TimeExpr::Absolute);
                }
            }
        }

        DateTime::parse_from_rfc3339(s)
            .map(|dt| TimeExpr::Absolute(dt.with_timezone(&Utc)))
            .map_err(|e| TimeExprError::Time(s.to_string(), e.to_string()))
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    }
}

pub fn parse_duration(s: &str) -> Result<Duration, TimeExprError> {
    let err = |e: String| TimeExprError::Duration(s.trim().to_string(), e);
    humantime::parse_duration(s.trim())
        .map_err(|e| err(e.to_string()))
        .and_then(|d| Duration::from_std(d).map_err(|e| err(e.to_string())))
}

pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}
