use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Remaining-time band used for presentation cues.
///
/// ```text
/// HIGH    remaining / total >  0.5
/// MEDIUM  0.25 < fraction   <= 0.5
/// LOW     fraction          <= 0.25
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    High,
    Medium,
    Low,
}

impl Band {
    /// Classify using integer arithmetic so the 50% and 25% boundaries are exact.
    pub fn classify(remaining_secs: u64, total_secs: u64) -> Self {
        Self::from_ratio(u128::from(remaining_secs), u128::from(total_secs))
    }

    /// Same boundaries at nanosecond precision.
    pub fn classify_duration(remaining: Duration, total: Duration) -> Self {
        Self::from_ratio(remaining.as_nanos(), total.as_nanos())
    }

    fn from_ratio(remaining: u128, total: u128) -> Self {
        if total == 0 {
            return Band::Low;
        }
        if remaining * 2 > total {
            Band::High
        } else if remaining * 4 > total {
            Band::Medium
        } else {
            Band::Low
        }
    }
}
