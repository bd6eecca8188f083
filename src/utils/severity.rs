//! Air Quality Severity Scale
//!
//! Four-step ordinal scale shared by the upstream grade field and the local
//! threshold tables (1 = best, 4 = worst), plus the "no data" sentinel used
//! when nothing could be resolved.

use serde::{Deserialize, Serialize};

/// Ordinal severity of a single pollutant or of the whole snapshot
///
/// # Scale
/// - Good = 1
/// - Moderate = 2
/// - Unhealthy = 3
/// - VeryUnhealthy = 4
///
/// Ordering follows the ordinal, so `max()` picks the worse level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Good,
    Moderate,
    Unhealthy,
    VeryUnhealthy,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Good,
        SeverityLevel::Moderate,
        SeverityLevel::Unhealthy,
        SeverityLevel::VeryUnhealthy,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            SeverityLevel::Good => 1,
            SeverityLevel::Moderate => 2,
            SeverityLevel::Unhealthy => 3,
            SeverityLevel::VeryUnhealthy => 4,
        }
    }

    /// Convert an upstream grade to a level
    ///
    /// Anything outside 1..=4 is not a grade and yields `None`.
    pub fn from_grade(grade: i32) -> Option<Self> {
        match grade {
            1 => Some(SeverityLevel::Good),
            2 => Some(SeverityLevel::Moderate),
            3 => Some(SeverityLevel::Unhealthy),
            4 => Some(SeverityLevel::VeryUnhealthy),
            _ => None,
        }
    }

    /// Display label as shown on the device
    pub fn label(self) -> &'static str {
        match self {
            SeverityLevel::Good => "좋음",
            SeverityLevel::Moderate => "보통",
            SeverityLevel::Unhealthy => "나쁨",
            SeverityLevel::VeryUnhealthy => "매우나쁨",
        }
    }

    /// Hex color token for web renderers
    pub fn color(self) -> &'static str {
        match self {
            SeverityLevel::Good => "#007bff",
            SeverityLevel::Moderate => "#28a745",
            SeverityLevel::Unhealthy => "#ffc107",
            SeverityLevel::VeryUnhealthy => "#dc3545",
        }
    }

    /// Health advice for outdoor activity at this level
    pub fn advice(self) -> &'static str {
        match self {
            SeverityLevel::Good => "외출 및 실외 활동에 좋은 날씨입니다.",
            SeverityLevel::Moderate => "일반적인 외출에는 무리가 없으나, 민감한 분들은 주의하세요.",
            SeverityLevel::Unhealthy => "장시간 외출을 자제하고, 외출시 마스크 착용을 권장합니다.",
            SeverityLevel::VeryUnhealthy => "외출을 최대한 자제하고, 실내 공기정화에 신경쓰세요.",
        }
    }
}

/// Overall verdict level: a severity, or the "no data" sentinel (ordinal 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusLevel {
    NoData,
    Graded(SeverityLevel),
}

impl StatusLevel {
    pub fn ordinal(self) -> u8 {
        match self {
            StatusLevel::NoData => 0,
            StatusLevel::Graded(level) => level.ordinal(),
        }
    }

    pub fn severity(self) -> Option<SeverityLevel> {
        match self {
            StatusLevel::NoData => None,
            StatusLevel::Graded(level) => Some(level),
        }
    }

    pub fn is_no_data(self) -> bool {
        matches!(self, StatusLevel::NoData)
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusLevel::NoData => "데이터 없음",
            StatusLevel::Graded(level) => level.label(),
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            StatusLevel::NoData => "#808080",
            StatusLevel::Graded(level) => level.color(),
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            StatusLevel::NoData => "대기질 정보를 확인할 수 없습니다.",
            StatusLevel::Graded(level) => level.advice(),
        }
    }
}

impl From<SeverityLevel> for StatusLevel {
    fn from(level: SeverityLevel) -> Self {
        StatusLevel::Graded(level)
    }
}
