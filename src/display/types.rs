use serde::{Deserialize, Serialize};

/// Icon shown when there is nothing to classify or the fetch failed
pub const WARNING_ICON: &str = "i120";

/// Text shown for the "no data" verdict
pub const NO_DATA_TEXT: &str = "데이터 없음";

/// Text shown when the upstream could not be reached
pub const FAILURE_TEXT: &str = "데이터 로딩 실패";

/// One frame of a single-line display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFrame {
    pub text: String,
    #[serde(rename = "icon")]
    pub icon_token: String,
}

impl DisplayFrame {
    pub fn new(text: impl Into<String>, icon_token: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon_token: icon_token.into(),
        }
    }

    pub fn no_data() -> Self {
        Self::new(NO_DATA_TEXT, WARNING_ICON)
    }

    /// Frame served in place of a reading when fetching failed
    pub fn failure() -> Self {
        Self::new(FAILURE_TEXT, WARNING_ICON)
    }
}

/// Device payload: `{ "frames": [ { "text": .., "icon": .. } ] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPayload {
    pub frames: Vec<DisplayFrame>,
}

impl DisplayPayload {
    pub fn single(frame: DisplayFrame) -> Self {
        Self { frames: vec![frame] }
    }

    /// Text of the first frame, if any
    pub fn headline(&self) -> Option<&str> {
        self.frames.first().map(|f| f.text.as_str())
    }
}

impl From<DisplayFrame> for DisplayPayload {
    fn from(frame: DisplayFrame) -> Self {
        Self::single(frame)
    }
}

/// Outcome of one publishing run, as rendered into the README
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub last_updated: String,
    pub total_stations: usize,
    pub success_count: usize,
    pub error_count: usize,
    /// Successfully published stations and their detailed frame
    pub entries: Vec<(String, DisplayFrame)>,
    /// Station whose payload is mirrored to `index.json`
    pub default_station: String,
    /// Publishing cadence in minutes; 0 for manual runs
    pub update_interval_mins: u64,
}
