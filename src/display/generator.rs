use crate::classifier::{classify, OverallStatus};
use crate::data::MeasurementRecord;
use crate::display::types::{DisplayFrame, DisplayPayload, WARNING_ICON};
use crate::utils::StatusLevel;

/// Icon token for a verdict level
///
/// One token per ordinal 1-4; "no data" gets the warning icon.
pub fn icon_for(level: StatusLevel) -> &'static str {
    match level.ordinal() {
        1 => "i2395", // smiling face
        2 => "i2396", // neutral face
        3 => "i2397", // sad face
        4 => "i2398", // very sad face
        _ => WARNING_ICON,
    }
}

/// Render a verdict as one display frame
///
/// # Text layouts
/// - no data: fixed no-data text, `detailed` ignored
/// - detailed: `"<station> <pollutant>:<value> (<level>)"`
/// - compact: `"<pollutant> <value> (<level>)"`
/// - level without a dominant value: `"<station>: <level>"`
pub fn format(status: &OverallStatus, station_name: &str, detailed: bool) -> DisplayFrame {
    if status.level.is_no_data() {
        return DisplayFrame::no_data();
    }

    let level_label = status.level.label();
    let text = match status.dominant() {
        Some((pollutant, value)) if detailed => {
            format!("{} {}:{} ({})", station_name, pollutant.label(), value, level_label)
        }
        Some((pollutant, value)) => format!("{} {} ({})", pollutant.label(), value, level_label),
        None => format!("{}: {}", station_name, level_label),
    };

    DisplayFrame::new(text, icon_for(status.level))
}

/// Classify a record and wrap the resulting frame as a device payload
pub fn render_payload(record: &MeasurementRecord, detailed: bool) -> DisplayPayload {
    let status = classify(record);
    DisplayPayload::single(format(&status, &record.station_name, detailed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PollutantReading;
    use crate::display::types::NO_DATA_TEXT;
    use crate::utils::SeverityLevel;

    #[test]
    fn test_icons_are_distinct() {
        let icons: Vec<&str> = SeverityLevel::ALL
            .iter()
            .map(|&level| icon_for(StatusLevel::Graded(level)))
            .collect();
        assert_eq!(icons, vec!["i2395", "i2396", "i2397", "i2398"]);
        assert_eq!(icon_for(StatusLevel::NoData), "i120");
    }

    #[test]
    fn test_no_data_ignores_detailed_flag() {
        let status = OverallStatus::no_data();
        let detailed = format(&status, "종로구", true);
        let compact = format(&status, "종로구", false);
        assert_eq!(detailed, compact);
        assert_eq!(detailed.text, NO_DATA_TEXT);
        assert_eq!(detailed.icon_token, WARNING_ICON);
    }

    #[test]
    fn test_detailed_text() {
        let record = MeasurementRecord::new("종로구")
            .with_pm25(PollutantReading::new(Some(28.0), Some(2)))
            .with_pm10(PollutantReading::new(Some(45.0), Some(2)));

        let frame = format(&classify(&record), "종로구", true);
        assert_eq!(frame.text, "종로구 PM2.5:28 (보통)");
        assert_eq!(frame.icon_token, "i2396");
    }

    #[test]
    fn test_compact_text() {
        let record = MeasurementRecord::new("중구").with_pm10(PollutantReading::from_value(160.0));

        let frame = format(&classify(&record), "중구", false);
        assert_eq!(frame.text, "PM10 160 (매우나쁨)");
        assert_eq!(frame.icon_token, "i2398");
    }

    #[test]
    fn test_fractional_values_keep_precision() {
        let record = MeasurementRecord::new("용산구").with_pm25(PollutantReading::from_value(12.5));

        let frame = format(&classify(&record), "용산구", false);
        assert_eq!(frame.text, "PM2.5 12.5 (좋음)");
    }

    #[test]
    fn test_level_without_dominant_value() {
        let record = MeasurementRecord::new("서초구").with_pm10(PollutantReading::from_grade(3));

        let frame = format(&classify(&record), "서초구", true);
        assert_eq!(frame.text, "서초구: 나쁨");
        assert_eq!(frame.icon_token, "i2397");
    }

    #[test]
    fn test_render_payload_uses_record_station() {
        let record = MeasurementRecord::new("영등포구").with_pm25(PollutantReading::from_value(5.0));

        let payload = render_payload(&record, true);
        assert_eq!(payload.frames.len(), 1);
        assert_eq!(payload.headline(), Some("영등포구 PM2.5:5 (좋음)"));
    }
}
