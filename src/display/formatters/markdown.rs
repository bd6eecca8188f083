use crate::display::types::PublishReport;

/// Markdown formatter for the published README
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format a publishing report as markdown
    ///
    /// `base_url` is where the static files are served from; without it the
    /// file links are left relative.
    pub fn format(report: &PublishReport, base_url: Option<&str>) -> String {
        let mut md = String::with_capacity(1024);
        let link = |file: &str| match base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), file),
            None => file.to_string(),
        };

        md.push_str("# 미세먼지 데이터 API\n\n");
        md.push_str(&format!("마지막 업데이트: {}\n\n", report.last_updated));

        // Status counts
        md.push_str("## 📊 현재 상태\n");
        md.push_str(&format!("- 총 측정소: {}개\n", report.total_stations));
        md.push_str(&format!("- 성공: {}개\n", report.success_count));
        md.push_str(&format!("- 실패: {}개\n\n", report.error_count));

        // Device URLs
        md.push_str("## 🔗 LaMetric URL\n\n");
        md.push_str(&format!("### 기본 ({})\n", report.default_station));
        md.push_str(&format!("```\n{}\n```\n\n", link("index.json")));

        if !report.entries.is_empty() {
            md.push_str("### 특정 측정소\n```\n");
            for (station, _) in report.entries.iter().take(3) {
                md.push_str(&format!("{}\n", link(&format!("{}.json", station))));
            }
            md.push_str("```\n\n");

            md.push_str("### 간단한 형식\n```\n");
            let (first, _) = &report.entries[0];
            md.push_str(&format!("{}\n", link(&format!("{}-simple.json", first))));
            md.push_str("```\n\n");
        }

        // File list
        md.push_str("## 📁 사용 가능한 파일\n\n");
        for (station, frame) in &report.entries {
            md.push_str(&format!("- `{}.json` - {}\n", station, frame.text));
        }
        md.push('\n');

        if report.update_interval_mins > 0 {
            md.push_str("## 🔄 업데이트 주기\n");
            md.push_str(&format!("매 {}분마다 자동 업데이트됩니다.\n", report.update_interval_mins));
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::types::DisplayFrame;

    fn report() -> PublishReport {
        PublishReport {
            last_updated: "2024-01-15T05:00:00Z".to_string(),
            total_stations: 3,
            success_count: 2,
            error_count: 1,
            entries: vec![
                ("종로구".to_string(), DisplayFrame::new("종로구 PM2.5:28 (보통)", "i2396")),
                ("중구".to_string(), DisplayFrame::new("중구 PM10:160 (매우나쁨)", "i2398")),
            ],
            default_station: "종로구".to_string(),
            update_interval_mins: 15,
        }
    }

    #[test]
    fn test_counts_and_files() {
        let md = MarkdownFormatter::format(&report(), None);

        assert!(md.contains("- 총 측정소: 3개"));
        assert!(md.contains("- 성공: 2개"));
        assert!(md.contains("- 실패: 1개"));
        assert!(md.contains("- `종로구.json` - 종로구 PM2.5:28 (보통)"));
        assert!(md.contains("- `중구.json` - 중구 PM10:160 (매우나쁨)"));
        assert!(md.contains("종로구-simple.json"));
        assert!(md.contains("## 🔄 업데이트 주기\n매 15분마다 자동 업데이트됩니다."));
    }

    #[test]
    fn test_manual_run_has_no_cadence() {
        let mut manual = report();
        manual.update_interval_mins = 0;

        let md = MarkdownFormatter::format(&manual, None);
        assert!(!md.contains("업데이트 주기"));
    }

    #[test]
    fn test_base_url_links() {
        let md = MarkdownFormatter::format(&report(), Some("https://example.github.io/aq/"));

        assert!(md.contains("https://example.github.io/aq/index.json"));
        assert!(md.contains("https://example.github.io/aq/중구.json"));
    }

    #[test]
    fn test_empty_report() {
        let mut empty = report();
        empty.entries.clear();
        empty.success_count = 0;

        let md = MarkdownFormatter::format(&empty, None);
        assert!(md.contains("- 성공: 0개"));
        assert!(!md.contains("### 간단한 형식"));
    }
}
