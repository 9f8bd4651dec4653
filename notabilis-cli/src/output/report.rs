//! Notable-observation report rendering.

use notabilis_core::dates::iso_date;
use notabilis_core::QualityGrade;
use notabilis_detect::{DetectError, Notable, NotableSink};
use serde::Serialize;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const ITALIC: &str = "\x1b[3m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

// ============================================================================
// Text Report
// ============================================================================

/// Renders notable observations as human-readable text.
pub struct ReportRenderer {
    use_colors: bool,
}

impl ReportRenderer {
    /// Creates a renderer with optional colors.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn grade_label(&self, grade: QualityGrade) -> String {
        let label = format!("[{}]", grade.label());
        let color = match grade {
            QualityGrade::Research => GREEN,
            QualityGrade::NeedsId => YELLOW,
            QualityGrade::Casual => DIM,
        };
        self.wrap(color, &label)
    }

    /// Formats one notable observation.
    ///
    /// The heading is the common name with the scientific name in
    /// italics, or the scientific name alone when no common name exists.
    pub fn format_notable(&self, notable: &Notable) -> String {
        let taxon = notable.observation.taxon.as_ref().unwrap_or(&notable.taxon);
        let heading = match &taxon.preferred_common_name {
            Some(common) => format!(
                "{} ({})",
                self.wrap(BOLD, common),
                self.wrap(ITALIC, &taxon.name)
            ),
            None => self.wrap(ITALIC, &taxon.name),
        };

        let observer = &notable.observation.user;
        let since = observer
            .created_at
            .map(|at| format!(" (member since {})", at.format("%Y-%m-%d")))
            .unwrap_or_default();

        let mut lines = Vec::new();
        lines.push(format!(
            "{heading} {}",
            self.grade_label(notable.observation.quality_grade)
        ));
        lines.push(format!("  {}", notable.observation.url()));
        lines.push(format!(
            "  Observed {} by {}{since}",
            iso_date(notable.day),
            observer.login
        ));
        lines.join("\n")
    }
}

impl NotableSink for ReportRenderer {
    fn emit(&mut self, notable: &Notable) -> Result<(), DetectError> {
        println!("{}\n", self.format_notable(notable));
        Ok(())
    }
}

// ============================================================================
// JSON Report
// ============================================================================

/// Emits one JSON object per notable observation, one per line.
pub struct JsonLines {
    pretty: bool,
}

/// JSON output for a single notable observation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotableOutput<'a> {
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    common_name: Option<&'a str>,
    scientific_name: &'a str,
    url: String,
    observer: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    observer_since: Option<String>,
    quality_grade: &'a str,
}

impl JsonLines {
    /// Creates a JSON emitter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn output(notable: &Notable) -> NotableOutput<'_> {
        let taxon = notable.observation.taxon.as_ref().unwrap_or(&notable.taxon);
        let observer = &notable.observation.user;
        NotableOutput {
            date: iso_date(notable.day),
            common_name: taxon.preferred_common_name.as_deref(),
            scientific_name: &taxon.name,
            url: notable.observation.url(),
            observer: &observer.login,
            observer_since: observer
                .created_at
                .map(|at| at.format("%Y-%m-%d").to_string()),
            quality_grade: notable.observation.quality_grade.wire_name(),
        }
    }
}

impl NotableSink for JsonLines {
    fn emit(&mut self, notable: &Notable) -> Result<(), DetectError> {
        let output = Self::output(notable);
        let line = if self.pretty {
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string(&output)
        }
        .map_err(|e| DetectError::Output(e.to_string()))?;
        println!("{line}");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use notabilis_core::{Observation, Observer, Taxon};

    fn fixture(common_name: Option<&str>) -> Notable {
        let taxon = Taxon {
            id: 2,
            name: "Setophaga kirtlandii".to_string(),
            preferred_common_name: common_name.map(str::to_string),
            rank: "species".to_string(),
            ancestor_ids: vec![1],
            default_photo: None,
            is_active: true,
            extinct: false,
        };
        let observation: Observation = serde_json::from_str(
            r#"{
                "id": 9001,
                "observed_on": "2024-05-15",
                "quality_grade": "research",
                "user": {"id": 7, "login": "kestrel", "created_at": "2019-03-01T00:00:00Z"}
            }"#,
        )
        .unwrap();
        Notable {
            day: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            taxon,
            observation,
        }
    }

    #[test]
    fn test_text_report_with_common_name() {
        let renderer = ReportRenderer::new(false);
        let text = renderer.format_notable(&fixture(Some("Kirtland's Warbler")));

        assert!(text.contains("Kirtland's Warbler (Setophaga kirtlandii)"));
        assert!(text.contains("[RESEARCH]"));
        assert!(text.contains("https://www.inaturalist.org/observations/9001"));
        assert!(text.contains("Observed 2024-05-15 by kestrel (member since 2019-03-01)"));
    }

    #[test]
    fn test_text_report_without_common_name() {
        let renderer = ReportRenderer::new(false);
        let text = renderer.format_notable(&fixture(None));

        let heading = text.lines().next().unwrap();
        assert!(heading.starts_with("Setophaga kirtlandii"));
        assert!(!heading.contains('('));
    }

    #[test]
    fn test_colored_report_styles_the_grade() {
        let renderer = ReportRenderer::new(true);
        let text = renderer.format_notable(&fixture(Some("Kirtland's Warbler")));
        assert!(text.contains("\x1b[32m[RESEARCH]\x1b[0m"));
    }

    #[test]
    fn test_json_output_shape() {
        let observation = fixture(Some("Kirtland's Warbler"));
        let output = JsonLines::output(&observation);
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&output).unwrap()).unwrap();

        assert_eq!(value["date"], "2024-05-15");
        assert_eq!(value["commonName"], "Kirtland's Warbler");
        assert_eq!(value["scientificName"], "Setophaga kirtlandii");
        assert_eq!(value["observer"], "kestrel");
        assert_eq!(value["observerSince"], "2019-03-01");
        assert_eq!(value["qualityGrade"], "research");
    }
}
