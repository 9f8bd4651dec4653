//! Place reference data.

use serde::{Deserialize, Serialize};

/// A geographic region known to the upstream API.
///
/// Immutable reference data, supplied by the caller or resolved via
/// autocomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Unique place id.
    pub id: u64,
    /// Short name (e.g. "New York").
    pub name: String,
    /// Qualified display name (e.g. "New York County, NY, USA").
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Place {
    /// Returns the qualified display name, falling back to the short name.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_name() {
        let place: Place = serde_json::from_str(r#"{"id": 674, "name": "New York"}"#).unwrap();
        assert_eq!(place.label(), "New York");

        let place: Place = serde_json::from_str(
            r#"{"id": 674, "name": "New York", "display_name": "New York, US"}"#,
        )
        .unwrap();
        assert_eq!(place.label(), "New York, US");
    }
}
