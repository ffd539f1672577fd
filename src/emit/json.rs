//! JSON serialization of a resolved statement

use crate::play::resolver::ToneEvent;
use crate::play::Conversion;
use serde::Serialize;

/// Top-level JSON structure
#[derive(Debug, Clone, Serialize)]
pub struct ToneJson {
    /// Seconds
    pub total_duration: f64,
    /// Notes and pauses in the statement
    pub note_count: usize,
    /// Syntax diagnostics and range warnings, as printed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
    pub events: Vec<ToneEvent>,
}

impl ToneJson {
    pub fn new(conversion: &Conversion) -> Self {
        let issues = conversion
            .statement
            .diagnostics
            .iter()
            .map(|d| d.to_string())
            .chain(conversion.resolution.warnings.iter().map(|w| w.to_string()))
            .collect();

        Self {
            total_duration: conversion.resolution.total_duration,
            note_count: conversion.statement.note_count,
            issues,
            events: conversion.resolution.events.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::Converter;

    #[test]
    fn test_json_fields() {
        let conversion = Converter::default().convert("ML O3 a P8");
        let value = serde_json::to_value(ToneJson::new(&conversion)).unwrap();
        assert_eq!(value["note_count"], 2);
        assert_eq!(value["events"][0]["frequency"], 440.0);
        assert_eq!(value["events"][1]["frequency"], 0.0);
        assert!(value.get("issues").is_none());
    }

    #[test]
    fn test_json_lists_issues() {
        let conversion = Converter::default().convert("T999 c!");
        let json = ToneJson::new(&conversion);
        assert_eq!(json.issues.len(), 2);
        assert!(json.issues[0].starts_with("Syntax Error: Symbol not expected:"));
        assert!(json.issues[1].contains("maximum is 255"));
    }
}
