//! ビルド時設定
//!
//! `RESUME_SCORE_ENDPOINT` / `RESUME_SCORE_SCHEMA` / `RESUME_SCORE_THRESHOLDS`
//! をビルド時に埋め込む。
//! 未設定・不正な値なら既定値を使う。

use resume_score_common::{Endpoint, ResponseSchema, ScoreThresholds};

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub endpoint: Endpoint,
    pub schema: ResponseSchema,
    pub thresholds: ScoreThresholds,
}

impl AppSettings {
    pub fn from_build_env() -> Self {
        let (settings, warnings) = Self::from_values(
            option_env!("RESUME_SCORE_ENDPOINT"),
            option_env!("RESUME_SCORE_SCHEMA"),
            option_env!("RESUME_SCORE_THRESHOLDS"),
        );
        for warning in warnings {
            gloo::console::warn!(warning);
        }
        settings
    }

    /// 値と警告メッセージを返す
    pub fn from_values(
        endpoint: Option<&str>,
        schema: Option<&str>,
        thresholds: Option<&str>,
    ) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let endpoint = match endpoint.filter(|v| !v.trim().is_empty()) {
            Some(raw) => Endpoint::parse(raw).unwrap_or_else(|e| {
                warnings.push(format!("{e}; falling back to the default endpoint"));
                Endpoint::default()
            }),
            None => Endpoint::default(),
        };

        let schema = match schema.filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.parse::<ResponseSchema>().unwrap_or_else(|e| {
                warnings.push(format!("{e}; falling back to auto"));
                ResponseSchema::Auto
            }),
            None => ResponseSchema::Auto,
        };

        // "default"（85/60）または "strict"（90/60）
        let thresholds = match thresholds.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("default") => ScoreThresholds::default(),
            Some("strict") => ScoreThresholds::strict(),
            Some(other) => {
                warnings.push(format!("unknown score thresholds: {other}; falling back to default"));
                ScoreThresholds::default()
            }
        };

        let settings = Self {
            endpoint,
            schema,
            thresholds,
        };
        (settings, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_score_common::DEFAULT_ENDPOINT;

    #[test]
    fn test_defaults_when_unset() {
        let (settings, warnings) = AppSettings::from_values(None, None, None);
        assert_eq!(settings.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(settings.schema, ResponseSchema::Auto);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_build_values_are_used() {
        let (settings, warnings) = AppSettings::from_values(
            Some("http://localhost:8000/analyze-resume/"),
            Some("matched-field"),
            Some("strict"),
        );
        assert_eq!(settings.endpoint.as_str(), "http://localhost:8000/analyze-resume/");
        assert_eq!(settings.schema, ResponseSchema::MatchedField);
        assert_eq!(settings.thresholds, ScoreThresholds::strict());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_invalid_values_fall_back_with_warning() {
        let (settings, warnings) = AppSettings::from_values(Some("localhost"), Some("yaml"), Some("lenient"));
        assert_eq!(settings.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(settings.schema, ResponseSchema::Auto);
        assert_eq!(settings.thresholds, ScoreThresholds::default());
        assert_eq!(warnings.len(), 3);
    }
}
