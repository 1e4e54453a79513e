use crate::core::ConfigProvider;
use crate::domain::model::{CaseRecord, IncidenceRecord, Meta, ResponseEnvelope};
use crate::utils::error::{ReportError, Result};
use serde::Serialize;

pub const DEFAULT_MAX_AGE: u64 = 10_800;

/// Transport-neutral HTTP response, translated by the server and the Lambda handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub fn cache_control(max_age: u64) -> String {
    format!(
        "max-age={0}, s-maxage={0}, stale-while-revalidate",
        max_age
    )
}

pub fn assemble<C: ConfigProvider>(
    config: &C,
    incidence: IncidenceRecord,
    cases: CaseRecord,
) -> ResponseEnvelope {
    ResponseEnvelope {
        meta: Meta {
            data_sources: vec![config.incidence_url().to_string(), config.cases_url().to_string()],
            api_author: config.api_author().to_string(),
            thresholds: config.thresholds(),
        },
        incidence,
        cases,
    }
}

/// Pretty-print (two-space indent) and attach the cache policy.
pub fn render(envelope: &ResponseEnvelope, max_age: u64) -> Result<ApiResponse> {
    Ok(ApiResponse {
        status: 200,
        headers: vec![
            ("cache-control", cache_control(max_age)),
            ("content-type", "application/json".to_string()),
        ],
        body: serde_json::to_string_pretty(envelope)?,
    })
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    kind: &'a str,
}

pub fn render_error(error: &ReportError) -> ApiResponse {
    let body = ErrorBody {
        error: error.user_friendly_message(),
        kind: error.category().as_str(),
    };
    // plain strings only; serialization does not fail in practice
    let body = serde_json::to_string_pretty(&body)
        .unwrap_or_else(|_| format!("{{\"error\": {:?}}}", error.to_string()));

    ApiResponse {
        status: error.status_code(),
        headers: vec![
            ("cache-control", "no-store".to_string()),
            ("content-type", "application/json".to_string()),
        ],
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::model::ImageRef;

    fn incidence() -> IncidenceRecord {
        IncidenceRecord {
            incidence: 45.2,
            definition: Some("7-Tage-Inzidenz".to_string()),
            last_update: Some("12.03.2022".to_string()),
            over_signal_threshold: true,
            over_threshold: false,
            over_darkred_threshold: false,
            vaccinations: None,
            image: ImageRef {
                src: "https://www.augsburg.de/fileadmin/inzidenz.png".to_string(),
                width: Some("600".to_string()),
                height: None,
            },
        }
    }

    #[test]
    fn test_envelope_field_order_and_names() {
        let config = AppConfig::default();
        let cases = CaseRecord {
            total: Some(1000),
            ..Default::default()
        };
        let envelope = assemble(&config, incidence(), cases);
        let response = render(&envelope, DEFAULT_MAX_AGE).unwrap();

        let expected = r#"{
  "meta": {
    "dataSources": [
      "https://www.augsburg.de/umwelt-soziales/gesundheit/coronavirus",
      "https://www.augsburg.de/umwelt-soziales/gesundheit/coronavirus/fallzahlen"
    ],
    "apiAuthor": "@pichfl",
    "thresholds": {
      "signal": 35,
      "threshold": 50,
      "darkred": 100
    }
  },
  "incidence": 45.2,
  "definition": "7-Tage-Inzidenz",
  "lastUpdate": "12.03.2022",
  "overSignalThreshold": true,
  "overThreshold": false,
  "overDarkredThreshold": false,
  "image": {
    "src": "https://www.augsburg.de/fileadmin/inzidenz.png",
    "width": "600"
  },
  "cases": {
    "total": 1000
  }
}"#;
        assert_eq!(response.body, expected);
        assert_eq!(response.status, 200);
    }

    #[test]
    fn test_cache_headers() {
        let envelope = assemble(&AppConfig::default(), incidence(), CaseRecord::default());
        let response = render(&envelope, DEFAULT_MAX_AGE).unwrap();

        assert_eq!(
            response.header("Cache-Control"),
            Some("max-age=10800, s-maxage=10800, stale-while-revalidate")
        );
        assert_eq!(response.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_error_response() {
        let response = render_error(&ReportError::structure("heading 'Fallzahlen'"));
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(response.header("cache-control"), Some("no-store"));
        assert_eq!(body["kind"], "structure");
        assert!(body["error"].as_str().unwrap().contains("Fallzahlen"));
    }
}
