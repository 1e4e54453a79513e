use serde::{Deserialize, Serialize};

/// Escalating incidence alert levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub signal: u32,
    pub threshold: u32,
    pub darkred: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            signal: 35,
            threshold: 50,
            darkred: 100,
        }
    }
}

impl Thresholds {
    pub fn over_signal(&self, incidence: f64) -> bool {
        incidence > f64::from(self.signal)
    }

    pub fn over_threshold(&self, incidence: f64) -> bool {
        incidence > f64::from(self.threshold)
    }

    pub fn over_darkred(&self, incidence: f64) -> bool {
        incidence > f64::from(self.darkred)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRecord {
    pub total: u64,
    pub fully_vaccinated: u64,
    pub percent_fully_vaccinated: f64,
    pub primary_vaccinated: u64,
    pub percent_primary_vaccinated: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidenceRecord {
    pub incidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    pub over_signal_threshold: bool,
    pub over_threshold: bool,
    pub over_darkred_threshold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccinations: Option<VaccinationRecord>,
    pub image: ImageRef,
}

/// Case counts; a field stays `None` when its label was not on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovered: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deceased: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub data_sources: Vec<String>,
    pub api_author: String,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub meta: Meta,
    #[serde(flatten)]
    pub incidence: IncidenceRecord,
    pub cases: CaseRecord,
}
