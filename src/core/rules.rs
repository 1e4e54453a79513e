//! Text rules applied to the prose of the health-authority pages.
//!
//! Every rule works on plain text and knows nothing about the DOM, so the
//! German wording can be tested against literal sentences. The DOM side
//! (`core::dom`) only decides *which* text a rule gets to see.

use crate::utils::error::{ReportError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Marker that separates the incidence sentence from its publication date.
pub const LAST_UPDATE_MARKER: &str = "Stand: ";

static INCIDENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s(\d+,\d)\s").expect("incidence pattern"));

static DEFINITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").expect("definition pattern"));

// Rust regex has no lookahead, so the trailing whitespace is consumed instead.
static CASE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.*:\s)(\d+(?:\.\d{3})*)\s").expect("case line pattern"));

static DOSES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d[\d.]*)(.*Impfdosen)").expect("doses pattern"));

static VACCINATION_STAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(Stand ([^)]*)\)").expect("vaccination stand pattern"));

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d.]*(?:,\d+)?").expect("number pattern"));

/// Collapse whitespace runs (including non-breaking spaces) into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split the incidence paragraph into its body and the date after `Stand: `.
///
/// The date is cut at the first comma, so `12.03.2022, 10 Uhr` becomes
/// `12.03.2022`.
pub fn split_last_update(text: &str) -> (&str, Option<String>) {
    match text.split_once(LAST_UPDATE_MARKER) {
        Some((body, rest)) => {
            let date = rest.split(',').next().unwrap_or_default().trim();
            let date = (!date.is_empty()).then(|| date.to_string());
            (body, date)
        }
        None => (text, None),
    }
}

pub fn parse_incidence(body: &str) -> Result<f64> {
    let caps = INCIDENCE_RE
        .captures(body)
        .ok_or_else(|| ReportError::parse("incidence", body))?;

    parse_german_decimal(&caps[1]).ok_or_else(|| ReportError::parse("incidence", &caps[1]))
}

/// Text between the first parenthesis pair.
pub fn parse_definition(body: &str) -> Option<String> {
    DEFINITION_RE
        .captures(body)
        .map(|caps| caps[1].trim().to_string())
        .filter(|definition| !definition.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseField {
    Total,
    Recovered,
    Current,
    Deceased,
}

/// Split an emphasized line such as `Fälle: 1000 seit Beginn` into label and count.
pub fn parse_case_line(text: &str) -> Option<(String, u64)> {
    let caps = CASE_LINE_RE.captures(text)?;
    let count = parse_german_integer(&caps[2])?;
    Some((caps[1].to_string(), count))
}

/// First matching keyword wins.
pub fn classify_case_label(label: &str) -> Option<CaseField> {
    const KEYWORDS: [(&str, CaseField); 4] = [
        ("Fälle", CaseField::Total),
        ("genesen", CaseField::Recovered),
        ("aktuell", CaseField::Current),
        ("verstorben", CaseField::Deceased),
    ];

    KEYWORDS
        .iter()
        .find(|(keyword, _)| label.contains(keyword))
        .map(|(_, field)| *field)
}

pub fn parse_vaccination_total(text: &str) -> Result<u64> {
    let caps = DOSES_RE
        .captures(text)
        .ok_or_else(|| ReportError::parse("vaccinations.total", text))?;

    parse_german_integer(&caps[1]).ok_or_else(|| ReportError::parse("vaccinations.total", &caps[1]))
}

pub fn parse_vaccination_last_update(text: &str) -> Option<String> {
    VACCINATION_STAND_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct VaccinationDetails {
    pub fully_vaccinated: u64,
    pub percent_fully_vaccinated: f64,
    pub primary_vaccinated: u64,
    pub percent_primary_vaccinated: f64,
}

/// Read the first four numbers of the details paragraph:
/// fully vaccinated, their share, at least once vaccinated, their share.
pub fn parse_vaccination_details(text: &str) -> Result<VaccinationDetails> {
    let numbers: Vec<&str> = NUMBER_RE.find_iter(text).map(|m| m.as_str()).collect();
    if numbers.len() < 4 {
        return Err(ReportError::parse("vaccinations.details", text));
    }

    let count = |field: &str, raw: &str| {
        parse_german_integer(raw).ok_or_else(|| ReportError::parse(field, raw))
    };
    let percent = |field: &str, raw: &str| {
        parse_german_decimal(raw).ok_or_else(|| ReportError::parse(field, raw))
    };

    Ok(VaccinationDetails {
        fully_vaccinated: count("vaccinations.fullyVaccinated", numbers[0])?,
        percent_fully_vaccinated: percent("vaccinations.percentFullyVaccinated", numbers[1])?,
        primary_vaccinated: count("vaccinations.primaryVaccinated", numbers[2])?,
        percent_primary_vaccinated: percent("vaccinations.percentPrimaryVaccinated", numbers[3])?,
    })
}

/// `512.345` -> 512345
pub fn parse_german_integer(raw: &str) -> Option<u64> {
    raw.replace('.', "").parse().ok()
}

/// `67,4` -> 67.4; dots are thousands separators.
pub fn parse_german_decimal(raw: &str) -> Option<f64> {
    raw.replace('.', "").replace(',', ".").parse().ok()
}
