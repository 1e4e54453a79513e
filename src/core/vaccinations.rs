use crate::core::dom::{self, require};
use crate::core::rules;
use crate::domain::model::VaccinationRecord;
use crate::utils::error::Result;
use scraper::Html;

pub const VACCINATION_HEADING: &str = "Aktuelle Impfzahlen";

/// Vaccination figures published on the same page as the incidence.
///
/// The city dropped this block at times, so a missing heading yields `None`.
/// Once the heading is there, the paragraphs below it must parse.
pub fn extract(document: &Html) -> Result<Option<VaccinationRecord>> {
    let Some(heading) = dom::heading_exact(document, VACCINATION_HEADING)? else {
        tracing::warn!("No '{}' section on the page, skipping vaccinations", VACCINATION_HEADING);
        return Ok(None);
    };

    let header = require(dom::parent_element(heading), "vaccination heading container")?;
    let content = require(dom::next_element(header), "vaccination content block")?;
    let summary = require(
        dom::find_first(content, "p:first-child")?,
        "vaccination summary paragraph",
    )?;
    let details = require(dom::next_element(summary), "vaccination details paragraph")?;

    let summary_text = dom::element_text(summary);
    let details_text = dom::element_text(details);
    tracing::debug!("Vaccination summary: {}", summary_text);

    let total = rules::parse_vaccination_total(&summary_text)?;
    let last_update = rules::parse_vaccination_last_update(&summary_text);
    let details = rules::parse_vaccination_details(&details_text)?;

    Ok(Some(VaccinationRecord {
        total,
        fully_vaccinated: details.fully_vaccinated,
        percent_fully_vaccinated: details.percent_fully_vaccinated,
        primary_vaccinated: details.primary_vaccinated,
        percent_primary_vaccinated: details.percent_primary_vaccinated,
        last_update,
    }))
}
