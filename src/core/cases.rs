use crate::core::dom::{self, require};
use crate::core::rules::{self, CaseField};
use crate::domain::model::CaseRecord;
use crate::utils::error::Result;
use scraper::Html;

pub const CASES_HEADING_PREFIX: &str = "Fallzahlen";

/// Reads the emphasized case counts below the "Fallzahlen …" heading.
#[derive(Debug, Default, Clone, Copy)]
pub struct CasePipeline;

impl CasePipeline {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, html: &str) -> Result<CaseRecord> {
        let document = Html::parse_document(html);

        let heading = require(
            dom::heading_prefix(&document, CASES_HEADING_PREFIX)?,
            "heading starting with 'Fallzahlen'",
        )?;
        let header = require(dom::parent_element(heading), "case heading container")?;
        let content = require(dom::next_element(header), "case content block")?;

        let strong = dom::selector("p strong")?;
        let mut cases = CaseRecord::default();

        for node in content.select(&strong) {
            let text = dom::element_text(node);
            let Some((label, count)) = rules::parse_case_line(&text) else {
                tracing::debug!("Skipping emphasized text without a count: {:?}", text);
                continue;
            };

            match rules::classify_case_label(&label) {
                Some(CaseField::Total) => cases.total = Some(count),
                Some(CaseField::Recovered) => cases.recovered = Some(count),
                Some(CaseField::Current) => cases.current = Some(count),
                Some(CaseField::Deceased) => cases.deceased = Some(count),
                None => tracing::debug!("Unknown case label {:?}", label),
            }
        }

        Ok(cases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ReportError;

    fn page(strongs: &[&str]) -> String {
        let paragraphs: String = strongs
            .iter()
            .map(|s| format!("<p><strong>{}</strong></p>", s))
            .collect();
        format!(
            r#"<html><body><div class="content">
                 <div class="header"><h2>Fallzahlen in Augsburg</h2></div>
                 <div class="text">{}<p>Quelle: <strong>Gesundheitsamt</strong></p></div>
               </div>
               <div class="footer"><p><strong>aktuell infiziert: 77 Personen</strong></p></div>
               </body></html>"#,
            paragraphs
        )
    }

    #[test]
    fn test_extract_partial_case_record() {
        let html = page(&["Fälle: 1000 seit", "genesen: 900 Patienten", "verstorben: 10 Personen"]);
        let cases = CasePipeline::new().extract(&html).unwrap();

        assert_eq!(
            cases,
            CaseRecord {
                total: Some(1000),
                recovered: Some(900),
                current: None,
                deceased: Some(10),
            }
        );
        let json = serde_json::to_value(&cases).unwrap();
        assert!(json.get("current").is_none());
    }

    #[test]
    fn test_extract_all_fields() {
        let html = page(&[
            "Bestätigte Fälle: 42.317 seit Beginn der Pandemie",
            "davon genesen: 39.880 Personen",
            "aktuell infiziert: 2.001 Personen",
            "verstorben: 436 Personen",
        ]);
        let cases = CasePipeline::new().extract(&html).unwrap();

        assert_eq!(cases.total, Some(42_317));
        assert_eq!(cases.recovered, Some(39_880));
        assert_eq!(cases.current, Some(2_001));
        assert_eq!(cases.deceased, Some(436));
    }

    #[test]
    fn test_missing_heading_is_structure_error() {
        let html = "<html><body><h2>Impfungen</h2><p><strong>Fälle: 1 seit</strong></p></body></html>";
        let err = CasePipeline::new().extract(html).unwrap_err();
        assert!(matches!(err, ReportError::StructureError { .. }));
    }

    #[test]
    fn test_no_matching_nodes_gives_empty_record() {
        let html = page(&["Hinweis", "Stand: heute"]);
        let cases = CasePipeline::new().extract(&html).unwrap();
        assert_eq!(cases, CaseRecord::default());
    }
}
