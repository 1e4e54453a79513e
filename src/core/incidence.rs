use crate::core::dom::{self, require};
use crate::core::{rules, vaccinations};
use crate::domain::model::{ImageRef, IncidenceRecord, Thresholds};
use crate::utils::error::{ReportError, Result};
use scraper::{ElementRef, Html};
use url::Url;

pub const INCIDENCE_HEADING: &str = "Entwicklung in Augsburg";

/// Reads the incidence block of the coronavirus overview page.
pub struct IncidencePipeline {
    page_url: Url,
    thresholds: Thresholds,
}

impl IncidencePipeline {
    pub fn new(page_url: &str, thresholds: Thresholds) -> Result<Self> {
        Ok(Self {
            page_url: Url::parse(page_url)?,
            thresholds,
        })
    }

    pub fn extract(&self, html: &str) -> Result<IncidenceRecord> {
        let document = Html::parse_document(html);

        let heading = require(
            dom::heading_exact(&document, INCIDENCE_HEADING)?,
            "heading 'Entwicklung in Augsburg'",
        )?;
        let header = require(dom::parent_element(heading), "incidence heading container")?;
        let content = require(dom::next_element(header), "incidence content block")?;
        let paragraph = require(
            dom::find_first(content, "p:first-child")?,
            "incidence paragraph",
        )?;

        let text = dom::element_text(paragraph);
        tracing::debug!("Incidence paragraph: {}", text);

        let (body, last_update) = rules::split_last_update(&text);
        let incidence = rules::parse_incidence(body)?;
        let definition = rules::parse_definition(body);
        if last_update.is_none() {
            tracing::warn!("Incidence paragraph carries no publication date");
        }

        let image = self.extract_image(header)?;
        let vaccinations = vaccinations::extract(&document)?;

        Ok(IncidenceRecord {
            incidence,
            definition,
            last_update,
            over_signal_threshold: self.thresholds.over_signal(incidence),
            over_threshold: self.thresholds.over_threshold(incidence),
            over_darkred_threshold: self.thresholds.over_darkred(incidence),
            vaccinations,
            image,
        })
    }

    // The chart sits in the column next to the one holding the heading.
    fn extract_image(&self, header: ElementRef<'_>) -> Result<ImageRef> {
        let column = dom::parent_element(header)
            .and_then(dom::parent_element)
            .and_then(dom::next_element);
        let column = require(column, "incidence image column")?;
        let img = require(dom::find_first(column, "img")?, "incidence image")?;

        let src = require_attr(img, "src")?;
        let src = self.page_url.join(src)?;

        Ok(ImageRef {
            src: src.to_string(),
            width: img.value().attr("width").map(str::to_string),
            height: img.value().attr("height").map(str::to_string),
        })
    }
}

fn require_attr<'a>(element: ElementRef<'a>, name: &str) -> Result<&'a str> {
    element
        .value()
        .attr(name)
        .ok_or_else(|| ReportError::structure(format!("image attribute '{}'", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://www.augsburg.de/umwelt-soziales/gesundheit/coronavirus";

    fn page(sentence: &str) -> String {
        format!(
            r#"<html><body>
            <div class="row">
              <div class="col">
                <div class="content">
                  <div class="header"><h2>Entwicklung in Augsburg</h2></div>
                  <div class="text"><p>{}</p><p>Weitere Informationen folgen.</p></div>
                </div>
              </div>
              <div class="col">
                <figure><img src="/fileadmin/corona/inzidenz.png" width="600" height="400" alt="Verlauf"></figure>
              </div>
            </div>
            </body></html>"#,
            sentence
        )
    }

    fn pipeline() -> IncidencePipeline {
        IncidencePipeline::new(PAGE_URL, Thresholds::default()).unwrap()
    }

    #[test]
    fn test_extract_incidence_block() {
        let html = page(
            "Die 7-Tage-Inzidenz liegt bei einem Wert von 45,2 pro 100.000 Einwohnern \
             (7-Tage-Inzidenz) Stand: 12.03.2022, 10 Uhr",
        );
        let record = pipeline().extract(&html).unwrap();

        assert_eq!(record.incidence, 45.2);
        assert_eq!(record.definition.as_deref(), Some("7-Tage-Inzidenz"));
        assert_eq!(record.last_update.as_deref(), Some("12.03.2022"));
        assert!(record.over_signal_threshold);
        assert!(!record.over_threshold);
        assert!(!record.over_darkred_threshold);
        assert!(record.vaccinations.is_none());
        assert_eq!(
            record.image,
            ImageRef {
                src: "https://www.augsburg.de/fileadmin/corona/inzidenz.png".to_string(),
                width: Some("600".to_string()),
                height: Some("400".to_string()),
            }
        );
    }

    #[test]
    fn test_threshold_boundaries_are_strict() {
        for (value, signal, threshold, darkred) in [
            ("35,0", false, false, false),
            ("35,1", true, false, false),
            ("50,0", true, false, false),
            ("100,0", true, true, false),
            ("100,1", true, true, true),
        ] {
            let html = page(&format!("Wert von {} pro 100.000 Einwohnern Stand: 01.02.2022", value));
            let record = pipeline().extract(&html).unwrap();

            assert_eq!(record.over_signal_threshold, signal, "signal for {}", value);
            assert_eq!(record.over_threshold, threshold, "threshold for {}", value);
            assert_eq!(record.over_darkred_threshold, darkred, "darkred for {}", value);
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = page("Wert von 112,3 pro 100.000 Einwohnern (7-Tage-Inzidenz) Stand: 12.03.2022, 10 Uhr");
        let first = serde_json::to_string(&pipeline().extract(&html).unwrap()).unwrap();
        let second = serde_json::to_string(&pipeline().extract(&html).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_heading_is_structure_error() {
        let html = page("Wert von 45,2 pro 100.000 Einwohnern").replace("Entwicklung in Augsburg", "Entwicklung");
        let err = pipeline().extract(&html).unwrap_err();
        assert!(matches!(err, ReportError::StructureError { .. }));
    }

    #[test]
    fn test_missing_value_is_parse_error() {
        let html = page("Aktuell liegen keine Zahlen vor. Stand: 12.03.2022");
        let err = pipeline().extract(&html).unwrap_err();
        assert!(matches!(err, ReportError::ParseError { .. }));
    }

    #[test]
    fn test_missing_image_is_structure_error() {
        let html = page("Wert von 45,2 pro 100.000 Einwohnern").replace("<img", "<span");
        let err = pipeline().extract(&html).unwrap_err();
        assert!(matches!(err, ReportError::StructureError { ref element } if element == "incidence image"));
    }

    #[test]
    fn test_absolute_image_src_is_kept() {
        let html = page("Wert von 45,2 pro 100.000 Einwohnern")
            .replace("/fileadmin/corona/inzidenz.png", "https://cdn.example.org/chart.png");
        let record = pipeline().extract(&html).unwrap();
        assert_eq!(record.image.src, "https://cdn.example.org/chart.png");
    }
}
