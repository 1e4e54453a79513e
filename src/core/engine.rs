use crate::core::assembler::{self, ApiResponse};
use crate::core::cases::CasePipeline;
use crate::core::incidence::IncidencePipeline;
use crate::core::{ConfigProvider, PageSource};
use crate::domain::model::{CaseRecord, IncidenceRecord, ResponseEnvelope};
use crate::utils::error::Result;

/// Fetches both pages, runs the pipelines and assembles the response.
pub struct ReportEngine<S: PageSource, C: ConfigProvider> {
    source: S,
    config: C,
}

impl<S: PageSource, C: ConfigProvider> ReportEngine<S, C> {
    pub fn new(source: S, config: C) -> Self {
        Self { source, config }
    }

    pub async fn run(&self) -> Result<ResponseEnvelope> {
        tracing::info!("Loading incidence and case numbers...");

        // 兩個頁面互不相依，同時抓取
        let (incidence, cases) = tokio::try_join!(self.load_incidence(), self.load_cases())?;

        tracing::info!(
            "Incidence {} ({} case fields)",
            incidence.incidence,
            [cases.total, cases.recovered, cases.current, cases.deceased]
                .iter()
                .filter(|field| field.is_some())
                .count()
        );

        Ok(assembler::assemble(&self.config, incidence, cases))
    }

    /// Run and render; failures become explicit error responses.
    pub async fn respond(&self) -> ApiResponse {
        let rendered = self
            .run()
            .await
            .and_then(|envelope| assembler::render(&envelope, self.config.cache_max_age()));

        match rendered {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                assembler::render_error(&e)
            }
        }
    }

    async fn load_incidence(&self) -> Result<IncidenceRecord> {
        let url = self.config.incidence_url();
        let html = self.source.fetch_page(url).await?;
        tracing::debug!("Fetched {} ({} bytes)", url, html.len());

        IncidencePipeline::new(url, self.config.thresholds())?.extract(&html)
    }

    async fn load_cases(&self) -> Result<CaseRecord> {
        let url = self.config.cases_url();
        let html = self.source.fetch_page(url).await?;
        tracing::debug!("Fetched {} ({} bytes)", url, html.len());

        CasePipeline::new().extract(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::utils::error::ReportError;
    use std::collections::HashMap;

    struct StaticSource {
        pages: HashMap<String, String>,
    }

    impl StaticSource {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait::async_trait]
    impl PageSource for StaticSource {
        async fn fetch_page(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| ReportError::UpstreamStatusError {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    const INCIDENCE_PAGE: &str = r#"
        <div class="row">
          <div class="col"><div class="content">
            <div class="header"><h2>Entwicklung in Augsburg</h2></div>
            <div class="text"><p>Wert von 104,7 pro 100.000 Einwohnern (7-Tage-Inzidenz) Stand: 02.11.2021, 8 Uhr</p></div>
          </div></div>
          <div class="col"><img src="/chart.png" width="300" height="200"></div>
        </div>"#;

    const CASES_PAGE: &str = r#"
        <div><h2>Fallzahlen seit März 2020</h2></div>
        <div><p><strong>Fälle: 25000 insgesamt</strong></p><p><strong>aktuell: 1200 Personen</strong></p></div>"#;

    fn engine(pages: &[(&str, &str)]) -> ReportEngine<StaticSource, AppConfig> {
        ReportEngine::new(StaticSource::new(pages), AppConfig::default())
    }

    #[test]
    fn test_run_assembles_both_pages() {
        let config = AppConfig::default();
        let engine = engine(&[
            (config.incidence_url(), INCIDENCE_PAGE),
            (config.cases_url(), CASES_PAGE),
        ]);

        let envelope = tokio_test::block_on(engine.run()).unwrap();

        assert_eq!(envelope.incidence.incidence, 104.7);
        assert!(envelope.incidence.over_darkred_threshold);
        assert_eq!(envelope.incidence.image.src, "https://www.augsburg.de/chart.png");
        assert_eq!(envelope.cases.total, Some(25_000));
        assert_eq!(envelope.cases.current, Some(1_200));
        assert_eq!(envelope.meta.data_sources.len(), 2);
    }

    #[test]
    fn test_respond_maps_missing_page_to_bad_gateway() {
        let config = AppConfig::default();
        let engine = engine(&[(config.incidence_url(), INCIDENCE_PAGE)]);

        let response = tokio_test::block_on(engine.respond());

        assert_eq!(response.status, 502);
        assert_eq!(response.header("cache-control"), Some("no-store"));
    }

    #[test]
    fn test_respond_maps_layout_change_to_server_error() {
        let config = AppConfig::default();
        let engine = engine(&[
            (config.incidence_url(), "<h2>Neue Seite</h2>"),
            (config.cases_url(), CASES_PAGE),
        ]);

        let response = tokio_test::block_on(engine.respond());

        assert_eq!(response.status, 500);
        assert!(response.body.contains("\"kind\": \"structure\""));
    }
}
