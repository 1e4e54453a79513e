use augsburg_covid_api::utils::{logger, validation::Validate};
use augsburg_covid_api::{ApiResponse, HttpSource, LambdaConfig, ReportEngine};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;
use std::collections::HashMap;

/// API Gateway proxy integration response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl From<ApiResponse> for ProxyResponse {
    fn from(response: ApiResponse) -> Self {
        Self {
            status_code: response.status,
            headers: response
                .headers
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            body: response.body,
            is_base64_encoded: false,
        }
    }
}

// 請求內容不影響結果，GET 沒有參數
async fn function_handler(_event: LambdaEvent<serde_json::Value>) -> Result<ProxyResponse, Error> {
    tracing::info!("Starting report Lambda function");

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let source = HttpSource::from_config(&config)?;
    let engine = ReportEngine::new(source, config);
    let response = engine.respond().await;

    tracing::info!("Report Lambda function finished with status {}", response.status);
    Ok(response.into())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
