use dioxus::prelude::*;
use serde::Deserialize;

const DEFAULT_FORMS_ENDPOINT: &str = "https://api.web3forms.com/submit";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateLayout {
    #[default]
    Carousel,
    Gallery,
}

impl CertificateLayout {
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "gallery" | "grid" => CertificateLayout::Gallery,
            _ => CertificateLayout::Carousel,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub forms_endpoint: String,
    pub forms_access_key: String,
    pub certificate_layout: CertificateLayout,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            forms_endpoint: DEFAULT_FORMS_ENDPOINT.to_string(),
            forms_access_key: String::new(),
            certificate_layout: CertificateLayout::default(),
        }
    }
}

pub fn use_runtime_config() -> Resource<Result<RuntimeConfig, String>> {
    use_resource(|| async move { fetch_runtime_config().await })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    match fetch_config_from("/config.json").await {
        Ok(config) => Ok(config),
        Err(_) => fetch_config_from("/assets/config.json").await,
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<RuntimeConfig, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("config fetch failed: status {}", response.status()));
    }
    response
        .json::<RuntimeConfig>()
        .await
        .map_err(|err| format!("config decode failed: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    let forms_endpoint =
        std::env::var("FORMS_ENDPOINT").unwrap_or_else(|_| DEFAULT_FORMS_ENDPOINT.to_string());
    let forms_access_key = std::env::var("FORMS_ACCESS_KEY").unwrap_or_default();
    let certificate_layout = std::env::var("CERTIFICATE_LAYOUT")
        .map(|value| CertificateLayout::parse(&value))
        .unwrap_or_default();
    Ok(RuntimeConfig {
        forms_endpoint,
        forms_access_key,
        certificate_layout,
    })
}
