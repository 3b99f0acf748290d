use serde::Deserialize;
use thiserror::Error;

pub const ASSET_PREFIX: &str = "certificates/";

const BUNDLED_CATALOG: &str = include_str!("../assets/certificates.json");

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Certificate {
    pub title: String,
    pub issuer: String,
    #[serde(rename = "imageKey")]
    pub image_key: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Malformed(String),
    #[error("catalog has no certificates")]
    Empty,
    #[error("certificate {index} has an empty {field}")]
    MissingField { index: usize, field: &'static str },
    #[error("certificate {index} image {key:?} is outside {prefix:?}")]
    OutsidePrefix {
        index: usize,
        key: String,
        prefix: &'static str,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CertificateCatalog {
    entries: Vec<Certificate>,
}

impl CertificateCatalog {
    pub fn parse(json: &str, prefix: &'static str) -> Result<Self, CatalogError> {
        let entries: Vec<Certificate> =
            serde_json::from_str(json).map_err(|err| CatalogError::Malformed(err.to_string()))?;
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, entry) in entries.iter().enumerate() {
            for (field, value) in [
                ("title", &entry.title),
                ("issuer", &entry.issuer),
                ("imageKey", &entry.image_key),
            ] {
                if value.trim().is_empty() {
                    return Err(CatalogError::MissingField { index, field });
                }
            }
            if !entry.image_key.starts_with(prefix) || entry.image_key.len() == prefix.len() {
                return Err(CatalogError::OutsidePrefix {
                    index,
                    key: entry.image_key.clone(),
                    prefix,
                });
            }
        }
        Ok(Self { entries })
    }

    // A broken bundle yields an empty catalog.
    pub fn bundled() -> Self {
        match Self::parse(BUNDLED_CATALOG, ASSET_PREFIX) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!("certificates: {err}");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Certificate> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Certificate> {
        self.entries.iter()
    }
}
