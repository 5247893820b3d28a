use crate::ai::{DEFAULT_API_BASE, DEFAULT_MODEL, GenerationParams, OpenAiBackend};
use crate::manager::ConversationManager;
use crate::rentals::{FileRentalsSource, HttpRentalsSource, RentalsSource};
use anyhow::Result;
use std::env;
use std::path::PathBuf;

const DEFAULT_RENTALS_SOURCE: &str = "rentals.json";

#[derive(Clone, Debug, PartialEq)]
pub enum RentalsLocation {
    Url(String),
    File(PathBuf),
}

impl RentalsLocation {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }

    pub fn into_source(self) -> Box<dyn RentalsSource> {
        match self {
            Self::Url(url) => Box::new(HttpRentalsSource::new(url)),
            Self::File(path) => Box::new(FileRentalsSource::new(path)),
        }
    }
}

/// Runtime settings, read from the process environment.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub rentals: RentalsLocation,
}

impl Config {
    /// Reads `OPENAI_API_KEY`, `OPENAI_API_BASE`, `OPENAI_MODEL` and `RENTALS_SOURCE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_base = non_empty("OPENAI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "OPENAI_API_BASE must be an http(s) URL, got '{api_base}'"
            ));
        }

        Ok(Self {
            api_key: non_empty("OPENAI_API_KEY"),
            api_base,
            model: non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            rentals: RentalsLocation::parse(
                &non_empty("RENTALS_SOURCE").unwrap_or_else(|| DEFAULT_RENTALS_SOURCE.to_string()),
            ),
        })
    }

    pub fn build_manager(&self) -> ConversationManager<Box<dyn RentalsSource>, OpenAiBackend> {
        if self.api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set, completion requests go out unauthenticated");
        }
        ConversationManager::with_params(
            self.rentals.clone().into_source(),
            OpenAiBackend::new(&self.api_base, self.api_key.clone()),
            GenerationParams::with_model(self.model.clone()),
        )
    }
}
