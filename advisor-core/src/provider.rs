//! Mapping of provider payloads into an [`Observation`].
//!
//! Fetching happens elsewhere; these adapters only translate the JSON
//! documents a provider returns for "current weather".

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::{
    fmt::{self, Debug},
    str::FromStr,
};

use crate::{
    error::{AdvisorError, Result},
    model::Observation,
};

pub mod openweather;
pub mod weatherapi;

pub use openweather::OwCurrentResponse;
pub use weatherapi::WaCurrentResponse;

/// Payload formats the adapters understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    WeatherApi,
}

impl ProviderId {
    /// Canonical name, as accepted by `--provider`.
    pub fn name(self) -> &'static str {
        match self {
            Self::OpenWeather => "openweather",
            Self::WeatherApi => "weatherapi",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::OpenWeather => &["openweather", "openweathermap", "owm"],
            Self::WeatherApi => &["weatherapi", "weatherapi.com"],
        }
    }

    pub const ALL: [ProviderId; 2] = [Self::OpenWeather, Self::WeatherApi];
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderId {
    type Err = AdvisorError;

    fn from_str(value: &str) -> Result<Self> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| {
                let known = Self::ALL.map(Self::name).join(", ");
                AdvisorError::config(format!("unknown provider '{value}', expected one of: {known}"))
            })
    }
}

/// A provider's "current weather" document.
pub trait ProviderPayload: DeserializeOwned + Debug {
    fn into_observation(self) -> Observation;
}

/// Parse a payload of the given provider and map it.
pub fn observation_from_json(id: ProviderId, json: &str) -> Result<Observation> {
    match id {
        ProviderId::OpenWeather => parse::<OwCurrentResponse>(json),
        ProviderId::WeatherApi => parse::<WaCurrentResponse>(json),
    }
}

fn parse<P: ProviderPayload>(json: &str) -> Result<Observation> {
    let payload: P = serde_json::from_str(json)?;
    Ok(payload.into_observation())
}

pub(crate) fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}
