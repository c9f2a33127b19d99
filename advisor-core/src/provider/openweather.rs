use serde::Deserialize;

use crate::model::{ConditionGroup, Observation};

use super::{ProviderPayload, unix_to_utc};

/// OpenWeather `data/2.5/weather` response, metric units.
///
/// The UV index comes from a separate endpoint and is not part of this
/// document; callers fill `Observation::uv_index` themselves.
#[derive(Debug, Deserialize)]
pub struct OwCurrentResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dt: Option<i64>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: Option<OwWind>,
    #[serde(default)]
    clouds: Option<OwClouds>,
    #[serde(default)]
    visibility: Option<f64>,
    #[serde(default)]
    rain: Option<OwVolume>,
    #[serde(default)]
    snow: Option<OwVolume>,
    #[serde(default)]
    sys: Option<OwSys>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: Option<u16>,
    #[serde(default)]
    main: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwVolume {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

impl OwCurrentResponse {
    fn condition_group(&self) -> Option<ConditionGroup> {
        let first = self.weather.first()?;
        match (first.id, &first.main) {
            (Some(id), _) => Some(ConditionGroup::from_openweather_id(id)),
            (None, Some(main)) => Some(ConditionGroup::from(main.clone())),
            (None, None) => None,
        }
    }

    /// Rain plus snow over the last hour, `None` when neither is reported.
    fn precip_volume_mm(&self) -> Option<f64> {
        let rain = self.rain.as_ref().and_then(|v| v.one_hour);
        let snow = self.snow.as_ref().and_then(|v| v.one_hour);

        match (rain, snow) {
            (None, None) => None,
            (rain, snow) => Some(rain.unwrap_or(0.0) + snow.unwrap_or(0.0)),
        }
    }

    fn location(&self) -> Option<String> {
        let country = self.sys.as_ref().and_then(|s| s.country.as_deref());
        match (self.name.as_deref(), country) {
            (Some(name), Some(country)) => Some(format!("{name}, {country}")),
            (Some(name), None) => Some(name.to_string()),
            (None, _) => None,
        }
    }
}

impl ProviderPayload for OwCurrentResponse {
    fn into_observation(self) -> Observation {
        Observation {
            location: self.location(),
            condition_group: self.condition_group(),
            precip_volume_mm: self.precip_volume_mm(),
            temp: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            visibility: self.visibility,
            wind_speed: self.wind.as_ref().and_then(|w| w.speed),
            clouds: self.clouds.as_ref().and_then(|c| c.all),
            uv_index: None,
            sunrise: self.sys.as_ref().and_then(|s| s.sunrise).and_then(unix_to_utc),
            sunset: self.sys.as_ref().and_then(|s| s.sunset).and_then(unix_to_utc),
            observed_at: self.dt.and_then(unix_to_utc),
        }
    }
}
