//! Input side of the advisors: the raw [`Observation`] a provider mapping
//! produces, and the validated [`WeatherSnapshot`] every advisor consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

use crate::error::{AdvisorError, Result};

/// Magnus coefficients for saturation vapour pressure over water.
const MAGNUS_A: f64 = 17.62;
const MAGNUS_B: f64 = 243.12;

/// Primary weather state reported for the observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ConditionGroup {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    #[serde(rename = "Mist/Fog")]
    Mist,
    Other,
}

impl ConditionGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionGroup::Clear => "Clear",
            ConditionGroup::Clouds => "Clouds",
            ConditionGroup::Rain => "Rain",
            ConditionGroup::Drizzle => "Drizzle",
            ConditionGroup::Thunderstorm => "Thunderstorm",
            ConditionGroup::Snow => "Snow",
            ConditionGroup::Mist => "Mist/Fog",
            ConditionGroup::Other => "Other",
        }
    }

    pub const fn all() -> &'static [ConditionGroup] {
        &[
            ConditionGroup::Clear,
            ConditionGroup::Clouds,
            ConditionGroup::Rain,
            ConditionGroup::Drizzle,
            ConditionGroup::Thunderstorm,
            ConditionGroup::Snow,
            ConditionGroup::Mist,
            ConditionGroup::Other,
        ]
    }

    /// Map an OpenWeather condition code (e.g. 501 "moderate rain").
    pub fn from_openweather_id(code: u16) -> Self {
        match code {
            200..=299 => ConditionGroup::Thunderstorm,
            300..=399 => ConditionGroup::Drizzle,
            500..=599 => ConditionGroup::Rain,
            600..=699 => ConditionGroup::Snow,
            700..=799 => ConditionGroup::Mist,
            800 => ConditionGroup::Clear,
            801..=899 => ConditionGroup::Clouds,
            _ => ConditionGroup::Other,
        }
    }

    /// Rain, drizzle or thunderstorm: liquid precipitation is falling.
    pub fn is_wet(&self) -> bool {
        matches!(
            self,
            ConditionGroup::Rain | ConditionGroup::Drizzle | ConditionGroup::Thunderstorm
        )
    }
}

impl fmt::Display for ConditionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionGroup {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to [`ConditionGroup::Other`].
    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let lower = value.trim().to_lowercase();

        let group = match lower.as_str() {
            "clear" => ConditionGroup::Clear,
            "clouds" | "cloudy" => ConditionGroup::Clouds,
            "rain" => ConditionGroup::Rain,
            "drizzle" => ConditionGroup::Drizzle,
            "thunderstorm" => ConditionGroup::Thunderstorm,
            "snow" => ConditionGroup::Snow,
            "mist" | "fog" | "haze" | "smoke" | "mist/fog" => ConditionGroup::Mist,
            _ => ConditionGroup::Other,
        };

        Ok(group)
    }
}

impl From<String> for ConditionGroup {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(ConditionGroup::Other)
    }
}

/// Raw observation as handed over by a provider mapping.
///
/// Every field is optional so that a missing value surfaces as a
/// [`AdvisorError::Validation`] naming the field instead of a serde error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub location: Option<String>,
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub visibility: Option<f64>,
    pub wind_speed: Option<f64>,
    pub clouds: Option<f64>,
    pub condition_group: Option<ConditionGroup>,
    pub precip_volume_mm: Option<f64>,
    pub uv_index: Option<f64>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl Observation {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Validated point-in-time observation. Units: °C, %, hPa, m, m/s, mm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
    pub visibility: f64,
    pub wind_speed: f64,
    pub clouds: u8,
    pub condition_group: ConditionGroup,
    pub precip_volume_mm: f64,
    pub uv_index: Option<f64>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherSnapshot {
    /// Check every field against its physical range.
    pub fn validate(&self) -> Result<()> {
        check_range("temp", self.temp, -100.0, 70.0)?;
        check_range("feels_like", self.feels_like, -100.0, 70.0)?;
        check_range("humidity", f64::from(self.humidity), 0.0, 100.0)?;
        check_range("pressure", self.pressure, 300.0, 1100.0)?;
        check_non_negative("visibility", self.visibility)?;
        check_non_negative("wind_speed", self.wind_speed)?;
        check_range("clouds", f64::from(self.clouds), 0.0, 100.0)?;
        check_non_negative("precip_volume_mm", self.precip_volume_mm)?;
        if let Some(uv) = self.uv_index {
            check_non_negative("uv_index", uv)?;
        }
        Ok(())
    }

    pub fn dew_point(&self) -> Option<f64> {
        dew_point(self.temp, f64::from(self.humidity))
    }
}

impl TryFrom<Observation> for WeatherSnapshot {
    type Error = AdvisorError;

    fn try_from(obs: Observation) -> Result<Self> {
        let snapshot = WeatherSnapshot {
            temp: required("temp", obs.temp)?,
            feels_like: required("feels_like", obs.feels_like)?,
            humidity: percent("humidity", obs.humidity)?,
            pressure: required("pressure", obs.pressure)?,
            visibility: required("visibility", obs.visibility)?,
            wind_speed: required("wind_speed", obs.wind_speed)?,
            clouds: percent("clouds", obs.clouds)?,
            condition_group: obs
                .condition_group
                .ok_or_else(|| AdvisorError::validation("condition_group", "field is required"))?,
            precip_volume_mm: obs.precip_volume_mm.unwrap_or(0.0),
            uv_index: obs.uv_index,
            sunrise: obs.sunrise,
            sunset: obs.sunset,
            observed_at: obs.observed_at,
        };

        snapshot.validate()?;
        Ok(snapshot)
    }
}

/// Dew point in °C via the Magnus approximation.
///
/// Returns `None` for completely dry air (humidity ≤ 0), where the logarithm
/// diverges. The result never exceeds `temp`.
pub fn dew_point(temp: f64, humidity: f64) -> Option<f64> {
    if humidity.is_nan() || humidity <= 0.0 || !temp.is_finite() {
        return None;
    }

    let gamma = (MAGNUS_A * temp) / (MAGNUS_B + temp) + (humidity.min(100.0) / 100.0).ln();
    let dew = (MAGNUS_B * gamma) / (MAGNUS_A - gamma);

    Some(dew.min(temp))
}

fn required(field: &'static str, value: Option<f64>) -> Result<f64> {
    value.ok_or_else(|| AdvisorError::validation(field, "field is required"))
}

fn percent(field: &'static str, value: Option<f64>) -> Result<u8> {
    let value = required(field, value)?;
    check_range(field, value, 0.0, 100.0)?;
    Ok(value.round() as u8)
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(AdvisorError::validation(
            field,
            format!("must be within {min}..={max}, got {value}"),
        ));
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AdvisorError::validation(
            field,
            format!("must be a finite value >= 0, got {value}"),
        ));
    }
    Ok(())
}
