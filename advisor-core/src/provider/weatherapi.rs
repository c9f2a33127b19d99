use serde::Deserialize;

use crate::model::{ConditionGroup, Observation};

use super::{ProviderPayload, unix_to_utc};

/// WeatherAPI.com `v1/current.json` response.
#[derive(Debug, Deserialize)]
pub struct WaCurrentResponse {
    location: Option<WaLocation>,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    code: Option<u16>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: Option<f64>,
    feelslike_c: Option<f64>,
    humidity: Option<f64>,
    pressure_mb: Option<f64>,
    vis_km: Option<f64>,
    wind_kph: Option<f64>,
    cloud: Option<f64>,
    precip_mm: Option<f64>,
    uv: Option<f64>,
    condition: Option<WaCondition>,
    last_updated_epoch: Option<i64>,
}

/// Map a WeatherAPI.com condition code onto the coarse condition groups.
fn condition_group(code: u16) -> ConditionGroup {
    match code {
        1000 => ConditionGroup::Clear,
        1003 | 1006 | 1009 => ConditionGroup::Clouds,
        1030 | 1135 | 1147 => ConditionGroup::Mist,
        1087 | 1273 | 1276 | 1279 | 1282 => ConditionGroup::Thunderstorm,
        1150 | 1153 | 1168 | 1171 => ConditionGroup::Drizzle,
        1063 | 1180..=1201 | 1240..=1246 => ConditionGroup::Rain,
        1066 | 1069 | 1072 | 1114 | 1117 | 1204..=1237 | 1249..=1264 => ConditionGroup::Snow,
        _ => ConditionGroup::Other,
    }
}

impl ProviderPayload for WaCurrentResponse {
    fn into_observation(self) -> Observation {
        let current = self.current;

        let condition_group = current.condition.and_then(|c| match (c.code, c.text) {
            (Some(code), _) => Some(condition_group(code)),
            (None, Some(text)) => Some(ConditionGroup::from(text)),
            (None, None) => None,
        });

        Observation {
            location: self.location.map(|l| format!("{}, {}", l.name, l.country)),
            temp: current.temp_c,
            feels_like: current.feelslike_c,
            humidity: current.humidity,
            pressure: current.pressure_mb,
            visibility: current.vis_km.map(|km| km * 1000.0),
            wind_speed: current.wind_kph.map(|kph| kph / 3.6),
            clouds: current.cloud,
            condition_group,
            precip_volume_mm: current.precip_mm,
            uv_index: current.uv,
            sunrise: None,
            sunset: None,
            observed_at: current.last_updated_epoch.and_then(unix_to_utc),
        }
    }
}
