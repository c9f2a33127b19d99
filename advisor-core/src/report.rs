//! Combined response for one snapshot.

use serde::{Deserialize, Serialize};

use crate::{
    Config,
    clothing::{self, ClothingRecommendation},
    model::WeatherSnapshot,
    umbrella::{self, UmbrellaRecommendation},
    uv::{self, UvRecommendation},
};

/// The three recommendations, keyed the way the presentation layer expects.
/// `uv_recommendations` serializes as `null` when the provider had no UV data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub umbrella_recommendation: UmbrellaRecommendation,
    pub uv_recommendations: Option<UvRecommendation>,
    pub clothing_recommendations: ClothingRecommendation,
}

pub fn assess(snapshot: &WeatherSnapshot, config: &Config) -> Assessment {
    Assessment {
        umbrella_recommendation: umbrella::predict(snapshot, &config.umbrella),
        uv_recommendations: uv::advise(snapshot.uv_index, &config.uv),
        clothing_recommendations: clothing::advise(snapshot, &config.clothing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConditionGroup;

    fn snapshot(uv_index: Option<f64>) -> WeatherSnapshot {
        WeatherSnapshot {
            temp: 31.0,
            feels_like: 38.0,
            humidity: 74,
            pressure: 1004.0,
            visibility: 10000.0,
            wind_speed: 4.47,
            clouds: 75,
            condition_group: ConditionGroup::Clouds,
            precip_volume_mm: 0.0,
            uv_index,
            sunrise: None,
            sunset: None,
            observed_at: None,
        }
    }

    #[test]
    fn json_uses_presentation_keys() {
        let report = assess(&snapshot(Some(6.2)), &Config::default());
        let json = serde_json::to_value(&report).expect("serializable");

        assert!(json["umbrella_recommendation"]["score"].is_f64());
        assert!(json["umbrella_recommendation"]["reasons"].is_array());
        assert_eq!(json["uv_recommendations"]["category"], "High");
        assert_eq!(json["clothing_recommendations"]["category"], "Very Hot");
        assert!(json["clothing_recommendations"]["temperature"]["effective"].is_f64());
        assert!(json["clothing_recommendations"]["conditions"]["humid"].as_bool().unwrap_or(false));
    }

    #[test]
    fn missing_uv_serializes_as_null() {
        let report = assess(&snapshot(None), &Config::default());
        let json = serde_json::to_value(&report).expect("serializable");

        assert!(json["uv_recommendations"].is_null());
        assert!(json["uv_recommendations"].as_object().is_none());
    }

    #[test]
    fn warning_is_explicit_null_below_high() {
        let report = assess(&snapshot(Some(1.0)), &Config::default());
        let json = serde_json::to_value(&report).expect("serializable");

        let uv = json["uv_recommendations"].as_object().expect("uv present");
        assert!(uv.contains_key("warning"));
        assert!(uv["warning"].is_null());
    }
}
