//! Clothing advisor.
//!
//! The feels-like temperature is nudged for wind chill and humid heat, the
//! result picks a temperature band, and condition flags (rain, wind, humidity,
//! sun) layer extra items and tips on top of the band's defaults.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::Result,
    lookup::{self, Band},
    model::{ConditionGroup, WeatherSnapshot},
};

/// Default outfit for one temperature band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClothingBand {
    pub category: String,
    pub comfort_level: String,
    pub color: String,
    pub icon: String,
    pub clothing_items: Vec<String>,
    /// Innermost layer first.
    pub layers: Vec<String>,
    pub accessories: Vec<String>,
    pub tips: Vec<String>,
    /// Fabric guidance; dropped in humid air in favour of the humidity tip.
    pub fabric_tip: String,
    /// One-sentence outfit suggestion.
    pub summary: String,
}

/// Additions triggered by a condition flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionExtras {
    pub clothing_items: Vec<String>,
    /// Appended after the band's layers, i.e. worn outermost.
    pub layers: Vec<String>,
    pub accessories: Vec<String>,
    pub tip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectiveTemperatureConfig {
    pub wind_chill_from_mps: f64,
    /// Excess wind speed at which the full chill applies.
    pub wind_chill_span_mps: f64,
    pub wind_chill_max_c: f64,
    pub heat_humidity_from_pct: f64,
    pub heat_min_temp_c: f64,
    pub heat_span_pct: f64,
    pub heat_max_c: f64,
}

impl Default for EffectiveTemperatureConfig {
    fn default() -> Self {
        Self {
            wind_chill_from_mps: 3.0,
            wind_chill_span_mps: 5.0,
            wind_chill_max_c: 2.0,
            heat_humidity_from_pct: 70.0,
            heat_min_temp_c: 27.0,
            heat_span_pct: 30.0,
            heat_max_c: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionThresholds {
    pub windy_above_mps: f64,
    pub humid_above_pct: f64,
    pub sunny_min_uv: f64,
}

impl Default for ConditionThresholds {
    fn default() -> Self {
        Self { windy_above_mps: 5.0, humid_above_pct: 70.0, sunny_min_uv: 3.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothingConfig {
    pub bands: Vec<Band<ClothingBand>>,
    pub effective: EffectiveTemperatureConfig,
    pub thresholds: ConditionThresholds,
    pub rain: ConditionExtras,
    pub windy: ConditionExtras,
    pub humid: ConditionExtras,
    pub sunny: ConditionExtras,
    /// Appended to the outfit summary when it rains.
    pub rain_summary: String,
}

impl Default for ClothingConfig {
    fn default() -> Self {
        Self {
            bands: default_bands(),
            effective: EffectiveTemperatureConfig::default(),
            thresholds: ConditionThresholds::default(),
            rain: ConditionExtras {
                clothing_items: strings(&["Water-resistant footwear"]),
                layers: strings(&["Waterproof shell or raincoat"]),
                accessories: strings(&["Umbrella"]),
                tip: "Waterproof or water-resistant clothing recommended".into(),
            },
            windy: ConditionExtras {
                clothing_items: strings(&["Windbreaker or wind-resistant jacket"]),
                layers: strings(&["Wind-blocking outer shell"]),
                accessories: Vec::new(),
                tip: "Windy conditions, secure loose items".into(),
            },
            humid: ConditionExtras {
                tip: "Choose moisture-wicking fabrics over insulating knits".into(),
                ..ConditionExtras::default()
            },
            sunny: ConditionExtras {
                clothing_items: Vec::new(),
                layers: Vec::new(),
                accessories: strings(&["Sunglasses", "Sunscreen SPF 30+", "Hat or cap"]),
                tip: "Strong sun, apply sunscreen before heading out".into(),
            },
            rain_summary: "Don't forget your umbrella and raincoat!".into(),
        }
    }
}

impl ClothingConfig {
    pub fn validate(&self) -> Result<()> {
        lookup::check_ascending("clothing.bands", &self.bands)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub actual: f64,
    pub feels_like: f64,
    pub effective: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    pub rain: bool,
    pub windy: bool,
    pub humid: bool,
    pub sunny: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingRecommendation {
    pub category: String,
    pub color: String,
    pub icon: String,
    pub comfort_level: String,
    pub temperature: Temperature,
    pub clothing_items: Vec<String>,
    pub layers: Vec<String>,
    pub accessories: Vec<String>,
    pub tips: Vec<String>,
    pub conditions: Conditions,
}

pub fn advise(snapshot: &WeatherSnapshot, config: &ClothingConfig) -> ClothingRecommendation {
    let effective = effective_temperature(snapshot, &config.effective);
    let flags = conditions(snapshot, &config.thresholds);
    let band = band_for(effective, config);

    let mut clothing_items = band.clothing_items.clone();
    let mut layers = band.layers.clone();
    let mut accessories = band.accessories.clone();

    let mut tips = band.tips.clone();
    if !flags.humid && !band.fabric_tip.is_empty() {
        tips.push(band.fabric_tip.clone());
    }

    if flags.rain {
        let extras = &config.rain;
        extend_unique(&mut clothing_items, &extras.clothing_items);
        extend_unique(&mut layers, &extras.layers);
        // Rain gear goes first, it is the one thing not to forget.
        let mut rain_first = extras.accessories.clone();
        extend_unique(&mut rain_first, &accessories);
        accessories = rain_first;
        push_tip(&mut tips, &extras.tip, None);
    }
    if flags.windy {
        apply(&config.windy, &mut clothing_items, &mut layers, &mut accessories);
        let detail = format!("{:.1} m/s", snapshot.wind_speed);
        push_tip(&mut tips, &config.windy.tip, Some(&detail));
    }
    if flags.humid {
        apply(&config.humid, &mut clothing_items, &mut layers, &mut accessories);
        let detail = format!("{}% humidity", snapshot.humidity);
        push_tip(&mut tips, &config.humid.tip, Some(&detail));
    }
    if flags.sunny {
        apply(&config.sunny, &mut clothing_items, &mut layers, &mut accessories);
        push_tip(&mut tips, &config.sunny.tip, None);
    }

    debug!(effective, category = %band.category, ?flags, "clothing advice");

    ClothingRecommendation {
        category: band.category.clone(),
        color: band.color.clone(),
        icon: band.icon.clone(),
        comfort_level: band.comfort_level.clone(),
        temperature: Temperature {
            actual: snapshot.temp,
            feels_like: snapshot.feels_like,
            effective,
        },
        clothing_items,
        layers,
        accessories,
        tips,
        conditions: flags,
    }
}

/// Feels-like temperature adjusted for wind chill and humid heat.
pub fn effective_temperature(snapshot: &WeatherSnapshot, config: &EffectiveTemperatureConfig) -> f64 {
    let mut effective = snapshot.feels_like;

    let excess_wind = snapshot.wind_speed - config.wind_chill_from_mps;
    if excess_wind > 0.0 {
        effective -= scaled(excess_wind, config.wind_chill_span_mps, config.wind_chill_max_c);
    }

    let excess_humidity = f64::from(snapshot.humidity) - config.heat_humidity_from_pct;
    if excess_humidity > 0.0 && snapshot.temp >= config.heat_min_temp_c {
        effective += scaled(excess_humidity, config.heat_span_pct, config.heat_max_c);
    }

    effective
}

pub fn conditions(snapshot: &WeatherSnapshot, thresholds: &ConditionThresholds) -> Conditions {
    Conditions {
        rain: snapshot.condition_group.is_wet() || snapshot.precip_volume_mm > 0.0,
        windy: snapshot.wind_speed > thresholds.windy_above_mps,
        humid: f64::from(snapshot.humidity) > thresholds.humid_above_pct,
        sunny: snapshot.condition_group == ConditionGroup::Clear
            && snapshot.uv_index.is_none_or(|uv| uv >= thresholds.sunny_min_uv),
    }
}

/// Short outfit suggestion for the snapshot's band.
pub fn outfit_summary(snapshot: &WeatherSnapshot, config: &ClothingConfig) -> String {
    let effective = effective_temperature(snapshot, &config.effective);
    let band = band_for(effective, config);

    if conditions(snapshot, &config.thresholds).rain && !config.rain_summary.is_empty() {
        format!("{} {}", band.summary, config.rain_summary)
    } else {
        band.summary.clone()
    }
}

fn band_for(effective: f64, config: &ClothingConfig) -> ClothingBand {
    match lookup::classify(&config.bands, effective) {
        Some(band) => band.clone(),
        None => {
            warn!(effective, "effective temperature below every clothing band");
            config.bands.first().map(|b| b.value.clone()).unwrap_or_default()
        }
    }
}

fn apply(
    extras: &ConditionExtras,
    clothing_items: &mut Vec<String>,
    layers: &mut Vec<String>,
    accessories: &mut Vec<String>,
) {
    extend_unique(clothing_items, &extras.clothing_items);
    extend_unique(layers, &extras.layers);
    extend_unique(accessories, &extras.accessories);
}

fn extend_unique(target: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

fn push_tip(tips: &mut Vec<String>, tip: &str, detail: Option<&str>) {
    if tip.is_empty() {
        return;
    }
    match detail {
        Some(detail) => tips.push(format!("{tip} ({detail})")),
        None => tips.push(tip.to_string()),
    }
}

/// `max * min(1, excess / span)`.
fn scaled(excess: f64, span: f64, max: f64) -> f64 {
    if span <= 0.0 {
        return max;
    }
    max * (excess / span).min(1.0)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_bands() -> Vec<Band<ClothingBand>> {
    let band = |category: &str,
                comfort_level: &str,
                color: &str,
                icon: &str,
                clothing_items: &[&str],
                layers: &[&str],
                accessories: &[&str],
                tips: &[&str],
                fabric_tip: &str,
                summary: &str| ClothingBand {
        category: category.into(),
        comfort_level: comfort_level.into(),
        color: color.into(),
        icon: icon.into(),
        clothing_items: strings(clothing_items),
        layers: strings(layers),
        accessories: strings(accessories),
        tips: strings(tips),
        fabric_tip: fabric_tip.into(),
        summary: summary.into(),
    };

    vec![
        Band::new(
            f64::NEG_INFINITY,
            band(
                "Cold",
                "Cold",
                "#6366f1",
                "❄️",
                &["Thermal top or warm sweater", "Lined or heavy pants", "Warm boots"],
                &["Thermal base layer", "Insulating mid-layer", "Warm insulated coat"],
                &["Scarf and beanie", "Gloves", "Warm socks"],
                &["Dress in layers to trap warmth", "Cover exposed skin"],
                "Insulating wool, fleece or down layers are essential",
                "Bundle up with warm layers, a coat and accessories.",
            ),
        ),
        Band::new(
            15.0,
            band(
                "Cool",
                "Brisk",
                "#3b82f6",
                "🌬️",
                &["Sweater or hoodie", "Long pants or jeans", "Closed shoes with socks"],
                &["Base shirt", "Sweater or fleece", "Light jacket"],
                &["Scarf", "Light gloves (optional)"],
                &["Cover your neck and hands"],
                "Wool or fleece mid-layers hold warmth",
                "Layer up with a sweater and a jacket.",
            ),
        ),
        Band::new(
            20.0,
            band(
                "Mild",
                "Comfortable, cool edge",
                "#22c55e",
                "🌥️",
                &["Long-sleeve shirt or light sweater", "Full-length pants or jeans", "Sneakers"],
                &["Base shirt", "Light cardigan or jacket"],
                &["Scarf (optional)", "Bag for an extra layer"],
                &["Layer for changing temperatures", "Bring a light jacket for the evening"],
                "Light knits and cotton layers are enough",
                "Long sleeves recommended, bring a light jacket just in case.",
            ),
        ),
        Band::new(
            24.0,
            band(
                "Warm",
                "Comfortable",
                "#fbbf24",
                "🌤️",
                &["T-shirt or casual shirt", "Jeans, chinos or casual pants", "Walking shoes"],
                &["Single layer"],
                &["Light jacket for air-conditioned spaces"],
                &["Good weather for most outdoor activities"],
                "Cotton blends stay comfortable all day",
                "Casual, comfortable clothing suits today's weather.",
            ),
        ),
        Band::new(
            28.0,
            band(
                "Hot",
                "Warm",
                "#f97316",
                "☀️",
                &["Light t-shirt or blouse", "Shorts, skirt or light pants", "Sandals or canvas shoes"],
                &["Single light layer"],
                &["Cap or hat", "Sunglasses", "Water bottle"],
                &["Light colors reflect heat", "Loose fits let air circulate"],
                "Cotton and linen breathe best",
                "Light, breathable clothes keep you comfortable in the heat.",
            ),
        ),
        Band::new(
            33.0,
            band(
                "Very Hot",
                "Uncomfortable - heat risk",
                "#dc2626",
                "🔥",
                &["Light cotton or linen top", "Shorts or a light skirt", "Sandals or breathable shoes"],
                &["Single breathable layer"],
                &["Wide-brimmed hat", "Sunglasses", "Water bottle", "Cooling towel"],
                &["Wear loose, light-colored clothes", "Stay indoors during peak heat hours"],
                "Pick breathable, moisture-wicking fabrics",
                "Wear minimal, light-colored clothing and stay hydrated!",
            ),
        ),
    ]
}
