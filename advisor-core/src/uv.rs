//! UV advisor: WHO exposure tiers and the sun-safety guidance derived from them.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{AdvisorError, Result},
    lookup::{self, Band},
};

/// Which protective measures a tier calls for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionItems {
    pub sunscreen: bool,
    pub sunglasses: bool,
    pub hat: bool,
    pub long_sleeves: bool,
    pub shade: bool,
    pub stay_indoors: bool,
}

/// Presentation and guidance for one WHO tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvTier {
    pub category: String,
    pub color: String,
    pub risk_level: String,
    pub protection_needed: bool,
    pub sunscreen: String,
    pub warning: Option<String>,
    pub items: ProtectionItems,
    /// Guidance introduced by this tier. A recommendation lists the advice of
    /// its own tier and of every tier below it.
    #[serde(default)]
    pub advice: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UvConfig {
    pub tiers: Vec<Band<UvTier>>,
    /// Safe minutes for a medium, unprotected skin are `exposure_constant / index`.
    pub exposure_constant: f64,
    pub min_exposure_minutes: u32,
}

impl Default for UvConfig {
    fn default() -> Self {
        let items = |sunscreen, hat, long_sleeves, shade, stay_indoors| ProtectionItems {
            sunscreen,
            sunglasses: true,
            hat,
            long_sleeves,
            shade,
            stay_indoors,
        };

        Self {
            tiers: vec![
                Band::new(
                    0.0,
                    UvTier {
                        category: "Low".into(),
                        color: "green".into(),
                        risk_level: "minimal".into(),
                        protection_needed: false,
                        sunscreen: "SPF 15 for extended time outdoors".into(),
                        warning: None,
                        items: items(false, false, false, false, false),
                        advice: vec![
                            "Stay hydrated while outdoors".into(),
                            "Seek shade when the sun feels strongest".into(),
                        ],
                    },
                ),
                Band::new(
                    3.0,
                    UvTier {
                        category: "Moderate".into(),
                        color: "yellow".into(),
                        risk_level: "moderate".into(),
                        protection_needed: true,
                        sunscreen: "SPF 30 recommended".into(),
                        warning: None,
                        items: items(true, false, false, true, false),
                        advice: vec![
                            "Wear UV-blocking sunglasses".into(),
                            "Wear a wide-brimmed hat".into(),
                        ],
                    },
                ),
                Band::new(
                    6.0,
                    UvTier {
                        category: "High".into(),
                        color: "orange".into(),
                        risk_level: "high".into(),
                        protection_needed: true,
                        sunscreen: "SPF 50 required, reapply every 2 hours".into(),
                        warning: Some(
                            "Peak UV between 10 AM and 4 PM: burns possible in under 30 minutes"
                                .into(),
                        ),
                        items: items(true, true, true, true, false),
                        advice: vec![
                            "Reapply sunscreen regularly and after swimming or sweating".into(),
                        ],
                    },
                ),
                Band::new(
                    8.0,
                    UvTier {
                        category: "Very High".into(),
                        color: "red".into(),
                        risk_level: "very_high".into(),
                        protection_needed: true,
                        sunscreen: "SPF 50+ required, reapply every 2 hours".into(),
                        warning: Some(
                            "Avoid the sun between 10 AM and 4 PM: unprotected skin burns quickly"
                                .into(),
                        ),
                        items: items(true, true, true, true, false),
                        advice: vec![
                            "Avoid direct midday sun between 10 AM and 4 PM".into(),
                            "Cover exposed skin with long sleeves and long pants".into(),
                        ],
                    },
                ),
                Band::new(
                    11.0,
                    UvTier {
                        category: "Extreme".into(),
                        color: "purple".into(),
                        risk_level: "extreme".into(),
                        protection_needed: true,
                        sunscreen: "SPF 50+ required, reapply every hour".into(),
                        warning: Some(
                            "Extreme UV between 10 AM and 4 PM: unprotected skin can burn in minutes"
                                .into(),
                        ),
                        items: items(true, true, true, true, true),
                        advice: Vec::new(),
                    },
                ),
            ],
            exposure_constant: 200.0,
            min_exposure_minutes: 5,
        }
    }
}

impl UvConfig {
    pub fn validate(&self) -> Result<()> {
        lookup::check_ascending("uv.tiers", &self.tiers)?;

        if self.tiers[0].from > 0.0 {
            return Err(AdvisorError::config(format!(
                "uv.tiers must start at 0 or below, first band starts at {}",
                self.tiers[0].from
            )));
        }
        if !self.exposure_constant.is_finite() || self.exposure_constant <= 0.0 {
            return Err(AdvisorError::config(format!(
                "uv.exposure_constant must be positive, got {}",
                self.exposure_constant
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvRecommendation {
    pub index: f64,
    pub category: String,
    pub color: String,
    pub risk_level: String,
    pub recommendations: Vec<String>,
    pub protection_needed: bool,
    pub safe_exposure: String,
    pub sunscreen: String,
    pub warning: Option<String>,
}

/// Classify a UV index. `None` when the provider had no UV data.
pub fn advise(uv_index: Option<f64>, config: &UvConfig) -> Option<UvRecommendation> {
    let index = uv_index?;
    let Some(pos) = lookup::classify_position(&config.tiers, index) else {
        warn!(index, "UV index outside the configured tiers");
        return None;
    };
    let tier = &config.tiers[pos].value;

    let recommendations = config.tiers[..=pos]
        .iter()
        .flat_map(|band| band.value.advice.iter().cloned())
        .collect();

    let minutes = safe_minutes(index, config);

    debug!(index, category = %tier.category, minutes, "UV advice");

    Some(UvRecommendation {
        index,
        category: tier.category.clone(),
        color: tier.color.clone(),
        risk_level: tier.risk_level.clone(),
        recommendations,
        protection_needed: tier.protection_needed,
        safe_exposure: format!("About {minutes} minutes without protection"),
        sunscreen: tier.sunscreen.clone(),
        warning: tier.warning.clone(),
    })
}

/// Protective items for the tier `uv_index` falls in.
pub fn protection_items(uv_index: f64, config: &UvConfig) -> Option<ProtectionItems> {
    lookup::classify(&config.tiers, uv_index).map(|tier| tier.items)
}

/// Approximate minutes before erythema risk for medium, unprotected skin.
pub fn safe_minutes(index: f64, config: &UvConfig) -> u32 {
    let minutes = (config.exposure_constant / index.max(1.0)).round();
    (minutes as u32).max(config.min_exposure_minutes)
}
