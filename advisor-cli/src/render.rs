//! Human-readable rendering of an assessment.

use std::fmt;

use advisor_core::Assessment;

/// How many umbrella reasons the text view lists.
const TOP_REASONS: usize = 2;

/// Plain-text view of an [`Assessment`], printed with `{}`.
pub struct TextReport<'a> {
    pub location: Option<&'a str>,
    pub assessment: &'a Assessment,
    pub outfit: &'a str,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location {
            writeln!(f, "{location}\n")?;
        }

        let umbrella = &self.assessment.umbrella_recommendation;
        let verdict = if umbrella.recommend { "Bring an umbrella" } else { "No umbrella needed" };
        writeln!(f, "Umbrella: {verdict} ({:.0}% chance)", umbrella.score * 100.0)?;
        for reason in umbrella.reasons.iter().take(TOP_REASONS) {
            writeln!(f, "  - {reason}")?;
        }

        match &self.assessment.uv_recommendations {
            Some(uv) => {
                writeln!(f, "\nUV index {:.1}: {} ({})", uv.index, uv.category, uv.color)?;
                if let Some(warning) = &uv.warning {
                    writeln!(f, "  ! {warning}")?;
                }
                writeln!(f, "  Sunscreen: {}", uv.sunscreen)?;
                writeln!(f, "  Safe exposure: {}", uv.safe_exposure)?;
                for advice in &uv.recommendations {
                    writeln!(f, "  - {advice}")?;
                }
            }
            None => writeln!(f, "\nUV index: no data")?,
        }

        let clothing = &self.assessment.clothing_recommendations;
        let t = &clothing.temperature;
        writeln!(
            f,
            "\n{} {} ({}): {:.1}°C, feels like {:.1}°C, effective {:.1}°C",
            clothing.icon, clothing.category, clothing.comfort_level, t.actual, t.feels_like, t.effective
        )?;
        writeln!(f, "  {}", self.outfit)?;
        section(f, "Wear", &clothing.clothing_items)?;
        section(f, "Layers", &clothing.layers)?;
        section(f, "Bring", &clothing.accessories)?;
        section(f, "Tips", &clothing.tips)
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "  {title}:")?;
    for item in items {
        writeln!(f, "    - {item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::{ConditionGroup, Config, WeatherSnapshot, assess};

    fn rainy(uv_index: Option<f64>) -> Assessment {
        let snapshot = WeatherSnapshot {
            temp: 26.0,
            feels_like: 27.0,
            humidity: 90,
            pressure: 1002.0,
            visibility: 4000.0,
            wind_speed: 2.0,
            clouds: 95,
            condition_group: ConditionGroup::Rain,
            precip_volume_mm: 3.0,
            uv_index,
            sunrise: None,
            sunset: None,
            observed_at: None,
        };
        assess(&snapshot, &Config::default())
    }

    #[test]
    fn lists_only_top_umbrella_reasons() {
        let assessment = rainy(None);
        let out = TextReport { location: Some("Manila, PH"), assessment: &assessment, outfit: "Outfit." }
            .to_string();

        assert!(out.starts_with("Manila, PH"));
        assert!(out.contains("Bring an umbrella"));
        assert!(out.contains(&assessment.umbrella_recommendation.reasons[0]));
        assert!(!out.contains(&assessment.umbrella_recommendation.reasons[2]));
        assert!(out.contains("UV index: no data"));
    }

    #[test]
    fn shows_uv_section_when_present() {
        let assessment = rainy(Some(9.0));
        let out = TextReport { location: None, assessment: &assessment, outfit: "Outfit." }.to_string();

        assert!(out.contains("UV index 9.0: Very High (red)"));
        assert!(out.contains("  ! "));
        assert!(out.contains("Tips:"));
    }
}
