//! Color theme definitions.
//!
//! Chrome uses the Nord palette; risk values use the SPC outlook colors so
//! the terminal matches the published maps.

use ratatui::style::Color;

use crate::core::spc::{CategoricalRisk, RiskReading};

// === Nord Polar Night (Dark backgrounds) ===

pub const NORD_POLAR_NIGHT_3: Color = Color::Rgb(67, 76, 94);
pub const NORD_POLAR_NIGHT_4: Color = Color::Rgb(76, 86, 106);

// === Nord Snow Storm (Light text) ===

pub const NORD_SNOW_STORM_1: Color = Color::Rgb(216, 222, 233);

// === Nord Frost (Accent blues/cyans) ===

pub const NORD_FROST_2: Color = Color::Rgb(136, 192, 208);
pub const NORD_FROST_3: Color = Color::Rgb(129, 161, 193);

// === Nord Aurora (Status colors) ===

pub const NORD_RED: Color = Color::Rgb(191, 97, 106);
pub const NORD_ORANGE: Color = Color::Rgb(208, 135, 112);
pub const NORD_YELLOW: Color = Color::Rgb(235, 203, 139);
pub const NORD_GREEN: Color = Color::Rgb(163, 190, 140);

// === Semantic Color Aliases ===

pub const TEXT_PRIMARY: Color = NORD_SNOW_STORM_1;
pub const TEXT_SECONDARY: Color = NORD_POLAR_NIGHT_4;
pub const ACCENT_PRIMARY: Color = NORD_FROST_2;
pub const ACCENT_SECONDARY: Color = NORD_FROST_3;
pub const SUCCESS: Color = NORD_GREEN;
pub const WARNING: Color = NORD_YELLOW;
pub const ERROR: Color = NORD_RED;
/// Values that have missed refresh cycles.
pub const STALE: Color = Color::DarkGray;

// === UI Element Colors ===

pub const BORDER_DEFAULT: Color = NORD_POLAR_NIGHT_3;
pub const BORDER_FOCUSED: Color = NORD_FROST_2;
pub const ROW_SELECTED_BG: Color = Color::Rgb(40, 40, 40);
pub const ROW_SELECTED_FG: Color = NORD_FROST_2;

// === SPC Categorical Colors ===

pub const SPC_TSTM: Color = Color::Rgb(192, 232, 192);
pub const SPC_MRGL: Color = Color::Rgb(127, 197, 127);
pub const SPC_SLGT: Color = Color::Rgb(246, 246, 127);
pub const SPC_ENH: Color = Color::Rgb(230, 194, 127);
pub const SPC_MDT: Color = Color::Rgb(230, 127, 127);
pub const SPC_HIGH: Color = Color::Rgb(255, 127, 255);

/// Display color for a categorical level.
#[must_use]
pub const fn categorical_color(risk: CategoricalRisk) -> Color {
    match risk {
        CategoricalRisk::None => TEXT_SECONDARY,
        CategoricalRisk::Thunder => SPC_TSTM,
        CategoricalRisk::Marginal => SPC_MRGL,
        CategoricalRisk::Slight => SPC_SLGT,
        CategoricalRisk::Enhanced => SPC_ENH,
        CategoricalRisk::Moderate => SPC_MDT,
        CategoricalRisk::High => SPC_HIGH,
        CategoricalRisk::Other(_) => TEXT_PRIMARY,
    }
}

/// Display color for a hazard probability, following the SPC contour legend.
#[must_use]
pub const fn probability_color(percent: u8) -> Color {
    match percent {
        0 => TEXT_SECONDARY,
        1..=2 => Color::Rgb(0, 139, 0),
        3..=5 => Color::Rgb(139, 71, 38),
        6..=10 => Color::Rgb(255, 200, 0),
        11..=15 => Color::Rgb(255, 0, 0),
        16..=30 => Color::Rgb(255, 0, 255),
        31..=45 => Color::Rgb(145, 44, 238),
        _ => Color::Rgb(16, 78, 139),
    }
}

#[must_use]
pub const fn risk_color(reading: RiskReading) -> Color {
    match reading {
        RiskReading::Categorical(risk) => categorical_color(risk),
        RiskReading::Probability(p) => probability_color(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_muted() {
        assert_eq!(risk_color(RiskReading::Probability(0)), TEXT_SECONDARY);
        assert_eq!(
            risk_color(RiskReading::Categorical(CategoricalRisk::None)),
            TEXT_SECONDARY
        );
    }

    #[test]
    fn test_probability_bands() {
        assert_eq!(probability_color(15), Color::Rgb(255, 0, 0));
        assert_eq!(probability_color(30), Color::Rgb(255, 0, 255));
        assert_eq!(probability_color(60), Color::Rgb(16, 78, 139));
    }
}
