//! Visual taxonomy shared by every chart.
//!
//! The category palette and the team tables are the only color sources the
//! binders use, so the same ball or team looks identical across charts.

use serde::{Deserialize, Serialize};

use crate::core::BallEvent;
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallCategory {
    Wicket,
    DotBall,
    Extra,
    NonBoundary,
    Boundary,
}

impl BallCategory {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wicket => "Wicket",
            Self::DotBall => "Dot Ball",
            Self::Extra => "Extra",
            Self::NonBoundary => "Non-Boundary",
            Self::Boundary => "Boundary",
        }
    }
}

pub const WICKET_COLOR: Color = Color::rgb8(0xF4, 0x53, 0x33);
pub const DOT_BALL_COLOR: Color = Color::rgb8(0xCC, 0xCC, 0xCC);
pub const EXTRA_COLOR: Color = Color::rgb8(0x7B, 0xCC, 0xC4);
pub const NON_BOUNDARY_COLOR: Color = Color::rgb8(0x43, 0xA2, 0xCA);
pub const BOUNDARY_COLOR: Color = Color::rgb8(0x08, 0x68, 0xAC);

/// Used for any team missing from the participant table.
pub const FALLBACK_TEAM_COLOR: Color = Color::rgb8(0x99, 0x99, 0x99);
pub const FALLBACK_TEAM_SECONDARY_COLOR: Color = Color::rgb8(0xDD, 0xDD, 0xDD);

/// Classifies a delivery. Rules are evaluated in priority order.
#[must_use]
pub fn classify(ball: &BallEvent) -> BallCategory {
    if ball.is_counted_wicket() {
        BallCategory::Wicket
    } else if ball.runs_batter == 0 && !ball.extras.voids_wicket() {
        BallCategory::DotBall
    } else if ball.extras.is_extra() {
        BallCategory::Extra
    } else if ball.runs_batter < 4 {
        BallCategory::NonBoundary
    } else {
        BallCategory::Boundary
    }
}

#[must_use]
pub const fn color_for(category: BallCategory) -> Color {
    match category {
        BallCategory::Wicket => WICKET_COLOR,
        BallCategory::DotBall => DOT_BALL_COLOR,
        BallCategory::Extra => EXTRA_COLOR,
        BallCategory::NonBoundary => NON_BOUNDARY_COLOR,
        BallCategory::Boundary => BOUNDARY_COLOR,
    }
}

#[must_use]
pub fn ball_color(ball: &BallEvent) -> Color {
    color_for(classify(ball))
}

struct TeamPalette {
    name: &'static str,
    primary: Color,
    secondary: Color,
}

static TEAM_PALETTES: [TeamPalette; 14] = [
    TeamPalette {
        name: "India",
        primary: Color::rgb8(0x00, 0x80, 0xFF),
        secondary: Color::rgb8(0x82, 0xC0, 0xFF),
    },
    TeamPalette {
        name: "Bangladesh",
        primary: Color::rgb8(0x5A, 0xAB, 0x54),
        secondary: Color::rgb8(0x9C, 0xC9, 0x99),
    },
    TeamPalette {
        name: "United Arab Emirates",
        primary: Color::rgb8(0x00, 0x33, 0x66),
        secondary: Color::rgb8(0x9A, 0xA3, 0xAD),
    },
    TeamPalette {
        name: "Scotland",
        primary: Color::rgb8(0x66, 0xB2, 0xFF),
        secondary: Color::rgb8(0xC6, 0xE2, 0xFF),
    },
    TeamPalette {
        name: "Ireland",
        primary: Color::rgb8(0x80, 0xFF, 0x00),
        secondary: Color::rgb8(0xCE, 0xFF, 0x9E),
    },
    TeamPalette {
        name: "Afghanistan",
        primary: Color::rgb8(0x00, 0x66, 0xCC),
        secondary: Color::rgb8(0x9D, 0xB3, 0xC9),
    },
    TeamPalette {
        name: "England",
        primary: Color::rgb8(0x00, 0x4C, 0x99),
        secondary: Color::rgb8(0x79, 0x8B, 0x9E),
    },
    TeamPalette {
        name: "South Africa",
        primary: Color::rgb8(0x00, 0x66, 0x33),
        secondary: Color::rgb8(0x8E, 0xCE, 0xAE),
    },
    TeamPalette {
        name: "Australia",
        primary: Color::rgb8(0xFF, 0xD7, 0x00),
        secondary: Color::rgb8(0xFF, 0xF2, 0xAA),
    },
    TeamPalette {
        name: "New Zealand",
        primary: Color::rgb8(0x00, 0x00, 0x00),
        secondary: Color::rgb8(0xE0, 0xE0, 0xE0),
    },
    TeamPalette {
        name: "West Indies",
        primary: Color::rgb8(0x66, 0x00, 0x00),
        secondary: Color::rgb8(0xAA, 0x75, 0x75),
    },
    TeamPalette {
        name: "Pakistan",
        primary: Color::rgb8(0x00, 0xCC, 0x00),
        secondary: Color::rgb8(0xA0, 0xBF, 0xA0),
    },
    TeamPalette {
        name: "Zimbabwe",
        primary: Color::rgb8(0xCC, 0x00, 0x00),
        secondary: Color::rgb8(0xCC, 0x82, 0x82),
    },
    TeamPalette {
        name: "Sri Lanka",
        primary: Color::rgb8(0x00, 0x00, 0x99),
        secondary: Color::rgb8(0x5D, 0x5D, 0x8C),
    },
];

fn palette(team: &str) -> Option<&'static TeamPalette> {
    TEAM_PALETTES.iter().find(|palette| palette.name == team)
}

/// Primary team color. Total: unknown teams get `FALLBACK_TEAM_COLOR`.
#[must_use]
pub fn team_color(team: &str) -> Color {
    palette(team).map_or(FALLBACK_TEAM_COLOR, |palette| palette.primary)
}

/// Lighter companion color, used for the second batsman of a partnership.
#[must_use]
pub fn team_secondary_color(team: &str) -> Color {
    palette(team).map_or(FALLBACK_TEAM_SECONDARY_COLOR, |palette| {
        palette.secondary
    })
}

#[must_use]
pub fn known_teams() -> impl Iterator<Item = &'static str> {
    TEAM_PALETTES.iter().map(|palette| palette.name)
}

/// Short team name for legends.
#[must_use]
pub fn display_team_name(team: &str) -> &str {
    if team == "United Arab Emirates" {
        "UAE"
    } else {
        team
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: BallCategory,
    pub label: &'static str,
    pub color: Color,
}

/// Category legend in display order.
#[must_use]
pub fn category_legend() -> [LegendEntry; 5] {
    [
        BallCategory::NonBoundary,
        BallCategory::Boundary,
        BallCategory::Extra,
        BallCategory::Wicket,
        BallCategory::DotBall,
    ]
    .map(|category| LegendEntry {
        category,
        label: category.label(),
        color: color_for(category),
    })
}
