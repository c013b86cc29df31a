pub mod aggregation;
pub mod ball;
pub mod category;
pub mod inning_cache;
pub mod partnership;
pub mod scale;
pub mod types;

pub use aggregation::{
    InningData, InningStats, OverProgress, OverSummary, batting_order, belongs_to_inning,
    compute_inning_data, compute_inning_stats, compute_over_summaries, compute_partnership_order,
    over_score_progression, partnerships_for_inning,
};
pub use ball::{
    BallDescription, BallEvent, BallKey, ExtrasType, Inning, MAX_OVER_INDEX, OverNotation,
    RawBallRecord, decode_ball_records, decode_balls,
};
pub use category::{
    BallCategory, LegendEntry, ball_color, category_legend, classify, color_for,
    display_team_name, team_color, team_secondary_color,
};
pub use inning_cache::{InningCache, InningCacheStats};
pub use partnership::{Partnership, RawPartnershipRecord, decode_partnerships};
pub use scale::{BandScale, LinearScale, QuantileScale};
pub use types::Viewport;

/// Abbreviates a full name to initial and surname: `Virat Kohli` -> `V. Kohli`.
///
/// Single-word names are returned unchanged.
#[must_use]
pub fn abbreviate_name(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => String::new(),
        [single] => (*single).to_owned(),
        [first, .., last] => {
            let initial: String = first.chars().take(1).collect();
            format!("{initial}. {last}")
        }
    }
}
