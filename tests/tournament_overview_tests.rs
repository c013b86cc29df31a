use approx::assert_abs_diff_eq;
use cricket_charts::VizError;
use cricket_charts::charts::tournament_overview::{CANVAS_HEIGHT, MATCH_SLOTS};
use cricket_charts::charts::{
    ChartSeries, MatchStage, SummaryLayer, TournamentOverviewOptions, bind_tournament_overview,
    render_series,
};
use cricket_charts::core::{
    BallCategory, BallEvent, ExtrasType, Inning, OverNotation, color_for, team_color,
};
use cricket_charts::interaction::{Emphasis, HoverTarget, SelectionState, ViewMode};
use cricket_charts::provider::{GroupedMatch, TeamMatches};
use cricket_charts::render::NullRenderer;

struct Delivery<'a> {
    inning: Inning,
    ovr: f64,
    striker: &'a str,
    bowler: &'a str,
    runs: u32,
    wicket: bool,
}

fn ball(delivery: Delivery<'_>) -> BallEvent {
    let notation = OverNotation::parse(delivery.ovr).expect("valid over");
    BallEvent {
        match_id: 0,
        inning: delivery.inning,
        ovr: delivery.ovr,
        notation,
        ball_within_over: notation.ball,
        batting_team: "India".to_owned(),
        bowling_team: "Australia".to_owned(),
        striker: delivery.striker.to_owned(),
        non_striker: "Partner".to_owned(),
        bowler: delivery.bowler.to_owned(),
        runs_batter: delivery.runs,
        runs_w_extras: delivery.runs,
        extras: ExtrasType::None,
        wicket: delivery.wicket,
        who_out: None,
        wicket_method: None,
        cumul_runs: 0,
    }
}

fn group(key: &str, opponent: &str, winner: &str, balls: Vec<BallEvent>) -> GroupedMatch {
    GroupedMatch {
        key: key.to_owned(),
        balls,
        date: None,
        date_label: "2023-10-08".to_owned(),
        opponent: opponent.to_owned(),
        winning_team: winner.to_owned(),
    }
}

fn india_tournament() -> TeamMatches {
    let first_batting = vec![
        ball(Delivery {
            inning: Inning::First,
            ovr: 0.1,
            striker: "Virat Kohli",
            bowler: "Mitchell Starc",
            runs: 4,
            wicket: false,
        }),
        ball(Delivery {
            inning: Inning::First,
            ovr: 0.2,
            striker: "Virat Kohli",
            bowler: "Mitchell Starc",
            runs: 0,
            wicket: true,
        }),
        ball(Delivery {
            inning: Inning::First,
            ovr: 1.1,
            striker: "Shubman Gill",
            bowler: "Pat Cummins",
            runs: 1,
            wicket: false,
        }),
    ];
    let first_bowling = vec![ball(Delivery {
        inning: Inning::Second,
        ovr: 0.1,
        striker: "David Warner",
        bowler: "Jasprit Bumrah",
        runs: 6,
        wicket: false,
    })];
    let second_batting = vec![ball(Delivery {
        inning: Inning::Second,
        ovr: 0.1,
        striker: "Rohit Sharma",
        bowler: "Shaheen Afridi",
        runs: 2,
        wicket: false,
    })];

    TeamMatches {
        batting: vec![
            group("101", "Australia", "India", first_batting),
            group("102", "Pakistan", "Pakistan", second_batting),
        ],
        bowling: vec![group("101", "Australia", "India", first_bowling)],
    }
}

fn cancelled_options() -> TournamentOverviewOptions {
    TournamentOverviewOptions::default().with_cancelled(1, "Bangladesh", "2023-10-19")
}

#[test]
fn stages_follow_column_slots() {
    for slot in 0..6 {
        assert_eq!(MatchStage::for_slot(slot, 6), MatchStage::Group);
    }
    assert_eq!(MatchStage::for_slot(6, 6), MatchStage::QuarterFinal);
    assert_eq!(MatchStage::for_slot(7, 6), MatchStage::SemiFinal);
    assert_eq!(MatchStage::for_slot(8, 6), MatchStage::Final);
    assert_eq!(MatchStage::QuarterFinal.label(), "Quarter-Final");
}

#[test]
fn matches_fill_free_slots_around_cancelled_fixtures() {
    let series = bind_tournament_overview(
        &india_tournament(),
        "India",
        &SelectionState::new(),
        &cancelled_options(),
        0.2,
    )
    .expect("bind overview");

    let slots: Vec<usize> = series.columns.iter().map(|column| column.slot).collect();
    assert_eq!(slots, vec![0, 1, 2]);

    let cancelled = series.column(1).expect("cancelled column");
    assert!(cancelled.is_cancelled());
    assert_eq!(cancelled.opponent, "Bangladesh");
    assert_eq!(cancelled.batting_label(), "Cancelled");
    assert!(cancelled.cells.is_empty());

    let opener = series.column(0).expect("first match");
    assert_eq!(opener.key.as_deref(), Some("101"));
    assert_eq!(opener.batting_label(), "First to Bat");
    assert!(opener.won);
    assert_eq!(opener.background().to_hex(), "#FFFFFF");
    assert_eq!(opener.cells.len(), 4, "batting and bowling balls share the column");

    let loss = series.column(2).expect("second match");
    assert_eq!(loss.opponent, "Pakistan");
    assert_eq!(loss.batting_label(), "Second to Bat");
    assert!(!loss.won);
    assert_eq!(loss.background().to_hex(), "#FF5050");
    assert_eq!(loss.stage, MatchStage::Group);
}

#[test]
fn ball_cells_are_placed_by_over_and_ball_within_over() {
    let series = bind_tournament_overview(
        &india_tournament(),
        "India",
        &SelectionState::new(),
        &TournamentOverviewOptions::default(),
        0.2,
    )
    .expect("bind overview");

    let column = series.column(0).expect("first match");
    assert_abs_diff_eq!(series.ball_width, column.width / 2.0, epsilon = 1e-9);

    let cells = &column.cells;
    assert_abs_diff_eq!(cells[0].x, column.x, epsilon = 1e-9);
    assert_abs_diff_eq!(cells[1].x, column.x + series.ball_width, epsilon = 1e-9);
    assert_abs_diff_eq!(cells[0].y, cells[1].y, epsilon = 1e-9);
    assert!(cells[2].y < cells[0].y, "later overs climb the first-inning axis");

    assert_abs_diff_eq!(cells[0].y, 370.0 - 330.0 / 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cells[3].y, 460.0, epsilon = 1e-9);

    assert_eq!(cells[1].category, BallCategory::Wicket);
    for cell in series.cells() {
        assert_eq!(cell.color, color_for(cell.category));
        assert!(cell.active);
        assert!(!cell.highlighted);
    }
}

#[test]
fn selected_players_and_range_deactivate_balls() {
    let mut selection = SelectionState::new();
    selection.toggle_player("Virat Kohli");

    let series = bind_tournament_overview(
        &india_tournament(),
        "India",
        &selection,
        &TournamentOverviewOptions::default(),
        0.2,
    )
    .expect("bind overview");
    let active: Vec<&str> = series
        .cells()
        .filter(|cell| cell.active)
        .map(|cell| cell.striker.as_str())
        .collect();
    assert_eq!(active, vec!["Virat Kohli", "Virat Kohli"]);

    selection.toggle_player("Jasprit Bumrah");
    selection.set_range(2, 50);
    let series = bind_tournament_overview(
        &india_tournament(),
        "India",
        &selection,
        &TournamentOverviewOptions::default(),
        0.2,
    )
    .expect("bind overview");
    assert_eq!(series.cells().filter(|cell| cell.active).count(), 0);
    assert!(series.cells().all(|cell| cell.emphasis() == Emphasis::Dimmed));
}

#[test]
fn hovered_player_outlines_their_balls() {
    let mut selection = SelectionState::new();
    selection.set_hover(Some(HoverTarget::Player("Mitchell Starc".to_owned())));

    let series = bind_tournament_overview(
        &india_tournament(),
        "India",
        &selection,
        &TournamentOverviewOptions::default(),
        0.2,
    )
    .expect("bind overview");
    assert_eq!(series.cells().filter(|cell| cell.highlighted).count(), 2);

    let frame = series.to_render_frame();
    let outlined = frame
        .rects
        .iter()
        .filter(|rect| rect.stroke_width == 3.0)
        .count();
    assert_eq!(outlined, 2);
}

#[test]
fn over_summaries_stack_runs_then_wickets() {
    let series = bind_tournament_overview(
        &india_tournament(),
        "India",
        &SelectionState::new(),
        &TournamentOverviewOptions::default(),
        0.2,
    )
    .expect("bind overview");

    let column = series.column(0).expect("first match");
    let first_over: Vec<_> = column
        .summary
        .iter()
        .filter(|block| block.inning == Inning::First && block.display_over == 1)
        .collect();
    assert_eq!(first_over.len(), 2);
    assert_eq!(first_over[0].block.layer, SummaryLayer::Runs);
    assert_eq!(first_over[0].block.color, team_color("India"));
    assert_eq!(first_over[1].block.layer, SummaryLayer::Wickets);
    assert_abs_diff_eq!(
        first_over[1].x,
        first_over[0].x + first_over[0].width,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(first_over[0].width, column.width * 4.0 / 6.0, epsilon = 1e-9);

    let second_inning = column
        .summary
        .iter()
        .find(|block| block.inning == Inning::Second)
        .expect("bowling summary");
    assert_abs_diff_eq!(second_inning.width, column.width, epsilon = 1e-9);
    assert_abs_diff_eq!(second_inning.block.y, 460.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        second_inning.block.y + second_inning.block.height,
        CANVAS_HEIGHT - (370.0 - 330.0 / 50.0),
        epsilon = 1e-9
    );
}

#[test]
fn view_mode_selects_cells_or_summaries() {
    let mut selection = SelectionState::new();
    let mut renderer = NullRenderer::default();

    let series = bind_tournament_overview(
        &india_tournament(),
        "India",
        &selection,
        &cancelled_options(),
        0.2,
    )
    .expect("bind overview");
    render_series(&series, &mut renderer).expect("render cells");
    let cell_rects = renderer.last_rect_count;
    assert_eq!(cell_rects, 1 + 3 + 5);

    selection.set_view_mode(ViewMode::OverSummary);
    let series = bind_tournament_overview(
        &india_tournament(),
        "India",
        &selection,
        &cancelled_options(),
        0.2,
    )
    .expect("bind overview");
    assert_eq!(series.view_mode, ViewMode::OverSummary);
    render_series(&series, &mut renderer).expect("render summaries");
    let summary_blocks: usize = series.columns.iter().map(|c| c.summary.len()).sum();
    assert_eq!(renderer.last_rect_count, 1 + 3 + summary_blocks);
    assert_eq!(renderer.frames_rendered, 2);
}

#[test]
fn cancelled_label_is_bold_and_colored() {
    let series = bind_tournament_overview(
        &TeamMatches::default(),
        "India",
        &SelectionState::new(),
        &cancelled_options(),
        0.2,
    )
    .expect("bind overview");

    let frame = series.to_render_frame();
    let label = frame
        .texts
        .iter()
        .find(|text| text.text == "Cancelled")
        .expect("cancelled label");
    assert!(label.bold);
    assert_eq!(label.color.to_hex(), "#D82E08");
}

#[test]
fn extra_matches_beyond_the_columns_are_dropped() {
    let mut matches = TeamMatches::default();
    for index in 0..(MATCH_SLOTS + 2) {
        matches.batting.push(group(
            &format!("{index}"),
            "Opponent",
            "India",
            Vec::new(),
        ));
    }

    let series = bind_tournament_overview(
        &matches,
        "India",
        &SelectionState::new(),
        &TournamentOverviewOptions::default(),
        0.2,
    )
    .expect("bind overview");
    assert_eq!(series.columns.len(), MATCH_SLOTS);
    assert_eq!(
        series.column(MATCH_SLOTS - 1).map(|c| c.stage),
        Some(MatchStage::Final)
    );
}

#[test]
fn invalid_dimmed_opacity_is_rejected() {
    let error = bind_tournament_overview(
        &india_tournament(),
        "India",
        &SelectionState::new(),
        &TournamentOverviewOptions::default(),
        1.5,
    )
    .expect_err("opacity above one");
    assert!(matches!(error, VizError::InvalidData(_)));
}
