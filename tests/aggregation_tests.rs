use cricket_charts::VizError;
use cricket_charts::core::{
    BallEvent, ExtrasType, Inning, InningCache, OverNotation, OverSummary, Partnership,
    batting_order, belongs_to_inning, compute_inning_data, compute_inning_stats,
    compute_over_summaries, compute_partnership_order, over_score_progression,
    partnerships_for_inning,
};

fn ball(inning: Inning, ovr: f64, runs_batter: u32, cumul_runs: u32) -> BallEvent {
    let notation = OverNotation::parse(ovr).expect("valid over");
    BallEvent {
        match_id: 11,
        inning,
        ovr,
        notation,
        ball_within_over: notation.ball,
        batting_team: match inning {
            Inning::First => "India".to_owned(),
            Inning::Second => "Australia".to_owned(),
        },
        bowling_team: match inning {
            Inning::First => "Australia".to_owned(),
            Inning::Second => "India".to_owned(),
        },
        striker: "A".to_owned(),
        non_striker: "B".to_owned(),
        bowler: "Z".to_owned(),
        runs_batter,
        runs_w_extras: runs_batter,
        extras: ExtrasType::None,
        wicket: false,
        who_out: None,
        wicket_method: None,
        cumul_runs,
    }
}

fn first_over(runs: &[u32]) -> Vec<BallEvent> {
    let mut cumul = 0;
    runs.iter()
        .enumerate()
        .map(|(index, &run)| {
            cumul += run;
            ball(Inning::First, 0.1 * (index + 1) as f64, run, cumul)
        })
        .collect()
}

fn partnership(position: u32, batsman_1: &str, batsman_2: &str) -> Partnership {
    Partnership {
        match_id: Some(11),
        team: "India".to_owned(),
        position,
        batsman_1: batsman_1.to_owned(),
        batsman_2: batsman_2.to_owned(),
        batsman_1_score: 10,
        batsman_2_score: 5,
        score: 16,
    }
}

#[test]
fn single_over_scenario_totals_batter_runs() {
    let balls = first_over(&[0, 1, 4, 0, 2, 6]);

    let summaries = compute_over_summaries(&balls);
    assert_eq!(
        summaries,
        vec![OverSummary {
            over_index: 0,
            runs: 13,
            wickets: 0
        }]
    );

    let stats = compute_inning_stats(&balls).expect("non-empty inning");
    assert_eq!(stats.total_runs, balls[5].cumul_runs);
    assert_eq!(stats.total_runs, 13);
    assert_eq!(stats.total_wickets, 0);
    assert_eq!(stats.scoreline(), "13-0");
}

#[test]
fn total_runs_come_from_the_last_ball_not_a_sum() {
    let mut balls = first_over(&[1, 1]);
    balls[1].cumul_runs = 40;

    let stats = compute_inning_stats(&balls).expect("non-empty inning");
    assert_eq!(stats.total_runs, 40);
}

#[test]
fn wide_wicket_is_excluded_from_tally_but_keeps_its_runs() {
    let mut balls = first_over(&[0, 1, 0]);
    balls[1].extras = ExtrasType::Wide;
    balls[1].runs_batter = 0;
    balls[1].runs_w_extras = 1;
    balls[1].wicket = true;
    balls[2].wicket = true;

    let stats = compute_inning_stats(&balls).expect("non-empty inning");
    assert_eq!(stats.total_wickets, 1);

    let summaries = compute_over_summaries(&balls);
    assert_eq!(summaries[0].wickets, 1, "stacked summary applies the same guard");

    assert_eq!(balls[1].describe().runs_line, "A: 1 Wides");
}

#[test]
fn no_ball_wicket_is_excluded_as_well() {
    let mut balls = first_over(&[0, 0]);
    balls[0].extras = ExtrasType::NoBall;
    balls[0].wicket = true;

    let stats = compute_inning_stats(&balls).expect("non-empty inning");
    assert_eq!(stats.total_wickets, 0);
}

#[test]
fn empty_inning_is_an_error_for_stats() {
    let error = compute_inning_stats(&[]).expect_err("empty inning");
    assert_eq!(error, VizError::EmptyInning);
}

#[test]
fn mixed_innings_are_surfaced() {
    let balls = vec![
        ball(Inning::First, 0.1, 1, 1),
        ball(Inning::Second, 0.1, 2, 2),
    ];
    let error = compute_inning_stats(&balls).expect_err("two innings");
    assert_eq!(error, VizError::MixedInnings { first: 1, found: 2 });
}

#[test]
fn over_summaries_keep_empty_buckets() {
    let balls = vec![
        ball(Inning::First, 0.1, 1, 1),
        ball(Inning::First, 0.2, 2, 3),
        ball(Inning::First, 2.1, 4, 7),
        ball(Inning::First, 2.2, 0, 7),
    ];

    let summaries = compute_over_summaries(&balls);
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0].runs, 3);
    assert_eq!(summaries[1], OverSummary { over_index: 1, runs: 0, wickets: 0 });
    assert_eq!(summaries[2].runs, 4);
    assert_eq!(summaries[2].display_over(), 3);
}

#[test]
fn over_summaries_count_batter_runs_only() {
    let mut balls = first_over(&[1, 0]);
    balls[1].extras = ExtrasType::LegBye;
    balls[1].runs_w_extras = 4;

    assert_eq!(compute_over_summaries(&balls)[0].runs, 1);
    assert!(compute_over_summaries(&[]).is_empty());
}

#[test]
fn over_summary_runs_saturate_instead_of_overflowing() {
    let balls = vec![
        ball(Inning::First, 0.1, u32::MAX, u32::MAX),
        ball(Inning::First, 0.2, 6, u32::MAX),
    ];

    let summaries = compute_over_summaries(&balls);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].runs, u32::MAX);
}

#[test]
fn over_summary_tooltip_omits_zero_lines() {
    let summary = OverSummary {
        over_index: 4,
        runs: 9,
        wickets: 0,
    };
    assert_eq!(summary.describe(), vec!["Over 5", "Runs Scored: 9"]);

    let summary = OverSummary {
        over_index: 0,
        runs: 0,
        wickets: 2,
    };
    assert_eq!(summary.describe(), vec!["Over 1", "Wickets Taken: 2"]);
}

#[test]
fn inning_data_is_none_when_the_inning_has_no_balls() {
    let balls = first_over(&[1, 2, 3]);

    assert!(compute_inning_data(&balls, Inning::Second).is_none());

    let data = compute_inning_data(&balls, Inning::First).expect("first inning present");
    assert_eq!(data.inning, Inning::First);
    assert_eq!(data.balls.len(), 3);
    assert_eq!(data.batting_team, "India");
    assert_eq!(data.stats.total_runs, 6);
    assert_eq!(data.over_summaries.len(), 1);
}

#[test]
fn inning_data_filters_a_match_wide_sequence() {
    let mut balls = first_over(&[1, 1]);
    balls.push(ball(Inning::Second, 0.1, 4, 4));
    balls.push(ball(Inning::Second, 0.2, 6, 10));

    let second = compute_inning_data(&balls, Inning::Second).expect("second inning");
    assert_eq!(second.batting_team, "Australia");
    assert_eq!(second.stats.total_runs, 10);
    assert!(second.balls.iter().all(|ball| ball.inning == Inning::Second));
}

#[test]
fn aggregation_never_mutates_its_input() {
    let balls = first_over(&[0, 1, 4, 0, 2, 6]);
    let snapshot = balls.clone();

    let first = compute_inning_data(&balls, Inning::First);
    let second = compute_inning_data(&balls, Inning::First);

    assert_eq!(first, second);
    assert_eq!(balls, snapshot);
}

#[test]
fn batting_order_follows_first_appearance() {
    let mut balls = first_over(&[0, 0, 0, 0]);
    balls[1].striker = "B".to_owned();
    balls[1].non_striker = "A".to_owned();
    balls[2].striker = "C".to_owned();
    balls[2].non_striker = "B".to_owned();
    balls[3].striker = "B".to_owned();
    balls[3].non_striker = "D".to_owned();

    assert_eq!(batting_order(&balls), vec!["A", "B", "C", "D"]);
}

#[test]
fn partnership_scenario_keeps_stable_order() {
    let order: Vec<String> = ["A", "B", "C", "D"].map(str::to_owned).to_vec();
    let records = vec![partnership(1, "A", "B"), partnership(2, "B", "C")];

    let ordered = compute_partnership_order(&records, &order);
    let positions: Vec<u32> = ordered.iter().map(|p| p.position).collect();
    assert_eq!(positions, vec![1, 2]);
}

#[test]
fn partnership_order_sorts_by_earlier_batsman_then_partner() {
    let order: Vec<String> = ["A", "B", "C", "D"].map(str::to_owned).to_vec();
    let records = vec![
        partnership(3, "C", "D"),
        partnership(2, "A", "C"),
        partnership(1, "A", "B"),
        partnership(9, "X", "Y"),
    ];

    let ordered = compute_partnership_order(&records, &order);
    let positions: Vec<u32> = ordered.iter().map(|p| p.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 9], "unknown names sort last");
}

#[test]
fn membership_requires_second_batsman_after_first() {
    let order: Vec<String> = ["A", "B", "C", "D"].map(str::to_owned).to_vec();

    assert!(belongs_to_inning(&partnership(1, "A", "B"), &order));
    assert!(belongs_to_inning(&partnership(3, "B", "D"), &order));
    assert!(!belongs_to_inning(&partnership(1, "B", "A"), &order));
    assert!(!belongs_to_inning(&partnership(1, "A", "E"), &order));
}

#[test]
fn partnerships_for_inning_selects_team_and_orientation() {
    let order: Vec<String> = ["A", "B", "C"].map(str::to_owned).to_vec();
    let mut other_team = partnership(1, "A", "B");
    other_team.team = "Australia".to_owned();
    let pool = vec![
        partnership(2, "B", "C"),
        partnership(1, "A", "B"),
        partnership(1, "B", "A"),
        other_team,
    ];

    let selected = partnerships_for_inning(&pool, "India", &order);
    let pairs: Vec<(&str, &str)> = selected.iter().map(Partnership::pair).collect();
    assert_eq!(pairs, vec![("A", "B"), ("B", "C")]);
}

#[test]
fn score_progression_groups_by_displayed_over() {
    let mut balls = vec![
        ball(Inning::First, 0.1, 1, 1),
        ball(Inning::First, 0.6, 4, 5),
        ball(Inning::First, 1.1, 0, 5),
        ball(Inning::First, 1.2, 6, 11),
        ball(Inning::First, 1.3, 0, 11),
    ];
    balls[2].wicket = true;
    balls[4].wicket = true;

    let progression = over_score_progression(&balls);
    assert_eq!(progression.len(), 2);
    assert_eq!(progression[0].over, 1);
    assert_eq!(progression[0].max_score, 5);
    assert!(progression[0].wickets.is_empty());
    assert_eq!(progression[1].over, 2);
    assert_eq!(progression[1].max_score, 11);
    assert_eq!(progression[1].wickets.len(), 2);
}

#[test]
fn inning_cache_memoizes_per_match_and_inning() {
    let balls = first_over(&[1, 2, 3]);
    let mut cache = InningCache::new();

    let total = cache
        .get_or_compute(11, Inning::First, &balls)
        .map(|data| data.stats.total_runs);
    assert_eq!(total, Some(6));
    assert!(cache.get_or_compute(11, Inning::Second, &balls).is_none());
    assert!(cache.get_or_compute(11, Inning::First, &balls).is_some());

    let stats = cache.stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.size, 2);
}

#[test]
fn inning_cache_recomputes_after_invalidation() {
    let balls = first_over(&[1, 2, 3]);
    let replaced = first_over(&[6, 6]);
    let mut cache = InningCache::new();

    cache.get_or_compute(11, Inning::First, &balls);
    cache.get_or_compute(12, Inning::First, &balls);

    let stale = cache
        .get_or_compute(11, Inning::First, &replaced)
        .map(|data| data.stats.total_runs);
    assert_eq!(stale, Some(6), "cached until invalidated");

    cache.invalidate_match(11);
    assert_eq!(cache.stats().size, 1);
    let fresh = cache
        .get_or_compute(11, Inning::First, &replaced)
        .map(|data| data.stats.total_runs);
    assert_eq!(fresh, Some(12));

    cache.clear();
    assert_eq!(cache.stats().size, 0);
}
