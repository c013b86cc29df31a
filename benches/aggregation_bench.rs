use cricket_charts::charts::{ChartLayout, bind_over_skyline, bind_score_timeline};
use cricket_charts::core::{BallEvent, ExtrasType, Inning, OverNotation, compute_inning_data};
use cricket_charts::interaction::SelectionState;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_inning(inning: Inning, cumul_start: u32) -> Vec<BallEvent> {
    let mut cumul = cumul_start;
    let mut balls = Vec::with_capacity(300);
    for over in 0..50_u32 {
        for ball in 1..=6_u32 {
            let ovr = f64::from(over) + f64::from(ball) / 10.0;
            let notation = OverNotation::parse(ovr).expect("generated over");
            let runs = (over * 7 + ball * 3) % 7;
            let extras = if (over + ball) % 17 == 0 {
                ExtrasType::Wide
            } else {
                ExtrasType::None
            };
            let runs_w_extras = runs + u32::from(extras.is_extra());
            cumul += runs_w_extras;
            balls.push(BallEvent {
                match_id: 1,
                inning,
                ovr,
                notation,
                ball_within_over: ball,
                batting_team: "Australia".to_owned(),
                bowling_team: "India".to_owned(),
                striker: format!("Batter {}", over / 5),
                non_striker: format!("Batter {}", over / 5 + 1),
                bowler: format!("Bowler {}", over % 5),
                runs_batter: runs,
                runs_w_extras,
                extras,
                wicket: ball == 6 && over % 5 == 4,
                who_out: None,
                wicket_method: None,
                cumul_runs: cumul,
            });
        }
    }
    balls
}

fn full_match() -> Vec<BallEvent> {
    let mut balls = generated_inning(Inning::First, 0);
    balls.extend(generated_inning(Inning::Second, 0));
    balls
}

fn bench_inning_data_600(c: &mut Criterion) {
    let balls = full_match();

    c.bench_function("inning_data_600", |b| {
        b.iter(|| {
            let _ = compute_inning_data(black_box(&balls), black_box(Inning::Second))
                .expect("second inning");
        })
    });
}

fn bench_over_skyline_300(c: &mut Criterion) {
    let balls = generated_inning(Inning::First, 0);
    let mut selection = SelectionState::new();
    selection.set_range(10, 40);
    let layout = ChartLayout::over_chart();

    c.bench_function("over_skyline_300", |b| {
        b.iter(|| {
            let _ = bind_over_skyline(black_box(&balls), black_box(&selection), &layout)
                .expect("bind skyline");
        })
    });
}

fn bench_score_timeline_600(c: &mut Criterion) {
    let balls = full_match();
    let selection = SelectionState::new();
    let layout = ChartLayout::over_chart();

    c.bench_function("score_timeline_600", |b| {
        b.iter(|| {
            let _ = bind_score_timeline(black_box(&balls), black_box(&selection), &layout)
                .expect("bind timeline");
        })
    });
}

criterion_group!(
    benches,
    bench_inning_data_600,
    bench_over_skyline_300,
    bench_score_timeline_600
);
criterion_main!(benches);
