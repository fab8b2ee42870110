use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gitsheet::{build_timesheet, CommitInfo, EstimateOptions};

fn synthetic_history(len: usize) -> Vec<CommitInfo> {
    let mut at = Utc.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap();
    (0..len)
        .map(|i| {
            // mostly short gaps with an overnight break every 12 commits
            let gap = if i % 12 == 0 { 14 * 3600 } else { 600 + (i as i64 * 97) % 3000 };
            at += Duration::seconds(gap);
            CommitInfo {
                id: format!("{i:040x}"),
                author_name: if i % 3 == 0 { "Alice" } else { "Bob" }.to_string(),
                author_email: if i % 3 == 0 { "alice@example.com" } else { "bob@example.com" }
                    .to_string(),
                message: format!("change {i}"),
                timestamp: at,
            }
        })
        .collect()
}

fn bench_build_timesheet(c: &mut Criterion) {
    let commits = synthetic_history(50_000);
    let unfiltered = EstimateOptions {
        min_unit_worked: 15,
        ..EstimateOptions::default()
    };
    let filtered = EstimateOptions {
        filter: "bob".to_string(),
        ..unfiltered.clone()
    };

    c.bench_function("timesheet_50k_unfiltered", |b| {
        b.iter(|| build_timesheet(black_box(&commits), black_box(&unfiltered), true))
    });
    c.bench_function("timesheet_50k_filtered", |b| {
        b.iter(|| build_timesheet(black_box(&commits), black_box(&filtered), true))
    });
}

criterion_group!(benches, bench_build_timesheet);
criterion_main!(benches);
