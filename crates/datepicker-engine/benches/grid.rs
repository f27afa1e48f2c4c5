use std::hint::black_box;

use chrono::Weekday;
use criterion::{criterion_group, criterion_main, Criterion};
use datepicker_engine::{
    render_grid, CalendarDate, DateParser, DateRange, GridInput, NaturalDateParser,
};

fn bench_render_grid(c: &mut Criterion) {
    let date = |s: &str| s.parse::<CalendarDate>().unwrap();
    let input = GridInput {
        view: date("2024-02-01").year_month(),
        selection: Some(date("2024-02-29")),
        range: DateRange::between(date("2024-02-05"), date("2024-03-10")).ok(),
        today: date("2024-02-14"),
        first_day_of_week: Weekday::Mon,
    };

    c.bench_function("render_grid", |b| b.iter(|| render_grid(black_box(&input))));
}

fn bench_parse(c: &mut Criterion) {
    let parser = NaturalDateParser::default();
    let reference = CalendarDate::from_ymd_opt(2026, 2, 18).unwrap();
    let inputs = [
        "2024-01-15",
        "next friday",
        "last day of next month",
        "jan 15th, 2024",
        "15/01/2024",
        "not a date",
    ];

    let mut group = c.benchmark_group("parse");
    for text in inputs {
        group.bench_function(text, |b| b.iter(|| parser.parse(black_box(text), reference)));
    }
    group.finish();
}

criterion_group!(benches, bench_render_grid, bench_parse);
criterion_main!(benches);
