//! Render benchmarks.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wirevana_interpreter::{Interpreter, RenderOptions, SessionState};
use wirevana_parser::parse_document;
use wirevana_render::render_html;
use wirevana_resolver::BindingResolver;

const LOANS: &str = include_str!("../tests/fixtures/loans.json");

fn parse_loans(c: &mut Criterion) {
    c.bench_function("parse_loans", |b| b.iter(|| parse_document(black_box(LOANS))));
}

fn render_list_page(c: &mut Criterion) {
    let definition = parse_document(LOANS).unwrap();
    let mut session = SessionState::initial(&definition);
    session.select_tab(&definition, "List");
    let bindings = BindingResolver::new(Utc.with_ymd_and_hms(2024, 2, 20, 12, 0, 0).unwrap());
    let options = RenderOptions::default();

    c.bench_function("render_list_page", |b| {
        b.iter(|| Interpreter::new(black_box(&definition), &session, &bindings, &options).render())
    });

    let screen = Interpreter::new(&definition, &session, &bindings, &options).render();
    c.bench_function("serialize_list_page", |b| b.iter(|| render_html(black_box(&screen))));
}

criterion_group!(benches, parse_loans, render_list_page);
criterion_main!(benches);
