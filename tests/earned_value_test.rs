//! Worked ledger examples, end to end from raw JSON rows.

mod common;

use common::{fixed_price_job, money};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wipcore::{evaluate, parse_jobs, summarize, WipError};

#[test]
fn classic_over_billed_job() {
    let mut job = fixed_price_job("obill");
    job.contract = money(dec!(1000000));
    job.budget = money(dec!(800000));
    job.costs = money(dec!(400000)); // 50% complete
    job.invoiced = money(dec!(600000));

    let ev = evaluate(&job);
    assert_eq!(ev.earned_revenue, dec!(500000));
    assert_eq!(ev.billing_difference, dec!(100000));
}

#[test]
fn zero_budget_job_is_all_backlog() {
    let mut job = fixed_price_job("zb");
    job.contract = money(dec!(100000));
    job.budget = money(Decimal::ZERO);
    job.costs = money(dec!(15000));

    let ev = evaluate(&job);
    assert_eq!(ev.earned_revenue, Decimal::ZERO);

    let summary = summarize(&[job]);
    assert_eq!(summary.backlog_to_earn, dec!(100000));
}

#[test]
fn rows_round_trip_through_json_ingest() {
    let mut job = fixed_price_job("rt");
    job.costs = money(dec!(40000));
    job.invoiced = money(dec!(45000));

    let raw = serde_json::to_string(&vec![job.clone()]).unwrap();
    let parsed = parse_jobs(&raw).unwrap();
    assert_eq!(parsed, vec![job.clone()]);

    // Same figures before and after the round trip.
    assert_eq!(evaluate(&parsed[0]), evaluate(&job));
}

#[test]
fn corrupt_on_hold_row_fails_loudly() {
    let mut job = fixed_price_job("bad");
    job.on_hold_date = Some(common::date(2026, 2, 1)); // status still Active

    let raw = serde_json::to_string(&vec![job]).unwrap();
    match parse_jobs(&raw) {
        Err(WipError::OnHoldInvariant { job_id }) => assert_eq!(job_id, "bad"),
        other => panic!("expected on-hold invariant error, got {other:?}"),
    }
}
