//! Performance benchmarks for the DayFlow HRMS engine.
//!
//! Targets:
//! - Single salary recompute: < 20μs mean
//! - Batch of 1000 recomputes: < 20ms mean
//! - Salary update through the HTTP API: < 1ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use uuid::Uuid;

use dayflow_hrms::api::{AppState, create_router};
use dayflow_hrms::calculation::{
    MonthWindow, SalaryUpdate, apply_salary_update, calculate_work_hours, recompute_salary,
    summarize_month,
};
use dayflow_hrms::config::{ConfigLoader, SalaryDefaults};
use dayflow_hrms::models::{
    AttendanceRecord, AttendanceStatus, Company, Employee, Role, SalaryProfile,
};
use dayflow_hrms::store::MemoryStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a default profile with the given monthly wage.
fn create_profile(monthly_wage: i64) -> SalaryProfile {
    let mut profile = SalaryProfile::new(Uuid::new_v4(), &SalaryDefaults::default(), Utc::now());
    profile.monthly_wage = Decimal::from(monthly_wage);
    profile.yearly_wage = Decimal::from(monthly_wage * 12);
    profile
}

/// Benchmark: one recompute of a 50000/month profile.
fn bench_single_recompute(c: &mut Criterion) {
    let profile = create_profile(50_000);
    let computed_at = Utc::now();

    c.bench_function("single_recompute", |b| {
        b.iter(|| recompute_salary(black_box(&profile), computed_at))
    });
}

/// Benchmark: merge a wage change and recompute.
fn bench_update_and_recompute(c: &mut Criterion) {
    let profile = create_profile(50_000);
    let update = SalaryUpdate {
        monthly_wage: Some(Decimal::from(72_500)),
        ..Default::default()
    };
    let computed_at = Utc::now();

    c.bench_function("update_and_recompute", |b| {
        b.iter(|| {
            let merged = apply_salary_update(black_box(&profile), black_box(&update)).unwrap();
            recompute_salary(&merged, computed_at)
        })
    });
}

/// Benchmark: recompute payroll for companies of increasing size.
fn bench_batch_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_recompute");
    let computed_at = Utc::now();

    for size in [10usize, 100, 1000].iter() {
        let profiles: Vec<SalaryProfile> = (0..*size)
            .map(|i| create_profile(20_000 + (i as i64) * 137))
            .collect();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("profiles", size), size, |b, _| {
            b.iter(|| {
                profiles
                    .iter()
                    .map(|p| recompute_salary(p, computed_at))
                    .collect::<Vec<_>>()
            })
        });
    }

    group.finish();
}

/// Benchmark: work hours and a month of attendance summarised.
fn bench_attendance(c: &mut Criterion) {
    let check_in = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    let check_out = Utc.with_ymd_and_hms(2026, 3, 2, 18, 30, 0).unwrap();

    c.bench_function("work_hours", |b| {
        b.iter(|| {
            calculate_work_hours(
                black_box(check_in),
                black_box(check_out),
                Decimal::ONE,
                Decimal::from(8),
            )
        })
    });

    let window = MonthWindow::new(2026, 3).unwrap();
    let records: Vec<AttendanceRecord> = (1..=31)
        .filter_map(|day| NaiveDate::from_ymd_opt(2026, 3, day))
        .map(|date| {
            let mut record = AttendanceRecord::new(Uuid::nil(), date);
            record.status = AttendanceStatus::Present;
            record
        })
        .collect();

    c.bench_function("summarize_month", |b| {
        b.iter(|| summarize_month(black_box(&window), black_box(&records), &[]))
    });
}

/// Benchmark: PUT /api/profile/{id}/salary through the router.
fn bench_salary_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(MemoryStore::new());

    let (admin_id, employee_id) = rt.block_on(async {
        let mut data = store.write().await;
        let company = Company::new("Bench Corp", "BC", Utc::now());
        let admin = Employee::new(
            company.id,
            "BCADMI20260001",
            Role::Admin,
            "Admin",
            "User",
            "admin@bench.io",
            Utc::now(),
        );
        let employee = Employee::new(
            company.id,
            "BCEMPL20260001",
            Role::Employee,
            "Emp",
            "Loyee",
            "emp@bench.io",
            Utc::now(),
        );
        let ids = (admin.id, employee.id);
        data.insert_company(company).unwrap();
        data.insert_employee(admin).unwrap();
        data.insert_employee(employee).unwrap();
        ids
    });

    let config = ConfigLoader::load("./config").expect("Failed to load config");
    let router = create_router(AppState::with_store(config, store));
    let uri = format!("/api/profile/{}/salary", employee_id);
    let body = serde_json::json!({ "monthlyWage": "50000" }).to_string();

    c.bench_function("salary_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("PUT")
                        .uri(&uri)
                        .header("Content-Type", "application/json")
                        .header("x-user-id", admin_id.to_string())
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_recompute,
    bench_update_and_recompute,
    bench_batch_recompute,
    bench_attendance,
    bench_salary_endpoint,
);
criterion_main!(benches);
