//! Performance benchmarks for the payroll engine.
//!
//! - Single payroll calculation (direct)
//! - Single calculation through `POST /calculate`
//! - Batch of 100 employees
//! - Batch of 1000 employees
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, CalculationRequest, create_router};
use payroll_engine::calculation::PayrollCalculator;
use payroll_engine::config::{ConfigLoader, StatutoryRuleSet};
use payroll_engine::models::{Employee, PayrollInput, SalaryStructure};
use payroll_engine::orchestrator::{BatchRunner, CalculatorFactory, InMemoryDataSource};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/india").expect("Failed to load config")
}

fn joining_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 4, 1).expect("valid date")
}

fn salary_for(index: usize) -> SalaryStructure {
    SalaryStructure {
        id: Some(format!("ss_{:04}", index)),
        monthly_basic: Decimal::from(12000 + (index % 50) as i64 * 1000),
        monthly_da: Decimal::from(2000),
        monthly_hra: Decimal::from(5000),
        monthly_allowance: Decimal::from(1500),
    }
}

fn partial_month() -> PayrollInput {
    let mut attendance = PayrollInput::full_month(30);
    attendance.days_worked = 26;
    attendance.days_absent = 4;
    attendance
}

fn create_batch(size: usize) -> (Vec<Employee>, InMemoryDataSource) {
    let employees: Vec<Employee> = (0..size)
        .map(|i| Employee::new(format!("emp_bench_{:04}", i), joining_date()))
        .collect();

    let data = employees
        .iter()
        .enumerate()
        .fold(InMemoryDataSource::new(), |data, (i, employee)| {
            let data = data.with_salary_structure(employee.id.clone(), salary_for(i));
            if i % 4 == 0 {
                data.with_attendance(employee.id.clone(), "2024-03", partial_month())
            } else {
                data
            }
        });

    (employees, data)
}

/// Benchmark: one employee computed directly.
fn bench_single_calculation(c: &mut Criterion) {
    let calculator =
        PayrollCalculator::new(StatutoryRuleSet::india_default()).expect("valid rules");
    let employee = Employee::new("emp_bench_001", joining_date());
    let salary = salary_for(3);
    let input = PayrollInput::full_month(30);

    c.bench_function("single_calculation", |b| {
        b.iter(|| black_box(calculator.compute(&employee, &salary, &input)))
    });
}

/// Benchmark: one employee through the HTTP handler.
fn bench_single_http_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));

    let request = CalculationRequest {
        jurisdiction: Some("MH".to_string()),
        employee: Employee::new("emp_bench_001", joining_date()),
        salary_structure: salary_for(3),
        attendance: PayrollInput::full_month(30),
    };
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("single_http_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batch runs of 100 and 1000 employees.
fn bench_batches(c: &mut Criterion) {
    let factory = CalculatorFactory::new(load_config());

    let mut group = c.benchmark_group("batch_processing");
    for size in [100usize, 1000] {
        let (employees, data) = create_batch(size);
        let runner = BatchRunner::new(&factory, "MH", data).expect("valid rules");

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &employees, |b, employees| {
            b.iter(|| black_box(runner.run(employees, "2024-03")))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_single_calculation,
    bench_single_http_request,
    bench_batches
);
criterion_main!(benches);
