//! Integration tests for the DayFlow HRMS API.
//!
//! Every scenario drives the router end to end with `tower::ServiceExt::oneshot`:
//! a company is registered, staff are created through the API and the
//! salary, attendance and leave endpoints are exercised as those users.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;
use uuid::Uuid;

use dayflow_hrms::api::{AppState, create_router};
use dayflow_hrms::config::ConfigLoader;

// ============================================================================
// Test Helpers
// ============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("Expected a decimal, got {}", other),
    }
}

fn id_of(value: &Value) -> Uuid {
    Uuid::parse_str(value["id"].as_str().unwrap()).unwrap()
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    user: Option<Uuid>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user.to_string());
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

struct Company {
    router: Router,
    owner: Uuid,
    admin: Uuid,
    employee: Uuid,
}

/// Registers "Odoo India" and creates one admin and one employee.
async fn setup_company() -> Company {
    let router = create_router_for_test();

    let (status, registration) = send(
        &router,
        "POST",
        "/api/companies",
        None,
        Some(json!({
            "companyName": "Odoo India",
            "email": "owner@odoo.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", registration);
    let owner = id_of(&registration["employee"]);

    let (status, admin) = send(
        &router,
        "POST",
        "/api/employees",
        Some(owner),
        Some(json!({
            "firstName": "Asha",
            "lastName": "Rao",
            "email": "asha@odoo.com",
            "role": "admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", admin);
    let admin = id_of(&admin);

    let (status, employee) = send(
        &router,
        "POST",
        "/api/employees",
        Some(admin),
        Some(json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "John@Odoo.com",
            "department": "Engineering"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", employee);
    let employee = id_of(&employee);

    Company {
        router,
        owner,
        admin,
        employee,
    }
}

// ============================================================================
// Onboarding and directory
// ============================================================================

#[tokio::test]
async fn test_registration_and_employee_creation() {
    let company = setup_company().await;

    let (status, listing) = send(
        &company.router,
        "GET",
        "/api/employees",
        Some(company.employee),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["firstName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Asha", "John", "Super"]);

    let john = &listing[1];
    assert_eq!(john["loginId"], "ODJODO".to_string() + &Utc::now().format("%Y").to_string() + "0001");
    assert_eq!(john["email"], "john@odoo.com");
    assert_eq!(john["workStatus"], "absent");
}

#[tokio::test]
async fn test_duplicate_company_is_conflict() {
    let company = setup_company().await;

    let (status, error) = send(
        &company.router,
        "POST",
        "/api/companies",
        None,
        Some(json!({ "companyName": "Odin Labs", "email": "odin@labs.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "CONFLICT");
}

#[tokio::test]
async fn test_employee_cannot_create_employees() {
    let company = setup_company().await;

    let (status, error) = send(
        &company.router,
        "POST",
        "/api/employees",
        Some(company.employee),
        Some(json!({
            "firstName": "Mina",
            "lastName": "Shah",
            "email": "mina@odoo.com"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn test_unknown_caller_is_unauthenticated() {
    let company = setup_company().await;

    let (status, error) = send(
        &company.router,
        "GET",
        "/api/employees",
        Some(Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_get_employee_by_id() {
    let company = setup_company().await;

    let uri = format!("/api/employees/{}", company.admin);
    let (status, admin) = send(&company.router, "GET", &uri, Some(company.employee), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin["fullName"], "Asha Rao");

    let uri = format!("/api/employees/{}", Uuid::new_v4());
    let (status, error) = send(&company.router, "GET", &uri, Some(company.employee), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "EMPLOYEE_NOT_FOUND");
}

// ============================================================================
// Profiles
// ============================================================================

#[tokio::test]
async fn test_employee_profile_edit_ignores_restricted_fields() {
    let company = setup_company().await;

    let uri = format!("/api/profile/{}", company.employee);
    let (status, outcome) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.employee),
        Some(json!({
            "phone": "+91 98765 43210",
            "about": "Backend engineer",
            "bankName": "State Bank"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", outcome);
    assert_eq!(outcome["employee"]["phone"], "+91 98765 43210");
    assert_eq!(outcome["employee"]["bankName"], Value::Null);
    assert_eq!(outcome["ignoredFields"], json!(["bankName"]));
}

#[tokio::test]
async fn test_admin_profile_edit_covers_every_field() {
    let company = setup_company().await;

    let uri = format!("/api/profile/{}", company.employee);
    let (status, outcome) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.admin),
        Some(json!({
            "designation": "Backend Engineer",
            "residingAddress": "12 MG Road, Pune",
            "personalEmail": "John.Doe@Gmail.com",
            "gender": "male",
            "maritalStatus": "single",
            "yearOfJoining": 2025,
            "uanNumber": "100200300400",
            "certifications": [{ "name": "CKA", "issuer": "CNCF" }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", outcome);
    assert_eq!(outcome["ignoredFields"], json!([]));

    let (status, profile) = send(&company.router, "GET", &uri, Some(company.admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let profile = &profile["profile"];
    assert_eq!(profile["residingAddress"], "12 MG Road, Pune");
    assert_eq!(profile["personalEmail"], "john.doe@gmail.com");
    assert_eq!(profile["gender"], "male");
    assert_eq!(profile["maritalStatus"], "single");
    assert_eq!(profile["yearOfJoining"], 2025);
    assert_eq!(profile["uanNumber"], "100200300400");
    assert_eq!(profile["certifications"][0]["issuer"], "CNCF");

    let (status, error) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.admin),
        Some(json!({ "email": "not-an-address" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_employee_cannot_edit_colleague_profile() {
    let company = setup_company().await;

    let uri = format!("/api/profile/{}", company.admin);
    let (status, _) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.employee),
        Some(json!({ "phone": "123" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_salary_is_private() {
    let company = setup_company().await;

    let uri = format!("/api/profile/{}", company.employee);
    let (status, own) = send(&company.router, "GET", &uri, Some(company.employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own["company"]["code"], "OD");
    assert!(own["salary"].is_object());

    let uri = format!("/api/profile/{}", company.admin);
    let (status, colleague) = send(&company.router, "GET", &uri, Some(company.employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(colleague["profile"]["firstName"], "Asha");
    assert!(colleague["salary"].is_null());
}

// ============================================================================
// Salary
// ============================================================================

#[tokio::test]
async fn test_salary_update_recomputes_components() {
    let company = setup_company().await;

    let uri = format!("/api/profile/{}/salary", company.employee);
    let (status, salary) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.admin),
        Some(json!({ "monthlyWage": "50000" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", salary);
    let profile = &salary["profile"];
    let components = &profile["components"];
    assert_eq!(decimal(&profile["yearlyWage"]), Decimal::from(600000));
    assert_eq!(decimal(&components["basicSalary"]["amount"]), Decimal::from(25000));
    assert_eq!(decimal(&components["houseRentAllowance"]["amount"]), Decimal::from(12500));
    assert_eq!(decimal(&components["standardAllowance"]["amount"]), Decimal::from(4167));
    assert_eq!(
        decimal(&components["performanceBonus"]["amount"]),
        Decimal::from_str("2082.5").unwrap()
    );
    assert_eq!(decimal(&components["fixedAllowance"]["amount"]), Decimal::from(4168));
    assert_eq!(
        decimal(&profile["providentFund"]["employeeContribution"]["amount"]),
        Decimal::from(3000)
    );
    assert_eq!(salary["overcommitted"], false);
    assert_eq!(decimal(&salary["totals"]["gross"]), Decimal::from(50000));
    assert_eq!(decimal(&salary["totals"]["net"]), Decimal::from(46800));
    assert!(!salary["auditTrace"]["steps"].as_array().unwrap().is_empty());

    let (status, fetched) = send(&company.router, "GET", &uri, Some(company.employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        decimal(&fetched["profile"]["components"]["fixedAllowance"]["amount"]),
        Decimal::from(4168)
    );
}

#[tokio::test]
async fn test_salary_overcommit_is_flagged() {
    let company = setup_company().await;

    let uri = format!("/api/profile/{}/salary", company.employee);
    let (status, salary) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.admin),
        Some(json!({
            "monthlyWage": "1000",
            "components": { "basicSalary": { "percentage": "200" } }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", salary);
    assert_eq!(salary["overcommitted"], true);
    assert_eq!(
        decimal(&salary["profile"]["components"]["basicSalary"]["amount"]),
        Decimal::from(2000)
    );
    assert_eq!(
        decimal(&salary["profile"]["components"]["fixedAllowance"]["amount"]),
        Decimal::ZERO
    );
    let warnings = salary["auditTrace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "WAGE_OVERCOMMITTED"));
}

#[tokio::test]
async fn test_salary_update_validation() {
    let company = setup_company().await;
    let uri = format!("/api/profile/{}/salary", company.employee);

    let (status, _) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.employee),
        Some(json!({ "monthlyWage": "90000" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, error) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.admin),
        Some(json!({ "components": { "bonus": { "percentage": "5" } } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PROFILE");

    let (status, error) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.admin),
        Some(json!({
            "components": { "basicSalary": { "computationType": "hourly" } }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(
        error["message"]
            .as_str()
            .is_some_and(|m| m.contains("unknown computation type"))
    );
}

#[tokio::test]
async fn test_salary_update_rejects_out_of_range_decimals() {
    let company = setup_company().await;
    let uri = format!("/api/profile/{}/salary", company.employee);

    let (status, error) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.admin),
        Some(json!({ "monthlyWage": "10000000000000000000000000000" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");

    let (status, error) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.admin),
        Some(json!({
            "monthlyWage": "100000",
            "components": { "basicSalary": { "percentage": "10000000000000000000000000" } }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PROFILE");

    // The stored profile is untouched and still serves.
    let (status, salary) = send(&company.router, "GET", &uri, Some(company.admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        decimal(&salary["profile"]["components"]["basicSalary"]["percentage"]),
        Decimal::from(50)
    );
}

// ============================================================================
// Admin management
// ============================================================================

#[tokio::test]
async fn test_owner_lists_and_deactivates_admins() {
    let company = setup_company().await;

    let (status, list) = send(&company.router, "GET", "/api/admins", Some(company.owner), None).await;
    assert_eq!(status, StatusCode::OK, "{}", list);
    assert_eq!(list["count"], 1);
    assert_eq!(list["admins"][0]["email"], "asha@odoo.com");

    let (status, _) = send(&company.router, "GET", "/api/admins", Some(company.admin), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/api/admins/{}", company.employee);
    let (status, _) = send(&company.router, "DELETE", &uri, Some(company.owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!("/api/admins/{}", company.admin);
    let (status, admin) = send(&company.router, "DELETE", &uri, Some(company.owner), None).await;
    assert_eq!(status, StatusCode::OK, "{}", admin);
    assert_eq!(admin["isActive"], false);

    let (_, list) = send(&company.router, "GET", "/api/admins", Some(company.owner), None).await;
    assert_eq!(list["count"], 0);

    // A deactivated admin can no longer act.
    let (status, error) = send(
        &company.router,
        "GET",
        "/api/employees",
        Some(company.admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "UNAUTHENTICATED");

    let (_, listing) = send(
        &company.router,
        "GET",
        "/api/employees",
        Some(company.employee),
        None,
    )
    .await;
    assert_eq!(listing.as_array().unwrap().len(), 2);
}

// ============================================================================
// Attendance
// ============================================================================

#[tokio::test]
async fn test_check_in_and_out_flow() {
    let company = setup_company().await;

    let (status, record) = send(
        &company.router,
        "POST",
        "/api/attendance/check-in",
        Some(company.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", record);
    assert_eq!(record["status"], "present");

    let (status, error) = send(
        &company.router,
        "POST",
        "/api/attendance/check-in",
        Some(company.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "ALREADY_CHECKED_IN");

    let (status, outcome) = send(
        &company.router,
        "POST",
        "/api/attendance/check-out",
        Some(company.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", outcome);
    assert!(outcome["attendance"]["checkOutTime"].is_string());
    assert_eq!(decimal(&outcome["attendance"]["workHours"]), Decimal::ZERO);

    let (status, error) = send(
        &company.router,
        "POST",
        "/api/attendance/check-out",
        Some(company.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "ALREADY_CHECKED_OUT");

    let (status, today) = send(
        &company.router,
        "GET",
        "/api/attendance/today",
        Some(company.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(today["onLeave"], false);
    assert!(today["attendance"].is_object());
}

#[tokio::test]
async fn test_check_out_without_check_in() {
    let company = setup_company().await;

    let (status, error) = send(
        &company.router,
        "POST",
        "/api/attendance/check-out",
        Some(company.employee),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "NOT_CHECKED_IN");
}

#[tokio::test]
async fn test_monthly_attendance_summary() {
    let company = setup_company().await;
    send(
        &company.router,
        "POST",
        "/api/attendance/check-in",
        Some(company.employee),
        None,
    )
    .await;

    let month = Utc::now().format("%Y-%m").to_string();
    let uri = format!("/api/attendance/employee/{}", month);
    let (status, monthly) = send(&company.router, "GET", &uri, Some(company.employee), None).await;

    assert_eq!(status, StatusCode::OK, "{}", monthly);
    assert_eq!(monthly["month"], month);
    assert_eq!(monthly["summary"]["presentDays"], 1);
    assert_eq!(monthly["summary"]["leaveDays"], 0);
    assert!(monthly["summary"]["totalWorkingDays"].as_u64().unwrap() >= 28);
    assert_eq!(monthly["attendance"].as_array().unwrap().len(), 1);

    let (status, error) = send(
        &company.router,
        "GET",
        "/api/attendance/employee/2026-13",
        Some(company.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_company_attendance_sheet() {
    let company = setup_company().await;
    send(
        &company.router,
        "POST",
        "/api/attendance/check-in",
        Some(company.employee),
        None,
    )
    .await;

    let today = Utc::now().date_naive();
    let uri = format!("/api/attendance/admin/{}", today);
    let (status, sheet) = send(&company.router, "GET", &uri, Some(company.admin), None).await;

    assert_eq!(status, StatusCode::OK, "{}", sheet);
    let rows = sheet["attendance"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    let john = rows
        .iter()
        .find(|r| r["employee"]["email"] == "john@odoo.com")
        .unwrap();
    assert_eq!(john["status"], "present");

    let uri = format!("/api/attendance/admin/{}?search=asha", today);
    let (status, sheet) = send(&company.router, "GET", &uri, Some(company.admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sheet["attendance"].as_array().unwrap().len(), 1);
    assert_eq!(sheet["attendance"][0]["status"], "absent");

    let (status, _) = send(&company.router, "GET", &uri, Some(company.employee), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ============================================================================
// Leave
// ============================================================================

async fn apply(company: &Company, leave_type: &str, start: &str, end: &str) -> (StatusCode, Value) {
    send(
        &company.router,
        "POST",
        "/api/leave/apply",
        Some(company.employee),
        Some(json!({
            "leaveType": leave_type,
            "startDate": start,
            "endDate": end,
            "reason": "Family event"
        })),
    )
    .await
}

#[tokio::test]
async fn test_leave_approval_updates_allocation() {
    let company = setup_company().await;

    let (status, leave) = apply(&company, "paid_time_off", "2030-06-03", "2030-06-07").await;
    assert_eq!(status, StatusCode::CREATED, "{}", leave);
    assert_eq!(leave["status"], "pending");
    assert_eq!(leave["allocation"], 5);
    let leave_id = id_of(&leave);

    let (status, queue) = send(
        &company.router,
        "GET",
        "/api/leave/admin?status=pending",
        Some(company.admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(queue.as_array().unwrap().len(), 1);
    assert_eq!(queue[0]["employee"]["name"], "John Doe");

    let uri = format!("/api/leave/{}/approve", leave_id);
    let (status, approved) = send(
        &company.router,
        "PUT",
        &uri,
        Some(company.admin),
        Some(json!({ "adminComment": "Enjoy" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", approved);
    assert_eq!(approved["status"], "approved");
    assert_eq!(approved["adminComment"], "Enjoy");

    let (status, error) = send(&company.router, "PUT", &uri, Some(company.admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "LEAVE_ALREADY_REVIEWED");

    let uri = format!("/api/leave/allocation/{}", company.employee);
    let (status, allocation) = send(&company.router, "GET", &uri, Some(company.admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(allocation["paidTimeOff"]["used"], 5);
    assert_eq!(allocation["paidTimeOff"]["available"], 19);

    let (status, mine) = send(
        &company.router,
        "GET",
        "/api/leave/employee",
        Some(company.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["leaves"][0]["reviewerName"], "Asha Rao");
    assert_eq!(mine["allocation"]["paidTimeOff"]["used"], 5);
}

#[tokio::test]
async fn test_rejection_leaves_allocation_untouched() {
    let company = setup_company().await;

    let (_, leave) = apply(&company, "sick_leave", "2030-02-04", "2030-02-05").await;
    let uri = format!("/api/leave/{}/reject", id_of(&leave));
    let (status, rejected) = send(&company.router, "PUT", &uri, Some(company.admin), None).await;

    assert_eq!(status, StatusCode::OK, "{}", rejected);
    assert_eq!(rejected["status"], "rejected");

    let uri = format!("/api/leave/allocation/{}", company.employee);
    let (_, allocation) = send(&company.router, "GET", &uri, Some(company.employee), None).await;
    assert_eq!(allocation["sickLeave"]["used"], 0);
    assert_eq!(allocation["sickLeave"]["available"], 7);
}

#[tokio::test]
async fn test_leave_application_validation() {
    let company = setup_company().await;

    let (status, error) = apply(&company, "sick_leave", "2030-02-01", "2030-02-08").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INSUFFICIENT_LEAVE_BALANCE");

    let (status, error) = apply(&company, "unpaid_leave", "2030-02-08", "2030-02-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");

    let (status, _) = apply(&company, "unpaid_leave", "2030-02-01", "2030-02-20").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_leave_review_requires_capability() {
    let company = setup_company().await;
    let (_, leave) = apply(&company, "unpaid_leave", "2030-03-04", "2030-03-04").await;

    let uri = format!("/api/leave/{}/approve", id_of(&leave));
    let (status, _) = send(&company.router, "PUT", &uri, Some(company.employee), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&company.router, "GET", "/api/leave/admin", Some(company.employee), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/api/leave/allocation/{}", company.admin);
    let (status, _) = send(&company.router, "GET", &uri, Some(company.employee), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/api/leave/{}/approve", Uuid::new_v4());
    let (status, _) = send(&company.router, "PUT", &uri, Some(company.admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_check_in_refused_on_approved_leave() {
    let company = setup_company().await;
    let today = Utc::now().date_naive().to_string();

    let (_, leave) = apply(&company, "unpaid_leave", &today, &today).await;
    let uri = format!("/api/leave/{}/approve", id_of(&leave));
    send(&company.router, "PUT", &uri, Some(company.admin), None).await;

    let (status, error) = send(
        &company.router,
        "POST",
        "/api/attendance/check-in",
        Some(company.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "ON_APPROVED_LEAVE");

    let (_, listing) = send(&company.router, "GET", "/api/employees", Some(company.owner), None).await;
    let john = listing
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["firstName"] == "John")
        .unwrap();
    assert_eq!(john["workStatus"], "on_leave");
}
