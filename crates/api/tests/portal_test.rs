
use axum::http::StatusCode;
use kairo_core::errors::KairoError;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

use test_utils::{faculty_schedule, student_timetable, TestContext};

#[tokio::test]
async fn test_student_week_view() {
    let mut ctx = TestContext::new();
    ctx.source
        .expect_student_timetable()
        .with(eq("2023001"))
        .times(1)
        .returning(|_| Ok(student_timetable()));

    let response = ctx.server().get("/portal/students/2023001/timetable").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["student"]["name"], "Aarav Sharma");
    assert_eq!(body["timetable"]["view"], "week");
    assert_eq!(body["timetable"]["rows"].as_array().unwrap().len(), 8);
    assert_eq!(body["timetable"]["rows"][4]["cells"][1]["courseCode"], "CS102L");
    assert_eq!(body["timetable"]["rows"][4]["cells"][1]["styleClass"], "course-lab");
    assert_eq!(body["timetable"]["facultyLegend"][0]["fullName"], "Dr. Rajesh Kumar");
}

#[tokio::test]
async fn test_student_day_view() {
    let mut ctx = TestContext::new();
    ctx.source
        .expect_student_timetable()
        .returning(|_| Ok(student_timetable()));

    let response = ctx
        .server()
        .get("/portal/students/2023001/timetable")
        .add_query_param("view", "day")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["timetable"]["view"], "day");

    let days: Vec<&str> = body["timetable"]["days"]
        .as_array()
        .unwrap()
        .iter()
        .map(|block| block["day"].as_str().unwrap())
        .collect();
    assert_eq!(days, vec!["Monday", "Tuesday"]);
}

#[tokio::test]
async fn test_unknown_view_is_bad_request() {
    let mut ctx = TestContext::new();
    ctx.source.expect_student_timetable().times(0);

    let response = ctx
        .server()
        .get("/portal/students/2023001/timetable")
        .add_query_param("view", "month")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "validation");
}

#[rstest]
#[case(KairoError::NotFound("Student not found".to_string()), StatusCode::NOT_FOUND)]
#[case(KairoError::MalformedResponse("missing field".to_string()), StatusCode::BAD_GATEWAY)]
#[case(KairoError::Unreachable("refused".to_string()), StatusCode::BAD_GATEWAY)]
#[case(
    KairoError::Upstream { status: 503, message: "down".to_string() },
    StatusCode::SERVICE_UNAVAILABLE
)]
#[tokio::test]
async fn test_backend_failures_stay_distinct(
    #[case] error: KairoError,
    #[case] expected: StatusCode,
) {
    let kind = error.kind();
    let mut ctx = TestContext::new();
    let mut error = Some(error);
    ctx.source
        .expect_student_timetable()
        .times(1)
        .returning(move |_| Err(error.take().unwrap()));

    let response = ctx.server().get("/portal/students/2023001/timetable").await;

    assert_eq!(response.status_code(), expected);
    let body: Value = response.json();
    assert_eq!(body["kind"], kind);
}

#[tokio::test]
async fn test_faculty_schedule_with_workload() {
    let mut ctx = TestContext::new();
    ctx.source
        .expect_faculty_schedule()
        .with(eq("F001"))
        .returning(|code| Ok(faculty_schedule(code)));

    let response = ctx.server().get("/portal/faculty/F001/schedule").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["faculty"]["code"], "F001");
    assert_eq!(body["workload"]["totalHours"], 18);
    assert_eq!(body["utilizationPercent"], 90.0);
    assert_eq!(body["timetable"]["view"], "week");
    assert_eq!(body["timetable"]["rows"][0]["cells"][0]["courseCode"], "CS101");
}

#[tokio::test]
async fn test_health_reports_backend() {
    let response = TestContext::new().server().get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], test_utils::DEAD_BACKEND);
}
