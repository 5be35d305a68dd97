use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::{
    model::view::ViewModel,
    services::poller::{PollState, Poller},
};

const LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DashboardStatus {
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    #[schema(example = "ready")]
    pub status: DashboardStatus,

    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub today: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ViewModel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Failed to load data from Google Sheets")]
    pub message: Option<String>,
}

impl DashboardResponse {
    fn from_state(state: PollState, today: NaiveDate) -> Self {
        let (status, data, message) = match state {
            PollState::Loading => (DashboardStatus::Loading, None, None),
            PollState::Ready { view } => (DashboardStatus::Ready, Some(view), None),
            PollState::Error { message } => (DashboardStatus::Error, None, Some(message)),
        };
        Self {
            status,
            today,
            data,
            message,
        }
    }
}

/// Current dashboard state
#[utoipa::path(
    get,
    path = "/api/dashboard-data",
    responses(
        (status = 200, description = "Reconciled attendance, or still loading", body = DashboardResponse),
        (status = 503, description = "Last poll failed", body = DashboardResponse, example = json!({
            "status": "error",
            "today": "2024-05-01",
            "message": "Failed to load data from Google Sheets"
        }))
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_data(poller: web::Data<Poller>) -> impl Responder {
    let body = DashboardResponse::from_state(poller.snapshot().await, poller.today());
    match body.status {
        DashboardStatus::Error => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::Ok().json(body),
    }
}

/// Today's check-ins in feed order
#[utoipa::path(
    get,
    path = "/api/attendance/today",
    responses(
        (status = 200, description = "Today's attendance", body = [crate::model::view::TodayEntry]),
        (status = 503, description = "No data yet or last poll failed", body = Object, example = json!({
            "message": "Loading..."
        }))
    ),
    tag = "Dashboard"
)]
pub async fn todays_attendance(poller: web::Data<Poller>) -> impl Responder {
    match poller.snapshot().await {
        PollState::Ready { view } => HttpResponse::Ok().json(view.todays_records),
        other => not_ready(other),
    }
}

/// Employee roster as last fetched
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Employee roster", body = [crate::model::employee::Employee]),
        (status = 503, description = "No data yet or last poll failed", body = Object, example = json!({
            "message": "Failed to load data from Google Sheets"
        }))
    ),
    tag = "Dashboard"
)]
pub async fn employees(poller: web::Data<Poller>) -> impl Responder {
    match poller.snapshot().await {
        PollState::Ready { view } => HttpResponse::Ok().json(view.roster),
        other => not_ready(other),
    }
}

fn not_ready(state: PollState) -> HttpResponse {
    let message = match state {
        PollState::Error { message } => message,
        _ => LOADING_MESSAGE.to_string(),
    };
    HttpResponse::ServiceUnavailable().json(json!({ "message": message }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{poller::OverlapPolicy, reconcile::IdentityMap},
        source::{Row, SourceError, RecordSource, StaticSource},
    };
    use actix_web::{App, http::StatusCode, test, web::Data};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn sample() -> StaticSource {
        let row = |cells: &[&str]| -> Row { cells.iter().map(|c| c.to_string()).collect() };
        StaticSource {
            employees: vec![row(&["1", "Ann", "Eng", "Yes"]), row(&["2", "Bo", "Sales", "No"])],
            attendance: vec![row(&["2024-05-01", "09:00", "1", "Ann"])],
        }
    }

    struct DownSource;

    #[async_trait]
    impl RecordSource for DownSource {
        async fn fetch_employees(&self) -> Result<Vec<Row>, SourceError> {
            Err(SourceError::Status {
                feed: "employees",
                status: 502,
                body: String::new(),
            })
        }

        async fn fetch_attendance(&self) -> Result<Vec<Row>, SourceError> {
            Ok(vec![])
        }
    }

    fn poller(source: Arc<dyn RecordSource>) -> Arc<Poller> {
        Arc::new(Poller::new(source, IdentityMap::default(), OverlapPolicy::Allow).with_today(may_first))
    }

    macro_rules! app {
        ($poller:expr) => {
            test::init_service(
                App::new()
                    .app_data(Data::from($poller.clone()))
                    .route("/api/dashboard-data", web::get().to(dashboard_data))
                    .route("/api/attendance/today", web::get().to(todays_attendance))
                    .route("/api/employees", web::get().to(employees)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn reports_loading_before_first_poll() {
        let poller = poller(Arc::new(sample()));
        let app = app!(poller);

        let req = test::TestRequest::get().uri("/api/dashboard-data").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "loading");
        assert_eq!(body["today"], "2024-05-01");
        assert!(body.get("data").is_none());

        let req = test::TestRequest::get().uri("/api/employees").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn serves_reconciled_view_once_ready() {
        let poller = poller(Arc::new(sample()));
        poller.poll_once().await;
        let app = app!(poller);

        let req = test::TestRequest::get().uri("/api/dashboard-data").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["data"]["total_employees"], 2);
        assert_eq!(body["data"]["present_today"], 1);
        assert_eq!(body["data"]["absent_today"], 1);

        let req = test::TestRequest::get().uri("/api/attendance/today").to_request();
        let today: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(today[0]["name"], "Ann");
        assert_eq!(today[0]["employee_id"], "1");

        let req = test::TestRequest::get().uri("/api/employees").to_request();
        let roster: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(roster.as_array().map(Vec::len), Some(2));
    }

    #[actix_web::test]
    async fn failed_poll_surfaces_only_the_generic_message() {
        let poller = poller(Arc::new(DownSource));
        poller.poll_once().await;
        let app = app!(poller);

        let req = test::TestRequest::get().uri("/api/dashboard-data").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Failed to load data from Google Sheets");
        assert!(body.get("data").is_none());
    }
}
