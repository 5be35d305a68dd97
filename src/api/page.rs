use actix_web::{HttpResponse, Responder, http::header::ContentType, web};
use chrono::NaiveDate;

use crate::{
    config::Config,
    model::{employee::EmployeeStatus, view::ViewModel},
    services::poller::{PollState, Poller},
};

/// HTML dashboard: stat cards, today's check-ins, the roster.
pub async fn index(poller: web::Data<Poller>, config: web::Data<Config>) -> impl Responder {
    let html = render_page(
        &poller.snapshot().await,
        poller.today(),
        config.poll_interval.as_secs(),
    );
    HttpResponse::Ok().content_type(ContentType::html()).body(html)
}

pub fn render_page(state: &PollState, today: NaiveDate, refresh_secs: u64) -> String {
    let body = match state {
        PollState::Loading => render_notice("Loading...", "notice"),
        PollState::Error { message } => render_notice(message, "notice error"),
        PollState::Ready { view } => render_dashboard(view, today),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="{refresh_secs}">
<title>Attendance Dashboard</title>
<style>{styles}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        styles = STYLES,
    )
}

fn render_notice(message: &str, class: &str) -> String {
    format!(r#"<div class="{class}">{}</div>"#, escape_html(message))
}

fn render_dashboard(view: &ViewModel, today: NaiveDate) -> String {
    let today_rows: String = view
        .todays_records
        .iter()
        .map(|entry| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                cell(entry.time.as_deref()),
                cell(entry.employee_id.as_deref()),
                cell(entry.name.as_deref()),
            )
        })
        .collect();

    let roster_rows: String = view
        .roster
        .iter()
        .map(|employee| {
            let badge = match employee.presence() {
                EmployeeStatus::Present => "badge present",
                EmployeeStatus::Absent => "badge absent",
            };
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td><span class=\"{badge}\">{}</span></td></tr>\n",
                cell(employee.id.as_deref()),
                cell(employee.name.as_deref()),
                cell(employee.department.as_deref()),
                employee.presence(),
            )
        })
        .collect();

    format!(
        r#"<main>
<header><h1>Attendance Dashboard</h1><span class="date">{today}</span></header>
<section class="cards">
<div class="card"><h3>Total Employees</h3><p>{total}</p></div>
<div class="card"><h3>Present Today</h3><p class="present">{present}</p></div>
<div class="card"><h3>Absent Today</h3><p class="absent">{absent}</p></div>
</section>
<section class="panel">
<h2>Today Attendance</h2>
<table>
<thead><tr><th>Time</th><th>Employee ID</th><th>Name</th></tr></thead>
<tbody>
{today_rows}</tbody>
</table>
</section>
<section class="panel">
<h2>Employee List</h2>
<table>
<thead><tr><th>ID</th><th>Name</th><th>Department</th><th>Status</th></tr></thead>
<tbody>
{roster_rows}</tbody>
</table>
</section>
</main>"#,
        today = today.format("%-m/%-d/%Y"),
        total = view.total_employees,
        present = view.present_today,
        absent = view.absent_today,
    )
}

fn cell(value: Option<&str>) -> String {
    value.map(escape_html).unwrap_or_default()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const STYLES: &str = "
body { margin: 0; background: #f3f4f6; font-family: system-ui, sans-serif; color: #111827; }
main { max-width: 80rem; margin: 0 auto; padding: 1.5rem; }
header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 2rem; }
.date { color: #4b5563; }
.cards { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1.5rem; margin-bottom: 2rem; }
.card, .panel { background: #fff; border-radius: 0.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.card { padding: 1.5rem; }
.card h3 { margin: 0; font-size: 0.875rem; color: #6b7280; }
.card p { margin: 0.25rem 0 0; font-size: 1.5rem; font-weight: 700; }
.panel { margin-bottom: 2rem; overflow-x: auto; }
.panel h2 { margin: 0; padding: 1rem 1.5rem; border-bottom: 1px solid #e5e7eb; font-size: 1.25rem; }
table { width: 100%; border-collapse: collapse; }
th { background: #f9fafb; text-align: left; font-size: 0.75rem; color: #6b7280; text-transform: uppercase; padding: 0.75rem 1.5rem; }
td { padding: 1rem 1.5rem; border-top: 1px solid #e5e7eb; font-size: 0.875rem; white-space: nowrap; }
.present { color: #16a34a; }
.absent { color: #dc2626; }
.badge { padding: 0.25rem 0.5rem; border-radius: 9999px; font-size: 0.75rem; font-weight: 600; }
.badge.present { background: #dcfce7; color: #166534; }
.badge.absent { background: #fee2e2; color: #991b1b; }
.notice { display: flex; align-items: center; justify-content: center; min-height: 100vh; font-size: 1.125rem; }
.notice.error { color: #dc2626; }
";
