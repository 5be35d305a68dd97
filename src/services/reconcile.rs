use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use strum_macros::{Display, EnumString};

use crate::{
    model::{
        attendance::AttendanceRecord,
        employee::Employee,
        view::{TodayEntry, ViewModel},
    },
    utils::date_utils::is_same_day,
};

/// How long name -> id bindings survive between poll cycles.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum IdentityPolicy {
    /// Never cleared while the process runs
    #[default]
    Session,
    /// Cleared before every reconciliation
    PerPoll,
    /// Names missing from the current roster are dropped before every reconciliation
    EvictAbsent,
}

/// Employee name -> first employee id seen for it in the attendance feed.
///
/// Rows with no name cell share the `None` key, so they bind and count like
/// any other name.
#[derive(Debug, Default)]
pub struct IdentityMap {
    policy: IdentityPolicy,
    ids: HashMap<Option<String>, Option<String>>,
}

impl IdentityMap {
    pub fn new(policy: IdentityPolicy) -> Self {
        Self {
            policy,
            ids: HashMap::new(),
        }
    }

    pub fn policy(&self) -> IdentityPolicy {
        self.policy
    }

    /// Record `id` for `name` unless the name is already bound. First one wins.
    pub fn capture(&mut self, name: Option<&str>, id: Option<&str>) {
        self.ids
            .entry(name.map(str::to_string))
            .or_insert_with(|| id.map(str::to_string));
    }

    pub fn contains(&self, name: Option<&str>) -> bool {
        self.ids.contains_key(&name.map(str::to_string))
    }

    /// Canonical id for `name`. `None` both when unknown and when the first row had no id.
    pub fn id_for(&self, name: Option<&str>) -> Option<&str> {
        self.ids
            .get(&name.map(str::to_string))
            .and_then(|id| id.as_deref())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Apply the lifetime policy at the start of a cycle.
    fn begin_cycle(&mut self, roster: &[Employee]) {
        match self.policy {
            IdentityPolicy::Session => {}
            IdentityPolicy::PerPoll => self.ids.clear(),
            IdentityPolicy::EvictAbsent => {
                let names: HashSet<&str> = roster.iter().filter_map(|e| e.name.as_deref()).collect();
                // a nameless roster row keeps the nameless binding alive
                let has_blank = roster.iter().any(|e| e.name.is_none());
                self.ids.retain(|name, _| match name {
                    Some(name) => names.contains(name.as_str()),
                    None => has_blank,
                });
            }
        }
    }
}

/// Merge the roster and attendance feeds into what the dashboard shows.
///
/// Never fails: short rows just leave fields empty. `absent_today` is the
/// plain complement of `present_today` and is not checked against the roster.
pub fn reconcile(
    employee_rows: &[Vec<String>],
    attendance_rows: &[Vec<String>],
    today: NaiveDate,
    identity: &mut IdentityMap,
) -> ViewModel {
    let roster: Vec<Employee> = employee_rows.iter().map(|r| Employee::from_row(r)).collect();

    identity.begin_cycle(&roster);

    let attendance: Vec<AttendanceRecord> = attendance_rows
        .iter()
        .map(|row| {
            let record = AttendanceRecord::from_row(row);
            identity.capture(record.employee_name.as_deref(), record.employee_id.as_deref());
            record
        })
        .collect();

    let todays_records: Vec<TodayEntry> = attendance
        .into_iter()
        .filter(|r| is_same_day(r.date.as_deref(), today))
        .filter(|r| identity.contains(r.employee_name.as_deref()))
        .map(|r| TodayEntry {
            employee_id: identity.id_for(r.employee_name.as_deref()).map(str::to_string),
            date: r.date,
            time: r.time,
            recorded_employee_id: r.employee_id,
            name: r.employee_name,
        })
        .collect();

    let total_employees = roster.len();
    let present_today = todays_records.len();

    ViewModel {
        total_employees,
        present_today,
        absent_today: total_employees as i64 - present_today as i64,
        todays_records,
        roster,
    }
}
