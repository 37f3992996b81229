//! Attendance records: one per user per calendar day (UTC).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::Entity;
use crate::config::COLLECTION_ATTENDANCE;
use crate::utils::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    EarlyLeave,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::EarlyLeave => "early_leave",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Attendance {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_id: String,
    /// Midnight UTC of the day the record covers
    #[serde(with = "crate::utils::timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub break_start: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub break_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub hours_worked: Option<f64>,
    #[serde(with = "crate::utils::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for Attendance {
    const COLLECTION: &'static str = COLLECTION_ATTENDANCE;
    const NAME: &'static str = "Attendance";
}

impl Attendance {
    pub fn new(input: CreateAttendance) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            user_id: input.user_id,
            date: input.date,
            check_in: input.check_in,
            check_out: input.check_out,
            break_start: input.break_start,
            break_end: input.break_end,
            status: input.status,
            notes: input.notes,
            hours_worked: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A fresh record for a check-in at `at`.
    pub fn checked_in(user_id: String, at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            user_id,
            date: day_of(at),
            check_in: Some(at),
            check_out: None,
            break_start: None,
            break_end: None,
            status: AttendanceStatus::Present,
            notes: None,
            hours_worked: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Midnight UTC of the instant's calendar day.
pub fn day_of(at: DateTime<Utc>) -> DateTime<Utc> {
    timestamp::start_of_day(at.date_naive())
}

/// Hours between check-in and check-out, at millisecond resolution.
pub fn hours_between(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> f64 {
    (check_out - check_in).num_milliseconds() as f64 / 3_600_000.0
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAttendance {
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
    #[serde(with = "crate::utils::timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub break_start: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub break_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAttendance {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::timestamp::option"
    )]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::timestamp::option"
    )]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::timestamp::option"
    )]
    pub break_start: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::timestamp::option"
    )]
    pub break_end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// List filters for attendance. Date bounds cover whole days.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceFilter {
    pub user_id: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_of_truncates_to_midnight() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 17, 45, 12).unwrap();
        assert_eq!(
            timestamp::format(&day_of(at)),
            "2024-03-15T00:00:00.000000Z"
        );
    }

    #[test]
    fn test_hours_between() {
        let check_in = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2024, 3, 15, 17, 30, 0).unwrap();

        assert_eq!(hours_between(check_in, check_out), 8.5);
    }

    #[test]
    fn test_checked_in_record() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 9, 5, 0).unwrap();
        let record = Attendance::checked_in("u1".into(), at);

        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.check_in, Some(at));
        assert_eq!(record.date, day_of(at));
    }
}
