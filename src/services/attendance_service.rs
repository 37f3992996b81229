//! Attendance service - daily records, check-in and check-out.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::attendance::{day_of, hours_between};
use crate::domain::{Attendance, AttendanceFilter, CreateAttendance, UpdateAttendance};
use crate::errors::{AppError, AppResult};
use crate::infra::{Query, Repository};
use crate::types::PaginationParams;
use crate::utils::timestamp;

#[derive(Serialize)]
struct CheckOut {
    #[serde(with = "crate::utils::timestamp")]
    check_out: DateTime<Utc>,
    hours_worked: Option<f64>,
}

fn day_bounds(from: Option<NaiveDate>, to: Option<NaiveDate>) -> (Option<Value>, Option<Value>) {
    (
        from.map(|d| timestamp::format(&timestamp::start_of_day(d)).into()),
        to.map(|d| timestamp::format(&timestamp::end_of_day(d)).into()),
    )
}

#[derive(Clone)]
pub struct AttendanceService {
    records: Repository<Attendance>,
}

impl AttendanceService {
    pub fn new(records: Repository<Attendance>) -> Self {
        Self { records }
    }

    fn query(filter: &AttendanceFilter) -> Query {
        let (from, to) = day_bounds(filter.date_from, filter.date_to);
        Query::new()
            .eq_opt("user_id", filter.user_id.as_deref())
            .eq_opt("status", filter.status.map(|s| s.as_str()))
            .range_opt("date", from, to)
    }

    pub async fn create(&self, input: CreateAttendance) -> AppResult<Attendance> {
        self.records.create(&Attendance::new(input)).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Attendance> {
        self.records.require(id).await
    }

    pub async fn list(
        &self,
        filter: &AttendanceFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Attendance>, u64)> {
        self.records.page(params, &Self::query(filter)).await
    }

    pub async fn update(&self, id: &str, input: UpdateAttendance) -> AppResult<Attendance> {
        self.records.update_existing(id, &input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.records.delete_existing(id).await
    }

    /// A user's records, optionally limited to an inclusive day range.
    ///
    /// The range only applies when both ends are given.
    pub async fn by_user(
        &self,
        user_id: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> AppResult<Vec<Attendance>> {
        let filter = match (date_from, date_to) {
            (Some(_), Some(_)) => AttendanceFilter {
                user_id: Some(user_id.to_owned()),
                date_from,
                date_to,
                ..Default::default()
            },
            _ => AttendanceFilter {
                user_id: Some(user_id.to_owned()),
                ..Default::default()
            },
        };
        self.records.find_by(&Self::query(&filter)).await
    }

    /// The user's record for the calendar day containing `day`.
    pub async fn by_user_and_day(&self, user_id: &str, day: NaiveDate) -> AppResult<Option<Attendance>> {
        let filter = AttendanceFilter {
            user_id: Some(user_id.to_owned()),
            date_from: Some(day),
            date_to: Some(day),
            ..Default::default()
        };
        Ok(self.records.find_by(&Self::query(&filter)).await?.into_iter().next())
    }

    /// Record arrival, overwriting an earlier check-in on the same day.
    pub async fn check_in(&self, user_id: &str, at: Option<DateTime<Utc>>) -> AppResult<Attendance> {
        let at = at.unwrap_or_else(Utc::now);

        match self.by_user_and_day(user_id, at.date_naive()).await? {
            Some(existing) => {
                let update = UpdateAttendance {
                    check_in: Some(at),
                    ..Default::default()
                };
                self.records.update_existing(&existing.id, &update).await
            }
            None => {
                let record = Attendance::checked_in(user_id.to_owned(), at);
                tracing::debug!(user_id, date = %timestamp::format(&day_of(at)), "first check-in of the day");
                self.records.create(&record).await
            }
        }
    }

    /// Record departure and the hours worked since check-in.
    pub async fn check_out(&self, user_id: &str, at: Option<DateTime<Utc>>) -> AppResult<Attendance> {
        let at = at.unwrap_or_else(Utc::now);

        let existing = self
            .by_user_and_day(user_id, at.date_naive())
            .await?
            .ok_or_else(|| AppError::NotFound("No check-in found for today".into()))?;

        let update = CheckOut {
            check_out: at,
            hours_worked: existing.check_in.map(|check_in| hours_between(check_in, at)),
        };
        self.records.update_existing(&existing.id, &update).await
    }
}
