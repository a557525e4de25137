use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use shared_config::AppConfig;

use crate::error::AppointmentError;

pub const MORNING: &str = "Morning";
pub const EVENING: &str = "Evening";

/// A contiguous block of opening hours. Both ends are bookable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningWindow {
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl OpeningWindow {
    pub fn new(label: &str, start: NaiveTime, end: NaiveTime) -> Result<Self, AppointmentError> {
        if end < start {
            return Err(AppointmentError::InvalidSchedule(format!(
                "{} window ends ({}) before it starts ({})",
                label, end, start
            )));
        }

        Ok(Self {
            label: label.to_string(),
            start,
            end,
        })
    }

    pub fn from_hours(label: &str, start: (u32, u32), end: (u32, u32)) -> Result<Self, AppointmentError> {
        Self::new(label, clock(start.0, start.1)?, clock(end.0, end.1)?)
    }
}

fn clock(hour: u32, minute: u32) -> Result<NaiveTime, AppointmentError> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        AppointmentError::InvalidSchedule(format!("{:02}:{:02} is not a clock time", hour, minute))
    })
}

/// Opening hours per weekday, with per-date overrides for holidays and
/// special days.
#[derive(Debug, Clone)]
pub struct ClinicSchedule {
    weekly: [Vec<OpeningWindow>; 7],
    overrides: BTreeMap<NaiveDate, Vec<OpeningWindow>>,
    interval_minutes: u32,
}

impl ClinicSchedule {
    /// An empty schedule (closed every day) with the given slot granularity.
    pub fn new(interval_minutes: u32) -> Result<Self, AppointmentError> {
        if interval_minutes == 0 {
            return Err(AppointmentError::InvalidSchedule(
                "slot interval must be at least one minute".to_string(),
            ));
        }

        Ok(Self {
            weekly: Default::default(),
            overrides: BTreeMap::new(),
            interval_minutes,
        })
    }

    /// Monday to Saturday 10:00-13:00 and 17:00-22:00, Sunday evenings close
    /// at 20:00.
    pub fn standard(interval_minutes: u32) -> Result<Self, AppointmentError> {
        let morning = OpeningWindow::from_hours(MORNING, (10, 0), (13, 0))?;
        let evening = OpeningWindow::from_hours(EVENING, (17, 0), (22, 0))?;
        let sunday_evening = OpeningWindow::from_hours(EVENING, (17, 0), (20, 0))?;

        let mut schedule = Self::new(interval_minutes)?;
        for weekday in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat] {
            schedule = schedule.with_day(weekday, vec![morning.clone(), evening.clone()]);
        }

        Ok(schedule.with_day(Weekday::Sun, vec![morning, sunday_evening]))
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppointmentError> {
        let schedule = Self::standard(config.slot_interval_minutes)?;

        Ok(config
            .closed_dates
            .iter()
            .fold(schedule, |schedule, date| schedule.closed_on(*date)))
    }

    pub fn with_day(mut self, weekday: Weekday, mut windows: Vec<OpeningWindow>) -> Self {
        windows.sort_by_key(|window| window.start);
        self.weekly[weekday.num_days_from_monday() as usize] = windows;
        self
    }

    pub fn with_override(mut self, date: NaiveDate, mut windows: Vec<OpeningWindow>) -> Self {
        windows.sort_by_key(|window| window.start);
        self.overrides.insert(date, windows);
        self
    }

    pub fn closed_on(self, date: NaiveDate) -> Self {
        self.with_override(date, Vec::new())
    }

    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    /// Windows in effect on `date`: the override if one exists, otherwise the
    /// weekday's regular hours.
    pub fn windows_for(&self, date: NaiveDate) -> &[OpeningWindow] {
        match self.overrides.get(&date) {
            Some(windows) => windows,
            None => &self.weekly[date.weekday().num_days_from_monday() as usize],
        }
    }
}
