use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use shared_config::AppConfig;

use crate::error::AppointmentError;
use crate::models::{BookableDate, SlotGroup, TimeSlot};
use crate::services::schedule::{ClinicSchedule, OpeningWindow};

/// Days after today that can still be booked; the picker offers three days.
pub const BOOKING_HORIZON_DAYS: i64 = 2;

/// Pure slot computation over a [`ClinicSchedule`]. Every method takes the
/// clinic-local reference moment explicitly.
#[derive(Debug, Clone)]
pub struct AvailabilityCalculator {
    schedule: ClinicSchedule,
    horizon_days: i64,
}

impl AvailabilityCalculator {
    pub fn new(schedule: ClinicSchedule) -> Self {
        Self {
            schedule,
            horizon_days: BOOKING_HORIZON_DAYS,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppointmentError> {
        Ok(Self::new(ClinicSchedule::from_config(config)?))
    }

    pub fn schedule(&self) -> &ClinicSchedule {
        &self.schedule
    }

    /// Today and the following days that may be booked, in order.
    pub fn bookable_dates(&self, now: NaiveDateTime) -> Vec<BookableDate> {
        let today = now.date();

        (0..=self.horizon_days)
            .map(|offset| today + Duration::days(offset))
            .map(|date| BookableDate {
                date,
                weekday: date.format("%A").to_string(),
                label: readable_date(date),
                is_today: date == today,
            })
            .collect()
    }

    pub fn check_horizon(&self, now: NaiveDateTime, date: NaiveDate) -> Result<(), AppointmentError> {
        let first = now.date();
        let last = first + Duration::days(self.horizon_days);

        if date < first || date > last {
            return Err(AppointmentError::OutsideBookingHorizon {
                requested: date,
                first,
                last,
            });
        }

        Ok(())
    }

    /// Bookable slots on `date`, grouped by window in chronological order.
    ///
    /// When `date` is today only slots strictly after `now` are kept. Windows
    /// with nothing left are omitted, so a fully past or closed day yields an
    /// empty list.
    pub fn slots_for(&self, now: NaiveDateTime, date: NaiveDate) -> Result<Vec<SlotGroup>, AppointmentError> {
        self.check_horizon(now, date)?;

        let cutoff = (date == now.date()).then(|| now.time());
        let step = Duration::minutes(i64::from(self.schedule.interval_minutes()));

        let mut groups: Vec<SlotGroup> = Vec::new();
        for window in self.schedule.windows_for(date) {
            let slots: Vec<TimeSlot> = ticks(window, step)
                .into_iter()
                .filter(|tick| cutoff.map_or(true, |cutoff| *tick > cutoff))
                .map(TimeSlot::at)
                .collect();

            if slots.is_empty() {
                continue;
            }

            // Two windows sharing a label (split morning, say) form one period.
            match groups.iter_mut().find(|group| group.period == window.label) {
                Some(group) => group.slots.extend(slots),
                None => groups.push(SlotGroup {
                    period: window.label.clone(),
                    slots,
                }),
            }
        }

        debug!(
            "Computed {} slots on {} (reference {})",
            groups.iter().map(|group| group.slots.len()).sum::<usize>(),
            date,
            now
        );

        Ok(groups)
    }

    /// Whether `time` is one of the slots offered on `date` at `now`.
    pub fn is_bookable(&self, now: NaiveDateTime, date: NaiveDate, time: NaiveTime) -> Result<bool, AppointmentError> {
        Ok(self
            .slots_for(now, date)?
            .iter()
            .flat_map(|group| group.slots.iter())
            .any(|slot| slot.time == time))
    }
}

/// Window ticks from start up to and including end.
fn ticks(window: &OpeningWindow, step: Duration) -> Vec<NaiveTime> {
    let mut ticks = Vec::new();
    let mut current = window.start;

    while current <= window.end {
        ticks.push(current);

        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        current = next;
    }

    ticks
}

pub fn readable_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}
