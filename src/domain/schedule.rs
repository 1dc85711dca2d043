//! Opening-hours model kept on the device.
//!
//! A plain domain helper: nothing here talks to the backend and no desk task
//! drives it. Callers feed [`RestaurantSchedule::check`] the local time
//! whenever they want a fresh status.

use chrono::NaiveTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleStatus {
    Open,
    Closed,
}

/// Daily opening schedule kept on the device.
///
/// Once an enabled schedule has seen the clock reach one of its opening
/// times the restaurant stays open until the schedule is switched off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantSchedule {
    enabled: bool,
    morning_open: NaiveTime,
    evening_open: NaiveTime,
    status: ScheduleStatus,
}

impl Default for RestaurantSchedule {
    fn default() -> Self {
        Self {
            enabled: false,
            morning_open: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            evening_open: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            status: ScheduleStatus::Closed,
        }
    }
}

impl RestaurantSchedule {
    pub fn new(morning_open: NaiveTime, evening_open: NaiveTime) -> Self {
        Self {
            morning_open,
            evening_open,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn status(&self) -> ScheduleStatus {
        self.status
    }

    pub fn opening_times(&self) -> (NaiveTime, NaiveTime) {
        (self.morning_open, self.evening_open)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.status = ScheduleStatus::Closed;
        }
    }

    pub fn set_opening_times(&mut self, morning_open: NaiveTime, evening_open: NaiveTime) {
        self.morning_open = morning_open;
        self.evening_open = evening_open;
    }

    /// Re-evaluates the status at wall-clock time `now`.
    pub fn check(&mut self, now: NaiveTime) -> ScheduleStatus {
        if !self.enabled {
            self.status = ScheduleStatus::Closed;
        } else if now >= self.morning_open.min(self.evening_open) {
            self.status = ScheduleStatus::Open;
        }
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn disabled_schedule_is_closed() {
        let mut schedule = RestaurantSchedule::default();
        assert_eq!(schedule.check(at(12, 0)), ScheduleStatus::Closed);
    }

    #[test]
    fn opens_once_the_first_opening_time_is_reached() {
        let mut schedule = RestaurantSchedule::new(at(8, 0), at(18, 0));
        schedule.set_enabled(true);
        assert_eq!(schedule.check(at(7, 59)), ScheduleStatus::Closed);
        assert_eq!(schedule.check(at(8, 0)), ScheduleStatus::Open);
        assert_eq!(schedule.check(at(23, 30)), ScheduleStatus::Open);
    }

    #[test]
    fn switching_off_closes_immediately() {
        let mut schedule = RestaurantSchedule::new(at(8, 0), at(18, 0));
        schedule.set_enabled(true);
        schedule.check(at(9, 0));
        schedule.set_enabled(false);
        assert_eq!(schedule.status(), ScheduleStatus::Closed);
    }
}
