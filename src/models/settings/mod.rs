// Settings module
// Week/day time grid options consumed by the layout pipeline

use serde::{Deserialize, Serialize};

/// Layout configuration for week and day time grids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// 0 = Sunday, 1 = Monday, ...
    pub start_day_of_week: u8,
    /// Render Saturday and Sunday at half width
    pub narrow_weekend: bool,
    /// Hide Saturday and Sunday
    pub workweek: bool,
    pub hour_start: u32,
    pub hour_end: u32,
    /// Length of one grid row in minutes
    pub slot_minutes: u32,
    /// Include going/coming travel buffers when testing for overlap
    pub use_travel_time: bool,
    /// Pointer travel in pixels before a press becomes a drag
    pub min_drag_distance: f64,
    /// Smallest block height as a percentage of the day window
    pub min_height_percent: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            start_day_of_week: 0, // Sunday
            narrow_weekend: false,
            workweek: false,
            hour_start: 0,
            hour_end: 24,
            slot_minutes: 30,
            use_travel_time: true,
            min_drag_distance: 3.0,
            min_height_percent: 1.0,
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.start_day_of_week > 6 {
            return Err(format!(
                "start_day_of_week must be between 0 and 6, got {}",
                self.start_day_of_week
            ));
        }

        if self.hour_end > 24 || self.hour_start >= self.hour_end {
            return Err(format!(
                "hour range must satisfy hour_start < hour_end <= 24, got {}..{}",
                self.hour_start, self.hour_end
            ));
        }

        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            return Err(format!(
                "slot_minutes must divide an hour evenly, got {}",
                self.slot_minutes
            ));
        }

        if !(self.min_drag_distance >= 0.0) {
            return Err("min_drag_distance cannot be negative".to_string());
        }

        if !(0.0..=100.0).contains(&self.min_height_percent) {
            return Err(format!(
                "min_height_percent must be between 0 and 100, got {}",
                self.min_height_percent
            ));
        }

        Ok(())
    }

    /// Narrow weekend columns never apply to a work week
    pub fn effective_narrow_weekend(&self) -> bool {
        self.narrow_weekend && !self.workweek
    }

    /// Zero for a zero-length slot
    pub fn slots_per_hour(&self) -> u32 {
        60u32.checked_div(self.slot_minutes).unwrap_or(0)
    }

    /// Zero when the hour range is empty or inverted
    pub fn row_count(&self) -> usize {
        self.hour_end
            .checked_sub(self.hour_start)
            .and_then(|hours| hours.checked_mul(self.slots_per_hour()))
            .unwrap_or(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_defaults_are_valid() {
        let settings = LayoutSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.row_count(), 48);
    }

    #[test_case(7, 0, 24, 30 ; "start day out of range")]
    #[test_case(0, 10, 10, 30 ; "empty hour range")]
    #[test_case(0, 0, 25, 30 ; "hour end past midnight")]
    #[test_case(0, 0, 24, 0 ; "zero slot")]
    #[test_case(0, 0, 24, 25 ; "slot does not divide hour")]
    fn test_invalid_settings(start_day: u8, hour_start: u32, hour_end: u32, slot: u32) {
        let settings = LayoutSettings {
            start_day_of_week: start_day,
            hour_start,
            hour_end,
            slot_minutes: slot,
            ..LayoutSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test_case(20, 8, 30 ; "inverted hours")]
    #[test_case(0, 24, 0 ; "zero slot")]
    fn test_invalid_ranges_have_no_rows(hour_start: u32, hour_end: u32, slot: u32) {
        let settings = LayoutSettings {
            hour_start,
            hour_end,
            slot_minutes: slot,
            ..LayoutSettings::default()
        };
        assert_eq!(settings.row_count(), 0);
    }

    #[test]
    fn test_fifteen_minute_rows() {
        let settings = LayoutSettings {
            hour_start: 8,
            hour_end: 18,
            slot_minutes: 15,
            ..LayoutSettings::default()
        };
        assert_eq!(settings.row_count(), 40);
    }

    #[test]
    fn test_workweek_disables_narrow_weekend() {
        let settings = LayoutSettings {
            narrow_weekend: true,
            workweek: true,
            ..LayoutSettings::default()
        };
        assert!(!settings.effective_narrow_weekend());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: LayoutSettings = toml::from_str("hour_start = 8\nnarrow_weekend = true").unwrap();
        assert_eq!(settings.hour_start, 8);
        assert!(settings.narrow_weekend);
        assert_eq!(settings.hour_end, 24);
        assert_eq!(settings.slot_minutes, 30);
    }
}
