use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Vertical scale of a day column and the snapping/grab constants that go
/// with it. Threaded explicitly into every mapping call so tests can run at
/// arbitrary scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayScale {
    /// Pixels per hour (controls the height of the day column).
    pub pixels_per_hour: f32,
    /// Pointer positions are snapped down to multiples of this many minutes.
    pub snap_minutes: u32,
    /// Time radius around a selection's end within which a press grabs the
    /// trailing edge instead of the body.
    pub edge_tolerance_minutes: u32,
}

impl Default for DayScale {
    fn default() -> Self {
        Self {
            pixels_per_hour: 60.0,
            snap_minutes: 5,
            edge_tolerance_minutes: 5,
        }
    }
}

impl DayScale {
    /// Total height of one day column in pixels.
    pub fn day_height(&self) -> f32 {
        self.pixels_per_hour * 24.0
    }

    /// Pixel distance of one snap step.
    pub fn snap_px(&self) -> f32 {
        self.snap_minutes as f32 / 60.0 * self.pixels_per_hour
    }

    /// Half an hour's worth of pixels: the default extent of a new selection
    /// and the floor a trailing edge can be stretched down to.
    pub fn half_slot_px(&self) -> f32 {
        self.pixels_per_hour / 2.0
    }

    pub fn edge_tolerance(&self) -> Duration {
        Duration::minutes(self.edge_tolerance_minutes as i64)
    }

    /// Convert a vertical offset from the top of `day`'s column into a time
    /// on that day. The offset is first snapped *down* to the snap grid, so
    /// a pointer anywhere inside a band maps to the band's start, never
    /// forward.
    pub fn time_at(&self, day: NaiveDate, y: f32) -> NaiveDateTime {
        // The 1e-3 px slack absorbs f32 error so a position produced by
        // `position_of` maps back into its own band.
        let band = ((y as f64 + 1e-3) / self.snap_px() as f64).floor() as i64;
        day.and_time(NaiveTime::MIN) + Duration::minutes(band * self.snap_minutes as i64)
    }

    /// Convert a time back to a pixel offset from its own day's midnight.
    /// Not snapped: arithmetic derived from stored instants (midpoints,
    /// stretch floors) must not be re-quantised.
    pub fn position_of(&self, t: NaiveDateTime) -> f32 {
        let since_midnight = t - t.date().and_time(NaiveTime::MIN);
        since_midnight.num_seconds() as f32 / 3600.0 * self.pixels_per_hour
    }

    /// Clamp hand-edited settings into a usable range.
    pub fn sanitized(self) -> Self {
        Self {
            pixels_per_hour: self.pixels_per_hour.clamp(10.0, 300.0),
            snap_minutes: self.snap_minutes.max(1),
            edge_tolerance_minutes: self.edge_tolerance_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
    }

    #[test]
    fn snaps_down_to_the_grid() {
        let scale = DayScale::default();
        // 60 px/h, 5 min snap => 5 px bands
        let t = scale.time_at(day(), 63.0);
        assert_eq!((t.hour(), t.minute()), (1, 0));
        let t = scale.time_at(day(), 64.9);
        assert_eq!((t.hour(), t.minute()), (1, 0));
        let t = scale.time_at(day(), 65.0);
        assert_eq!((t.hour(), t.minute()), (1, 5));
    }

    #[test]
    fn mapping_is_constant_within_a_band() {
        let scale = DayScale::default();
        let band_start = scale.time_at(day(), 540.0); // 09:00
        for offset in [0.0, 0.5, 2.4, 4.9] {
            assert_eq!(scale.time_at(day(), 540.0 + offset), band_start);
        }
    }

    #[test]
    fn round_trips_snap_aligned_positions() {
        for scale in [
            DayScale::default(),
            DayScale {
                pixels_per_hour: 40.0,
                ..DayScale::default()
            },
        ] {
            for minutes in (0..24 * 60).step_by(scale.snap_minutes as usize) {
                let t = day().and_time(NaiveTime::MIN) + Duration::minutes(minutes as i64);
                assert_eq!(scale.time_at(day(), scale.position_of(t)), t, "at {minutes} min");
            }
        }
    }

    #[test]
    fn position_is_not_snapped() {
        let scale = DayScale::default();
        let t = day().and_hms_opt(9, 2, 0).unwrap();
        assert!((scale.position_of(t) - 542.0).abs() < 0.01);
    }

    #[test]
    fn day_height_covers_24_hours() {
        let scale = DayScale {
            pixels_per_hour: 40.0,
            ..DayScale::default()
        };
        assert_eq!(scale.day_height(), 960.0);
        assert_eq!(scale.time_at(day(), scale.day_height()).time(), NaiveTime::MIN);
        assert_eq!(scale.time_at(day(), scale.day_height()).date(), day().succ_opt().unwrap());
    }

    #[test]
    fn sanitize_rejects_degenerate_settings() {
        let scale = DayScale {
            pixels_per_hour: 0.0,
            snap_minutes: 0,
            edge_tolerance_minutes: 5,
        }
        .sanitized();
        assert_eq!(scale.pixels_per_hour, 10.0);
        assert_eq!(scale.snap_minutes, 1);
    }
}
