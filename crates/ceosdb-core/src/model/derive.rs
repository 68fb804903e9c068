//! Derivation of categorical orbit attributes from raw handbook values
//!
//! The handbook publishes inclination in degrees, altitude in kilometres,
//! local solar time as a time of day and the repeat cycle in days. The
//! classifier only ever sees the bands computed here.

use chrono::{Duration, NaiveTime};

use crate::errors::{CeosError, Result};
use crate::model::orbit::{AltitudeClass, InclinationClass, LstClass, RepeatCycleClass};

/// Band an inclination given in degrees.
pub fn inclination_class(degrees: f64) -> InclinationClass {
    if degrees == 0.0 {
        InclinationClass::Equatorial
    } else if degrees < 30.0 {
        InclinationClass::NearEquatorial
    } else if degrees < 60.0 {
        InclinationClass::MidLatitude
    } else if degrees == 90.0 {
        InclinationClass::Polar
    } else {
        InclinationClass::NearPolar
    }
}

/// Band an altitude given in kilometres.
pub fn altitude_class(km: f64) -> AltitudeClass {
    if km < 400.0 {
        AltitudeClass::VeryLow
    } else if km < 550.0 {
        AltitudeClass::Low
    } else if km < 700.0 {
        AltitudeClass::Medium
    } else if km < 850.0 {
        AltitudeClass::High
    } else {
        AltitudeClass::VeryHigh
    }
}

/// Band a repeat cycle given in days.
pub fn repeat_cycle_class(days: f64) -> RepeatCycleClass {
    if days <= 7.0 {
        RepeatCycleClass::Short
    } else {
        RepeatCycleClass::Long
    }
}

/// Band a local solar time.
///
/// Night-side crossings are folded onto the day side by twelve hours first.
/// Instants that fall exactly on a window boundary are left unclassified.
pub fn lst_class(time: NaiveTime) -> Option<LstClass> {
    let at = |hour: u32, minute: u32| NaiveTime::from_hms_opt(hour, minute, 0);
    let five_am = at(5, 0)?;
    let seven_am = at(7, 0)?;
    let noon_start = at(11, 15)?;
    let noon_end = at(12, 45)?;
    let five_pm = at(17, 0)?;
    let seven_pm = at(19, 0)?;

    let half_day = Duration::hours(12);
    let time = if time < five_am {
        time.overflowing_add_signed(half_day).0
    } else if time > seven_pm {
        time.overflowing_sub_signed(half_day).0
    } else {
        time
    };

    let strictly_within = |lo: NaiveTime, hi: NaiveTime| time > lo && time < hi;
    if strictly_within(five_am, seven_am) || strictly_within(five_pm, seven_pm) {
        Some(LstClass::DawnDusk)
    } else if strictly_within(noon_start, noon_end) {
        Some(LstClass::Noon)
    } else if strictly_within(seven_am, noon_start) {
        Some(LstClass::Am)
    } else if strictly_within(noon_end, five_pm) {
        Some(LstClass::Pm)
    } else {
        None
    }
}

/// Parse a handbook quantity such as `"98.2 deg"` or `"705 km"`.
///
/// The unit is optional; a bare number is accepted as-is.
pub fn parse_quantity(field: &'static str, text: &str, unit: &str) -> Result<f64> {
    let trimmed = text.trim();
    let number = trimmed
        .strip_suffix(unit)
        .unwrap_or(trimmed)
        .trim()
        .replace(',', "");
    number
        .parse::<f64>()
        .map_err(|e| CeosError::InvalidRawValue {
            field,
            value: text.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a local solar time such as `"10:30"`, `"10:30:00"` or `"6:00 AM"`.
///
/// Returns `None` for text that does not describe a time of day; the handbook
/// uses free text such as "N/A" in this field.
pub fn parse_lst(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    const FORMATS: [&str; 5] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p", "%H%M"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
}
