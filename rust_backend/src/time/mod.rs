pub mod calibration;
pub mod week_date;

pub use calibration::{bind_hours, build_time_axis, detect_ticks, Hours};
pub use week_date::{month_number, school_year, WeekDate};
