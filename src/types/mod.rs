pub mod calendar_window;
pub mod destination;
pub mod geo_point;
pub mod monthly;
pub mod profile;
pub mod raw_series;
