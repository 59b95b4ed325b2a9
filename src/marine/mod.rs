pub mod locate_marine;
