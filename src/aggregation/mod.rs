pub mod bucket;
pub mod reduce;
