pub mod dashboard;
pub mod version;
