pub mod error;
pub mod model;
pub mod projection;
pub mod repository;
