pub mod board;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod fields;
pub mod io;
pub mod item;
pub mod mapper;
pub mod paths;
pub mod revenue;
pub mod series;
pub mod store;
pub mod transition;
pub mod types;
pub mod vocabulary;

pub use error::{Result, StageboardError};
