#![warn(clippy::pedantic)]
#![cfg_attr(feature = "swift", allow(clippy::unnecessary_cast))]
#![cfg_attr(feature = "swift", allow(clippy::ptr_as_ptr))]

pub mod bar;
#[cfg(feature = "swift")]
pub mod bridge;
pub mod config;
pub mod inventory;
pub mod load_planner;
pub mod plate;
pub mod rack_error;
pub mod rack_state;
pub mod rounding;
pub mod transition;
pub mod weight;

pub use load_planner::plan;
pub use transition::diff;
