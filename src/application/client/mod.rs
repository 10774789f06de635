//! Client-specific flows selected with `--client`.

pub mod benfica;
pub mod euroleague;

pub use benfica::{lift_and_shift, LiftAndShiftReport};
pub use euroleague::{deploy_series1, Series1Plan, Series1Report};
