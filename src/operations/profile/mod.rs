//! Airfoil outline generation and import.

mod measured;
mod naca;

pub use measured::{import_measured, parse_dat, read_dat, resampled, scaled};
pub use naca::{generate, naca4, NacaCode, NacaProfile};
