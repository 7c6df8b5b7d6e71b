#![allow(dead_code, non_snake_case, non_upper_case_globals)]

pub mod error;
pub mod utils;
pub mod units;
pub mod nd_utils;
pub mod operators;
pub mod hilbert;
pub mod spectrum;
pub mod wavefunction;
pub mod qubit;
pub mod noise;
pub mod config;

pub use error::{ Cos2PhiError, Cos2PhiResult };
pub use qubit::{ Cos2PhiParams, Cos2PhiQubit, EnergyEsys, Operator };
