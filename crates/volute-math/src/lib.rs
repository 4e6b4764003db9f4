//! Numerical primitives for the Volute Cavitation Core.

pub mod rk45;
