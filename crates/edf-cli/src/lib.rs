//! CLI library components for the EDF header validator.

pub mod inputs;
pub mod logging;
