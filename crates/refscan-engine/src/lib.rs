//! refscan_engine - JSON Schema reference analysis.

pub mod engine;
