//! Application services

pub mod conversion;

pub use conversion::{ConversionService, ConversionSummary};
