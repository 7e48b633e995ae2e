//! Rate provider implementations

pub mod fixer;

pub use fixer::FixerProvider;
