//! Core data types for Creditmeter

pub mod message;
pub mod report;
pub mod usage;
