//! HTTP-backed upstream sources

pub mod http;

pub use http::{build_client, HttpMessageSource, HttpReportSource};
