pub mod managed;
pub mod request;
pub mod service;

pub use managed::{ManagedReport, ReportCatalog};
pub use request::{IndicatorReport, ReportRequest};
pub use service::ReportService;

#[cfg(test)]
mod managed_test;
