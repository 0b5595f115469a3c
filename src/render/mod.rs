//! Output rendering (FleetDM documents, run report)

pub mod report;
pub mod writer;
pub mod yaml;

pub use report::write_report;
pub use writer::write_fleet_documents;
