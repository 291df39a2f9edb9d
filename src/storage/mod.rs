mod audit_log;
mod errors;
mod record_source;

pub use audit_log::AuditLog;
pub use errors::SourceError;
pub use record_source::load_records;
