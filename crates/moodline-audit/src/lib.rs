pub mod events;

pub use events::AuditEvent;
