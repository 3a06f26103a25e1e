pub mod messages;

pub use messages::{CrossDomainEvent, DomainMessage, DomainUpdate, Effect};
