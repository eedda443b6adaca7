pub mod config;
pub mod conflict;
pub mod policy;
pub mod uid;

pub use config::{RunConfig, SenderIdentity};
pub use conflict::{Author, ConflictGroup, ConflictRecord, DeclaredConflict};
pub use policy::{VettingPolicy, group_conflicts};
pub use uid::{UidError, UidGenerator};
