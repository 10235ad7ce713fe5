/// Database Module
///
/// ## Architecture
///
/// - **Session** (`connection.rs`): the connection handle, its state, connect/query/update/disconnect
/// - **Events** (`events.rs`): the optional notification sinks a session reports through
/// - **Results** (`query.rs`): the caller-owned cursor returned by queries
/// - **Targets** (`target.rs`): connection-string parsing and opening
///
/// ## Error Handling
///
/// Operations return `SessionError` and also notify the error sink, so callers
/// may observe failures either way or not at all.
pub mod connection;
pub mod events;
pub mod query;
pub mod target;

pub use connection::*;
pub use events::{SessionEvent, Sink, Sinks};
pub use query::*;
pub use target::ConnectionTarget;
