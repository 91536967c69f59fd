pub mod protocol;
pub mod result;
pub mod state;

pub use protocol::{Command, Notification, ProtocolError, ResolvedDbVersions, WorkerMessage};
pub use result::{KanjiReadings, KanjiResult};
pub use state::{DatabaseState, DatabaseVersion, DatabaseVersions, DbName, UpdateError, UpdateState};
