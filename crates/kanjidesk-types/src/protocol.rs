//! Messages exchanged between the UI and the data worker.
//!
//! Every message is a JSON object with a `type` discriminant. Commands flow
//! UI -> worker, notifications flow worker -> UI. Nothing is acknowledged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::KanjiResult;
use crate::state::{DatabaseState, DatabaseVersions, UpdateState};

/// Versions payload of `dbversionsupdated`
pub type ResolvedDbVersions = DatabaseVersions;

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("message has no `type` field")]
    MissingType,

    #[error("unknown message type `{0}`")]
    UnknownType(String),

    #[error("invalid `{kind}` payload: {source}")]
    Payload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode `{kind}`: {source}")]
    Encode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// UI -> worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    /// Check for a database update. `lang` asks the worker to switch the
    /// database language as part of the update.
    Update {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
    CancelUpdate,
    Destroy,
    /// Look up each kanji, in order. Every entry is a single character.
    Query { kanji: Vec<String> },
}

/// Worker -> UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Notification {
    DbStateUpdated { state: DatabaseState },
    DbVersionsUpdated { versions: ResolvedDbVersions },
    UpdateStateUpdated { state: UpdateState },
    QueryResult { results: Vec<KanjiResult> },
}

/// Any message on either side of the boundary
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerMessage {
    Command(Command),
    Notification(Notification),
}

impl Command {
    pub const KINDS: [&'static str; 4] = ["update", "cancelupdate", "destroy", "query"];

    pub fn update() -> Self {
        Command::Update { lang: None }
    }

    pub fn update_with_lang(lang: impl Into<String>) -> Self {
        Command::Update {
            lang: Some(lang.into()),
        }
    }

    pub fn cancel_update() -> Self {
        Command::CancelUpdate
    }

    pub fn destroy() -> Self {
        Command::Destroy
    }

    pub fn query<I, S>(kanji: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command::Query {
            kanji: kanji.into_iter().map(Into::into).collect(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Command::Update { .. } => "update",
            Command::CancelUpdate => "cancelupdate",
            Command::Destroy => "destroy",
            Command::Query { .. } => "query",
        }
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|source| ProtocolError::Encode {
            kind: self.kind(),
            source,
        })
    }

    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        match WorkerMessage::decode(raw)? {
            WorkerMessage::Command(command) => Ok(command),
            WorkerMessage::Notification(n) => Err(ProtocolError::UnknownType(n.kind().to_string())),
        }
    }
}

impl Notification {
    pub const KINDS: [&'static str; 4] = [
        "dbstateupdated",
        "dbversionsupdated",
        "updatestateupdated",
        "queryresult",
    ];

    pub fn db_state_updated(state: DatabaseState) -> Self {
        Notification::DbStateUpdated { state }
    }

    pub fn db_versions_updated(versions: ResolvedDbVersions) -> Self {
        Notification::DbVersionsUpdated { versions }
    }

    pub fn update_state_updated(state: UpdateState) -> Self {
        Notification::UpdateStateUpdated { state }
    }

    pub fn query_result(results: Vec<KanjiResult>) -> Self {
        Notification::QueryResult { results }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Notification::DbStateUpdated { .. } => "dbstateupdated",
            Notification::DbVersionsUpdated { .. } => "dbversionsupdated",
            Notification::UpdateStateUpdated { .. } => "updatestateupdated",
            Notification::QueryResult { .. } => "queryresult",
        }
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|source| ProtocolError::Encode {
            kind: self.kind(),
            source,
        })
    }

    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        match WorkerMessage::decode(raw)? {
            WorkerMessage::Notification(notification) => Ok(notification),
            WorkerMessage::Command(c) => Err(ProtocolError::UnknownType(c.kind().to_string())),
        }
    }
}

impl WorkerMessage {
    /// Decode one message, dispatching on its `type` field first so that
    /// payload errors name the message they belong to.
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(raw).map_err(ProtocolError::Malformed)?;

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingType)?
            .to_string();

        let decoded = if Command::KINDS.contains(&kind.as_str()) {
            serde_json::from_value(value).map(WorkerMessage::Command)
        } else if Notification::KINDS.contains(&kind.as_str()) {
            serde_json::from_value(value).map(WorkerMessage::Notification)
        } else {
            return Err(ProtocolError::UnknownType(kind));
        };

        decoded.map_err(|source| ProtocolError::Payload { kind, source })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            WorkerMessage::Command(command) => command.kind(),
            WorkerMessage::Notification(notification) => notification.kind(),
        }
    }
}

impl From<Command> for WorkerMessage {
    fn from(command: Command) -> Self {
        WorkerMessage::Command(command)
    }
}

impl From<Notification> for WorkerMessage {
    fn from(notification: Notification) -> Self {
        WorkerMessage::Notification(notification)
    }
}
