use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of the worker-owned database. Only the worker moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseState {
    #[default]
    Initializing,
    Empty,
    OutOfDate,
    Ok,
    Unavailable,
}

/// Logical databases managed by the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbName {
    Kanjidb,
    Bushudb,
}

impl DbName {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbName::Kanjidb => "kanjidb",
            DbName::Bushudb => "bushudb",
        }
    }
}

impl fmt::Display for DbName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version and provenance of one on-device database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Upstream data release, e.g. "4.01"
    pub database_version: String,
    pub date_of_creation: String,
    pub lang: String,
}

impl DatabaseVersion {
    /// `major.minor.patch`
    pub fn semver(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Versions currently known to the UI. `None` means "not loaded yet",
/// which is not the same thing as an empty database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseVersions {
    #[serde(default)]
    pub kanjidb: Option<DatabaseVersion>,
    #[serde(default)]
    pub bushudb: Option<DatabaseVersion>,
}

impl DatabaseVersions {
    pub fn get(&self, name: DbName) -> Option<&DatabaseVersion> {
        match name {
            DbName::Kanjidb => self.kanjidb.as_ref(),
            DbName::Bushudb => self.bushudb.as_ref(),
        }
    }
}

/// Failure carried inside [`UpdateState::Error`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateError {
    #[serde(default)]
    pub name: String,
    pub message: String,
}

impl UpdateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: "Error".to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Worker-reported progress of a database update.
///
/// Plain data only so it can cross the worker boundary as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum UpdateState {
    Idle {
        #[serde(
            rename = "lastCheck",
            default,
            with = "chrono::serde::ts_milliseconds_option"
        )]
        last_check: Option<DateTime<Utc>>,
    },
    Checking,
    Downloading {
        #[serde(rename = "dbName")]
        db_name: DbName,
        #[serde(rename = "downloadVersion")]
        download_version: DatabaseVersion,
        /// Fraction in `0.0..=1.0`
        progress: f64,
    },
    UpdatingDb {
        #[serde(rename = "dbName")]
        db_name: DbName,
        #[serde(rename = "downloadVersion")]
        download_version: DatabaseVersion,
    },
    Error {
        error: UpdateError,
    },
}

impl Default for UpdateState {
    fn default() -> Self {
        UpdateState::Idle { last_check: None }
    }
}

impl UpdateState {
    /// Wire tag of the active variant
    pub fn tag(&self) -> &'static str {
        match self {
            UpdateState::Idle { .. } => "idle",
            UpdateState::Checking => "checking",
            UpdateState::Downloading { .. } => "downloading",
            UpdateState::UpdatingDb { .. } => "updatingdb",
            UpdateState::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn version() -> DatabaseVersion {
        DatabaseVersion {
            major: 1,
            minor: 2,
            patch: 3,
            database_version: "4.01".into(),
            date_of_creation: "2023-05-01".into(),
            lang: "en".into(),
        }
    }

    #[test]
    fn version_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(version()).unwrap();
        assert_eq!(json["databaseVersion"], "4.01");
        assert_eq!(json["dateOfCreation"], "2023-05-01");
        assert_eq!(version().semver(), "1.2.3");
    }

    #[test]
    fn update_state_tags_match_wire_names() {
        let states = [
            UpdateState::Idle { last_check: None },
            UpdateState::Checking,
            UpdateState::Downloading {
                db_name: DbName::Kanjidb,
                download_version: version(),
                progress: 0.5,
            },
            UpdateState::UpdatingDb {
                db_name: DbName::Bushudb,
                download_version: version(),
            },
            UpdateState::Error {
                error: UpdateError::new("offline"),
            },
        ];

        for state in states {
            let json = serde_json::to_value(&state).unwrap();
            assert_eq!(json["state"], state.tag());
        }
    }

    #[test]
    fn idle_last_check_is_epoch_millis() {
        let when = Utc.with_ymd_and_hms(2023, 6, 3, 9, 5, 0).unwrap();
        let json = serde_json::to_value(UpdateState::Idle {
            last_check: Some(when),
        })
        .unwrap();
        assert_eq!(json["lastCheck"], when.timestamp_millis());

        let parsed: UpdateState =
            serde_json::from_str(r#"{"state":"idle","lastCheck":null}"#).unwrap();
        assert_eq!(parsed, UpdateState::Idle { last_check: None });

        let parsed: UpdateState = serde_json::from_str(r#"{"state":"idle"}"#).unwrap();
        assert_eq!(parsed, UpdateState::default());
    }

    #[test]
    fn downloading_reads_worker_payload() {
        let raw = r#"{
            "state": "downloading",
            "dbName": "kanjidb",
            "downloadVersion": {
                "major": 2, "minor": 0, "patch": 1,
                "databaseVersion": "4.01", "dateOfCreation": "2023-05-01", "lang": "fr"
            },
            "progress": 0.25
        }"#;
        match serde_json::from_str::<UpdateState>(raw).unwrap() {
            UpdateState::Downloading {
                db_name,
                download_version,
                progress,
            } => {
                assert_eq!(db_name, DbName::Kanjidb);
                assert_eq!(download_version.lang, "fr");
                assert_eq!(progress, 0.25);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn database_state_is_lowercase() {
        assert_eq!(serde_json::to_string(&DatabaseState::OutOfDate).unwrap(), "\"outofdate\"");
        assert_eq!(DatabaseState::default(), DatabaseState::Initializing);
    }
}
