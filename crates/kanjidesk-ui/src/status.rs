//! Database status panel.
//!
//! Rendering is a total function of the database state and the update
//! state; the callbacks are only invoked when the user activates a button
//! or the language selector in the returned tree.

use kanjidesk_types::{DatabaseState, DatabaseVersion, DatabaseVersions, DbName, UpdateState};

use crate::date::format_date;
use crate::lang::{BASE_LANGUAGE, DB_LANGUAGES};
use crate::view::{Callback, Node, SelectOption, TextCallback};

const KANJIDIC_URL: &str = "https://www.edrdg.org/wiki/index.php/KANJIDIC_Project";
const EDRDG_URL: &str = "https://www.edrdg.org/";
const EDRDG_LICENCE_URL: &str = "https://www.edrdg.org/edrdg/licence.html";

#[derive(Clone, Default)]
pub struct StatusCallbacks {
    pub on_update: Option<Callback>,
    pub on_cancel: Option<Callback>,
    /// Accepted for parity with the other actions; no layout offers it.
    pub on_destroy: Option<Callback>,
    pub on_set_lang: Option<TextCallback>,
}

pub struct DatabaseStatus<'a> {
    pub database_state: DatabaseState,
    pub database_versions: &'a DatabaseVersions,
    pub update_state: &'a UpdateState,
    pub callbacks: StatusCallbacks,
}

impl DatabaseStatus<'_> {
    pub fn view(&self) -> Node {
        Node::block(
            "database-status",
            vec![Node::Heading("Kanji".to_string()), self.body()],
        )
    }

    fn body(&self) -> Node {
        if self.database_state == DatabaseState::Initializing {
            return Node::block("initializing", vec![Node::text("Initializing…")]);
        }

        match self.update_state {
            UpdateState::Idle { last_check } => {
                // The worker reports the database state and the versions in
                // separate messages, so a ready database may not have its
                // version yet.
                let status = match (self.database_state, &self.database_versions.kanjidb) {
                    (DatabaseState::Empty, _) | (_, None) => Node::text("No database"),
                    (_, Some(version)) => {
                        let mut lines = vec![Node::text(format!("Version {}.", version.semver()))];
                        if let Some(last_check) = last_check {
                            let checked = format_date(last_check);
                            lines.push(Node::text(format!("Last check {checked}.")));
                        }
                        Node::block("version", lines)
                    }
                };

                let mut children = Vec::new();
                children.extend(self.summary());
                children.push(Node::block(
                    "status-with-button",
                    vec![
                        status,
                        self.lang_selector(),
                        Node::button("Check for updates", self.callbacks.on_update.clone()),
                    ],
                ));
                Node::block("idle", children)
            }
            UpdateState::Checking => Node::block(
                "checking",
                vec![
                    Node::text("Checking for updates…"),
                    Node::button("Cancel", self.callbacks.on_cancel.clone()),
                ],
            ),
            UpdateState::Downloading {
                db_name,
                download_version,
                progress,
            } => {
                let db_label = match db_name {
                    DbName::Kanjidb => "kanji data",
                    DbName::Bushudb => "radical data",
                };
                let label = format!(
                    "Downloading {db_label} version {} ({}%)…",
                    download_version.semver(),
                    (progress * 100.0).round() as i64
                );
                Node::block(
                    "downloading",
                    vec![
                        Node::Progress {
                            value: Some(progress * 100.0),
                            max: 100.0,
                            label,
                        },
                        Node::button("Cancel", self.callbacks.on_cancel.clone()),
                    ],
                )
            }
            UpdateState::UpdatingDb {
                db_name,
                download_version,
            } => {
                let db_label = match db_name {
                    DbName::Kanjidb => "kanji database",
                    DbName::Bushudb => "radical database",
                };
                let label = format!(
                    "Updating {db_label} to version {}…",
                    download_version.semver()
                );
                Node::block(
                    "updatingdb",
                    vec![
                        Node::Progress {
                            value: None,
                            max: 100.0,
                            label,
                        },
                        Node::disabled_button("Cancel"),
                    ],
                )
            }
            UpdateState::Error { error } => {
                let mut children = Vec::new();
                children.extend(self.summary());
                children.push(Node::block(
                    "status-with-button",
                    vec![
                        Node::text(format!("Update failed: {}", error.message)),
                        Node::button("Retry", self.callbacks.on_update.clone()),
                    ],
                ));
                Node::block("error", children)
            }
        }
    }

    fn summary(&self) -> Option<Node> {
        let version: &DatabaseVersion = self.database_versions.kanjidb.as_ref()?;

        Some(Node::Line(vec![
            Node::text("Includes data from "),
            Node::Link {
                text: "KANJIDIC".to_string(),
                href: KANJIDIC_URL.to_string(),
            },
            Node::text(format!(
                " version {} generated on {}. This data is the property of the ",
                version.database_version, version.date_of_creation
            )),
            Node::Link {
                text: "Electronic Dictionary Research and Development Group".to_string(),
                href: EDRDG_URL.to_string(),
            },
            Node::text(", and is used in conformance with the Group's "),
            Node::Link {
                text: "licence".to_string(),
                href: EDRDG_LICENCE_URL.to_string(),
            },
            Node::text("."),
        ]))
    }

    fn lang_selector(&self) -> Node {
        let selected = self
            .database_versions
            .kanjidb
            .as_ref()
            .map_or(BASE_LANGUAGE, |v| v.lang.as_str());

        Node::Select {
            name: "lang",
            options: DB_LANGUAGES
                .iter()
                .map(|(code, name)| SelectOption {
                    value: code.to_string(),
                    label: name.to_string(),
                    selected: *code == selected,
                })
                .collect(),
            on_change: self.callbacks.on_set_lang.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::{Local, TimeZone, Utc};
    use kanjidesk_types::UpdateError;

    use super::*;

    const LAYOUTS: [&str; 5] = ["idle", "checking", "downloading", "updatingdb", "error"];

    fn version(lang: &str) -> DatabaseVersion {
        DatabaseVersion {
            major: 1,
            minor: 2,
            patch: 3,
            database_version: "4.01".into(),
            date_of_creation: "2023-05-01".into(),
            lang: lang.into(),
        }
    }

    fn loaded() -> DatabaseVersions {
        DatabaseVersions {
            kanjidb: Some(version("fr")),
            bushudb: Some(version("en")),
        }
    }

    fn all_update_states() -> Vec<UpdateState> {
        vec![
            UpdateState::Idle { last_check: None },
            UpdateState::Checking,
            UpdateState::Downloading {
                db_name: DbName::Kanjidb,
                download_version: version("en"),
                progress: 0.456,
            },
            UpdateState::UpdatingDb {
                db_name: DbName::Bushudb,
                download_version: version("en"),
            },
            UpdateState::Error {
                error: UpdateError::new("Network unreachable"),
            },
        ]
    }

    fn render(state: DatabaseState, versions: &DatabaseVersions, update: &UpdateState) -> Node {
        DatabaseStatus {
            database_state: state,
            database_versions: versions,
            update_state: update,
            callbacks: StatusCallbacks::default(),
        }
        .view()
    }

    /// Which of the known layouts appear in the tree
    fn layouts_in(node: &Node) -> Vec<&'static str> {
        LAYOUTS
            .iter()
            .copied()
            .filter(|class| node.find_block(class).is_some())
            .collect()
    }

    #[test]
    fn each_update_state_has_exactly_one_layout() {
        let versions = loaded();
        for update in all_update_states() {
            let node = render(DatabaseState::Ok, &versions, &update);
            assert_eq!(layouts_in(&node), [update.tag()]);
        }
    }

    #[test]
    fn initializing_wins_over_every_update_state() {
        let versions = loaded();
        for update in all_update_states() {
            let node = render(DatabaseState::Initializing, &versions, &update);
            assert!(node.find_block("initializing").is_some());
            assert!(layouts_in(&node).is_empty(), "{} leaked through", update.tag());
            assert!(node.buttons().is_empty());
            assert_eq!(node.text_content(), "Kanji\nInitializing…");
        }
    }

    #[test]
    fn ready_without_versions_shows_no_database() {
        let node = render(DatabaseState::Ok, &DatabaseVersions::default(), &UpdateState::default());
        assert!(node.contains_text("No database"));
        assert!(!node.contains_text("Version"));
        assert!(!node.contains_text("KANJIDIC"));
    }

    #[test]
    fn empty_database_shows_no_database_even_with_versions() {
        let node = render(DatabaseState::Empty, &loaded(), &UpdateState::default());
        assert!(node.contains_text("No database"));
    }

    #[test]
    fn idle_shows_version_and_last_check() {
        let last_check = Local
            .with_ymd_and_hms(2023, 6, 3, 9, 5, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc);
        let node = render(
            DatabaseState::Ok,
            &loaded(),
            &UpdateState::Idle {
                last_check: Some(last_check),
            },
        );
        assert!(node.contains_text("Version 1.2.3."));
        assert!(node.contains_text("Last check 2023-06-03 09:05."));
        assert!(node.contains_text("KANJIDIC version 4.01 generated on 2023-05-01."));
        assert!(node.find_button("Check for updates").is_some());
    }

    #[test]
    fn downloading_label_rounds_percentage() {
        let node = render(DatabaseState::Ok, &loaded(), &all_update_states()[2]);
        assert!(node.contains_text("Downloading kanji data version 1.2.3 (46%)…"));

        let progress = node.find_block("downloading").unwrap().children()[0].clone();
        match progress {
            Node::Progress { value, max, .. } => {
                assert!((value.unwrap() - 45.6).abs() < 1e-9);
                assert_eq!(max, 100.0);
            }
            other => panic!("expected progress, got {other:?}"),
        }
    }

    #[test]
    fn updating_has_indeterminate_progress_and_disabled_cancel() {
        let node = render(DatabaseState::Ok, &loaded(), &all_update_states()[3]);
        assert!(node.contains_text("Updating radical database to version 1.2.3…"));
        match node.find_button("Cancel").unwrap() {
            Node::Button { disabled, .. } => assert!(*disabled),
            other => panic!("expected button, got {other:?}"),
        }
        assert!(!node.find_button("Cancel").unwrap().click());
    }

    #[test]
    fn error_shows_message_and_retry() {
        let node = render(DatabaseState::Ok, &loaded(), &all_update_states()[4]);
        assert!(node.contains_text("Update failed: Network unreachable"));
        assert!(node.find_button("Retry").is_some());
        assert!(node.contains_text("KANJIDIC"));
    }

    #[test]
    fn buttons_fire_their_callbacks() {
        let log = Rc::new(RefCell::new(Vec::<String>::new()));
        let callbacks = {
            let (u, c, l) = (log.clone(), log.clone(), log.clone());
            StatusCallbacks {
                on_update: Some(Rc::new(move || u.borrow_mut().push("update".into()))),
                on_cancel: Some(Rc::new(move || c.borrow_mut().push("cancel".into()))),
                on_destroy: None,
                on_set_lang: Some(Rc::new(move |lang: &str| {
                    l.borrow_mut().push(format!("lang:{lang}"))
                })),
            }
        };
        let versions = loaded();
        let states = all_update_states();

        let press = |update: &UpdateState, label: &str| {
            let node = DatabaseStatus {
                database_state: DatabaseState::Ok,
                database_versions: &versions,
                update_state: update,
                callbacks: callbacks.clone(),
            }
            .view();
            assert!(node.find_button(label).unwrap().click());
            node
        };

        let idle = press(&states[0], "Check for updates");
        press(&states[1], "Cancel");
        press(&states[2], "Cancel");
        press(&states[4], "Retry");
        // Not validated here
        assert!(idle.find_select().unwrap().change("zz"));

        assert_eq!(*log.borrow(), ["update", "cancel", "cancel", "update", "lang:zz"]);
    }

    #[test]
    fn lang_selector_follows_kanjidb_version() {
        let node = render(DatabaseState::Ok, &loaded(), &UpdateState::default());
        assert_eq!(node.find_select().unwrap().text_content(), "Français");

        let node = render(
            DatabaseState::Empty,
            &DatabaseVersions::default(),
            &UpdateState::default(),
        );
        match node.find_select().unwrap() {
            Node::Select { options, .. } => {
                let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
                assert_eq!(selected.len(), 1);
                assert_eq!(selected[0].value, BASE_LANGUAGE);
                assert_eq!(options.len(), DB_LANGUAGES.len());
            }
            other => panic!("expected select, got {other:?}"),
        }
    }
}
