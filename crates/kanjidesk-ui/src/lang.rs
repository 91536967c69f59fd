/// Languages the kanji database is published in, in display order
pub const DB_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Español"),
    ("pt", "Português"),
    ("fr", "Français"),
];

/// Selected when no kanji database is loaded
pub const BASE_LANGUAGE: &str = "en";
