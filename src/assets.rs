//! Texts, boards and help documents embedded at compile time.

use serde::Deserialize;

pub const HELP_JSON: &str = include_str!("../assets/help.json");

const TEXTS: &[(&str, &str)] = &[
    ("Welcome.txt", include_str!("../assets/files/Welcome.txt")),
    ("notes.txt", include_str!("../assets/files/notes.txt")),
    ("aphid_README.txt", include_str!("../assets/files/aphid_README.txt")),
    ("clearance.txt", include_str!("../assets/files/clearance.txt")),
];

const BOARDS: &[(&str, &str)] = &[(
    "tutorial_board.txt",
    include_str!("../assets/boards/tutorial_board.txt"),
)];

/// One entry of `help.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HelpDoc {
    pub name: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub short_description: String,
    #[serde(default)]
    pub long_description: Vec<String>,
}

pub fn parse_help(json: &str) -> Result<Vec<HelpDoc>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn text(name: &str) -> Option<&'static str> {
    lookup(TEXTS, name)
}

pub fn board(name: &str) -> Option<&'static str> {
    lookup(BOARDS, name)
}

fn lookup(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table.iter().find(|(n, _)| *n == name).map(|(_, body)| *body)
}
