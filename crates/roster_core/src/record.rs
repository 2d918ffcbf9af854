use std::fmt;

use serde::{Deserialize, Serialize};

const PROVISIONAL_PREFIX: &str = "pending:";

/// Opaque record identifier as issued by the records API.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Id for a row appended locally after a bulk insert, before the next
    /// reload brings back the server-issued id.
    pub fn provisional(seq: u64) -> Self {
        Self(format!("{PROVISIONAL_PREFIX}{seq}"))
    }

    pub fn is_provisional(&self) -> bool {
        self.0.starts_with(PROVISIONAL_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Intern,
    Junior,
    Senior,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Intern, Level::Junior, Level::Senior];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Intern => "Intern",
            Level::Junior => "Junior",
            Level::Senior => "Senior",
        }
    }

    /// Case-sensitive, like the equality check the filter uses.
    pub fn parse(raw: &str) -> Option<Level> {
        let raw = raw.trim();
        Level::ALL.into_iter().find(|level| level.as_str() == raw)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level drop-down: the wildcard or one concrete level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Only(Level),
}

impl LevelFilter {
    pub fn matches(self, level: Level) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Only(wanted) => wanted == level,
        }
    }

    /// All -> Intern -> Junior -> Senior -> All.
    pub fn next(self) -> LevelFilter {
        match self {
            LevelFilter::All => LevelFilter::Only(Level::Intern),
            LevelFilter::Only(Level::Intern) => LevelFilter::Only(Level::Junior),
            LevelFilter::Only(Level::Junior) => LevelFilter::Only(Level::Senior),
            LevelFilter::Only(Level::Senior) => LevelFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LevelFilter::All => "All Levels",
            LevelFilter::Only(level) => level.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub name: String,
    pub position: String,
    pub level: Level,
}

/// A parsed spreadsheet row awaiting bulk insertion. No id until the server
/// has stored it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRow {
    pub name: String,
    pub position: String,
    pub level: Level,
}

impl PendingRow {
    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            name: self.name,
            position: self.position,
            level: self.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parse_is_case_sensitive_and_trims() {
        assert_eq!(Level::parse(" Senior "), Some(Level::Senior));
        assert_eq!(Level::parse("senior"), None);
        assert_eq!(Level::parse(""), None);
    }

    #[test]
    fn level_filter_cycles_back_to_all() {
        let mut filter = LevelFilter::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            filter = filter.next();
            seen.push(filter);
        }
        assert_eq!(
            seen,
            vec![
                LevelFilter::Only(Level::Intern),
                LevelFilter::Only(Level::Junior),
                LevelFilter::Only(Level::Senior),
                LevelFilter::All,
            ]
        );
    }

    #[test]
    fn provisional_ids_are_recognised() {
        assert!(RecordId::provisional(3).is_provisional());
        assert!(!RecordId::new("65f1c0ffee").is_provisional());
    }

    #[test]
    fn record_decodes_document_store_id() {
        let json = r#"{"_id":"65f1","name":"Ann","position":"Dev","level":"Junior","__v":0}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, RecordId::new("65f1"));
        assert_eq!(record.level, Level::Junior);

        let plain = r#"{"id":"7","name":"Bo","position":"QA","level":"Senior"}"#;
        let record: Record = serde_json::from_str(plain).unwrap();
        assert_eq!(record.id.as_str(), "7");
    }

    #[test]
    fn pending_row_serializes_without_id() {
        let row = PendingRow {
            name: "Ann".into(),
            position: "Dev".into(),
            level: Level::Intern,
        };
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"name":"Ann","position":"Dev","level":"Intern"}"#
        );
    }
}
