use crate::{LevelFilter, Record};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_query: String,
    pub level: LevelFilter,
}

impl FilterState {
    /// Name or position contains the query (case-insensitive) and the level
    /// passes the level filter. An empty query matches everything.
    pub fn matches(&self, record: &Record) -> bool {
        let needle = self.search_query.to_lowercase();
        let text_match = record.name.to_lowercase().contains(&needle)
            || record.position.to_lowercase().contains(&needle);
        text_match && self.level.matches(record.level)
    }
}

/// Filtered view over `records`, source order preserved.
pub fn filter_records<'a>(records: &'a [Record], filter: &FilterState) -> Vec<&'a Record> {
    records.iter().filter(|record| filter.matches(record)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Level, RecordId};

    fn record(id: &str, name: &str, position: &str, level: Level) -> Record {
        Record {
            id: RecordId::new(id),
            name: name.to_string(),
            position: position.to_string(),
            level,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("1", "Ann", "Dev", Level::Junior),
            record("2", "Bo", "QA", Level::Senior),
        ]
    }

    #[test]
    fn search_is_case_insensitive_on_name() {
        let records = sample();
        let filter = FilterState {
            search_query: "an".to_string(),
            level: LevelFilter::All,
        };
        let ids: Vec<_> = filter_records(&records, &filter)
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn search_matches_position() {
        let records = sample();
        let filter = FilterState {
            search_query: "qa".to_string(),
            level: LevelFilter::All,
        };
        let view = filter_records(&records, &filter);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Bo");
    }

    #[test]
    fn level_filter_combines_with_search() {
        let records = sample();
        let filter = FilterState {
            search_query: String::new(),
            level: LevelFilter::Only(Level::Senior),
        };
        let view = filter_records(&records, &filter);
        assert!(view.iter().all(|r| r.level == Level::Senior));
        assert_eq!(view.len(), 1);

        let filter = FilterState {
            search_query: "ann".to_string(),
            level: LevelFilter::Only(Level::Senior),
        };
        assert!(filter_records(&records, &filter).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let records = vec![
            record("3", "Zed", "Ops", Level::Intern),
            record("1", "Amy", "Ops", Level::Intern),
            record("2", "Max", "Ops", Level::Intern),
        ];
        let filter = FilterState {
            search_query: "OPS".to_string(),
            level: LevelFilter::Only(Level::Intern),
        };
        let names: Vec<_> = filter_records(&records, &filter)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zed", "Amy", "Max"]);
    }
}
