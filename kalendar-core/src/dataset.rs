//! Locating and loading a school year's dataset.
//!
//! Without an explicit source the current school year is looked up in the
//! published `index.json`. Explicit sources are either URLs or local paths.

use std::fmt;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::KalendarConfig;
use crate::constants::SCHOOL_YEAR_START_MONTH;
use crate::error::{KalendarError, KalendarResult};
use crate::event::Event;

/// One entry of index.json
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexEntry {
    pub start_year: i32,
    pub filename: String,
}

/// Where a dataset is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Local(PathBuf),
    Remote(String),
}

impl DataSource {
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            DataSource::Remote(arg.to_string())
        } else {
            DataSource::Local(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Local(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Start year of the school year `today` falls in. School years start in September.
pub fn current_school_year(today: NaiveDate) -> i32 {
    if today.month() >= SCHOOL_YEAR_START_MONTH {
        today.year()
    } else {
        today.year() - 1
    }
}

pub fn find_dataset(index: &[IndexEntry], school_year: i32) -> KalendarResult<&str> {
    index
        .iter()
        .find(|entry| entry.start_year == school_year)
        .map(|entry| entry.filename.as_str())
        .ok_or(KalendarError::DatasetNotFound(school_year))
}

pub fn parse_events(json: &str) -> KalendarResult<Vec<Event>> {
    Ok(serde_json::from_str(json)?)
}

pub struct DatasetResolver<'a> {
    config: &'a KalendarConfig,
}

impl<'a> DatasetResolver<'a> {
    pub fn new(config: &'a KalendarConfig) -> Self {
        DatasetResolver { config }
    }

    /// Pick the dataset to load. `today` decides the school year when no
    /// explicit source is given.
    pub fn locate(&self, explicit: Option<&str>, today: NaiveDate) -> KalendarResult<DataSource> {
        if let Some(arg) = explicit {
            return Ok(DataSource::from_arg(arg));
        }

        let school_year = current_school_year(today);
        debug!(school_year, "Looking up dataset in index");

        let index: Vec<IndexEntry> = serde_json::from_str(&self.fetch(&self.config.index_url())?)?;
        let filename = find_dataset(&index, school_year)?;

        Ok(DataSource::Remote(self.config.dataset_url(filename)))
    }

    pub fn load(&self, source: &DataSource) -> KalendarResult<Vec<Event>> {
        let json = match source {
            DataSource::Local(path) => std::fs::read_to_string(path)?,
            DataSource::Remote(url) => self.fetch(url)?,
        };

        let events = parse_events(&json)?;
        debug!(count = events.len(), source = %source, "Loaded events");
        Ok(events)
    }

    pub fn resolve(&self, explicit: Option<&str>, today: NaiveDate) -> KalendarResult<Vec<Event>> {
        let source = self.locate(explicit, today)?;
        self.load(&source)
    }

    fn fetch(&self, url: &str) -> KalendarResult<String> {
        debug!(url, "Fetching");
        // Only built when something is fetched, local datasets never need TLS
        let client = Client::builder().build()?;
        let response = client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(KalendarError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve each response to one connection on a loopback port, in order.
    /// Returns the base URL to use as `data_url`.
    fn serve(responses: Vec<(u16, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        thread::spawn(move || {
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();

                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut line = String::new();
                while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                    line.clear();
                }

                let response = format!(
                    "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
            }
        });

        url
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn school_year_turns_over_in_september() {
        assert_eq!(current_school_year(date(2024, 8, 31)), 2023);
        assert_eq!(current_school_year(date(2024, 9, 1)), 2024);
        assert_eq!(current_school_year(date(2025, 1, 15)), 2024);
        assert_eq!(current_school_year(date(2024, 12, 31)), 2024);
    }

    #[test]
    fn index_lookup_by_start_year() {
        let index: Vec<IndexEntry> = serde_json::from_str(
            r#"[
                {"start_year": 2023, "filename": "2023-2024.json"},
                {"start_year": 2024, "filename": "2024-2025.json"}
            ]"#,
        )
        .unwrap();

        assert_eq!(find_dataset(&index, 2024).unwrap(), "2024-2025.json");
        assert!(matches!(
            find_dataset(&index, 2019),
            Err(KalendarError::DatasetNotFound(2019))
        ));
    }

    #[test]
    fn explicit_source_kind_is_detected() {
        assert_eq!(
            DataSource::from_arg("https://data.kockatykalendar.sk/2024.json"),
            DataSource::Remote("https://data.kockatykalendar.sk/2024.json".to_string())
        );
        assert_eq!(
            DataSource::from_arg("data/2024.json"),
            DataSource::Local(PathBuf::from("data/2024.json"))
        );
    }

    #[test]
    fn explicit_local_source_skips_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[{
                "name": "Matboj",
                "date": {"start": "2024-11-05"},
                "contestants": {"min": "zs6", "max": "zs9"},
                "type": "sutaz",
                "sciences": ["mat"],
                "organizers": ["p-mat"]
            }]"#,
        )
        .unwrap();

        // An unreachable data URL proves the index is never consulted.
        let config = KalendarConfig {
            data_url: "http://127.0.0.1:9".to_string(),
            ..KalendarConfig::default()
        };
        let resolver = DatasetResolver::new(&config);
        let events = resolver
            .resolve(path.to_str(), date(2025, 3, 1))
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Matboj");
    }

    #[test]
    fn missing_local_file_is_io_error() {
        let config = KalendarConfig::default();
        let resolver = DatasetResolver::new(&config);
        let source = DataSource::Local(PathBuf::from("/nonexistent/events.json"));

        assert!(matches!(resolver.load(&source), Err(KalendarError::Io(_))));
    }

    #[test]
    fn malformed_dataset_is_parse_error() {
        assert!(matches!(
            parse_events(r#"[{"name": "Bez typu"}]"#),
            Err(KalendarError::Parse(_))
        ));
    }

    #[test]
    fn index_http_error_is_fetch_error() {
        let config = KalendarConfig {
            data_url: serve(vec![(404, "Not Found")]),
            ..KalendarConfig::default()
        };
        let resolver = DatasetResolver::new(&config);

        let result = resolver.locate(None, date(2025, 3, 1));
        assert!(
            matches!(result, Err(KalendarError::Fetch { status: 404, .. })),
            "unexpected result: {:?}",
            result
        );
    }

    #[test]
    fn index_without_current_year_is_dataset_not_found() {
        let config = KalendarConfig {
            data_url: serve(vec![(
                200,
                r#"[{"start_year": 2023, "filename": "2023-2024.json"}]"#,
            )]),
            ..KalendarConfig::default()
        };
        let resolver = DatasetResolver::new(&config);

        let result = resolver.resolve(None, date(2025, 3, 1));
        assert!(
            matches!(result, Err(KalendarError::DatasetNotFound(2024))),
            "unexpected result: {:?}",
            result
        );
    }

    #[test]
    fn dataset_http_error_is_fetch_error() {
        let base = serve(vec![(500, "Internal Server Error")]);
        let config = KalendarConfig::default();
        let resolver = DatasetResolver::new(&config);
        let source = DataSource::Remote(format!("{}/2024-2025.json", base));

        assert!(matches!(
            resolver.load(&source),
            Err(KalendarError::Fetch { status: 500, .. })
        ));
    }

    #[test]
    fn current_year_is_fetched_through_index() {
        let config = KalendarConfig {
            data_url: serve(vec![
                (200, r#"[{"start_year": 2024, "filename": "2024-2025.json"}]"#),
                (
                    200,
                    r#"[{"name": "Náboj", "date": {"start": "2025-03-21"}, "type": "sutaz", "sciences": ["mat"]}]"#,
                ),
            ]),
            ..KalendarConfig::default()
        };
        let resolver = DatasetResolver::new(&config);

        let source = resolver.locate(None, date(2025, 3, 1)).unwrap();
        assert_eq!(source, DataSource::Remote(config.dataset_url("2024-2025.json")));

        let events = resolver.load(&source).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Náboj");
    }
}
