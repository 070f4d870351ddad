use super::key::normalize_component;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Postal code and city for one street.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalArea {
    pub postal_code: String,
    pub city: String,
}

/// Street to postal area lookup, injected by the caller instead of being
/// compiled in, so fixtures can replace production tables.
#[derive(Debug, Clone, Default)]
pub struct PostalDirectory {
    streets: HashMap<String, PostalArea>,
}

#[derive(Debug, thiserror::Error)]
pub enum PostalDirectoryError {
    #[error("failed to read postal directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid postal directory data: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct PostalRow {
    street: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    postal_code: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
}

impl PostalDirectory {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PostalArea)>,
        S: AsRef<str>,
    {
        let streets = entries
            .into_iter()
            .map(|(street, area)| (normalize_component(street.as_ref()), area))
            .collect();
        Self { streets }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PostalDirectoryError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| PostalDirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Reads a `street,postal_code,city` CSV with a header row. Rows without
    /// a street are skipped; later rows replace earlier ones for the same street.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PostalDirectoryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut streets = HashMap::new();

        for record in csv_reader.deserialize::<PostalRow>() {
            let row = record?;
            let street = normalize_component(&row.street);
            if street.is_empty() {
                continue;
            }
            streets.insert(
                street,
                PostalArea {
                    postal_code: row.postal_code.unwrap_or_default(),
                    city: row.city.unwrap_or_default(),
                },
            );
        }

        Ok(Self { streets })
    }

    pub fn lookup(&self, street: &str) -> Option<&PostalArea> {
        self.streets.get(&normalize_component(street))
    }

    pub fn city_for(&self, street: &str) -> Option<&str> {
        self.lookup(street)
            .map(|area| area.city.as_str())
            .filter(|city| !city.is_empty())
    }

    pub fn len(&self) -> usize {
        self.streets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streets.is_empty()
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        let directory = PostalDirectory::new([(
            "Chapmansgatan",
            PostalArea {
                postal_code: "414 54".to_string(),
                city: "Göteborg".to_string(),
            },
        )]);

        assert_eq!(directory.city_for("  chapmansgatan "), Some("Göteborg"));
        assert!(directory.lookup("Storgatan").is_none());
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn reader_skips_blank_streets_and_keeps_last_duplicate() {
        let csv = "street,postal_code,city\n\
Storgatan,111 22,Stockholm\n\
,999 99,Ingenstans\n\
storgatan,111 23,Solna\n\
Tallvägen,,\n";
        let directory = PostalDirectory::from_reader(Cursor::new(csv)).expect("directory loads");

        assert_eq!(directory.len(), 2);
        let area = directory.lookup("Storgatan").expect("street present");
        assert_eq!(area.postal_code, "111 23");
        assert_eq!(area.city, "Solna");
        assert_eq!(directory.city_for("Tallvägen"), None);
    }

    #[test]
    fn from_path_reports_missing_file() {
        let error = PostalDirectory::from_path("./does-not-exist.csv").expect_err("io error");
        match error {
            PostalDirectoryError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("./does-not-exist.csv"));
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn default_directory_is_empty() {
        assert!(PostalDirectory::default().is_empty());
    }
}
