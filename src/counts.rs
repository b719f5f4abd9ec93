//! Per-label instance count overrides.

use csv::{ReaderBuilder, Trim};
use std::{collections::HashMap, path::Path};

/// Mapping from internal label (node or relationship) to a requested
/// instance count. Labels without an entry fall back to the caller's
/// default count.
#[derive(Debug, Clone, Default)]
pub struct CountOverrides {
    counts: HashMap<String, u64>,
}

impl CountOverrides {
    /// Reads `label,count` rows from a headerless comma-delimited file.
    ///
    /// Rows with fewer than two fields are skipped, as are rows whose
    /// count field does not parse as an integer. A negative count is
    /// stored as zero, suppressing generation for that label rather than
    /// restoring the default. Fields past the second are ignored. Later
    /// rows for the same label overwrite earlier ones. A missing or
    /// unreadable file yields an empty mapping after a warning on stderr;
    /// the run proceeds on defaults.
    pub fn from_csv_path(path: &Path) -> Self {
        let mut reader = match ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)
        {
            Ok(reader) => reader,
            Err(_) => {
                eprintln!(
                    "warning: cannot read counts file '{}', falling back to default counts",
                    path.display()
                );
                return Self::default();
            }
        };

        let mut counts = HashMap::new();
        for record in reader.records() {
            let Ok(record) = record else { continue };
            let (Some(label), Some(count)) = (record.get(0), record.get(1)) else {
                continue;
            };
            if let Ok(count) = count.parse::<i64>() {
                counts.insert(label.to_owned(), count.try_into().unwrap_or(0));
            }
        }
        Self { counts }
    }

    /// Returns the count for `label`, or `default` if none was supplied.
    pub fn get(&self, label: &str, default: u64) -> u64 {
        self.counts.get(label).copied().unwrap_or(default)
    }
}

impl FromIterator<(String, u64)> for CountOverrides {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
