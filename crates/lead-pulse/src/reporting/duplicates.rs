use crate::leads::LeadRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity columns that can take part in duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadKeyField {
    FirstName,
    ZipCode,
    State,
}

impl LeadKeyField {
    fn value(self, record: &LeadRecord) -> Option<&str> {
        match self {
            Self::FirstName => record.first_name.as_deref(),
            Self::ZipCode => record.zip_code.as_deref(),
            Self::State => record.state.as_deref(),
        }
    }
}

/// Predefined identity keys. `NameZip` backs the quality-page counter and
/// `StateZipName` the duplicate listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeys {
    NameZip,
    StateZipName,
}

impl DuplicateKeys {
    pub const fn fields(self) -> &'static [LeadKeyField] {
        match self {
            Self::NameZip => &[LeadKeyField::FirstName, LeadKeyField::ZipCode],
            Self::StateZipName => &[
                LeadKeyField::State,
                LeadKeyField::ZipCode,
                LeadKeyField::FirstName,
            ],
        }
    }
}

/// Returns every record whose key tuple appears more than once, in input
/// order. Missing cells compare equal to each other.
pub fn find_duplicates(records: &[LeadRecord], keys: DuplicateKeys) -> Vec<&LeadRecord> {
    let fields = keys.fields();
    let key_of = |record: &LeadRecord| -> Vec<Option<String>> {
        fields
            .iter()
            .map(|field| field.value(record).map(str::to_string))
            .collect()
    };

    let mut occurrences: HashMap<Vec<Option<String>>, usize> = HashMap::new();
    for record in records {
        *occurrences.entry(key_of(record)).or_insert(0) += 1;
    }

    records
        .iter()
        .filter(|record| occurrences.get(&key_of(*record)).copied().unwrap_or(0) > 1)
        .collect()
}
