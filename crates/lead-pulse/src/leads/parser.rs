use super::domain::LeadRecord;
use super::normalizer::{
    clean_label, coerce_date, coerce_integer, coerce_number, parse_conversion_flag,
};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const SOURCE_COLUMN: &str = "Lead Source";

#[derive(Debug)]
pub(crate) enum ParseOutcome {
    Records(Vec<LeadRecord>),
    MissingColumn(&'static str),
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<ParseOutcome, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if !headers
        .iter()
        .any(|header| header.trim_start_matches('\u{feff}') == SOURCE_COLUMN)
    {
        return Ok(ParseOutcome::MissingColumn(SOURCE_COLUMN));
    }

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let parsed: LeadRow = row.deserialize(Some(&headers))?;
        records.push(parsed.into_record());
    }

    Ok(ParseOutcome::Records(records))
}

#[derive(Debug, Deserialize)]
struct LeadRow {
    #[serde(rename = "Lead ID", default, deserialize_with = "empty_string_as_none")]
    lead_id: Option<String>,
    #[serde(rename = "First Name", default, deserialize_with = "empty_string_as_none")]
    first_name: Option<String>,
    #[serde(
        rename = "Lead Source",
        alias = "\u{feff}Lead Source",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    source: Option<String>,
    #[serde(rename = "State", default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(rename = "Zip Code", default, deserialize_with = "empty_string_as_none")]
    zip_code: Option<String>,
    #[serde(rename = "Cost", default, deserialize_with = "empty_string_as_none")]
    cost: Option<String>,
    #[serde(rename = "Converted", default, deserialize_with = "empty_string_as_none")]
    converted: Option<String>,
    #[serde(
        rename = "Converted Count",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    converted_count: Option<String>,
    #[serde(
        rename = "Appointments Completed",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    appointments_completed: Option<String>,
    #[serde(
        rename = "Number of Outbound Calls",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    outbound_calls: Option<String>,
    #[serde(rename = "Stage", default, deserialize_with = "empty_string_as_none")]
    stage: Option<String>,
    #[serde(
        rename = "Created Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    created_date: Option<String>,
    #[serde(
        rename = "Approval Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    approval_date: Option<String>,
    #[serde(rename = "Year", default, deserialize_with = "empty_string_as_none")]
    year: Option<String>,
    #[serde(rename = "Month", default, deserialize_with = "empty_string_as_none")]
    month: Option<String>,
}

impl LeadRow {
    fn into_record(self) -> LeadRecord {
        let number = |cell: &Option<String>| cell.as_deref().and_then(coerce_number);
        let date = |cell: &Option<String>| cell.as_deref().and_then(coerce_date);

        LeadRecord {
            // A negative spend is a malformed cell, not a refund.
            cost: number(&self.cost).filter(|cost| *cost >= 0.0),
            converted: self
                .converted
                .as_deref()
                .map(parse_conversion_flag)
                .unwrap_or(false),
            converted_count: number(&self.converted_count),
            appointments_completed: number(&self.appointments_completed),
            outbound_calls: number(&self.outbound_calls),
            created_date: date(&self.created_date),
            approval_date: date(&self.approval_date),
            year: self
                .year
                .as_deref()
                .and_then(coerce_integer)
                .and_then(|year| i32::try_from(year).ok()),
            month: self
                .month
                .as_deref()
                .and_then(coerce_integer)
                .and_then(|month| u32::try_from(month).ok())
                .filter(|month| (1..=12).contains(month)),
            lead_id: clean_label(self.lead_id),
            first_name: clean_label(self.first_name),
            source: clean_label(self.source),
            state: clean_label(self.state),
            zip_code: clean_label(self.zip_code),
            stage: clean_label(self.stage),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
