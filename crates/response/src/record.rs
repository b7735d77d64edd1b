use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("bad {field} field: {source}")]
    BadField {
        field: &'static str,
        source: std::num::ParseFloatError,
    },
    #[error("row has {0} fields, expected 2")]
    WrongWidth(usize),
}

/// One simulated request: when it arrived and how long the response took.
/// Rows are comma-separated and headerless, one per request.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub arrival_time: f64,
    pub response_time: f64,
}

impl ResponseRecord {
    pub fn new(arrival_time: f64, response_time: f64) -> Self {
        Self {
            arrival_time,
            response_time,
        }
    }

    pub fn to_vec(&self) -> Vec<String> {
        vec![
            self.arrival_time.to_string(),
            self.response_time.to_string(),
        ]
    }

    pub fn to_byte_record(&self) -> csv::ByteRecord {
        let mut record = csv::ByteRecord::new();
        record.push_field(self.arrival_time.to_string().as_bytes());
        record.push_field(self.response_time.to_string().as_bytes());
        record
    }
}

impl ToString for ResponseRecord {
    fn to_string(&self) -> String {
        format!("{},{}", self.arrival_time, self.response_time)
    }
}

fn parse_field(
    raw: &str,
    field: &'static str,
) -> Result<f64, RecordError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|source| RecordError::BadField { field, source })
}

impl TryFrom<&csv::StringRecord> for ResponseRecord {
    type Error = RecordError;

    fn try_from(record: &csv::StringRecord) -> Result<Self, RecordError> {
        if record.len() < 2 {
            return Err(RecordError::WrongWidth(record.len()));
        }
        Ok(Self {
            arrival_time: parse_field(&record[0], "arrivalTime")?,
            response_time: parse_field(&record[1], "responseTime")?,
        })
    }
}

impl TryFrom<&csv::ByteRecord> for ResponseRecord {
    type Error = RecordError;

    fn try_from(record: &csv::ByteRecord) -> Result<Self, RecordError> {
        if record.len() < 2 {
            return Err(RecordError::WrongWidth(record.len()));
        }
        Ok(Self {
            arrival_time: parse_field(&String::from_utf8_lossy(&record[0]), "arrivalTime")?,
            response_time: parse_field(&String::from_utf8_lossy(&record[1]), "responseTime")?,
        })
    }
}

pub fn response_csv_reader_builder(builder: &mut csv::ReaderBuilder) -> &mut csv::ReaderBuilder {
    builder.delimiter(b',').has_headers(false)
}

pub fn response_csv_writer_builder(builder: &mut csv::WriterBuilder) -> &mut csv::WriterBuilder {
    builder.delimiter(b',').has_headers(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_clean_row() {
        let row = csv::StringRecord::from(vec!["0.5", "12.25"]);
        let record = ResponseRecord::try_from(&row).unwrap();
        assert_eq!(record, ResponseRecord::new(0.5, 12.25));
    }

    #[test]
    fn bad_field_error_names_the_column() {
        let row = csv::StringRecord::from(vec!["0.5", "not-a-number"]);
        let err = ResponseRecord::try_from(&row).unwrap_err();
        assert!(matches!(
            err,
            RecordError::BadField {
                field: "responseTime",
                ..
            }
        ));
    }

    #[test]
    fn short_row_is_rejected() {
        let row = csv::StringRecord::from(vec!["0.5"]);
        let err = ResponseRecord::try_from(&row).unwrap_err();
        assert!(matches!(err, RecordError::WrongWidth(1)));
    }

    #[test]
    fn byte_record_round_trip() {
        let record = ResponseRecord::new(1.5, 33.0);
        let bytes = record.to_byte_record();
        assert_eq!(ResponseRecord::try_from(&bytes).unwrap(), record);
    }

    #[test]
    fn renders_as_a_csv_row() {
        assert_eq!(ResponseRecord::new(0.5, 12.0).to_string(), "0.5,12");
    }
}
