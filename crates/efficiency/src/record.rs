use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("bad {field} field: {message}")]
    BadField {
        field: &'static str,
        message: String,
    },
    #[error("row has {got} fields, expected {want}")]
    WrongWidth { got: usize, want: usize },
}

fn parse_field<T>(record: &csv::StringRecord, idx: usize, field: &'static str) -> Result<T, RecordError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    record[idx]
        .trim()
        .parse::<T>()
        .map_err(|err| RecordError::BadField {
            field,
            message: err.to_string(),
        })
}

/// One row of the routing study's sweep summary: the swept parameters of a
/// simulation run and the total efficiency it achieved. Headerless,
/// comma-separated, one row per run.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyRecord {
    pub grid_length: f64,
    pub num_nodes: u32,
    pub tx_power: f64,
    pub is_aodv: bool,
    pub traffic_intensity: f64,
    pub total_efficiency: f64,
}

impl EfficiencyRecord {
    pub fn to_byte_record(&self) -> csv::ByteRecord {
        let mut record = csv::ByteRecord::new();
        record.push_field(self.grid_length.to_string().as_bytes());
        record.push_field(self.num_nodes.to_string().as_bytes());
        record.push_field(self.tx_power.to_string().as_bytes());
        record.push_field((self.is_aodv as u8).to_string().as_bytes());
        record.push_field(self.traffic_intensity.to_string().as_bytes());
        record.push_field(self.total_efficiency.to_string().as_bytes());
        record
    }
}

impl TryFrom<&csv::StringRecord> for EfficiencyRecord {
    type Error = RecordError;

    fn try_from(record: &csv::StringRecord) -> Result<Self, RecordError> {
        if record.len() < 6 {
            return Err(RecordError::WrongWidth {
                got: record.len(),
                want: 6,
            });
        }
        Ok(Self {
            grid_length: parse_field(record, 0, "gridLength")?,
            num_nodes: parse_field(record, 1, "numNodes")?,
            tx_power: parse_field(record, 2, "txPower")?,
            is_aodv: parse_field::<u8>(record, 3, "isAODV")? == 1,
            traffic_intensity: parse_field(record, 4, "trafficIntensity")?,
            total_efficiency: parse_field(record, 5, "totalEfficiency")?,
        })
    }
}

/// Node coordinates dumped by the simulator as a colon-separated triple.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl FromStr for Position {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, RecordError> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 3 {
            return Err(RecordError::BadField {
                field: "position",
                message: format!("expected X:Y:Z, got {:?}", s),
            });
        }
        let coord = |raw: &str| {
            raw.parse::<f64>().map_err(|err| RecordError::BadField {
                field: "position",
                message: err.to_string(),
            })
        };
        Ok(Self {
            x: coord(parts[0])?,
            y: coord(parts[1])?,
            z: coord(parts[2])?,
        })
    }
}

/// One row of the per-flow location dump: the run's sweep summary columns
/// followed by a flow's number, efficiency and endpoint coordinates.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub run: EfficiencyRecord,
    pub flow_num: u32,
    pub flow_efficiency: f64,
    pub src: Position,
    pub dst: Position,
}

impl TryFrom<&csv::StringRecord> for FlowRecord {
    type Error = RecordError;

    fn try_from(record: &csv::StringRecord) -> Result<Self, RecordError> {
        if record.len() < 10 {
            return Err(RecordError::WrongWidth {
                got: record.len(),
                want: 10,
            });
        }
        Ok(Self {
            run: EfficiencyRecord::try_from(record)?,
            flow_num: parse_field(record, 6, "flowNum")?,
            flow_efficiency: parse_field(record, 7, "flowEfficiency")?,
            src: record[8].parse()?,
            dst: record[9].parse()?,
        })
    }
}

pub fn efficiency_csv_reader_builder(builder: &mut csv::ReaderBuilder) -> &mut csv::ReaderBuilder {
    builder.delimiter(b',').has_headers(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_sweep_summary_row() {
        let row = csv::StringRecord::from(vec!["1000", "16", "100", "1", "0.25", "87.5"]);
        let record = EfficiencyRecord::try_from(&row).unwrap();
        assert_eq!(record.grid_length, 1000.0);
        assert_eq!(record.num_nodes, 16);
        assert_eq!(record.tx_power, 100.0);
        assert!(record.is_aodv);
        assert_eq!(record.traffic_intensity, 0.25);
        assert_eq!(record.total_efficiency, 87.5);
    }

    #[test]
    fn olsr_rows_use_a_zero_flag() {
        let row = csv::StringRecord::from(vec!["1000", "16", "100", "0", "0.25", "87.5"]);
        assert!(!EfficiencyRecord::try_from(&row).unwrap().is_aodv);
    }

    #[test]
    fn bad_field_error_names_the_column() {
        let row = csv::StringRecord::from(vec!["1000", "sixteen", "100", "1", "0.25", "87.5"]);
        let err = EfficiencyRecord::try_from(&row).unwrap_err();
        assert!(matches!(
            err,
            RecordError::BadField {
                field: "numNodes",
                ..
            }
        ));
    }

    #[test]
    fn parses_colon_separated_positions() {
        let position: Position = "250.5:750:0".parse().unwrap();
        assert_eq!(
            position,
            Position {
                x: 250.5,
                y: 750.0,
                z: 0.0
            }
        );
        assert!("250:750".parse::<Position>().is_err());
    }

    #[test]
    fn parses_a_flow_row() {
        let row = csv::StringRecord::from(vec![
            "1000", "4", "100", "1", "0.25", "87.5", "2", "62.5", "100:200:0", "800:900:0",
        ]);
        let record = FlowRecord::try_from(&row).unwrap();
        assert_eq!(record.run.num_nodes, 4);
        assert_eq!(record.flow_num, 2);
        assert_eq!(record.flow_efficiency, 62.5);
        assert_eq!(record.src.x, 100.0);
        assert_eq!(record.dst.y, 900.0);
    }

    #[test]
    fn reads_a_location_dump_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p3Loc.csv");
        std::fs::write(
            &path,
            "1000,4,100,1,0.25,87.5,0,90.0,100:200:0,800:900:0\n\
             1000,4,100,1,0.25,87.5,1,40.0,300:400:0,600:100:0\n",
        )
        .unwrap();

        let mut builder = csv::ReaderBuilder::new();
        let mut reader = efficiency_csv_reader_builder(&mut builder)
            .from_path(&path)
            .unwrap();
        let flows: Vec<FlowRecord> = reader
            .records()
            .map(|row| FlowRecord::try_from(&row.unwrap()).unwrap())
            .collect();
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[1].flow_efficiency, 40.0);
        assert_eq!(flows[1].src, Position { x: 300.0, y: 400.0, z: 0.0 });
    }

    #[test]
    fn byte_record_matches_the_wire_format() {
        let record = EfficiencyRecord {
            grid_length: 1000.0,
            num_nodes: 4,
            tx_power: 100.0,
            is_aodv: true,
            traffic_intensity: 0.9,
            total_efficiency: 50.0,
        };
        let bytes = record.to_byte_record();
        assert_eq!(&bytes[3], b"1");
        assert_eq!(&bytes[4], b"0.9");
    }
}
