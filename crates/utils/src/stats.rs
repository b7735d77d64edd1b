use average::{Estimate, Quantile};
use hashbrown::HashMap;
use num::{Num, ToPrimitive};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::error::Error;

pub const STATISTIC_FIELDS: [&str; 16] = [
    "avg", "max", "min", "sum", "count", "mode", "median", "variance", "std_dev", "p25", "p50",
    "p75", "p90", "p95", "p99", "p100",
];

/// Summary statistics of one sweep file's response times.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Statistic {
    pub avg: f64,
    pub max: f64,
    pub min: f64,
    pub sum: f64,
    pub count: u64,
    pub mode: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
    // percentile
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
    pub p100: f64,
}

impl Statistic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn csv_header() -> csv::ByteRecord {
        STATISTIC_FIELDS.iter().copied().collect()
    }
}

impl Into<csv::ByteRecord> for &Statistic {
    fn into(self) -> csv::ByteRecord {
        let mut record = csv::ByteRecord::new();
        record.push_field(self.avg.to_string().as_bytes());
        record.push_field(self.max.to_string().as_bytes());
        record.push_field(self.min.to_string().as_bytes());
        record.push_field(self.sum.to_string().as_bytes());
        record.push_field(self.count.to_string().as_bytes());
        record.push_field(self.mode.to_string().as_bytes());
        record.push_field(self.median.to_string().as_bytes());
        record.push_field(self.variance.to_string().as_bytes());
        record.push_field(self.std_dev.to_string().as_bytes());
        record.push_field(self.p25.to_string().as_bytes());
        record.push_field(self.p50.to_string().as_bytes());
        record.push_field(self.p75.to_string().as_bytes());
        record.push_field(self.p90.to_string().as_bytes());
        record.push_field(self.p95.to_string().as_bytes());
        record.push_field(self.p99.to_string().as_bytes());
        record.push_field(self.p100.to_string().as_bytes());
        record
    }
}

pub trait ToStatistic {
    fn to_statistic(self) -> Result<Statistic, Box<dyn Error>>;
}

impl<T> ToStatistic for Vec<T>
where
    T: Num + ToPrimitive + PartialOrd + Copy,
{
    fn to_statistic(self) -> Result<Statistic, Box<dyn Error>> {
        if self.is_empty() {
            return Ok(Statistic::default());
        }

        let mut data = self;
        data.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut stats = Statistic::new();
        let mut map = HashMap::new();
        let mut p25 = Quantile::new(0.25);
        let mut p50 = Quantile::new(0.5);
        let mut p75 = Quantile::new(0.75);
        let mut p90 = Quantile::new(0.9);
        let mut p95 = Quantile::new(0.95);
        let mut p99 = Quantile::new(0.99);
        let mut p100 = Quantile::new(1.0);

        for (i, v) in data.iter().enumerate() {
            let v = v.to_f64().unwrap();
            stats.sum += v;
            stats.count += 1;
            if i == 0 {
                stats.min = v;
            }
            if i == data.len() - 1 {
                stats.max = v;
            }
            map.entry(OrderedFloat::from(v))
                .and_modify(|v| *v += 1)
                .or_insert(1u64);
            p25.add(v);
            p50.add(v);
            p75.add(v);
            p90.add(v);
            p95.add(v);
            p99.add(v);
            p100.add(v);
        }

        stats.avg = stats.sum / stats.count as f64;
        stats.median = if stats.count % 2 == 0 {
            (data[stats.count as usize / 2].to_f64().unwrap()
                + data[stats.count as usize / 2 - 1].to_f64().unwrap())
                / 2.0
        } else {
            data[stats.count as usize / 2].to_f64().unwrap()
        };
        stats.mode = map.iter().max_by_key(|&(_, v)| v).unwrap().0.into_inner();
        stats.variance = data
            .iter()
            .map(|v| (v.to_f64().unwrap() - stats.avg).powi(2))
            .sum::<f64>()
            / stats.count as f64;
        stats.std_dev = stats.variance.sqrt();

        stats.p25 = p25.quantile();
        stats.p50 = p50.quantile();
        stats.p75 = p75.quantile();
        stats.p90 = p90.quantile();
        stats.p95 = p95.quantile();
        stats.p99 = p99.quantile();
        stats.p100 = p100.quantile();

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_moments() {
        let stats = vec![1.0, 2.0, 3.0, 4.0, 5.0].to_statistic().unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.sum, 15.0);
        assert_eq!(stats.avg, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.variance, 2.0);
    }

    #[test]
    fn even_count_median_averages_the_middle_pair() {
        let stats = vec![4.0, 1.0, 3.0, 2.0].to_statistic().unwrap();
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn mode_picks_the_most_frequent_value() {
        let stats = vec![1.0, 2.0, 2.0, 3.0].to_statistic().unwrap();
        assert_eq!(stats.mode, 2.0);
    }

    #[test]
    fn empty_input_yields_the_default() {
        let stats: Statistic = Vec::<f64>::new().to_statistic().unwrap();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.sum, 0.0);
        assert_eq!(stats.max, 0.0);
    }

    #[test]
    fn header_matches_the_record_width() {
        let stats = vec![1.0, 2.0].to_statistic().unwrap();
        let record: csv::ByteRecord = (&stats).into();
        assert_eq!(record.len(), Statistic::csv_header().len());
    }
}
