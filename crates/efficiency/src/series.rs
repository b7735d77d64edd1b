use crate::record::EfficiencyRecord;
use hashbrown::HashSet;
use ordered_float::OrderedFloat;

fn unique_f64(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for value in values {
        if seen.insert(OrderedFloat::from(value)) {
            unique.push(value);
        }
    }
    unique
}

/// Distinct node counts, in the order they first appear in the file.
pub fn unique_nodes(records: &[EfficiencyRecord]) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for record in records {
        if seen.insert(record.num_nodes) {
            unique.push(record.num_nodes);
        }
    }
    unique
}

pub fn unique_tx_powers(records: &[EfficiencyRecord]) -> Vec<f64> {
    unique_f64(records.iter().map(|r| r.tx_power))
}

pub fn unique_intensities(records: &[EfficiencyRecord]) -> Vec<f64> {
    unique_f64(records.iter().map(|r| r.traffic_intensity))
}

/// Distinct routing flags, in file order (the sweeps interleave AODV and
/// OLSR runs, so the order is data-dependent).
pub fn unique_protocols(records: &[EfficiencyRecord]) -> Vec<bool> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for record in records {
        if seen.insert(record.is_aodv) {
            unique.push(record.is_aodv);
        }
    }
    unique
}

/// Fixes some sweep parameters and leaves the rest free. Efficiencies of
/// matching runs form one series of a figure.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeriesFilter {
    pub num_nodes: Option<u32>,
    pub tx_power: Option<f64>,
    pub is_aodv: Option<bool>,
    pub traffic_intensity: Option<f64>,
}

impl SeriesFilter {
    fn matches(&self, record: &EfficiencyRecord) -> bool {
        self.num_nodes.map_or(true, |n| record.num_nodes == n)
            && self.tx_power.map_or(true, |p| record.tx_power == p)
            && self.is_aodv.map_or(true, |a| record.is_aodv == a)
            && self
                .traffic_intensity
                .map_or(true, |i| record.traffic_intensity == i)
    }
}

/// Total efficiencies of the runs matching `filter`, in file order.
pub fn select_efficiency(records: &[EfficiencyRecord], filter: &SeriesFilter) -> Vec<f64> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .map(|record| record.total_efficiency)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(num_nodes: u32, tx_power: f64, is_aodv: bool, intensity: f64, eff: f64) -> EfficiencyRecord {
        EfficiencyRecord {
            grid_length: 1000.0,
            num_nodes,
            tx_power,
            is_aodv,
            traffic_intensity: intensity,
            total_efficiency: eff,
        }
    }

    #[test]
    fn unique_values_keep_first_seen_order() {
        let records = vec![
            run(16, 100.0, true, 0.25, 80.0),
            run(2, 100.0, false, 0.9, 70.0),
            run(16, 50.0, true, 0.25, 60.0),
        ];
        assert_eq!(unique_nodes(&records), vec![16, 2]);
        assert_eq!(unique_tx_powers(&records), vec![100.0, 50.0]);
        assert_eq!(unique_intensities(&records), vec![0.25, 0.9]);
        assert_eq!(unique_protocols(&records), vec![true, false]);
    }

    #[test]
    fn filter_fixes_only_the_named_parameters() {
        let records = vec![
            run(2, 100.0, true, 0.25, 80.0),
            run(4, 100.0, true, 0.25, 75.0),
            run(2, 100.0, false, 0.25, 65.0),
            run(2, 50.0, true, 0.25, 55.0),
        ];
        let filter = SeriesFilter {
            tx_power: Some(100.0),
            is_aodv: Some(true),
            traffic_intensity: Some(0.25),
            ..Default::default()
        };
        assert_eq!(select_efficiency(&records, &filter), vec![80.0, 75.0]);
    }

    #[test]
    fn empty_filter_selects_everything() {
        let records = vec![run(2, 100.0, true, 0.25, 80.0), run(4, 50.0, false, 0.9, 70.0)];
        assert_eq!(
            select_efficiency(&records, &SeriesFilter::default()),
            vec![80.0, 70.0]
        );
    }
}
