/// One point of the queueing study's parameter sweep, addressed by the file
/// naming convention the simulator writes its per-run CSVs under.
///
/// RED's `wq` and `maxp` parameters are fractions of the form `1/x`; the
/// sweep names (and this type) carry the denominators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepPoint {
    Fifo {
        load: u32,
        qlen: u32,
    },
    Red {
        load: u32,
        qlen: u32,
        min_th: u32,
        max_th: u32,
        wq_inv: u32,
        maxp_inv: u32,
    },
}

impl SweepPoint {
    pub fn file_name(&self) -> String {
        match self {
            Self::Fifo { load, qlen } => format!("FIFO_load{}_queue{}.csv", load, qlen),
            Self::Red {
                load,
                qlen,
                min_th,
                max_th,
                wq_inv,
                maxp_inv,
            } => format!(
                "RED_load{}_queue{}_minTh{}_maxTh{}_wq{}_maxp{}.csv",
                load, qlen, min_th, max_th, wq_inv, maxp_inv
            ),
        }
    }

    /// Descriptive label spelling out the full discipline settings, for
    /// figures whose series mix disciplines or parameter combinations.
    pub fn settings_label(&self) -> String {
        match self {
            Self::Fifo { load, qlen } => format!("FIFO - load={}%, qLen={}", load, qlen),
            Self::Red {
                qlen,
                min_th,
                max_th,
                wq_inv,
                maxp_inv,
                ..
            } => format!(
                "RED - wq=1/{},maxp=1/{},th=({},{}), qlen={}",
                wq_inv, maxp_inv, min_th, max_th, qlen
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_file_name() {
        let point = SweepPoint::Fifo { load: 80, qlen: 30 };
        assert_eq!(point.file_name(), "FIFO_load80_queue30.csv");
    }

    #[test]
    fn red_file_name_orders_every_parameter() {
        let point = SweepPoint::Red {
            load: 90,
            qlen: 480,
            min_th: 30,
            max_th: 90,
            wq_inv: 512,
            maxp_inv: 10,
        };
        assert_eq!(
            point.file_name(),
            "RED_load90_queue480_minTh30_maxTh90_wq512_maxp10.csv"
        );
    }

    #[test]
    fn red_settings_label() {
        let point = SweepPoint::Red {
            load: 90,
            qlen: 480,
            min_th: 30,
            max_th: 90,
            wq_inv: 512,
            maxp_inv: 10,
        };
        assert_eq!(
            point.settings_label(),
            "RED - wq=1/512,maxp=1/10,th=(30,90), qlen=480"
        );
    }
}
