use crate::sweep::SweepPoint;

/// Display window shared by every response-time figure, in milliseconds.
pub const X_WINDOW_MS: (f64, f64) = (0.0, 1000.0);

pub struct FigureSeries {
    pub label: String,
    pub point: SweepPoint,
}

pub struct ResponseFigure {
    /// Output file stem, e.g. `Figure_9a`.
    pub stem: String,
    pub title: String,
    pub series: Vec<FigureSeries>,
    pub x_window: (f64, f64),
}

fn fifo(load: u32, qlen: u32) -> SweepPoint {
    SweepPoint::Fifo { load, qlen }
}

/// RED sweep point from the study's setting order
/// `(load, wq_inv, maxp_inv, min_th, max_th, qlen)`.
fn red(load: u32, wq_inv: u32, maxp_inv: u32, min_th: u32, max_th: u32, qlen: u32) -> SweepPoint {
    SweepPoint::Red {
        load,
        qlen,
        min_th,
        max_th,
        wq_inv,
        maxp_inv,
    }
}

fn red_series(settings: &[(u32, u32, u32, u32, u32, u32)]) -> Vec<FigureSeries> {
    settings
        .iter()
        .map(|&(load, wq_inv, maxp_inv, min_th, max_th, qlen)| {
            let point = red(load, wq_inv, maxp_inv, min_th, max_th, qlen);
            FigureSeries {
                label: point.settings_label(),
                point,
            }
        })
        .collect()
}

fn red_settings_figure(
    stem: &str,
    title: &str,
    settings: &[(u32, u32, u32, u32, u32, u32)],
) -> ResponseFigure {
    ResponseFigure {
        stem: stem.to_string(),
        title: title.to_string(),
        series: red_series(settings),
        x_window: X_WINDOW_MS,
    }
}

/// The study's fixed figure table. One entry per rendered chart, in report
/// order; each drives the same load, CDF and overlay-render pipeline.
pub fn response_figures() -> Vec<ResponseFigure> {
    let mut figures = Vec::new();

    // Figures 9a-9d: FIFO queue-length sweep at four fixed loads.
    let qlens = [30u32, 60, 120, 190, 240];
    for (suffix, load) in "abcd".chars().zip([80u32, 90, 98, 110]) {
        figures.push(ResponseFigure {
            stem: format!("Figure_9{}", suffix),
            title: format!("Figure 9{}. FIFO Performance at {}% Load", suffix, load),
            series: qlens
                .iter()
                .map(|&qlen| FigureSeries {
                    label: format!("qLen={}", qlen),
                    point: fifo(load, qlen),
                })
                .collect(),
            x_window: X_WINDOW_MS,
        });
    }

    // Figure 10: FIFO load sweep at qLen 120.
    let loads = [50u32, 70, 80, 90, 98, 110];
    figures.push(ResponseFigure {
        stem: "Figure_10".to_string(),
        title: "Figure 10. FIFO Performance at Different Loads (qLen=120)".to_string(),
        series: loads
            .iter()
            .map(|&load| FigureSeries {
                label: format!("load={}%", load),
                point: fifo(load, 120),
            })
            .collect(),
        x_window: X_WINDOW_MS,
    });

    // Figure 11: RED load sweep at the nominal parameters.
    figures.push(ResponseFigure {
        stem: "Figure_11".to_string(),
        title: "Figure 11. RED Performance at Different Loads".to_string(),
        series: loads
            .iter()
            .map(|&load| FigureSeries {
                label: format!("load={}%", load),
                point: red(load, 512, 10, 30, 90, 480),
            })
            .collect(),
        x_window: X_WINDOW_MS,
    });

    // Figures 12a-12b: RED threshold pairs at 90% and 98% load.
    let ths = [(5u32, 15u32), (15, 45), (30, 90), (60, 180), (120, 360)];
    for (suffix, load) in "ab".chars().zip([90u32, 98]) {
        figures.push(ResponseFigure {
            stem: format!("Figure_12{}", suffix),
            title: format!("Figure 12{}. RED Performance at {}% Load", suffix, load),
            series: ths
                .iter()
                .map(|&(min_th, max_th)| FigureSeries {
                    label: format!("minTh={},maxTh={}", min_th, max_th),
                    point: red(load, 512, 10, min_th, max_th, 480),
                })
                .collect(),
            x_window: X_WINDOW_MS,
        });
    }

    // Figure 13: RED minTh sweep.
    figures.push(ResponseFigure {
        stem: "Figure_13".to_string(),
        title: "Figure 13. RED Performance with Changing minTh".to_string(),
        series: [5u32, 15, 30, 45, 60]
            .iter()
            .map(|&min_th| FigureSeries {
                label: format!("minTh={}", min_th),
                point: red(90, 512, 10, min_th, 90, 480),
            })
            .collect(),
        x_window: X_WINDOW_MS,
    });

    // Figure 14: RED wq x maxp grid.
    let mut series = Vec::new();
    for wq_inv in [512u32, 256, 128] {
        for maxp_inv in [20u32, 10, 4] {
            series.push(FigureSeries {
                label: format!("wq=1/{},maxp=1/{}", wq_inv, maxp_inv),
                point: red(90, wq_inv, maxp_inv, 30, 90, 480),
            });
        }
    }
    figures.push(ResponseFigure {
        stem: "Figure_14".to_string(),
        title: "Figure 14. RED Performance with different wq and maxp".to_string(),
        series,
        x_window: X_WINDOW_MS,
    });

    // Figures 16a-16b: known-bad RED settings.
    figures.push(red_settings_figure(
        "Figure_16a",
        "Figure 16a. \"Bad\" RED Parameters Settings at 90% Load",
        &[
            (90, 512, 10, 5, 15, 480),
            (90, 256, 4, 5, 120, 480),
            (90, 512, 10, 120, 150, 480),
        ],
    ));
    figures.push(red_settings_figure(
        "Figure_16b",
        "Figure 16b. \"Bad\" RED Parameters Settings at 98% Load",
        &[
            (98, 512, 10, 5, 15, 480),
            (98, 512, 4, 5, 90, 480),
            (98, 512, 10, 120, 360, 480),
        ],
    ));

    // Figures 22a-22c: FIFO vs RED against an uncongested baseline.
    let cases: [(char, u32, [(u32, u32, u32, u32, u32, u32); 2]); 3] = [
        (
            'a',
            90,
            [(90, 512, 10, 30, 90, 120), (90, 512, 10, 60, 180, 480)],
        ),
        (
            'b',
            98,
            [(98, 512, 10, 30, 90, 120), (98, 128, 20, 5, 90, 480)],
        ),
        (
            'c',
            110,
            [(110, 512, 10, 30, 90, 120), (110, 256, 20, 30, 90, 480)],
        ),
    ];
    for (suffix, load, red_settings) in cases {
        let mut series = vec![FigureSeries {
            label: "uncongested".to_string(),
            point: fifo(10, 120),
        }];
        for qlen in [120u32, 190] {
            series.push(FigureSeries {
                label: format!("FIFO-qLen={}", qlen),
                point: fifo(load, qlen),
            });
        }
        series.extend(red_series(&red_settings));
        figures.push(ResponseFigure {
            stem: format!("Figure_22{}", suffix),
            title: format!("FIFO and RED at {}% Load", load),
            series,
            x_window: X_WINDOW_MS,
        });
    }

    figures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_report_figure() {
        let figures = response_figures();
        let stems: Vec<&str> = figures.iter().map(|f| f.stem.as_str()).collect();
        assert_eq!(
            stems,
            vec![
                "Figure_9a",
                "Figure_9b",
                "Figure_9c",
                "Figure_9d",
                "Figure_10",
                "Figure_11",
                "Figure_12a",
                "Figure_12b",
                "Figure_13",
                "Figure_14",
                "Figure_16a",
                "Figure_16b",
                "Figure_22a",
                "Figure_22b",
                "Figure_22c",
            ]
        );
    }

    #[test]
    fn queue_sweep_names_its_files() {
        let figures = response_figures();
        let fig9a = &figures[0];
        assert_eq!(fig9a.series.len(), 5);
        assert_eq!(
            fig9a.series[0].point.file_name(),
            "FIFO_load80_queue30.csv"
        );
        assert_eq!(fig9a.series[0].label, "qLen=30");
    }

    #[test]
    fn comparison_figures_lead_with_the_baseline() {
        let figures = response_figures();
        let fig22a = figures.iter().find(|f| f.stem == "Figure_22a").unwrap();
        assert_eq!(fig22a.series.len(), 5);
        assert_eq!(fig22a.series[0].label, "uncongested");
        assert_eq!(
            fig22a.series[0].point.file_name(),
            "FIFO_load10_queue120.csv"
        );
        assert_eq!(
            fig22a.series[4].label,
            "RED - wq=1/512,maxp=1/10,th=(60,180), qlen=480"
        );
    }

    #[test]
    fn every_figure_uses_the_shared_window() {
        for figure in response_figures() {
            assert_eq!(figure.x_window, X_WINDOW_MS);
            assert!(!figure.series.is_empty());
        }
    }
}
