use clap::Parser;
use indicatif::{ParallelProgressIterator, ProgressBar};
use netsweep_efficiency::record::{efficiency_csv_reader_builder, EfficiencyRecord};
use netsweep_efficiency::series::{
    select_efficiency, unique_intensities, unique_nodes, unique_protocols, unique_tx_powers,
    SeriesFilter,
};
use netsweep_utils::dpi::{Inch, Point};
use netsweep_utils::path::is_program_in_path;
use netsweep_utils::pbar::default_pbar_style;
use netsweep_utils::plot::{plot_lines, FigureLine, LineFigure};
use netsweep_utils::style::StyleCycle;
use rayon::prelude::*;
use std::error::Error;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    // Path to the sweep summary csv
    #[clap(short = 'i', long = "input")]
    input: String,

    // Path to output directory
    #[clap(short = 'o', long = "output")]
    output: String,
}

const FIGURE_SIZE: Point<Inch> = Point { x: 5.0, y: 3.5 };

// Matches the study's legend layout: outside the plot area, to the right.
const KEY_OUT_RIGHT: &str = "set key outside right center";

fn read_records(input: &str) -> Result<Vec<EfficiencyRecord>, Box<dyn Error>> {
    let mut builder = csv::ReaderBuilder::new();
    let mut reader = efficiency_csv_reader_builder(&mut builder).from_path(input)?;
    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(EfficiencyRecord::try_from(&row)?);
    }
    Ok(records)
}

fn main() -> Result<(), Box<dyn Error>> {
    let start = std::time::Instant::now();

    let is_gs_exists = is_program_in_path("gs");

    let args = Args::parse();
    let output_dir = PathBuf::from(&args.output);

    println!("Reading sweep summary...");
    let records = read_records(&args.input).unwrap_or_else(|err| {
        eprintln!("Error reading file: {:?}", args.input);
        eprintln!("Error message: {:?}", err);
        process::exit(1);
    });

    let nodes = unique_nodes(&records);
    let tx_powers = unique_tx_powers(&records);
    let protocols = unique_protocols(&records);
    let intensities = unique_intensities(&records);

    println!("Generating figure tasks");
    let mut tasks = Vec::new();

    // Total efficiency vs number of nodes, one series per fixed
    // (txPower, protocol, intensity) combination, log2 node axis.
    {
        let x: Vec<f64> = nodes.iter().map(|&n| n as f64).collect();
        let mut styles = StyleCycle::new();
        let mut lines = Vec::new();
        for &tx_power in &tx_powers {
            for &is_aodv in &protocols {
                for &intensity in &intensities {
                    let filter = SeriesFilter {
                        tx_power: Some(tx_power),
                        is_aodv: Some(is_aodv),
                        traffic_intensity: Some(intensity),
                        ..Default::default()
                    };
                    lines.push(FigureLine {
                        label: format!("TX{}-P{}-I{}", tx_power, is_aodv as u8, intensity),
                        x: x.clone(),
                        y: select_efficiency(&records, &filter),
                        style: styles.next_style(),
                    });
                }
            }
        }
        tasks.push(LineFigure {
            title: "Total Efficiency vs Number of Nodes".to_string(),
            output_path: output_dir.join("nodeDensity_all.eps"),
            size: FIGURE_SIZE,
            x_label: "Number of Nodes".to_string(),
            y_label: "Total Efficiency (%)".to_string(),
            lines,
            gs: is_gs_exists,
            xrange: None,
            yrange: None,
            pre_commands: Some(format!("set logscale x 2\n{}", KEY_OUT_RIGHT)),
            save_data: false,
        });
    }

    // Total efficiency vs TX power.
    {
        let x = tx_powers.clone();
        let mut styles = StyleCycle::new();
        let mut lines = Vec::new();
        for &num_nodes in &nodes {
            for &is_aodv in &protocols {
                for &intensity in &intensities {
                    let filter = SeriesFilter {
                        num_nodes: Some(num_nodes),
                        is_aodv: Some(is_aodv),
                        traffic_intensity: Some(intensity),
                        ..Default::default()
                    };
                    lines.push(FigureLine {
                        label: format!("N{}-P{}-I{}", num_nodes, is_aodv as u8, intensity),
                        x: x.clone(),
                        y: select_efficiency(&records, &filter),
                        style: styles.next_style(),
                    });
                }
            }
        }
        tasks.push(LineFigure {
            title: "Total Efficiency vs TX Power".to_string(),
            output_path: output_dir.join("txPower_all.eps"),
            size: FIGURE_SIZE,
            x_label: "TX Power (mW)".to_string(),
            y_label: "Total Efficiency (%)".to_string(),
            lines,
            gs: is_gs_exists,
            xrange: None,
            yrange: None,
            pre_commands: Some(KEY_OUT_RIGHT.to_string()),
            save_data: false,
        });
    }

    // Total efficiency vs traffic intensity.
    {
        let x = intensities.clone();
        let mut styles = StyleCycle::new();
        let mut lines = Vec::new();
        for &num_nodes in &nodes {
            for &is_aodv in &protocols {
                for &tx_power in &tx_powers {
                    let filter = SeriesFilter {
                        num_nodes: Some(num_nodes),
                        is_aodv: Some(is_aodv),
                        tx_power: Some(tx_power),
                        ..Default::default()
                    };
                    lines.push(FigureLine {
                        label: format!("N{}-P{}-TX{}", num_nodes, is_aodv as u8, tx_power),
                        x: x.clone(),
                        y: select_efficiency(&records, &filter),
                        style: styles.next_style(),
                    });
                }
            }
        }
        tasks.push(LineFigure {
            title: "Total Efficiency vs Traffic Intensity".to_string(),
            output_path: output_dir.join("trafficIntensity_all.eps"),
            size: FIGURE_SIZE,
            x_label: "Traffic Intensity".to_string(),
            y_label: "Total Efficiency (%)".to_string(),
            lines,
            gs: is_gs_exists,
            xrange: None,
            yrange: None,
            pre_commands: Some(KEY_OUT_RIGHT.to_string()),
            save_data: false,
        });
    }

    // AODV minus OLSR efficiency at fixed node counts, per simulation case.
    {
        let mut styles = StyleCycle::new();
        let mut lines = Vec::new();
        for num_nodes in [2u32, 4, 16, 256] {
            let aodv = select_efficiency(
                &records,
                &SeriesFilter {
                    num_nodes: Some(num_nodes),
                    is_aodv: Some(true),
                    ..Default::default()
                },
            );
            let olsr = select_efficiency(
                &records,
                &SeriesFilter {
                    num_nodes: Some(num_nodes),
                    is_aodv: Some(false),
                    ..Default::default()
                },
            );
            let y: Vec<f64> = aodv.iter().zip(&olsr).map(|(a, o)| a - o).collect();
            let x: Vec<f64> = (0..y.len()).map(|i| i as f64).collect();
            lines.push(FigureLine {
                label: format!("{} Nodes", num_nodes),
                x,
                y,
                style: styles.next_style(),
            });
        }
        tasks.push(LineFigure {
            title: "Total Efficiency Difference (AODV-OLSR)".to_string(),
            output_path: output_dir.join("comparison_all.eps"),
            size: FIGURE_SIZE,
            x_label: "Simulation Case Number".to_string(),
            y_label: "Total Efficiency Difference (%)".to_string(),
            lines,
            gs: is_gs_exists,
            xrange: None,
            yrange: None,
            pre_commands: Some(KEY_OUT_RIGHT.to_string()),
            save_data: false,
        });
    }

    println!("Plotting figures");
    let pbar = ProgressBar::new(tasks.len() as u64);
    pbar.set_style(default_pbar_style()?);
    pbar.set_message("Plotting figures");
    tasks
        .par_iter()
        .progress_with(pbar)
        .for_each(|task| plot_lines(task).unwrap());

    let duration = start.elapsed();
    println!("Time elapsed in main() is: {:?}", duration);

    Ok(())
}
