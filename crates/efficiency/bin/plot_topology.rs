use clap::Parser;
use gnuplot::{AutoOption, AxesCommon, Figure, PlotOption};
use indicatif::{ParallelProgressIterator, ProgressBar};
use netsweep_efficiency::record::{efficiency_csv_reader_builder, FlowRecord};
use netsweep_utils::image::convert_eps_to_png;
use netsweep_utils::path::is_program_in_path;
use netsweep_utils::pbar::default_pbar_style;
use netsweep_utils::plot::RASTER_DPI;
use rayon::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    // Path to the per-flow location csv
    #[clap(short = 'i', long = "input")]
    input: String,

    // Path to output directory
    #[clap(short = 'o', long = "output")]
    output: String,
}

const GRID_SIZE: f64 = 1000.0;
const LINEWIDTH: f64 = 2.0;

struct TopologyCase {
    stem: &'static str,
    num_nodes: u32,
    traffic_intensity: f64,
    /// Scale the gradient by the case's best flow instead of absolute 100%.
    scale_to_range: bool,
}

// All cases fix AODV routing at 100 mW TX power.
const CASES: [TopologyCase; 4] = [
    TopologyCase {
        stem: "linkEfficiency_4nodes_lowTraffic",
        num_nodes: 4,
        traffic_intensity: 0.25,
        scale_to_range: false,
    },
    TopologyCase {
        stem: "linkEfficiency_4nodes_highTraffic",
        num_nodes: 4,
        traffic_intensity: 0.9,
        scale_to_range: false,
    },
    TopologyCase {
        stem: "linkEfficiency_16nodes",
        num_nodes: 16,
        traffic_intensity: 0.1,
        scale_to_range: true,
    },
    TopologyCase {
        stem: "linkEfficiency_256nodes",
        num_nodes: 256,
        traffic_intensity: 0.1,
        scale_to_range: true,
    },
];

fn read_flows(input: &str) -> Result<Vec<FlowRecord>, Box<dyn Error>> {
    let mut builder = csv::ReaderBuilder::new();
    let mut reader = efficiency_csv_reader_builder(&mut builder).from_path(input)?;
    let mut flows = Vec::new();
    for result in reader.records() {
        let row = result?;
        flows.push(FlowRecord::try_from(&row)?);
    }
    Ok(flows)
}

/// Red for dead flows, green for fully efficient ones.
fn gradient_color(green: f64) -> String {
    let green = green.clamp(0.0, 1.0);
    format!(
        "#{:02x}{:02x}00",
        ((1.0 - green) * 255.0) as u8,
        (green * 255.0) as u8
    )
}

fn plot_case(
    case: &TopologyCase,
    flows: &[FlowRecord],
    output_dir: &Path,
    gs: bool,
) -> Result<(), Box<dyn Error>> {
    let selected: Vec<&FlowRecord> = flows
        .iter()
        .filter(|f| {
            f.run.is_aodv
                && f.run.num_nodes == case.num_nodes
                && f.run.tx_power == 100.0
                && f.run.traffic_intensity == case.traffic_intensity
        })
        .collect();

    let scale = if case.scale_to_range {
        selected
            .iter()
            .map(|f| f.flow_efficiency)
            .fold(f64::MIN, f64::max)
    } else {
        100.0
    };

    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(format!("{}.eps", case.stem));

    let mut fig = Figure::new();
    fig.set_terminal("postscript eps enhanced color 20 font", "");

    let title = format!(
        "Link Efficiency [numNodes={}, txPower=100mW, AODV, trafficIntensity={}]",
        case.num_nodes, case.traffic_intensity
    );
    let mut ax = fig
        .axes2d()
        .set_title(&title, &[])
        .set_x_label("X Location", &[])
        .set_y_label("Y Location", &[]);

    for flow in &selected {
        let color = gradient_color(flow.flow_efficiency / scale);
        ax = ax
            .lines(
                [flow.src.x, flow.dst.x],
                [flow.src.y, flow.dst.y],
                &[
                    PlotOption::Color(color.as_str()),
                    PlotOption::LineWidth(LINEWIDTH),
                ],
            )
            .points(
                [flow.src.x, flow.dst.x],
                [flow.src.y, flow.dst.y],
                &[PlotOption::Color("black"), PlotOption::PointSymbol('O')],
            );
    }

    ax.set_x_range(AutoOption::Fix(0.0), AutoOption::Fix(GRID_SIZE));
    ax.set_y_range(AutoOption::Fix(0.0), AutoOption::Fix(GRID_SIZE));

    fig.save_to_eps(&output_path, 5.0, 5.0)
        .expect("Error saving eps figure");
    fig.echo_to_file(output_path.with_extension("plot").to_str().unwrap());

    if gs {
        let png_output_path = output_path.with_extension("png");
        convert_eps_to_png(output_path.as_path(), png_output_path.as_path(), &RASTER_DPI)?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let start = std::time::Instant::now();

    let is_gs_exists = is_program_in_path("gs");

    let args = Args::parse();
    let output_dir = PathBuf::from(&args.output);

    println!("Reading flow locations...");
    let flows = read_flows(&args.input).unwrap_or_else(|err| {
        eprintln!("Error reading file: {:?}", args.input);
        eprintln!("Error message: {:?}", err);
        process::exit(1);
    });

    println!("Plotting topologies");
    let pbar = ProgressBar::new(CASES.len() as u64);
    pbar.set_style(default_pbar_style()?);
    pbar.set_message("Plotting topologies");
    CASES
        .par_iter()
        .progress_with(pbar)
        .for_each(|case| plot_case(case, &flows, &output_dir, is_gs_exists).unwrap());

    let duration = start.elapsed();
    println!("Time elapsed in main() is: {:?}", duration);

    Ok(())
}
