use clap::Parser;
use dashmap::DashMap;
use gnuplot::AutoOption;
use indicatif::{ParallelProgressIterator, ProgressBar};
use netsweep_response::figures::{response_figures, ResponseFigure};
use netsweep_response::reader::read_response_times;
use netsweep_utils::cdf::calc_cdf;
use netsweep_utils::dpi::{Inch, Point};
use netsweep_utils::path::is_program_in_path;
use netsweep_utils::pbar::default_pbar_style;
use netsweep_utils::plot::{plot_lines, FigureLine, LineFigure};
use netsweep_utils::style::StyleCycle;
use rayon::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    // Path to the sweep csv directory
    #[clap(short = 'i', long = "input")]
    input: String,

    // Path to output directory
    #[clap(short = 'o', long = "output")]
    output: String,
}

const FIGURE_SIZE: Point<Inch> = Point { x: 5.0, y: 3.5 };

fn figure_task(
    figure: &ResponseFigure,
    samples: &DashMap<String, Arc<Vec<f64>>>,
    output_dir: &Path,
    gs: bool,
) -> Result<LineFigure<PathBuf>, Box<dyn Error>> {
    let mut styles = StyleCycle::new();
    let mut lines = Vec::new();
    for series in &figure.series {
        let sample = samples.get(&series.point.file_name()).unwrap();
        let curve = calc_cdf(sample.value().as_slice())?;
        let (x, y) = curve.into_iter().unzip();
        lines.push(FigureLine {
            label: series.label.clone(),
            x,
            y,
            style: styles.next_style(),
        });
    }

    let (x_min, x_max) = figure.x_window;
    Ok(LineFigure {
        title: figure.title.clone(),
        output_path: output_dir.join(format!("{}.eps", figure.stem)),
        size: FIGURE_SIZE,
        x_label: "Response Times (ms)".to_string(),
        y_label: "Cumulative Probability (%)".to_string(),
        lines,
        gs,
        xrange: Some((AutoOption::Fix(x_min), AutoOption::Fix(x_max))),
        yrange: None,
        pre_commands: Some("set key bottom right".to_string()),
        save_data: true,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let start = std::time::Instant::now();

    let is_gs_exists = is_program_in_path("gs");

    let args = Args::parse();
    let input_dir = PathBuf::from(&args.input);
    let output_dir = PathBuf::from(&args.output);

    let figures = response_figures();

    let mut file_names: Vec<String> = figures
        .iter()
        .flat_map(|figure| figure.series.iter().map(|series| series.point.file_name()))
        .collect();
    file_names.sort();
    file_names.dedup();

    println!("Reading sweep traces...");
    let pbar = ProgressBar::new(file_names.len() as u64);
    pbar.set_style(default_pbar_style()?);
    pbar.set_message("Reading sweep traces");
    let samples: DashMap<String, Arc<Vec<f64>>> = DashMap::new();
    file_names
        .par_iter()
        .progress_with(pbar)
        .for_each(|name| {
            let path = input_dir.join(name);
            match read_response_times(&path) {
                Ok(times) => {
                    samples.insert(name.clone(), Arc::new(times));
                }
                Err(err) => {
                    eprintln!("Error reading file: {:?}", path);
                    eprintln!("Error message: {:?}", err);
                    process::exit(1);
                }
            }
        });

    println!("Generating figure tasks");
    let tasks = figures
        .iter()
        .map(|figure| figure_task(figure, &samples, &output_dir, is_gs_exists))
        .collect::<Result<Vec<_>, _>>()?;

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
