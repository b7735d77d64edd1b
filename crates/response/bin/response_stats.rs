use clap::Parser;
use globwalk::glob;
use indicatif::{ParallelProgressIterator, ProgressBar};
use netsweep_response::reader::read_response_times;
use netsweep_utils::pbar::default_pbar_style;
use netsweep_utils::stats::{Statistic, ToStatistic};
use rayon::prelude::*;
use std::error::Error;
use std::process;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    // Path to the sweep csv directory
    #[clap(short = 'i', long = "input")]
    input: String,

    // Path to the summary csv to write
    #[clap(short = 'o', long = "output", default_value = "response_stats.csv")]
    output: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let start = std::time::Instant::now();

    let args = Args::parse();
    let matcher = format!("{}/**/*.{{tar.gz,gz,csv,tgz}}", args.input);
    let files = glob(&matcher)?;
    let mut files = files.map(|f| f.unwrap()).collect::<Vec<_>>();
    files.sort_by(|a, b| natord::compare(&a.path().to_string_lossy(), &b.path().to_string_lossy()));

    println!("Summarizing sweep traces...");
    let pbar = ProgressBar::new(files.len() as u64);
    pbar.set_style(default_pbar_style()?);
    pbar.set_message("Summarizing sweep traces");
    let rows: Vec<(String, Statistic)> = files
        .par_iter()
        .progress_with(pbar)
        .map(|entry| {
            let path = entry.path().to_path_buf();
            let times = read_response_times(&path).unwrap_or_else(|err| {
                eprintln!("Error reading file: {:?}", path);
                eprintln!("Error message: {:?}", err);
                process::exit(1);
            });
            let stats = times.to_statistic().unwrap_or_else(|err| {
                eprintln!("Error summarizing file: {:?}", path);
                eprintln!("Error message: {:?}", err);
                process::exit(1);
            });
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            (name, stats)
        })
        .collect();

    println!("Writing summary csv file");
    let mut writer = csv::Writer::from_path(&args.output)?;
    let mut header = csv::ByteRecord::new();
    header.push_field(b"file");
    for field in Statistic::csv_header().iter() {
        header.push_field(field);
    }
    writer.write_byte_record(&header)?;
    for (name, stats) in &rows {
        let mut record = csv::ByteRecord::new();
        record.push_field(name.as_bytes());
        let stat_record: csv::ByteRecord = stats.into();
        for field in stat_record.iter() {
            record.push_field(field);
        }
        writer.write_byte_record(&record)?;
    }
    writer.flush()?;

    let duration = start.elapsed();
    println!("Time elapsed in main() is: {:?}", duration);

    Ok(())
}
