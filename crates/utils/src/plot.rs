use crate::dpi::{Dpi, Inch, Point};
use crate::image::convert_eps_to_png;
use crate::path::remove_extension;
use crate::style::LineStyle;
use gnuplot::{AutoOption, AxesCommon, Figure, PlotOption};
use std::error::Error;
use std::io::Write;
use std::path::Path;

pub const RASTER_DPI: Dpi = 1000.0;
const LINEWIDTH: f64 = 2.0;

/// One labeled series of a figure, already paired with its line style.
pub struct FigureLine {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub style: LineStyle,
}

/// Everything needed to render one multi-series line figure.
pub struct LineFigure<P: AsRef<Path>> {
    pub title: String,
    pub output_path: P,
    pub size: Point<Inch>,
    pub x_label: String,
    pub y_label: String,
    pub lines: Vec<FigureLine>,
    pub gs: bool,
    pub xrange: Option<(AutoOption<f64>, AutoOption<f64>)>,
    pub yrange: Option<(AutoOption<f64>, AutoOption<f64>)>,
    pub pre_commands: Option<String>,
    pub save_data: bool,
}

/// Renders a figure as EPS, echoes the gnuplot commands to a `.plot` file,
/// and optionally rasterizes to PNG and dumps each series to a `.dat` file.
pub fn plot_lines<P: AsRef<Path>>(options: &LineFigure<P>) -> Result<(), Box<dyn Error>> {
    let LineFigure {
        title,
        output_path,
        size: Point {
            x: width,
            y: height,
        },
        x_label,
        y_label,
        lines,
        gs,
        xrange,
        yrange,
        pre_commands,
        save_data,
    } = options;

    let output_path = output_path.as_ref();

    std::fs::create_dir_all(output_path.parent().unwrap())?;

    let mut fig = Figure::new();
    fig.set_terminal("postscript eps enhanced color 20 font", "")
        .set_pre_commands(&format!(
            "set samples 30000\n{}",
            pre_commands.clone().unwrap_or("".to_string())
        ));

    let mut ax = fig
        .axes2d()
        .set_title(title, &[])
        .set_x_label(x_label, &[])
        .set_y_label(y_label, &[]);

    for line in lines {
        ax = ax.lines(
            &line.x,
            &line.y,
            &[
                PlotOption::Caption(line.label.as_str()),
                PlotOption::Color(line.style.color),
                PlotOption::LineStyle(line.style.dash),
                PlotOption::LineWidth(LINEWIDTH),
            ],
        );
    }

    if let Some((min, max)) = xrange {
        ax.set_x_range(*min, *max);
    }

    if let Some((min, max)) = yrange {
        ax.set_y_range(*min, *max);
    }

    fig.save_to_eps(output_path, *height, *width)
        .expect("Error saving eps figure");
    fig.echo_to_file(output_path.with_extension("plot").to_str().unwrap());

    if *gs {
        let png_output_path = output_path.with_extension("png");
        convert_eps_to_png(output_path, png_output_path.as_path(), &RASTER_DPI)?;
    }

    if *save_data {
        let data_output_dir_path = remove_extension(output_path.to_path_buf()).join("data");
        std::fs::create_dir_all(&data_output_dir_path)?;

        for (i, line) in lines.iter().enumerate() {
            let data_output_path = data_output_dir_path.join(format!("{}.dat", i));
            let mut data = std::fs::File::create(data_output_path)?;
            for (x, y) in line.x.iter().zip(line.y.iter()) {
                data.write_all(format!("{}\t{}\n", x, y).as_bytes())?;
            }
        }
    }

    Ok(())
}
