use crate::record::{response_csv_reader_builder, ResponseRecord};
use netsweep_utils::path::{
    is_csv_from_path, is_gzip, is_gzip_from_path, is_tar_gz, is_tar_gz_from_path,
};
use std::error::Error;
use std::path::Path;

type RowFilter<'a> = Box<dyn Fn(&csv::StringRecord) -> bool + 'a>;
type CsvBuilderHook<'a> = Box<dyn Fn(&mut csv::ReaderBuilder) -> &mut csv::ReaderBuilder + 'a>;

pub trait ResponseTraceRead {
    fn read(
        &self,
        process: impl FnMut(ResponseRecord) -> Result<(), Box<dyn Error>>,
    ) -> Result<(), Box<dyn Error>>;
}

fn drain_records<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    filter: &RowFilter,
    process: &mut impl FnMut(ResponseRecord) -> Result<(), Box<dyn Error>>,
) -> Result<(), Box<dyn Error>> {
    for result in reader.records() {
        let record = result?;
        if !filter(&record) {
            continue;
        }
        process(ResponseRecord::try_from(&record)?)?;
    }
    Ok(())
}

pub struct ResponseTraceCsv<'a, P: AsRef<Path>> {
    path: P,
    filter: RowFilter<'a>,
    csv_builder: CsvBuilderHook<'a>,
}

impl<'a, P: AsRef<Path>> ResponseTraceCsv<'a, P> {
    pub fn new(path: P) -> Self {
        Self {
            path,
            filter: Box::new(|_| true),
            csv_builder: Box::new(response_csv_reader_builder),
        }
    }

    pub fn with_filter(&mut self, filter: impl Fn(&csv::StringRecord) -> bool + 'a) -> &Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn with_csv_builder(
        &mut self,
        csv_builder: impl Fn(&mut csv::ReaderBuilder) -> &mut csv::ReaderBuilder + 'a,
    ) -> &Self {
        self.csv_builder = Box::new(csv_builder);
        self
    }
}

impl<'a, P: AsRef<Path>> ResponseTraceRead for ResponseTraceCsv<'a, P> {
    fn read(
        &self,
        mut process: impl FnMut(ResponseRecord) -> Result<(), Box<dyn Error>>,
    ) -> Result<(), Box<dyn Error>> {
        let mut builder = csv::ReaderBuilder::new();
        let reader = (self.csv_builder)(&mut builder).from_path(&self.path)?;
        drain_records(reader, &self.filter, &mut process)
    }
}

pub struct ResponseTraceGz<'a, P: AsRef<Path>> {
    path: P,
    filter: RowFilter<'a>,
    csv_builder: CsvBuilderHook<'a>,
}

impl<'a, P: AsRef<Path>> ResponseTraceGz<'a, P> {
    pub fn new(path: P) -> Self {
        Self {
            path,
            filter: Box::new(|_| true),
            csv_builder: Box::new(response_csv_reader_builder),
        }
    }

    pub fn with_filter(&mut self, filter: impl Fn(&csv::StringRecord) -> bool + 'a) -> &Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn with_csv_builder(
        &mut self,
        csv_builder: impl Fn(&mut csv::ReaderBuilder) -> &mut csv::ReaderBuilder + 'a,
    ) -> &Self {
        self.csv_builder = Box::new(csv_builder);
        self
    }
}

impl<'a, P: AsRef<Path>> ResponseTraceRead for ResponseTraceGz<'a, P> {
    fn read(
        &self,
        mut process: impl FnMut(ResponseRecord) -> Result<(), Box<dyn Error>>,
    ) -> Result<(), Box<dyn Error>> {
        let decoder = flate2::read::GzDecoder::new(std::fs::File::open(&self.path)?);
        let mut builder = csv::ReaderBuilder::new();
        let reader = (self.csv_builder)(&mut builder).from_reader(decoder);
        drain_records(reader, &self.filter, &mut process)
    }
}

pub struct ResponseTraceTarGz<'a, P: AsRef<Path>> {
    path: P,
    filter: RowFilter<'a>,
    csv_builder: CsvBuilderHook<'a>,
}

impl<'a, P: AsRef<Path>> ResponseTraceTarGz<'a, P> {
    pub fn new(path: P) -> Self {
        Self {
            path,
            filter: Box::new(|_| true),
            csv_builder: Box::new(response_csv_reader_builder),
        }
    }

    pub fn with_filter(&mut self, filter: impl Fn(&csv::StringRecord) -> bool + 'a) -> &Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn with_csv_builder(
        &mut self,
        csv_builder: impl Fn(&mut csv::ReaderBuilder) -> &mut csv::ReaderBuilder + 'a,
    ) -> &Self {
        self.csv_builder = Box::new(csv_builder);
        self
    }
}

impl<'a, P: AsRef<Path>> ResponseTraceRead for ResponseTraceTarGz<'a, P> {
    fn read(
        &self,
        mut process: impl FnMut(ResponseRecord) -> Result<(), Box<dyn Error>>,
    ) -> Result<(), Box<dyn Error>> {
        let decoder = flate2::read::GzDecoder::new(std::fs::File::open(&self.path)?);
        let mut tar = tar::Archive::new(decoder);
        for entry in tar.entries()? {
            let entry = entry?;
            let mut builder = csv::ReaderBuilder::new();
            let reader = (self.csv_builder)(&mut builder).from_reader(entry);
            drain_records(reader, &self.filter, &mut process)?;
        }
        Ok(())
    }
}

/// Routes a sweep file to the right backend: recognized extensions first,
/// then the magic bytes for files without a telling name.
pub enum ResponseTraceBuilder<'a, P: AsRef<Path>> {
    Csv(ResponseTraceCsv<'a, P>),
    Gz(ResponseTraceGz<'a, P>),
    TarGz(ResponseTraceTarGz<'a, P>),
}

impl<'a, P: AsRef<Path>> ResponseTraceBuilder<'a, P> {
    pub fn new(path: P) -> Result<Self, Box<dyn Error>> {
        let p = path.as_ref();
        if is_csv_from_path(p) {
            Ok(Self::Csv(ResponseTraceCsv::new(path)))
        } else if is_tar_gz_from_path(p) {
            Ok(Self::TarGz(ResponseTraceTarGz::new(path)))
        } else if is_gzip_from_path(p) {
            Ok(Self::Gz(ResponseTraceGz::new(path)))
        } else if is_tar_gz(p)? {
            Ok(Self::TarGz(ResponseTraceTarGz::new(path)))
        } else if is_gzip(p)? {
            Ok(Self::Gz(ResponseTraceGz::new(path)))
        } else {
            Ok(Self::Csv(ResponseTraceCsv::new(path)))
        }
    }

    pub fn with_filter(&mut self, filter: impl Fn(&csv::StringRecord) -> bool + 'a) -> &Self {
        match self {
            Self::Csv(trace) => {
                trace.with_filter(filter);
            }
            Self::Gz(trace) => {
                trace.with_filter(filter);
            }
            Self::TarGz(trace) => {
                trace.with_filter(filter);
            }
        }
        self
    }

    pub fn with_csv_builder(
        &mut self,
        csv_builder: impl Fn(&mut csv::ReaderBuilder) -> &mut csv::ReaderBuilder + 'a,
    ) -> &Self {
        match self {
            Self::Csv(trace) => {
                trace.with_csv_builder(csv_builder);
            }
            Self::Gz(trace) => {
                trace.with_csv_builder(csv_builder);
            }
            Self::TarGz(trace) => {
                trace.with_csv_builder(csv_builder);
            }
        }
        self
    }
}

impl<'a, P: AsRef<Path>> ResponseTraceRead for ResponseTraceBuilder<'a, P> {
    fn read(
        &self,
        process: impl FnMut(ResponseRecord) -> Result<(), Box<dyn Error>>,
    ) -> Result<(), Box<dyn Error>> {
        match self {
            Self::Csv(trace) => trace.read(process),
            Self::Gz(trace) => trace.read(process),
            Self::TarGz(trace) => trace.read(process),
        }
    }
}

/// Collects the response-time column of one sweep file, ready for the CDF.
pub fn read_response_times<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, Box<dyn Error>> {
    let trace = ResponseTraceBuilder::new(path)?;
    let mut times = Vec::new();
    trace.read(|record| {
        times.push(record.response_time);
        Ok(())
    })?;
    Ok(times)
}
