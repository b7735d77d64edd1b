use std::env;
use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};

pub fn is_gzip<P: AsRef<Path>>(p: P) -> Result<bool, Box<dyn Error>> {
    let mut file = std::fs::File::open(p)?;
    let mut magic = [0; 2];
    file.read_exact(&mut magic)?;
    Ok(magic == [0x1f, 0x8b])
}

pub fn is_tar_gz<P: AsRef<Path>>(p: P) -> Result<bool, Box<dyn Error>> {
    let mut file = std::fs::File::open(p)?;
    let mut magic = [0; 4];
    file.read_exact(&mut magic)?;
    Ok(magic == [0x1f, 0x8b, 0x08, 0x00])
}

pub fn is_csv_from_path<P: AsRef<Path>>(p: P) -> bool {
    p.as_ref().extension().map_or(false, |e| e == "csv")
}

pub fn is_gzip_from_path<P: AsRef<Path>>(p: P) -> bool {
    p.as_ref().extension().map_or(false, |e| e == "gz")
}

pub fn is_tar_gz_from_path<P: AsRef<Path>>(p: P) -> bool {
    let p = p.as_ref();
    if p.extension().map_or(false, |e| e == "tgz") {
        return true;
    }
    p.file_name()
        .and_then(|f| f.to_str())
        .map_or(false, |f| f.ends_with(".tar.gz"))
}

pub fn remove_extension<P: AsRef<Path> + From<PathBuf>>(p: P) -> P {
    let mut p = p.as_ref().to_path_buf();
    while p.extension().is_some() {
        p = p.with_extension("");
    }
    p.into()
}

// CC BY-SA 3.0
// Adapted from https://stackoverflow.com/a/35046243
pub fn is_program_in_path<P: AsRef<Path>>(program: P) -> bool {
    let program = program.as_ref().to_str().unwrap();
    if let Ok(path) = env::var("PATH") {
        for p in path.split(':') {
            if std::fs::metadata(format!("{}/{}", p, program)).is_ok() {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_probes() {
        assert!(is_csv_from_path("sweeps/FIFO_load80_queue30.csv"));
        assert!(!is_csv_from_path("sweeps/FIFO_load80_queue30.csv.gz"));
        assert!(is_gzip_from_path("sweeps/FIFO_load80_queue30.csv.gz"));
        assert!(is_tar_gz_from_path("sweeps/all.tar.gz"));
        assert!(is_tar_gz_from_path("sweeps/all.tgz"));
        assert!(!is_tar_gz_from_path("sweeps/all.gz"));
    }

    #[test]
    fn remove_extension_strips_every_suffix() {
        assert_eq!(
            remove_extension(PathBuf::from("out/Figure_9a.tar.gz")),
            PathBuf::from("out/Figure_9a")
        );
        assert_eq!(
            remove_extension(PathBuf::from("out/Figure_9a")),
            PathBuf::from("out/Figure_9a")
        );
    }
}
