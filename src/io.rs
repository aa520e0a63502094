//! Loading raw sample files and writing result series.
//!
//! Raw files are packed little-endian 32-bit floats with no header. Text
//! output is one value per line with six decimals.

use crate::error::{Error, Result};
use crate::signal::Buffer;
use crate::sweep::Response;

use byteorder::{LittleEndian, ReadBytesExt};
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;
use tracing::debug;

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::SourceUnavailable {
            path: path.to_owned(),
            source,
        })
}

/// Read exactly `expected` samples. Anything past them is ignored.
pub fn load_buffer<P>(path: P, expected: usize, rate: f64) -> Result<Buffer<f64>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = open(path)?;
    // never reserve more than the file can hold
    let available = reader.get_ref().metadata()
        .map(|m| (m.len() / 4).min(usize::MAX as u64) as usize)
        .unwrap_or(0);
    let mut samples = Vec::with_capacity(expected.min(available));
    while samples.len() < expected {
        match reader.read_f32::<LittleEndian>() {
            Ok(v) => samples.push(v as f64),
            Err(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(Error::SizeMismatch {
                    path: path.to_owned(),
                    expected,
                    found: samples.len(),
                });
            },
            Err(source) => {
                return Err(Error::SourceUnavailable {
                    path: path.to_owned(),
                    source,
                });
            },
        }
    }
    debug!(path = %path.display(), samples = samples.len(), "loaded");
    Ok(Buffer::new(rate, samples))
}

/// Read every whole sample in the file.
pub fn load_all<P>(path: P, rate: f64) -> Result<Buffer<f64>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = open(path)?;
    let mut samples = Vec::new();
    loop {
        match reader.read_f32::<LittleEndian>() {
            Ok(v) => samples.push(v as f64),
            // a trailing partial sample also ends up here
            Err(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(source) => {
                return Err(Error::SourceUnavailable {
                    path: path.to_owned(),
                    source,
                });
            },
        }
    }
    debug!(path = %path.display(), samples = samples.len(), "loaded");
    Ok(Buffer::new(rate, samples))
}

/// Read a mono wav file. Integer samples are scaled to [-1, 1).
pub fn load_wav<P>(path: P) -> Result<Buffer<f64>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let wav_error = |e| match e {
        hound::Error::IoError(source) => Error::SourceUnavailable {
            path: path.to_owned(),
            source,
        },
        source => Error::Wav {
            path: path.to_owned(),
            source,
        },
    };

    let mut reader = hound::WavReader::open(path).map_err(wav_error)?;
    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(Error::Config(format!(
            "{} has {} channels, only mono is supported",
            path.display(), spec.channels)));
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<std::result::Result<Vec<_>, _>>(),
        hound::SampleFormat::Int => {
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
            reader.samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()
        },
    }.map_err(wav_error)?;

    debug!(path = %path.display(), samples = samples.len(),
           rate = spec.sample_rate, "loaded wav");
    Ok(Buffer::new(spec.sample_rate as f64, samples))
}

fn replace(path: &Path, contents: &[u8]) -> io::Result<()> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "not a file path")
    })?;
    let mut tmpname = std::ffi::OsString::from(".");
    tmpname.push(name);
    tmpname.push(".tmp");
    let tmp = path.with_file_name(tmpname);

    let written = File::create(&tmp).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });
    match written.and_then(|_| fs::rename(&tmp, path)) {
        Ok(()) => Ok(()),
        Err(e) => {
            // leave nothing half-written behind
            let _ = fs::remove_file(&tmp);
            Err(e)
        },
    }
}

fn commit(path: &Path, contents: String) -> Result<()> {
    replace(path, contents.as_bytes()).map_err(|source| {
        Error::SinkUnavailable {
            path: path.to_owned(),
            source,
        }
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote");
    Ok(())
}

/// One value per line. The file is complete or absent, never partial.
pub fn write_series<P>(path: P, values: &[f64]) -> Result<()>
where
    P: AsRef<Path>,
{
    let text = values.iter().map(|v| format!("{:.6}\n", v)).collect();
    commit(path.as_ref(), text)
}

/// `frequency,db` per line, in sweep order.
pub fn write_pairs<P>(path: P, response: &Response) -> Result<()>
where
    P: AsRef<Path>,
{
    let text = response.points().iter()
        .map(|p| format!("{:.6},{:.6}\n", p.frequency, p.db))
        .collect();
    commit(path.as_ref(), text)
}
