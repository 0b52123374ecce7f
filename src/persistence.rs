// src/persistence.rs

use crate::body::Body;
use crate::error::{Result, SimError};
use rand::Rng;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// First line of every save file.
pub const HEADER_COMMENT: &str = "#x, y, xVel, yVel, mass, radius, red, green, blue";

/// Parses save-file records from `reader`.
///
/// Lines starting with `#` and blank lines are skipped. A record of 9 or more
/// fields is taken literally; 5 to 8 fields give a derived radius and a color
/// drawn from `rng`. Fewer than 5 fields, or any field that is not a number,
/// fails the whole read.
pub fn read_bodies<R, G>(reader: R, rng: &mut G) -> Result<Vec<Body>>
where
    R: io::Read,
    G: Rng + ?Sized,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bodies = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |pos| pos.line());

        let fields = record
            .iter()
            .map(|field| {
                field.parse::<f64>().map_err(|_| SimError::InvalidField {
                    line,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let body = Body::from_fields(&fields, rng).ok_or(SimError::TooFewFields {
            line,
            found: fields.len(),
        })?;
        bodies.push(body);
    }
    Ok(bodies)
}

/// Writes the live bodies of `frame` in save-file format. Empty slots are skipped.
pub fn write_bodies<W: Write>(mut writer: W, frame: &[Option<Body>]) -> Result<()> {
    writeln!(writer, "{HEADER_COMMENT}")?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for body in frame.iter().flatten() {
        wtr.write_record(&[
            body.position.x.to_string(),
            body.position.y.to_string(),
            body.velocity.x.to_string(),
            body.velocity.y.to_string(),
            body.mass.to_string(),
            body.radius.to_string(),
            body.color.r.to_string(),
            body.color.g.to_string(),
            body.color.b.to_string(),
        ])?;
    }

    let mut writer = wtr.into_inner().map_err(|e| SimError::Io(e.into_error()))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Loads a save file. A file without a single body is rejected, since the
/// simulation capacity is taken from it.
pub fn load_bodies<G: Rng + ?Sized>(path: &Path, rng: &mut G) -> Result<Vec<Body>> {
    let file = File::open(path)?;
    let bodies = read_bodies(BufReader::new(file), rng)?;
    if bodies.is_empty() {
        return Err(SimError::InvalidConfig(format!(
            "save file {} contains no bodies",
            path.display()
        )));
    }
    log::info!("Loaded {} bodies from {}", bodies.len(), path.display());
    Ok(bodies)
}

/// Writes `frame` to `path` through a sibling temporary file, so a failed
/// write leaves any previous save in place.
pub fn write_save_file(path: &Path, frame: &[Option<Body>]) -> Result<()> {
    let tmp = temp_path(path);
    let file = File::create(&tmp)?;
    let written = write_bodies(BufWriter::new(file), frame).and_then(|()| {
        fs::rename(&tmp, path)?;
        Ok(())
    });
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

/// Saves `frame` to `path`. Failures are logged and otherwise ignored.
/// Returns whether the save went through.
pub fn save_state(path: &Path, frame: &[Option<Body>]) -> bool {
    match write_save_file(path, frame) {
        Ok(()) => {
            log::info!(
                "Saved {} bodies to {}",
                frame.iter().flatten().count(),
                path.display()
            );
            true
        }
        Err(e) => {
            log::warn!("Cannot save state to {}: {}", path.display(), e);
            false
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
