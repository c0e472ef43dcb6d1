//! Writing ensembles to disk and reading the text format back.
//!
//! The text format has one particle per line: `x y z vx vy vz m` with an
//! optional integer `species` column, fields separated by single spaces.

use crate::error::{IcError, Result};
use icbuilder_common::{Ensemble, OutputFormat, Particle};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Writes `ensemble` to `path` in the text format.
pub fn save<P: AsRef<Path>>(path: P, ensemble: &Ensemble) -> Result<()> {
    save_as(path, ensemble, OutputFormat::Text)
}

/// Writes `ensemble` to `path` in the requested format.
pub fn save_as<P: AsRef<Path>>(path: P, ensemble: &Ensemble, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    match format {
        OutputFormat::Text => write_text(&mut writer, ensemble)?,
        OutputFormat::Csv => write_csv(&mut writer, ensemble)?,
        OutputFormat::Json => serde_json::to_writer(&mut writer, ensemble)?,
        OutputFormat::Bincode => bincode::serialize_into(&mut writer, ensemble)?,
        OutputFormat::MessagePack => rmp_serde::encode::write(&mut writer, ensemble)?,
    }
    writer.flush()?;

    info!(
        "Saved {} particles to {} ({} format)",
        ensemble.len(),
        path.display(),
        format
    );
    Ok(())
}

/// Text line for one particle, without the trailing newline.
pub fn format_line(particle: &Particle) -> String {
    let mut line = format!(
        "{} {} {} {} {} {} {}",
        particle.x, particle.y, particle.z, particle.vx, particle.vy, particle.vz, particle.m
    );
    if let Some(species) = particle.species {
        line.push(' ');
        line.push_str(&species.tag().to_string());
    }
    line
}

/// Writes the text format, one line per particle in ensemble order.
pub fn write_text<W: Write>(writer: &mut W, ensemble: &Ensemble) -> Result<()> {
    for particle in ensemble {
        writeln!(writer, "{}", format_line(particle))?;
    }
    Ok(())
}

fn write_csv<W: Write>(writer: &mut W, ensemble: &Ensemble) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["x", "y", "z", "vx", "vy", "vz", "m", "species"])?;
    for p in ensemble {
        csv_writer.write_record([
            p.x.to_string(),
            p.y.to_string(),
            p.z.to_string(),
            p.vx.to_string(),
            p.vy.to_string(),
            p.vz.to_string(),
            p.m.to_string(),
            p.species.map(|s| s.tag().to_string()).unwrap_or_default(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Parses the text format. Blank lines are skipped.
pub fn read_text<R: BufRead>(reader: R) -> Result<Ensemble> {
    let mut ensemble = Ensemble::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parse_error = |message: String| IcError::Parse { line: index + 1, message };

        let row = line
            .split_whitespace()
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|e| parse_error(format!("'{}': {}", field, e)))
            })
            .collect::<Result<Vec<f64>>>()?;
        let particle = Particle::from_row(&row).map_err(|e| parse_error(e.to_string()))?;
        ensemble.push(particle);
    }
    Ok(ensemble)
}

/// Loads an ensemble previously written in the text format.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Ensemble> {
    let file = File::open(path.as_ref())?;
    read_text(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use icbuilder_common::{Species, Vec3};
    use std::io::Cursor;

    fn mixed() -> Ensemble {
        vec![
            Particle::new(Vec3::new(0.1, -2.5e-7, 3.0), Vec3::new(1.0 / 3.0, 0.0, -4.25), 1e-3),
            Particle::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 1.0)
                .with_species(Species::DarkMatter),
        ]
        .into()
    }

    #[test]
    fn text_lines_have_seven_or_eight_fields() {
        let mut buffer = Vec::new();
        write_text(&mut buffer, &mixed()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split(' ').count(), 7);
        assert_eq!(lines[1], "5 0 0 0 1 0 1 1");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn text_round_trip_is_exact() {
        let original = mixed();
        let mut buffer = Vec::new();
        write_text(&mut buffer, &original).unwrap();
        let parsed = read_text(Cursor::new(buffer)).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn manual_ensemble_written_verbatim() {
        let manual: Ensemble = vec![
            Particle::at_rest(Vec3::zero(), 10.0),
            Particle::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 1.0),
        ]
        .into();
        let mut buffer = Vec::new();
        write_text(&mut buffer, &manual).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "0 0 0 0 0 0 10\n5 0 0 0 1 0 1\n");
    }

    #[test]
    fn read_reports_bad_lines() {
        let err = read_text(Cursor::new("0 0 0 0 0 0 1\n\n1 2 3\n")).unwrap_err();
        match err {
            IcError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {:?}", other),
        }
        assert!(matches!(
            read_text(Cursor::new("0 0 0 0 0 zero 1\n")),
            Err(IcError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("particles.txt");
        save(&path, &mixed()).unwrap();
        assert_eq!(load(&path).unwrap(), mixed());
    }

    #[test]
    fn save_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("particles.txt");
        assert!(matches!(save(&path, &mixed()), Err(IcError::Io(_))));
    }

    #[test]
    fn structured_formats() {
        let dir = tempfile::tempdir().unwrap();
        let ensemble = mixed();

        let json_path = dir.path().join("p.json");
        save_as(&json_path, &ensemble, OutputFormat::Json).unwrap();
        let json: Ensemble = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json, ensemble);

        let bin_path = dir.path().join("p.bin");
        save_as(&bin_path, &ensemble, OutputFormat::Bincode).unwrap();
        let bin: Ensemble = bincode::deserialize(&std::fs::read(&bin_path).unwrap()).unwrap();
        assert_eq!(bin, ensemble);

        let msgpack_path = dir.path().join("p.msgpack");
        save_as(&msgpack_path, &ensemble, OutputFormat::MessagePack).unwrap();
        let msgpack: Ensemble = rmp_serde::from_slice(&std::fs::read(&msgpack_path).unwrap()).unwrap();
        assert_eq!(msgpack, ensemble);

        let csv_path = dir.path().join("p.csv");
        save_as(&csv_path, &ensemble, OutputFormat::Csv).unwrap();
        let csv_text = std::fs::read_to_string(&csv_path).unwrap();
        let rows: Vec<&str> = csv_text.lines().collect();
        assert_eq!(rows[0], "x,y,z,vx,vy,vz,m,species");
        assert!(rows[1].ends_with(','));
        assert!(rows[2].ends_with(",1"));
    }
}
