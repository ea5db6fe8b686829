//! Plain-text dumps of channels, dimensions and quantization tables

use dctq_core::consts::BLOCK_SIZE;
use dctq_core::{DctqError, DctqResult, Dimensions, Plane, Sample};
use dctq_transform::QuantTable;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Write one line per row, samples separated by single spaces
pub fn write_plane_text<T, W>(mut writer: W, plane: &Plane<T>) -> DctqResult<()>
where
    T: Sample + Display,
    W: Write,
{
    for row in plane.rows() {
        write_row(&mut writer, row)?;
    }
    Ok(())
}

/// Write `"{width} {height}"`
pub fn write_dimensions<W: Write>(mut writer: W, dimensions: Dimensions) -> DctqResult<()> {
    writeln!(writer, "{} {}", dimensions.width, dimensions.height)?;
    Ok(())
}

/// Write a table as 8 rows of 8 integers
pub fn write_quant_table<W: Write>(mut writer: W, table: &QuantTable) -> DctqResult<()> {
    for row in table.chunks_exact(BLOCK_SIZE) {
        write_row(&mut writer, row)?;
    }
    Ok(())
}

fn write_row<T: Display, W: Write>(writer: &mut W, row: &[T]) -> DctqResult<()> {
    for (i, value) in row.iter().enumerate() {
        if i > 0 {
            writer.write_all(b" ")?;
        }
        write!(writer, "{}", value)?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}

/// Parse a dimensions file
pub fn read_dimensions<R: BufRead>(reader: R) -> DctqResult<Dimensions> {
    let mut values = Vec::with_capacity(2);
    for line in reader.lines() {
        for token in line?.split_whitespace() {
            values.push(parse_token::<u32>(token)?);
            if values.len() == 2 {
                return Ok(Dimensions::new(values[0], values[1]));
            }
        }
    }
    Err(DctqError::Parse(format!(
        "expected width and height, found {} value(s)",
        values.len()
    )))
}

/// Parse a channel dump of the given shape
pub fn read_plane_text<T, R>(mut reader: R, dimensions: Dimensions) -> DctqResult<Plane<T>>
where
    T: Sample + FromStr,
    R: Read,
{
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let expected = dimensions.pixel_count();
    let data = text
        .split_whitespace()
        .take(expected)
        .map(parse_token::<T>)
        .collect::<DctqResult<Vec<_>>>()?;

    if data.len() != expected {
        return Err(DctqError::Parse(format!(
            "expected {} samples for {}, found {}",
            expected,
            dimensions,
            data.len()
        )));
    }
    Plane::from_vec(dimensions, data)
}

fn parse_token<T: FromStr>(token: &str) -> DctqResult<T> {
    token
        .parse()
        .map_err(|_| DctqError::Parse(format!("invalid value {:?}", token)))
}

/// Create `path` and run `write` against a buffered handle
pub fn write_text_file<F>(path: &Path, write: F) -> DctqResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> DctqResult<()>,
{
    let file = File::create(path).map_err(|source| DctqError::SinkUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Open `path` for buffered reading
pub fn open_text_file(path: &Path) -> DctqResult<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dctq_transform::{CHROMA_QUANT_TABLE, LUMA_QUANT_TABLE};

    #[test]
    fn test_plane_text_format() {
        let plane = Plane::from_fn(Dimensions::new(3, 2), |r, c| (r * 100 + c) as u8).unwrap();
        let mut out = Vec::new();
        write_plane_text(&mut out, &plane).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 1 2\n100 101 102\n");
    }

    #[test]
    fn test_quant_table_format() {
        let mut out = Vec::new();
        write_quant_table(&mut out, &LUMA_QUANT_TABLE).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "16 11 10 16 24 40 51 61");
        assert_eq!(lines[7], "72 92 95 98 112 100 103 99");

        let mut out = Vec::new();
        write_quant_table(&mut out, &CHROMA_QUANT_TABLE).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("17 18 24 47 99 99 99 99\n"));
    }

    #[test]
    fn test_dimensions_roundtrip() {
        let mut out = Vec::new();
        write_dimensions(&mut out, Dimensions::new(640, 480)).unwrap();
        assert_eq!(out, b"640 480\n");
        assert_eq!(read_dimensions(&out[..]).unwrap(), Dimensions::new(640, 480));
    }

    #[test]
    fn test_read_dimensions_rejects_short_input() {
        assert!(matches!(read_dimensions(&b"640"[..]), Err(DctqError::Parse(_))));
        assert!(matches!(read_dimensions(&b"640 x"[..]), Err(DctqError::Parse(_))));
    }

    #[test]
    fn test_read_plane_text() {
        let plane: Plane<u8> = read_plane_text(&b"1 2 3\n4 5 6\n"[..], Dimensions::new(3, 2)).unwrap();
        assert_eq!(plane.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_read_plane_text_errors() {
        let dims = Dimensions::new(2, 2);
        assert!(matches!(
            read_plane_text::<u8, _>(&b"1 2 3"[..], dims),
            Err(DctqError::Parse(_))
        ));
        assert!(matches!(
            read_plane_text::<u8, _>(&b"1 2 3 300"[..], dims),
            Err(DctqError::Parse(_))
        ));
    }
}
