use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::error::SerializeError;

/// Load a matrix of floats from a whitespace separated text file.
///
/// Everything after a `#` on a line is ignored, as are blank lines. All rows
/// must have the same number of columns. A single row loads as a `1 x N`
/// matrix and an empty file as a `0 x 0` matrix.
pub fn load_txt(path: impl AsRef<Path>) -> Result<Array2<f64>, SerializeError> {
    let reader = BufReader::new(std::fs::File::open(path)?);

    let mut values = Vec::new();
    let mut num_cols = None;
    let mut num_rows = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or("");
        let row = content
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| SerializeError::InvalidNumber {
                    line: i + 1,
                    value: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if row.is_empty() {
            continue;
        }

        let expected = *num_cols.get_or_insert(row.len());
        if row.len() != expected {
            return Err(SerializeError::MalformedRow {
                line: i + 1,
                expected,
                found: row.len(),
            });
        }

        values.extend(row);
        num_rows += 1;
    }

    Ok(Array2::from_shape_vec(
        (num_rows, num_cols.unwrap_or(0)),
        values,
    )?)
}

/// Save a matrix as a whitespace separated text file, one row per line.
pub fn save_txt<S>(path: impl AsRef<Path>, data: &ArrayBase<S, Ix2>) -> Result<(), SerializeError>
where
    S: Data<Elem = f64>,
{
    let mut writer = BufWriter::new(std::fs::File::create(path)?);
    for row in data.rows() {
        let line = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}
