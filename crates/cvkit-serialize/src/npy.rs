use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn, ShapeBuilder};

use crate::error::SerializeError;

const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Total preamble plus header length is padded to a multiple of this.
const HEADER_ALIGN: usize = 64;

#[derive(Debug, PartialEq)]
struct NpyHeader {
    descr: String,
    fortran_order: bool,
    shape: Vec<usize>,
}

fn invalid(msg: impl Into<String>) -> SerializeError {
    SerializeError::InvalidNpyHeader(msg.into())
}

/// Value following `'key':` in the header dictionary, up to the next comma
/// outside parentheses or the closing brace.
fn dict_value<'a>(dict: &'a str, key: &str) -> Result<&'a str, SerializeError> {
    let pattern = format!("'{key}':");
    let start = dict
        .find(&pattern)
        .ok_or_else(|| invalid(format!("missing key {key}")))?
        + pattern.len();
    let rest = dict[start..].trim_start();

    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' | '}' if depth == 0 => return Ok(rest[..i].trim()),
            _ => {}
        }
    }
    Err(invalid(format!("unterminated value for {key}")))
}

fn parse_header(dict: &str) -> Result<NpyHeader, SerializeError> {
    let descr = dict_value(dict, "descr")?
        .trim_matches(|c| c == '\'' || c == '"')
        .to_string();

    let fortran_order = match dict_value(dict, "fortran_order")? {
        "True" => true,
        "False" => false,
        other => return Err(invalid(format!("fortran_order {other}"))),
    };

    let shape = dict_value(dict, "shape")?
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>().map_err(|_| invalid(format!("shape {s}"))))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NpyHeader {
        descr,
        fortran_order,
        shape,
    })
}

fn read_header<R: Read>(reader: &mut R) -> Result<NpyHeader, SerializeError> {
    let mut preamble = [0u8; 8];
    reader.read_exact(&mut preamble)?;
    if &preamble[..6] != MAGIC {
        return Err(invalid("missing magic string"));
    }

    let header_len = match preamble[6] {
        1 => {
            let mut len = [0u8; 2];
            reader.read_exact(&mut len)?;
            u16::from_le_bytes(len) as usize
        }
        2 | 3 => {
            let mut len = [0u8; 4];
            reader.read_exact(&mut len)?;
            u32::from_le_bytes(len) as usize
        }
        major => return Err(invalid(format!("version {major}.{}", preamble[7]))),
    };

    let mut dict = Vec::new();
    reader.by_ref().take(header_len as u64).read_to_end(&mut dict)?;
    if dict.len() != header_len {
        return Err(invalid(format!("header of {header_len} bytes is truncated")));
    }
    let dict = String::from_utf8(dict).map_err(|_| invalid("header is not text"))?;

    parse_header(&dict)
}

fn read_values<R: Read, const N: usize>(
    reader: &mut R,
    count: usize,
    decode: impl Fn([u8; N]) -> f64,
) -> Result<Vec<f64>, SerializeError> {
    let len = count
        .checked_mul(N)
        .ok_or_else(|| invalid(format!("{count} values of {N} bytes overflow")))?;

    // grow with the data actually present instead of trusting the header
    let mut bytes = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(SerializeError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("expected {len} data bytes, found {}", bytes.len()),
        )));
    }

    Ok(bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            decode(raw)
        })
        .collect())
}

/// Read a `.npy` stream as an array of `f64`.
pub(crate) fn read_npy<R: Read>(reader: &mut R) -> Result<ArrayD<f64>, SerializeError> {
    let header = read_header(reader)?;
    let count = header
        .shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| invalid(format!("shape {:?} overflows", header.shape)))?;

    let values = match header.descr.as_str() {
        "<f8" => read_values(reader, count, f64::from_le_bytes)?,
        "<f4" => read_values(reader, count, |b| f32::from_le_bytes(b) as f64)?,
        "<i8" => read_values(reader, count, |b| i64::from_le_bytes(b) as f64)?,
        "<i4" => read_values(reader, count, |b| i32::from_le_bytes(b) as f64)?,
        "|u1" | "<u1" => read_values(reader, count, |b: [u8; 1]| b[0] as f64)?,
        other => return Err(SerializeError::UnsupportedDtype(other.to_string())),
    };

    let shape = IxDyn(&header.shape);
    let array = if header.fortran_order {
        ArrayD::from_shape_vec(shape.f(), values)?
    } else {
        ArrayD::from_shape_vec(shape, values)?
    };

    Ok(array)
}

/// Load a NumPy `.npy` file as an array of `f64`.
///
/// Supported dtypes are `<f8`, `<f4`, `<i8`, `<i4` and `|u1`, stored in
/// either C or Fortran order.
pub fn load_npy(path: impl AsRef<Path>) -> Result<ArrayD<f64>, SerializeError> {
    let mut reader = BufReader::new(std::fs::File::open(path)?);
    read_npy(&mut reader)
}

fn format_shape(shape: &[usize]) -> String {
    match shape {
        [single] => format!("({single},)"),
        _ => format!(
            "({})",
            shape
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Write an array of `f64` as a version 1.0 `.npy` stream in C order.
pub(crate) fn write_npy<W, S, D>(
    writer: &mut W,
    data: &ArrayBase<S, D>,
) -> Result<(), SerializeError>
where
    W: Write,
    S: Data<Elem = f64>,
    D: Dimension,
{
    let mut dict = format!(
        "{{'descr': '<f8', 'fortran_order': False, 'shape': {}, }}",
        format_shape(data.shape())
    );
    // magic + version + u16 length + dict + newline
    let unpadded = MAGIC.len() + 2 + 2 + dict.len() + 1;
    let padding = (HEADER_ALIGN - unpadded % HEADER_ALIGN) % HEADER_ALIGN;
    dict.push_str(&" ".repeat(padding));
    dict.push('\n');

    let header_len = u16::try_from(dict.len())
        .map_err(|_| SerializeError::UnsupportedShape(data.shape().to_vec()))?;

    writer.write_all(MAGIC)?;
    writer.write_all(&[1, 0])?;
    writer.write_all(&header_len.to_le_bytes())?;
    writer.write_all(dict.as_bytes())?;
    // iter() walks in logical (C) order regardless of memory layout
    for v in data.iter() {
        writer.write_all(&v.to_le_bytes())?;
    }

    Ok(())
}

/// Save an array of `f64` as a version 1.0 `.npy` file in C order.
pub fn save_npy<S, D>(path: impl AsRef<Path>, data: &ArrayBase<S, D>) -> Result<(), SerializeError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let mut writer = BufWriter::new(std::fs::File::create(path)?);
    write_npy(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}
