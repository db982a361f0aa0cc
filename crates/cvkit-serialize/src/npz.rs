use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::ArrayD;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::SerializeError;
use crate::npy::{read_npy, write_npy};

/// Named arrays of an `.npz` archive, keyed without the `.npy` suffix.
pub type NpzArchive = BTreeMap<String, ArrayD<f64>>;

/// Load every `.npy` member of a NumPy `.npz` archive.
///
/// Both stored and deflated archives are read, so files written by
/// `numpy.savez` and `numpy.savez_compressed` load alike. Members are keyed
/// by their name with the `.npy` suffix removed, as `numpy.load` does.
pub fn load_npz(path: impl AsRef<Path>) -> Result<NpzArchive, SerializeError> {
    let path = path.as_ref();
    let mut archive = ZipArchive::new(BufReader::new(std::fs::File::open(path)?))?;

    let mut arrays = NpzArchive::new();
    for i in 0..archive.len() {
        let mut member = archive.by_index(i)?;
        if member.is_dir() {
            continue;
        }
        let name = member.name().to_string();
        let key = name.strip_suffix(".npy").unwrap_or(&name).to_string();
        arrays.insert(key, read_npy(&mut member)?);
    }

    log::debug!("loaded {} arrays from {}", arrays.len(), path.display());

    Ok(arrays)
}

/// Save named arrays as an uncompressed `.npz` archive, one `<name>.npy`
/// member per entry.
pub fn save_npz(path: impl AsRef<Path>, arrays: &NpzArchive) -> Result<(), SerializeError> {
    let file = BufWriter::new(std::fs::File::create(path)?);
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (name, array) in arrays {
        zip.start_file(format!("{name}.npy"), options)?;
        write_npy(&mut zip, array)?;
    }

    zip.finish()?.flush()?;
    Ok(())
}
