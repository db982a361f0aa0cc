use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SerializeError;

/// Deserialize a YAML file into `T`.
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, SerializeError> {
    let reader = BufReader::new(std::fs::File::open(path)?);
    Ok(serde_yaml::from_reader(reader)?)
}

/// Serialize `data` into a YAML file, creating or truncating it.
pub fn save_yaml<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    data: &T,
) -> Result<(), SerializeError> {
    let mut writer = BufWriter::new(std::fs::File::create(path)?);
    serde_yaml::to_writer(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}
