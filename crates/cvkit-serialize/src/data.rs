use std::path::Path;

use ndarray::{ArrayD, Ix2};

use crate::error::SerializeError;
use crate::format::Format;
use crate::npz::NpzArchive;
use crate::{npy, npz, txt, yaml};

/// Data loaded from, or to be saved to, any supported format.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    /// A numeric array, from text or NPY files.
    Matrix(ArrayD<f64>),
    /// A YAML document.
    Yaml(serde_yaml::Value),
    /// Named arrays, from NPZ files.
    Archive(NpzArchive),
}

impl Data {
    fn kind(&self) -> &'static str {
        match self {
            Data::Matrix(_) => "matrix",
            Data::Yaml(_) => "yaml",
            Data::Archive(_) => "archive",
        }
    }
}

/// Load a file, choosing the reader from the extension.
///
/// Text and NPY files give [`Data::Matrix`], YAML files give [`Data::Yaml`]
/// and NPZ files give [`Data::Archive`]. MAT files are recognised but
/// rejected with [`SerializeError::UnsupportedFormat`].
pub fn load(path: impl AsRef<Path>) -> Result<Data, SerializeError> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    log::debug!("loading {} as {format}", path.display());

    match format {
        Format::Txt => Ok(Data::Matrix(txt::load_txt(path)?.into_dyn())),
        Format::Yaml => Ok(Data::Yaml(yaml::load_yaml(path)?)),
        Format::Npy => Ok(Data::Matrix(npy::load_npy(path)?)),
        Format::Npz => Ok(Data::Archive(npz::load_npz(path)?)),
        Format::Mat => Err(SerializeError::UnsupportedFormat(format)),
    }
}

/// Save data to a file, choosing the writer from the extension.
///
/// Text files take matrices of one or two dimensions; a vector is written
/// as a column. NPY files take matrices of any dimension. NPZ files take
/// archives, or a single matrix stored as `arr_0`. YAML files take YAML
/// documents.
pub fn save(path: impl AsRef<Path>, data: &Data) -> Result<(), SerializeError> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    log::debug!("saving {} data to {} as {format}", data.kind(), path.display());

    match (format, data) {
        (Format::Txt, Data::Matrix(m)) => {
            let m = match m.ndim() {
                1 => m.view().into_shape((m.len(), 1))?.into_dyn(),
                2 => m.view(),
                _ => return Err(SerializeError::UnsupportedShape(m.shape().to_vec())),
            };
            txt::save_txt(path, &m.into_dimensionality::<Ix2>()?)
        }
        (Format::Npy, Data::Matrix(m)) => npy::save_npy(path, m),
        (Format::Npz, Data::Archive(arrays)) => npz::save_npz(path, arrays),
        (Format::Npz, Data::Matrix(m)) => {
            let arrays = NpzArchive::from([("arr_0".to_string(), m.clone())]);
            npz::save_npz(path, &arrays)
        }
        (Format::Yaml, Data::Yaml(v)) => yaml::save_yaml(path, v),
        (Format::Mat, _) => Err(SerializeError::UnsupportedFormat(format)),
        (format, data) => Err(SerializeError::DataMismatch {
            data: data.kind(),
            format,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn test_dispatch_roundtrip() -> Result<(), SerializeError> {
        let tmp_dir = tempfile::tempdir()?;

        let matrix = Data::Matrix(array![[1.0, 2.0], [3.0, 4.0]].into_dyn());
        for name in ["m.txt", "m.npy"] {
            let path = tmp_dir.path().join(name);
            save(&path, &matrix)?;
            assert_eq!(load(&path)?, matrix);
        }

        let path = tmp_dir.path().join("m.npz");
        save(&path, &matrix)?;
        let Data::Archive(arrays) = load(&path)? else {
            panic!("npz should load as an archive");
        };
        assert_eq!(Data::Matrix(arrays["arr_0"].clone()), matrix);

        let archive = Data::Archive(NpzArchive::from([
            ("a".to_string(), array![1.0, 2.0].into_dyn()),
            ("b".to_string(), array![[3.0], [4.0]].into_dyn()),
        ]));
        save(&path, &archive)?;
        assert_eq!(load(&path)?, archive);

        let doc: serde_yaml::Value = serde_yaml::from_str("poses:\n  - [0, 1, 2]\nname: test\n")?;
        let path = tmp_dir.path().join("doc.yaml");
        save(&path, &Data::Yaml(doc.clone()))?;
        assert_eq!(load(&path)?, Data::Yaml(doc));
        Ok(())
    }

    #[test]
    fn test_vector_saved_as_column() -> Result<(), SerializeError> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("v.txt");

        save(&path, &Data::Matrix(Array1::from(vec![1.0, 2.0, 3.0]).into_dyn()))?;
        assert_eq!(std::fs::read_to_string(&path)?, "1\n2\n3\n");
        Ok(())
    }

    #[test]
    fn test_unsupported() -> Result<(), SerializeError> {
        let tmp_dir = tempfile::tempdir()?;
        let matrix = Data::Matrix(array![1.0].into_dyn());

        let path = tmp_dir.path().join("a.mat");
        assert!(matches!(
            save(&path, &matrix),
            Err(SerializeError::UnsupportedFormat(Format::Mat))
        ));
        assert!(matches!(
            load(&path),
            Err(SerializeError::UnsupportedFormat(Format::Mat))
        ));

        assert!(matches!(
            save(tmp_dir.path().join("a.yml"), &matrix),
            Err(SerializeError::DataMismatch { data: "matrix", .. })
        ));
        assert!(matches!(
            save(tmp_dir.path().join("a.npy"), &Data::Yaml(serde_yaml::Value::Null)),
            Err(SerializeError::DataMismatch { data: "yaml", .. })
        ));
        assert!(matches!(
            save(tmp_dir.path().join("a.npz"), &Data::Yaml(serde_yaml::Value::Null)),
            Err(SerializeError::DataMismatch { data: "yaml", .. })
        ));
        assert!(matches!(
            save(tmp_dir.path().join("a.npy"), &Data::Archive(NpzArchive::new())),
            Err(SerializeError::DataMismatch { data: "archive", .. })
        ));
        assert!(matches!(
            save(
                tmp_dir.path().join("a.txt"),
                &Data::Matrix(ndarray::Array3::<f64>::zeros((1, 1, 1)).into_dyn())
            ),
            Err(SerializeError::UnsupportedShape(_))
        ));
        Ok(())
    }
}
