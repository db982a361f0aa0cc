use super::PlyError;

/// Encoding of the PLY body.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum PlyFormat {
    /// One element per text line.
    #[default]
    Ascii,
    /// Packed little endian binary values.
    BinaryLittleEndian,
    /// Packed big endian binary values.
    BinaryBigEndian,
}

impl PlyFormat {
    pub(crate) fn parse(name: &str) -> Result<Self, PlyError> {
        match name {
            "ascii" => Ok(PlyFormat::Ascii),
            "binary_little_endian" => Ok(PlyFormat::BinaryLittleEndian),
            "binary_big_endian" => Ok(PlyFormat::BinaryBigEndian),
            _ => Err(PlyError::InvalidHeader(format!("unknown format {name}"))),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            PlyFormat::Ascii => "ascii",
            PlyFormat::BinaryLittleEndian => "binary_little_endian",
            PlyFormat::BinaryBigEndian => "binary_big_endian",
        }
    }
}

/// Scalar type of a PLY property.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlyDataType {
    /// `char` / `int8`
    Int8,
    /// `uchar` / `uint8`
    UInt8,
    /// `short` / `int16`
    Int16,
    /// `ushort` / `uint16`
    UInt16,
    /// `int` / `int32`
    Int32,
    /// `uint` / `uint32`
    UInt32,
    /// `float` / `float32`
    Float32,
    /// `double` / `float64`
    Float64,
}

impl PlyDataType {
    /// Size in bytes of one binary value.
    pub fn size(&self) -> usize {
        match self {
            PlyDataType::Float32 | PlyDataType::Int32 | PlyDataType::UInt32 => 4,
            PlyDataType::Float64 => 8,
            PlyDataType::Int16 | PlyDataType::UInt16 => 2,
            PlyDataType::Int8 | PlyDataType::UInt8 => 1,
        }
    }

    /// Whether values of this type are floating point.
    pub fn is_float(&self) -> bool {
        matches!(self, PlyDataType::Float32 | PlyDataType::Float64)
    }

    pub(crate) fn parse(type_str: &str) -> Result<Self, PlyError> {
        match type_str {
            "float" | "float32" => Ok(PlyDataType::Float32),
            "double" | "float64" => Ok(PlyDataType::Float64),
            "char" | "int8" => Ok(PlyDataType::Int8),
            "uchar" | "uint8" => Ok(PlyDataType::UInt8),
            "short" | "int16" => Ok(PlyDataType::Int16),
            "ushort" | "uint16" => Ok(PlyDataType::UInt16),
            "int" | "int32" => Ok(PlyDataType::Int32),
            "uint" | "uint32" => Ok(PlyDataType::UInt32),
            _ => Err(PlyError::UnsupportedProperty(type_str.to_string())),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            PlyDataType::Int8 => "char",
            PlyDataType::UInt8 => "uchar",
            PlyDataType::Int16 => "short",
            PlyDataType::UInt16 => "ushort",
            PlyDataType::Int32 => "int",
            PlyDataType::UInt32 => "uint",
            PlyDataType::Float32 => "float",
            PlyDataType::Float64 => "double",
        }
    }
}

/// A property declared in the PLY header.
#[derive(Debug, PartialEq, Clone)]
pub enum PlyPropertyDefinition {
    /// A single value per element.
    Scalar {
        /// Property name.
        name: String,
        /// Value type.
        data_type: PlyDataType,
    },
    /// A length-prefixed list of values per element.
    List {
        /// Property name.
        name: String,
        /// Type of the length prefix.
        count_type: PlyDataType,
        /// Type of the list items.
        item_type: PlyDataType,
    },
}

impl PlyPropertyDefinition {
    /// Name of the property.
    pub fn name(&self) -> &str {
        match self {
            PlyPropertyDefinition::Scalar { name, .. } => name,
            PlyPropertyDefinition::List { name, .. } => name,
        }
    }
}

/// An element declared in the PLY header, e.g. `element vertex 8`.
#[derive(Debug, PartialEq, Clone)]
pub struct PlyElementDefinition {
    /// Element name.
    pub name: String,
    /// Number of element rows in the body.
    pub count: usize,
    /// Properties of each row, in storage order.
    pub properties: Vec<PlyPropertyDefinition>,
}

impl PlyElementDefinition {
    /// Position of the property called `name`.
    pub fn property_index(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name() == name)
    }
}

/// The value of one property of one element row.
#[derive(Debug, PartialEq, Clone)]
pub(crate) enum PlyValue {
    Scalar(f64),
    List(Vec<f64>),
}

impl PlyValue {
    pub(crate) fn as_scalar(&self) -> f64 {
        match self {
            PlyValue::Scalar(v) => *v,
            PlyValue::List(items) => items.first().copied().unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_parsing() -> Result<(), PlyError> {
        assert_eq!(PlyDataType::parse("float")?, PlyDataType::Float32);
        assert_eq!(PlyDataType::parse("uchar")?, PlyDataType::UInt8);
        assert_eq!(PlyDataType::parse("double")?, PlyDataType::Float64);
        assert_eq!(PlyDataType::parse("int32")?, PlyDataType::Int32);
        assert!(PlyDataType::parse("invalid").is_err());
        Ok(())
    }

    #[test]
    fn test_data_type_names_roundtrip() -> Result<(), PlyError> {
        for ty in [
            PlyDataType::Int8,
            PlyDataType::UInt8,
            PlyDataType::Int16,
            PlyDataType::UInt16,
            PlyDataType::Int32,
            PlyDataType::UInt32,
            PlyDataType::Float32,
            PlyDataType::Float64,
        ] {
            assert_eq!(PlyDataType::parse(ty.name())?, ty);
        }
        Ok(())
    }
}
