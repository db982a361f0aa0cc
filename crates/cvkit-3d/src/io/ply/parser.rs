use std::io::{BufRead, Read};
use std::path::Path;

use super::{
    properties::{PlyDataType, PlyElementDefinition, PlyFormat, PlyPropertyDefinition, PlyValue},
    PlyError,
};
use crate::mesh::TriMesh;

/// The parsed header of a PLY file.
#[derive(Debug, PartialEq, Clone)]
pub struct PlyHeader {
    /// Body encoding.
    pub format: PlyFormat,
    /// Declared elements, in body order.
    pub elements: Vec<PlyElementDefinition>,
}

impl PlyHeader {
    /// Find the element called `name`.
    pub fn element(&self, name: &str) -> Option<&PlyElementDefinition> {
        self.elements.iter().find(|e| e.name == name)
    }
}

fn invalid_header(line: &str) -> PlyError {
    PlyError::InvalidHeader(line.to_string())
}

fn parse_header<R: BufRead>(reader: &mut R) -> Result<PlyHeader, PlyError> {
    let mut line = String::new();
    let mut is_ply = false;
    let mut format = None;
    let mut elements: Vec<PlyElementDefinition> = Vec::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(PlyError::InvalidHeader("missing end_header".to_string()));
        }
        let trimmed = line.trim();

        if !is_ply {
            if trimmed != "ply" {
                return Err(PlyError::InvalidHeader("missing ply magic".to_string()));
            }
            is_ply = true;
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        match parts.as_slice() {
            ["end_header"] => break,
            ["comment", ..] | ["obj_info", ..] | [] => {}
            ["format", name, _version] => format = Some(PlyFormat::parse(name)?),
            ["element", name, count] => {
                let count = count.parse().map_err(|_| invalid_header(trimmed))?;
                elements.push(PlyElementDefinition {
                    name: name.to_string(),
                    count,
                    properties: Vec::new(),
                });
            }
            ["property", "list", count_type, item_type, name] => {
                let element = elements.last_mut().ok_or_else(|| invalid_header(trimmed))?;
                element.properties.push(PlyPropertyDefinition::List {
                    name: name.to_string(),
                    count_type: PlyDataType::parse(count_type)?,
                    item_type: PlyDataType::parse(item_type)?,
                });
            }
            ["property", data_type, name] => {
                let element = elements.last_mut().ok_or_else(|| invalid_header(trimmed))?;
                element.properties.push(PlyPropertyDefinition::Scalar {
                    name: name.to_string(),
                    data_type: PlyDataType::parse(data_type)?,
                });
            }
            _ => return Err(invalid_header(trimmed)),
        }
    }

    let format = format.ok_or_else(|| PlyError::InvalidHeader("missing format".to_string()))?;

    log::debug!(
        "parsed ply header: format {}, elements {:?}",
        format.name(),
        elements
            .iter()
            .map(|e| (e.name.as_str(), e.count))
            .collect::<Vec<_>>()
    );

    Ok(PlyHeader { format, elements })
}

fn read_binary_scalar<R: Read>(
    reader: &mut R,
    data_type: PlyDataType,
    big_endian: bool,
) -> Result<f64, PlyError> {
    let mut buffer = [0u8; 8];
    let bytes = &mut buffer[..data_type.size()];
    reader.read_exact(bytes)?;

    macro_rules! decode {
        ($t:ty, $n:literal) => {{
            let mut raw = [0u8; $n];
            raw.copy_from_slice(&bytes[..$n]);
            if big_endian {
                <$t>::from_be_bytes(raw) as f64
            } else {
                <$t>::from_le_bytes(raw) as f64
            }
        }};
    }

    let value = match data_type {
        PlyDataType::Int8 => bytes[0] as i8 as f64,
        PlyDataType::UInt8 => bytes[0] as f64,
        PlyDataType::Int16 => decode!(i16, 2),
        PlyDataType::UInt16 => decode!(u16, 2),
        PlyDataType::Int32 => decode!(i32, 4),
        PlyDataType::UInt32 => decode!(u32, 4),
        PlyDataType::Float32 => decode!(f32, 4),
        PlyDataType::Float64 => decode!(f64, 8),
    };

    Ok(value)
}

fn read_row_binary<R: Read>(
    reader: &mut R,
    element: &PlyElementDefinition,
    big_endian: bool,
) -> Result<Vec<PlyValue>, PlyError> {
    element
        .properties
        .iter()
        .map(|property| match property {
            PlyPropertyDefinition::Scalar { data_type, .. } => Ok(PlyValue::Scalar(
                read_binary_scalar(reader, *data_type, big_endian)?,
            )),
            PlyPropertyDefinition::List {
                count_type,
                item_type,
                ..
            } => {
                let count = read_binary_scalar(reader, *count_type, big_endian)? as usize;
                let items = (0..count)
                    .map(|_| read_binary_scalar(reader, *item_type, big_endian))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PlyValue::List(items))
            }
        })
        .collect()
}

fn read_row_ascii<R: BufRead>(
    reader: &mut R,
    element: &PlyElementDefinition,
    line: &mut String,
) -> Result<Vec<PlyValue>, PlyError> {
    // skip blank lines between rows
    loop {
        line.clear();
        if reader.read_line(line)? == 0 {
            return Err(PlyError::Io(std::io::ErrorKind::UnexpectedEof.into()));
        }
        if !line.trim().is_empty() {
            break;
        }
    }

    let mut tokens = line.split_whitespace();
    let mut next_value = || -> Result<f64, PlyError> {
        let token = tokens.next().ok_or_else(|| PlyError::InvalidValue {
            element: element.name.clone(),
            value: "<missing>".to_string(),
        })?;
        token.parse::<f64>().map_err(|_| PlyError::InvalidValue {
            element: element.name.clone(),
            value: token.to_string(),
        })
    };

    let mut row = Vec::with_capacity(element.properties.len());
    for property in element.properties.iter() {
        match property {
            PlyPropertyDefinition::Scalar { .. } => row.push(PlyValue::Scalar(next_value()?)),
            PlyPropertyDefinition::List { .. } => {
                let count = next_value()? as usize;
                let items = (0..count)
                    .map(|_| next_value())
                    .collect::<Result<Vec<_>, _>>()?;
                row.push(PlyValue::List(items));
            }
        }
    }

    Ok(row)
}

/// Column positions of the vertex attributes the mesh understands.
struct VertexLayout {
    position: [usize; 3],
    normal: Option<[usize; 3]>,
    color: Option<[usize; 3]>,
    alpha: Option<usize>,
    color_is_float: bool,
}

impl VertexLayout {
    fn new(element: &PlyElementDefinition) -> Result<Self, PlyError> {
        let find3 = |names: [&str; 3]| -> Option<[usize; 3]> {
            Some([
                element.property_index(names[0])?,
                element.property_index(names[1])?,
                element.property_index(names[2])?,
            ])
        };

        let position = [
            element
                .property_index("x")
                .ok_or(PlyError::MissingProperty("x"))?,
            element
                .property_index("y")
                .ok_or(PlyError::MissingProperty("y"))?,
            element
                .property_index("z")
                .ok_or(PlyError::MissingProperty("z"))?,
        ];

        let color = find3(["red", "green", "blue"]);
        let color_is_float = color.is_some_and(|[r, _, _]| match &element.properties[r] {
            PlyPropertyDefinition::Scalar { data_type, .. } => data_type.is_float(),
            PlyPropertyDefinition::List { .. } => false,
        });

        Ok(Self {
            position,
            normal: find3(["nx", "ny", "nz"]),
            color,
            alpha: element.property_index("alpha"),
            color_is_float,
        })
    }

    fn to_color(&self, value: f64) -> u8 {
        let value = if self.color_is_float {
            value * 255.0
        } else {
            value
        };
        value.round().clamp(0.0, 255.0) as u8
    }
}

/// Upper bound on the capacity reserved from a header element count.
const MAX_RESERVE: usize = 1 << 20;

fn vertex_index(value: f64, element: &PlyElementDefinition) -> Result<u32, PlyError> {
    if value.fract() != 0.0 || !(0.0..=u32::MAX as f64).contains(&value) {
        return Err(PlyError::InvalidValue {
            element: element.name.clone(),
            value: value.to_string(),
        });
    }
    Ok(value as u32)
}

/// Read a triangle mesh from a PLY stream.
///
/// The stream may be ASCII or binary (either endianness). The `vertex`
/// element must provide `x y z`; `nx ny nz` and `red green blue [alpha]`
/// are read when present, with alpha defaulting to 255. Faces are taken from
/// the `vertex_indices` (or `vertex_index`) list of the `face` element and
/// must be triangles. Other elements are skipped.
pub fn read_ply_mesh_from<R: BufRead>(reader: &mut R) -> Result<TriMesh, PlyError> {
    let header = parse_header(reader)?;

    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut colors = Vec::new();
    let mut faces = Vec::new();
    let mut has_normals = false;
    let mut has_colors = false;
    let mut has_vertex_element = false;

    let mut line = String::new();
    for element in header.elements.iter() {
        let mut read_row = |reader: &mut R| match header.format {
            PlyFormat::Ascii => read_row_ascii(reader, element, &mut line),
            PlyFormat::BinaryLittleEndian => read_row_binary(reader, element, false),
            PlyFormat::BinaryBigEndian => read_row_binary(reader, element, true),
        };

        match element.name.as_str() {
            "vertex" => {
                has_vertex_element = true;
                let layout = VertexLayout::new(element)?;
                has_normals = layout.normal.is_some();
                has_colors = layout.color.is_some();
                vertices.reserve(element.count.min(MAX_RESERVE));

                for _ in 0..element.count {
                    let row = read_row(&mut *reader)?;
                    let p = layout.position.map(|i| row[i].as_scalar() as f32);
                    vertices.push(p);

                    if let Some(normal) = layout.normal {
                        normals.push(normal.map(|i| row[i].as_scalar() as f32));
                    }

                    if let Some([r, g, b]) = layout.color {
                        let alpha = layout
                            .alpha
                            .map_or(255, |a| layout.to_color(row[a].as_scalar()));
                        colors.push([
                            layout.to_color(row[r].as_scalar()),
                            layout.to_color(row[g].as_scalar()),
                            layout.to_color(row[b].as_scalar()),
                            alpha,
                        ]);
                    }
                }
            }
            "face" => {
                let list_index = element
                    .property_index("vertex_indices")
                    .or_else(|| element.property_index("vertex_index"))
                    .ok_or(PlyError::MissingProperty("vertex_indices"))?;
                faces.reserve(element.count.min(MAX_RESERVE));

                for face in 0..element.count {
                    let row = read_row(&mut *reader)?;
                    match &row[list_index] {
                        PlyValue::List(items) if items.len() == 3 => faces.push([
                            vertex_index(items[0], element)?,
                            vertex_index(items[1], element)?,
                            vertex_index(items[2], element)?,
                        ]),
                        PlyValue::List(items) => {
                            return Err(PlyError::NonTriangularFace {
                                face,
                                len: items.len(),
                            })
                        }
                        PlyValue::Scalar(_) => {
                            return Err(PlyError::NonTriangularFace { face, len: 1 })
                        }
                    }
                }
            }
            _ => {
                for _ in 0..element.count {
                    read_row(&mut *reader)?;
                }
            }
        }
    }

    if !has_vertex_element {
        return Err(PlyError::MissingProperty("vertex"));
    }

    let mesh = TriMesh::new(
        vertices,
        has_normals.then_some(normals),
        has_colors.then_some(colors),
        faces,
    )?;

    Ok(mesh)
}

/// Read a triangle mesh from a PLY file.
///
/// See [`read_ply_mesh_from`] for the supported layouts.
pub fn read_ply_mesh(path: impl AsRef<Path>) -> Result<TriMesh, PlyError> {
    let file = std::fs::File::open(path)?;
    let mut reader = std::io::BufReader::new(file);
    read_ply_mesh_from(&mut reader)
}

/// Read only the header of a PLY file.
pub fn read_ply_header(path: impl AsRef<Path>) -> Result<PlyHeader, PlyError> {
    let file = std::fs::File::open(path)?;
    let mut reader = std::io::BufReader::new(file);
    parse_header(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_CORNER_ASCII: &str = "ply\n\
format ascii 1.0\n\
comment made by hand\n\
element vertex 3\n\
property float x\n\
property float y\n\
property float z\n\
property float nx\n\
property float ny\n\
property float nz\n\
property uchar red\n\
property uchar green\n\
property uchar blue\n\
property uchar alpha\n\
element face 1\n\
property list uchar int vertex_indices\n\
end_header\n\
0 0 0 0 0 1 255 0 0 255\n\
1 0 0 0 0 1 0 255 0 128\n\
0 1 0 0 0 1 0 0 255 0\n\
3 0 1 2\n";

    #[test]
    fn test_parse_header_basic() -> Result<(), PlyError> {
        let header_text = "ply\nformat binary_little_endian 1.0\nelement vertex 10\nproperty float x\nproperty float y\nproperty float z\nend_header\n";
        let mut reader = std::io::BufReader::new(header_text.as_bytes());
        let header = parse_header(&mut reader)?;
        assert_eq!(header.format, PlyFormat::BinaryLittleEndian);
        let vertex = header.element("vertex").ok_or(PlyError::MissingProperty("vertex"))?;
        assert_eq!(vertex.count, 10);
        assert_eq!(vertex.properties.len(), 3);
        assert_eq!(vertex.properties[0].name(), "x");
        Ok(())
    }

    #[test]
    fn test_parse_header_errors() {
        let no_magic = "format ascii 1.0\nend_header\n";
        let res = parse_header(&mut std::io::BufReader::new(no_magic.as_bytes()));
        assert!(matches!(res, Err(PlyError::InvalidHeader(_))));

        let no_end = "ply\nformat ascii 1.0\nelement vertex 1\n";
        let res = parse_header(&mut std::io::BufReader::new(no_end.as_bytes()));
        assert!(matches!(res, Err(PlyError::InvalidHeader(_))));

        let orphan_property = "ply\nformat ascii 1.0\nproperty float x\nend_header\n";
        let res = parse_header(&mut std::io::BufReader::new(orphan_property.as_bytes()));
        assert!(matches!(res, Err(PlyError::InvalidHeader(_))));

        let bad_type = "ply\nformat ascii 1.0\nelement vertex 1\nproperty half x\nend_header\n";
        let res = parse_header(&mut std::io::BufReader::new(bad_type.as_bytes()));
        assert!(matches!(res, Err(PlyError::UnsupportedProperty(_))));
    }

    #[test]
    fn test_read_ascii_mesh() -> Result<(), PlyError> {
        let mut reader = std::io::BufReader::new(CUBE_CORNER_ASCII.as_bytes());
        let mesh = read_ply_mesh_from(&mut reader)?;

        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.vertices()[1], [1.0, 0.0, 0.0]);
        assert_eq!(mesh.normals().map(|n| n[2]), Some([0.0, 0.0, 1.0]));
        assert_eq!(mesh.colors().map(|c| c[1]), Some([0, 255, 0, 128]));
        assert_eq!(mesh.faces(), &[[0, 1, 2]]);
        Ok(())
    }

    #[test]
    fn test_read_binary_mesh() -> Result<(), PlyError> {
        let mut data = b"ply\nformat binary_little_endian 1.0\nelement vertex 3\nproperty float x\nproperty float y\nproperty float z\nproperty uchar red\nproperty uchar green\nproperty uchar blue\nelement face 1\nproperty list uchar uint vertex_index\nend_header\n".to_vec();
        for (p, c) in [
            ([1.0f32, 2.0, 3.0], [255u8, 128, 0]),
            ([4.0, 5.0, 6.0], [0, 0, 0]),
            ([7.0, 8.0, 9.0], [1, 2, 3]),
        ] {
            for v in p {
                data.extend_from_slice(&v.to_le_bytes());
            }
            data.extend_from_slice(&c);
        }
        data.push(3);
        for i in [2u32, 1, 0] {
            data.extend_from_slice(&i.to_le_bytes());
        }

        let mesh = read_ply_mesh_from(&mut std::io::BufReader::new(data.as_slice()))?;
        assert_eq!(mesh.vertices()[0], [1.0, 2.0, 3.0]);
        assert_eq!(mesh.vertices()[2], [7.0, 8.0, 9.0]);
        assert!(mesh.normals().is_none());
        assert_eq!(mesh.colors().map(|c| c[0]), Some([255, 128, 0, 255]));
        assert_eq!(mesh.faces(), &[[2, 1, 0]]);
        Ok(())
    }

    #[test]
    fn test_read_big_endian_skips_unknown_elements() -> Result<(), PlyError> {
        let mut data = b"ply\nformat binary_big_endian 1.0\nelement vertex 1\nproperty double x\nproperty double y\nproperty double z\nelement camera 1\nproperty short id\nend_header\n".to_vec();
        for v in [0.5f64, -1.0, 2.0] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.extend_from_slice(&7i16.to_be_bytes());

        let mesh = read_ply_mesh_from(&mut std::io::BufReader::new(data.as_slice()))?;
        assert_eq!(mesh.vertices(), &[[0.5, -1.0, 2.0]]);
        assert_eq!(mesh.num_faces(), 0);
        Ok(())
    }

    #[test]
    fn test_read_quad_face_fails() {
        let text = "ply\nformat ascii 1.0\nelement vertex 4\nproperty float x\nproperty float y\nproperty float z\nelement face 1\nproperty list uchar int vertex_indices\nend_header\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n";
        let res = read_ply_mesh_from(&mut std::io::BufReader::new(text.as_bytes()));
        assert!(matches!(
            res,
            Err(PlyError::NonTriangularFace { face: 0, len: 4 })
        ));
    }

    #[test]
    fn test_read_missing_position() {
        let text = "ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\nproperty float y\nend_header\n0 0\n";
        let res = read_ply_mesh_from(&mut std::io::BufReader::new(text.as_bytes()));
        assert!(matches!(res, Err(PlyError::MissingProperty("z"))));
    }

    #[test]
    fn test_read_truncated_ascii() {
        let text = "ply\nformat ascii 1.0\nelement vertex 2\nproperty float x\nproperty float y\nproperty float z\nend_header\n0 0 0\n1 abc 0\n";
        let res = read_ply_mesh_from(&mut std::io::BufReader::new(text.as_bytes()));
        assert!(matches!(res, Err(PlyError::InvalidValue { .. })));
    }

    #[test]
    fn test_read_huge_element_count() {
        let text = "ply\nformat ascii 1.0\nelement vertex 18446744073709551615\nproperty float x\nproperty float y\nproperty float z\nend_header\n0 0 0\n";
        let res = read_ply_mesh_from(&mut std::io::BufReader::new(text.as_bytes()));
        assert!(matches!(
            res,
            Err(PlyError::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof
        ));

        let mut data = b"ply\nformat binary_little_endian 1.0\nelement face 18446744073709551615\nproperty list uchar int vertex_indices\nend_header\n".to_vec();
        data.push(3);
        for i in [0i32, 1, 2] {
            data.extend_from_slice(&i.to_le_bytes());
        }
        let res = read_ply_mesh_from(&mut std::io::BufReader::new(data.as_slice()));
        assert!(matches!(
            res,
            Err(PlyError::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof
        ));
    }

    #[test]
    fn test_read_invalid_face_indices() {
        let header = "ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\nproperty float y\nproperty float z\nelement face 1\nproperty list uchar float vertex_indices\nend_header\n0 0 0\n1 0 0\n0 1 0\n";
        for face in ["3 -1 1 2\n", "3 0 1.5 2\n", "3 0 1 nan\n"] {
            let text = format!("{header}{face}");
            let res = read_ply_mesh_from(&mut std::io::BufReader::new(text.as_bytes()));
            assert!(
                matches!(res, Err(PlyError::InvalidValue { ref element, .. }) if element == "face"),
                "face {face:?} gave {res:?}"
            );
        }
    }
}
