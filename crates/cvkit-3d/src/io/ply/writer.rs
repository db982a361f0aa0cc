use std::io::Write;
use std::path::Path;

use super::{properties::PlyFormat, PlyError};
use crate::mesh::TriMesh;

fn write_header<W: Write>(
    writer: &mut W,
    mesh: &TriMesh,
    format: PlyFormat,
) -> Result<(), PlyError> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format {} 1.0", format.name())?;
    writeln!(writer, "comment written by cvkit")?;
    writeln!(writer, "element vertex {}", mesh.num_vertices())?;
    for axis in ["x", "y", "z"] {
        writeln!(writer, "property float {axis}")?;
    }
    if mesh.normals().is_some() {
        for axis in ["nx", "ny", "nz"] {
            writeln!(writer, "property float {axis}")?;
        }
    }
    if mesh.colors().is_some() {
        for channel in ["red", "green", "blue", "alpha"] {
            writeln!(writer, "property uchar {channel}")?;
        }
    }
    writeln!(writer, "element face {}", mesh.num_faces())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;
    Ok(())
}

fn write_body_ascii<W: Write>(writer: &mut W, mesh: &TriMesh) -> Result<(), PlyError> {
    for (i, [x, y, z]) in mesh.vertices().iter().enumerate() {
        write!(writer, "{x} {y} {z}")?;
        if let Some([nx, ny, nz]) = mesh.normals().map(|n| n[i]) {
            write!(writer, " {nx} {ny} {nz}")?;
        }
        if let Some([r, g, b, a]) = mesh.colors().map(|c| c[i]) {
            write!(writer, " {r} {g} {b} {a}")?;
        }
        writeln!(writer)?;
    }

    for [a, b, c] in mesh.faces().iter() {
        writeln!(writer, "3 {a} {b} {c}")?;
    }

    Ok(())
}

fn write_body_binary<W: Write>(
    writer: &mut W,
    mesh: &TriMesh,
    big_endian: bool,
) -> Result<(), PlyError> {
    let f32_bytes = |v: f32| {
        if big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    };
    let i32_bytes = |v: i32| {
        if big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    };

    for (i, vertex) in mesh.vertices().iter().enumerate() {
        for v in vertex {
            writer.write_all(&f32_bytes(*v))?;
        }
        if let Some(normal) = mesh.normals().map(|n| n[i]) {
            for v in normal {
                writer.write_all(&f32_bytes(v))?;
            }
        }
        if let Some(color) = mesh.colors().map(|c| c[i]) {
            writer.write_all(&color)?;
        }
    }

    for face in mesh.faces().iter() {
        writer.write_all(&[3u8])?;
        for index in face {
            writer.write_all(&i32_bytes(*index as i32))?;
        }
    }

    Ok(())
}

/// Write a triangle mesh to a PLY stream.
///
/// Positions and normals are stored as `float`, colors as `uchar` RGBA and
/// faces as a `uchar`/`int` list named `vertex_indices`.
pub fn write_ply_mesh_to<W: Write>(
    writer: &mut W,
    mesh: &TriMesh,
    format: PlyFormat,
) -> Result<(), PlyError> {
    write_header(writer, mesh, format)?;
    match format {
        PlyFormat::Ascii => write_body_ascii(writer, mesh)?,
        PlyFormat::BinaryLittleEndian => write_body_binary(writer, mesh, false)?,
        PlyFormat::BinaryBigEndian => write_body_binary(writer, mesh, true)?,
    }
    writer.flush()?;
    Ok(())
}

/// Write a triangle mesh to a PLY file, creating or truncating it.
pub fn write_ply_mesh(
    path: impl AsRef<Path>,
    mesh: &TriMesh,
    format: PlyFormat,
) -> Result<(), PlyError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    write_ply_mesh_to(&mut writer, mesh, format)?;
    log::debug!(
        "wrote {} vertices and {} faces to {}",
        mesh.num_vertices(),
        mesh.num_faces(),
        path.display()
    );
    Ok(())
}
