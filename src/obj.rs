use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::IVec3;
use thiserror::Error;

/// Factor applied to every coordinate read from a mesh file.
pub const IMPORT_SCALE: f32 = 100.0;

/// Failure to produce a usable vertex list from a mesh file.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("assets file <{}> is missing or unreadable", path.display())]
    ResourceMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("assets file <{}> does not define any vertices", path.display())]
    EmptyResource { path: PathBuf },
}

/// Reads the `v x y z` records of an OBJ file.
///
/// Only I/O failures are errors. A readable file without a single vertex
/// record produces an empty list and it is up to the caller to decide what
/// that means.
pub fn load_vertices<P: AsRef<Path>>(path: P, scale: f32) -> Result<Vec<IVec3>, MeshError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| MeshError::ResourceMissing {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_vertices(&data, scale))
}

/// Extracts scaled, truncated vertex positions from OBJ text.
///
/// Faces, normals, texture coordinates, comments and any vertex line that
/// does not split into exactly `v` plus three floats are skipped.
pub fn parse_vertices(data: &str, scale: f32) -> Vec<IVec3> {
    data.lines()
        .filter_map(|line| parse_vertex_line(line, scale))
        .collect()
}

fn parse_vertex_line(line: &str, scale: f32) -> Option<IVec3> {
    let trimmed = line.trim();
    if trimmed.len() <= 2 || !trimmed.starts_with("v ") {
        return None;
    }
    // Single-space split on purpose: doubled separators produce empty tokens
    // and push the record off the four-token shape.
    let tokens: Vec<&str> = trimmed.split(' ').collect();
    let [_, x, y, z] = tokens.as_slice() else {
        return None;
    };
    Some(IVec3::new(
        scale_component(x, scale)?,
        scale_component(y, scale)?,
        scale_component(z, scale)?,
    ))
}

fn scale_component(token: &str, scale: f32) -> Option<i32> {
    let value = token.trim().parse::<f32>().ok()?;
    // `as` truncates toward zero.
    Some((value * scale) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn scales_and_truncates_vertices() {
        let obj = "v 0.5 -0.25 1.5\nv 0.123 -0.456 2\n";
        let vertices = parse_vertices(obj, IMPORT_SCALE);
        assert_eq!(
            vertices,
            vec![IVec3::new(50, -25, 150), IVec3::new(12, -45, 200)]
        );
    }

    #[test]
    fn ignores_everything_but_vertices() {
        let obj = "\
# comment
o Slime
vn 0 1 0
vt 0.5 0.5
f 1 2 3
g group
  v 1 2 3
usemtl none
";
        assert_eq!(
            parse_vertices(obj, IMPORT_SCALE),
            vec![IVec3::new(100, 200, 300)]
        );
    }

    #[test]
    fn skips_malformed_vertex_records() {
        let obj = "\
v 1 2
v 1 2 3 4
v  1 2 3
v 1 two 3
v\t1 2 3
vx 1 2 3
v
v 1 2 3
";
        assert_eq!(
            parse_vertices(obj, IMPORT_SCALE),
            vec![IVec3::new(100, 200, 300)]
        );
    }

    #[test]
    fn loads_vertices_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "v 0.01 0.02 0.03\nf 1 1 1").unwrap();
        let vertices = load_vertices(file.path(), IMPORT_SCALE).unwrap();
        assert_eq!(vertices.len(), 1);
    }

    #[test]
    fn file_without_vertices_is_not_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here\nf 1 2 3").unwrap();
        assert!(load_vertices(file.path(), IMPORT_SCALE).unwrap().is_empty());
    }

    #[test]
    fn missing_file_reports_resource_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_vertices(dir.path().join("absent.obj"), IMPORT_SCALE).unwrap_err();
        assert!(matches!(err, MeshError::ResourceMissing { .. }));
        assert!(err.to_string().contains("absent.obj"));
    }
}
