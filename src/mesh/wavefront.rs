//! Loads Wavefront `.obj` geometry into [`Mesh`]es
//!
//! Parsing is done by the `obj` crate; this module only turns its polygon
//! soup into the vertex/face layout the pipeline consumes. Polygons with
//! more than three corners are fan-triangulated. Each vertex takes the
//! normal referenced by the last face corner that uses it; vertices no face
//! gives a normal keep a zero normal.

use std::{
    ffi::OsStr,
    io::{BufReader, Read},
    fs::File,
    path::Path,
};

use obj::{IndexTuple, ObjData};
use tracing::{info, warn};

use super::{Face, Mesh, Vertex};
use crate::error::{RenderError, Result};
use crate::math::Vector3;

/// Loads the file at `path`; the mesh is named after the file stem.
pub fn load(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    match path.extension().and_then(OsStr::to_str) {
        Some(ext) if ext.eq_ignore_ascii_case("obj") => {}
        _ => {
            return Err(RenderError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let f = File::open(path)?;
    let mesh = load_buf(BufReader::new(f), name)?;
    info!(
        "loaded {:?}: {} vertices, {} faces",
        path,
        mesh.vertices().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

/// Parses OBJ text from any reader.
pub fn load_buf<R: Read>(input: R, name: impl Into<String>) -> Result<Mesh> {
    let data = ObjData::load_buf(input)?;
    from_obj_data(&data, name)
}

fn from_obj_data(data: &ObjData, name: impl Into<String>) -> Result<Mesh> {
    let name = name.into();
    let mut vertices: Vec<Vertex> = data
        .position
        .iter()
        .map(|&p| Vertex::new(Vector3::from(p), Vector3::ZERO))
        .collect();

    let mut faces = Vec::new();
    let mut skipped = 0usize;
    for group in data.objects.iter().flat_map(|o| o.groups.iter()) {
        for poly in &group.polys {
            let corners: &[IndexTuple] = &poly.0;
            if corners.len() < 3 {
                skipped += 1;
                continue;
            }

            for corner in corners {
                if let (Some(vertex), Some(normal)) = (
                    vertices.get_mut(corner.0),
                    corner.2.and_then(|n| data.normal.get(n)),
                ) {
                    vertex.normal = Vector3::from(*normal);
                }
            }

            for i in 1..corners.len() - 1 {
                faces.push(Face::new(corners[0].0, corners[i].0, corners[i + 1].0));
            }
        }
    }

    if skipped > 0 {
        warn!("{}: skipped {} polygons with fewer than 3 corners", name, skipped);
    }

    Mesh::new(name, vertices, faces)
}
