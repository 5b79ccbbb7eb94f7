//! Writer for the object text format.
//!
//! Emits exactly what the [`reader`](crate::reader) accepts: one block per
//! wireframe with vertex lines, polyline lines, face lines (prefixed by
//! `usemtl` when filled), curve blocks, and surface blocks, in that order.
//! Indices are written 1-based; parameter ranges are round-tripped verbatim.

use std::fmt::Write as _;

use filigree_geometry::curve::Curve;
use filigree_geometry::surface::Surface;
use filigree_geometry::wireframe::{Face, Wireframe};

use crate::ObjError;

/// Serialize wireframes into one document.
pub fn write_str(wireframes: &[Wireframe]) -> String {
    let mut out = String::new();
    for wireframe in wireframes {
        out.push_str(&object_block(wireframe));
        out.push('\n');
    }
    out
}

/// Serialize and write to a file.
pub fn save_path(
    path: impl AsRef<std::path::Path>,
    wireframes: &[Wireframe],
) -> Result<(), ObjError> {
    let path = path.as_ref();
    std::fs::write(path, write_str(wireframes)).map_err(|source| ObjError::Io {
        action: "write",
        path: path.display().to_string(),
        source,
    })
}

/// One wireframe as a text block: header plus component sections separated
/// by blank lines.
fn object_block(wireframe: &Wireframe) -> String {
    let mut sections = vec![format!("o {}", wireframe.name)];

    if !wireframe.vertices.is_empty() {
        let vertices = wireframe
            .vertices
            .iter()
            .map(|v| format!("v {} {} {}", v.x, v.y, v.z))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(vertices);
    }

    if !wireframe.edges.is_empty() {
        let edges = wireframe
            .edges
            .iter()
            .map(|(start, end)| format!("l {} {}", start + 1, end + 1))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(edges);
    }

    if !wireframe.faces.is_empty() {
        let faces = wireframe
            .faces
            .iter()
            .map(face_lines)
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(faces);
    }

    if !wireframe.curves.is_empty() {
        let curves = wireframe
            .curves
            .iter()
            .map(curve_block)
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(curves);
    }

    if !wireframe.surfaces.is_empty() {
        let surfaces = wireframe
            .surfaces
            .iter()
            .map(surface_block)
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(surfaces);
    }

    let mut block = sections.join("\n\n");
    block.push('\n');
    block
}

fn face_lines(face: &Face) -> String {
    let indices = join_one_based(&face.vertices);
    match &face.fill {
        Some(fill) => format!("usemtl {fill}\nf {indices}"),
        None => format!("f {indices}"),
    }
}

fn curve_block(curve: &Curve) -> String {
    let mut block = String::new();
    let _ = writeln!(block, "ctype {}", curve.kind.obj_name());
    let _ = writeln!(block, "deg {}", curve.degree);
    let _ = writeln!(
        block,
        "curv {} {} {}",
        curve.start,
        curve.end,
        join_one_based(&curve.control_points)
    );
    block.push_str("parm u 0 1");
    block
}

fn surface_block(surface: &Surface) -> String {
    let mut block = String::new();
    let _ = writeln!(
        block,
        "stype {} {}",
        surface.kind.obj_name(),
        surface.algorithm.obj_name()
    );
    let _ = writeln!(block, "deg {} {}", surface.degrees.0, surface.degrees.1);
    let _ = writeln!(
        block,
        "surf {} {} {} {} {}",
        surface.domain.start_u,
        surface.domain.end_u,
        surface.domain.start_v,
        surface.domain.end_v,
        join_one_based(&surface.control_points)
    );
    block.push_str("parm u 0 1\nparm v 0 1");
    block
}

fn join_one_based(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
