//! Reader for the object text format.
//!
//! Line-oriented; `#` starts a comment and blank lines are skipped.
//! Recognized records:
//!
//! | Header | Body | Meaning |
//! |---|---|---|
//! | `o name` / `g name` | one token | begin a new wireframe, flush the previous |
//! | `v x y z` | three reals | append a vertex (`w = 1`) |
//! | `l i1 i2 ...` | >= 2 indices | append edges between consecutive indices |
//! | `usemtl color` | one token | fill tag for the next `f` record |
//! | `f i1 i2 i3 ...` | >= 3 indices | append a face |
//! | `ctype name` | `bezier`/`bspline` | curve block: `deg d` then `curv u0 u1 i...` |
//! | `stype name [alg]` | type + algorithm | surface block: `deg du dv` then `surf u0 u1 v0 v1 i...` |
//! | `parm ...` | anything | accepted and ignored |
//!
//! Vertex indices are 1-based in text and global within the current object.
//! The reader aborts on the first malformed record, unknown header, or
//! index/degree violation, reporting the offending line.

use filigree_geometry::curve::{Curve, CurveKind};
use filigree_geometry::point::world_point;
use filigree_geometry::surface::{Surface, SurfaceAlgorithm, SurfaceDomain, SurfaceKind};
use filigree_geometry::wireframe::{Face, Wireframe};

use crate::ObjError;

/// Parse a whole document into wireframes. Ids are assigned by position,
/// starting at zero.
pub fn read_str(input: &str) -> Result<Vec<Wireframe>, ObjError> {
    Parser::new(input).run()
}

/// Read and parse a file.
pub fn load_path(path: impl AsRef<std::path::Path>) -> Result<Vec<Wireframe>, ObjError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ObjError::Io {
        action: "read",
        path: path.display().to_string(),
        source,
    })?;
    read_str(&text)
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Parser<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    objects: Vec<Wireframe>,
    pending: PendingObject,
}

/// The object currently being assembled; flushed on the next `o`/`g` header
/// and at end of input.
#[derive(Default)]
struct PendingObject {
    name: Option<String>,
    header_line: usize,
    vertices: Vec<filigree_geometry::point::WorldPoint>,
    edges: Vec<(usize, usize)>,
    faces: Vec<Face>,
    curves: Vec<Curve>,
    surfaces: Vec<Surface>,
    pending_fill: Option<String>,
}

impl PendingObject {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.vertices.is_empty()
            && self.edges.is_empty()
            && self.faces.is_empty()
            && self.curves.is_empty()
            && self.surfaces.is_empty()
    }
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate(),
            objects: Vec::new(),
            pending: PendingObject::default(),
        }
    }

    fn run(mut self) -> Result<Vec<Wireframe>, ObjError> {
        while let Some((index, raw)) = self.lines.next() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let mut tokens = text.split_whitespace();
            let header = tokens.next().expect("non-empty line has a first token");
            let body: Vec<&str> = tokens.collect();

            match header {
                "o" | "g" => self.begin_object(line, text, &body)?,
                "v" => self.vertex(line, text, &body)?,
                "l" => self.polyline(line, text, &body)?,
                "usemtl" => self.fill_tag(line, text, &body)?,
                "f" => self.face(line, text, &body)?,
                "ctype" => self.curve_block(line, text, &body)?,
                "stype" => self.surface_block(line, text, &body)?,
                "parm" => {}
                other => {
                    return Err(malformed(line, text, format!("unknown record '{other}'")));
                }
            }
        }

        self.flush()?;
        Ok(self.objects)
    }

    /// Flush the pending object (if it has anything) and start a fresh one.
    fn begin_object(&mut self, line: usize, text: &str, body: &[&str]) -> Result<(), ObjError> {
        let name = *body
            .first()
            .ok_or_else(|| malformed(line, text, "missing object name".to_owned()))?;
        self.flush()?;
        self.pending.name = Some(name.to_owned());
        self.pending.header_line = line;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ObjError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.pending);

        let mut wireframe = Wireframe::new(
            self.objects.len() as u64,
            pending.name.unwrap_or_default(),
        );
        wireframe.vertices = pending.vertices;
        wireframe.edges = pending.edges;
        wireframe.faces = pending.faces;
        wireframe.curves = pending.curves;
        wireframe.surfaces = pending.surfaces;

        wireframe
            .validate_indices()
            .map_err(|error| ObjError::Constraint {
                line: pending.header_line.max(1),
                detail: format!("object '{}': {error}", wireframe.name),
            })?;

        self.objects.push(wireframe);
        Ok(())
    }

    fn vertex(&mut self, line: usize, text: &str, body: &[&str]) -> Result<(), ObjError> {
        if body.len() < 3 {
            return Err(malformed(line, text, "a vertex needs three coordinates".to_owned()));
        }
        let x = parse_real(body[0], line, text)?;
        let y = parse_real(body[1], line, text)?;
        let z = parse_real(body[2], line, text)?;
        self.pending.vertices.push(world_point(x, y, z));
        Ok(())
    }

    fn polyline(&mut self, line: usize, text: &str, body: &[&str]) -> Result<(), ObjError> {
        if body.len() < 2 {
            return Err(malformed(line, text, "a polyline needs at least two indices".to_owned()));
        }
        let indices = parse_indices(body, line, text)?;
        for pair in indices.windows(2) {
            self.pending.edges.push((pair[0], pair[1]));
        }
        Ok(())
    }

    fn fill_tag(&mut self, line: usize, text: &str, body: &[&str]) -> Result<(), ObjError> {
        let tag = *body
            .first()
            .ok_or_else(|| malformed(line, text, "missing material name".to_owned()))?;
        self.pending.pending_fill = Some(tag.to_owned());
        Ok(())
    }

    fn face(&mut self, line: usize, text: &str, body: &[&str]) -> Result<(), ObjError> {
        if body.len() < 3 {
            return Err(malformed(line, text, "a face needs at least three indices".to_owned()));
        }
        let indices = parse_indices(body, line, text)?;
        let fill = self.pending.pending_fill.take();
        self.pending.faces.push(Face::new(indices, fill));
        Ok(())
    }

    /// `ctype name`, then `deg d`, then `curv u0 u1 i1 ... ik`.
    fn curve_block(&mut self, line: usize, text: &str, body: &[&str]) -> Result<(), ObjError> {
        let kind_name = *body
            .first()
            .ok_or_else(|| malformed(line, text, "missing curve type".to_owned()))?;
        let kind = CurveKind::from_obj_name(kind_name)
            .ok_or_else(|| malformed(line, text, format!("unknown curve type '{kind_name}'")))?;

        let (deg_line, deg_text, deg_body) = self.block_line("deg", line)?;
        if deg_body.is_empty() {
            return Err(malformed(deg_line, &deg_text, "missing curve degree".to_owned()));
        }
        let degree = parse_count(&deg_body[0], deg_line, &deg_text)?;

        let (curv_line, curv_text, curv_body) = self.block_line("curv", line)?;
        if curv_body.len() < 2 {
            return Err(malformed(
                curv_line,
                &curv_text,
                "a curve record needs a parameter range".to_owned(),
            ));
        }
        let start = parse_real(&curv_body[0], curv_line, &curv_text)?;
        let end = parse_real(&curv_body[1], curv_line, &curv_text)?;
        let index_tokens: Vec<&str> = curv_body[2..].iter().map(String::as_str).collect();
        let control_points = parse_indices(&index_tokens, curv_line, &curv_text)?;

        if control_points.len() < degree {
            return Err(ObjError::Constraint {
                line: curv_line,
                detail: format!(
                    "curve of degree {degree} needs at least {degree} control points, got {}",
                    control_points.len()
                ),
            });
        }

        self.pending.curves.push(Curve {
            kind,
            control_points,
            start,
            end,
            degree,
        });
        Ok(())
    }

    /// `stype name [algorithm]`, then `deg du dv`, then
    /// `surf u0 u1 v0 v1 i1 ... i(du*dv)`.
    fn surface_block(&mut self, line: usize, text: &str, body: &[&str]) -> Result<(), ObjError> {
        let kind_name = *body
            .first()
            .ok_or_else(|| malformed(line, text, "missing surface type".to_owned()))?;
        let kind = SurfaceKind::from_obj_name(kind_name)
            .ok_or_else(|| malformed(line, text, format!("unknown surface type '{kind_name}'")))?;
        let algorithm = match body.get(1) {
            Some(name) => SurfaceAlgorithm::from_obj_name(name).ok_or_else(|| {
                malformed(line, text, format!("unknown surface algorithm '{name}'"))
            })?,
            None => SurfaceAlgorithm::ForwardDifferences,
        };

        let (deg_line, deg_text, deg_body) = self.block_line("deg", line)?;
        if deg_body.len() < 2 {
            return Err(malformed(
                deg_line,
                &deg_text,
                "a surface needs degrees in both directions".to_owned(),
            ));
        }
        let nu = parse_count(&deg_body[0], deg_line, &deg_text)?;
        let nv = parse_count(&deg_body[1], deg_line, &deg_text)?;

        let (surf_line, surf_text, surf_body) = self.block_line("surf", line)?;
        if surf_body.len() < 4 {
            return Err(malformed(
                surf_line,
                &surf_text,
                "a surface record needs u and v parameter ranges".to_owned(),
            ));
        }
        let domain = SurfaceDomain {
            start_u: parse_real(&surf_body[0], surf_line, &surf_text)?,
            end_u: parse_real(&surf_body[1], surf_line, &surf_text)?,
            start_v: parse_real(&surf_body[2], surf_line, &surf_text)?,
            end_v: parse_real(&surf_body[3], surf_line, &surf_text)?,
        };
        let index_tokens: Vec<&str> = surf_body[4..].iter().map(String::as_str).collect();
        let control_points = parse_indices(&index_tokens, surf_line, &surf_text)?;

        if control_points.len() != nu * nv {
            return Err(ObjError::Constraint {
                line: surf_line,
                detail: format!(
                    "a {nu}x{nv} surface needs exactly {} control points, got {}",
                    nu * nv,
                    control_points.len()
                ),
            });
        }

        let mut surface = Surface::new(kind, algorithm, control_points, (nu, nv));
        surface.domain = domain;
        self.pending.surfaces.push(surface);
        Ok(())
    }

    /// Fetch the next line of a curve/surface block and require its header.
    fn block_line(
        &mut self,
        expected: &str,
        opened_at: usize,
    ) -> Result<(usize, String, Vec<String>), ObjError> {
        let Some((index, raw)) = self.lines.next() else {
            return Err(ObjError::Constraint {
                line: opened_at,
                detail: format!("block ended before its '{expected}' record"),
            });
        };
        let line = index + 1;
        let text = raw.trim().to_owned();
        let mut tokens = text.split_whitespace();
        match tokens.next() {
            Some(header) if header == expected => {}
            _ => {
                return Err(malformed(
                    line,
                    &text,
                    format!("expected a '{expected}' record"),
                ));
            }
        }
        let body: Vec<String> = tokens.map(str::to_owned).collect();
        Ok((line, text, body))
    }
}

// ---------------------------------------------------------------------------
// Token helpers
// ---------------------------------------------------------------------------

fn malformed(line: usize, text: &str, detail: String) -> ObjError {
    ObjError::Malformed {
        line,
        text: text.to_owned(),
        detail,
    }
}

fn parse_real(token: &str, line: usize, text: &str) -> Result<f64, ObjError> {
    token
        .parse::<f64>()
        .map_err(|_| malformed(line, text, format!("malformed number '{token}'")))
}

fn parse_count(token: &str, line: usize, text: &str) -> Result<usize, ObjError> {
    token
        .parse::<usize>()
        .map_err(|_| malformed(line, text, format!("malformed integer '{token}'")))
}

/// Parse 1-based vertex indices into 0-based ones.
fn parse_indices(tokens: &[&str], line: usize, text: &str) -> Result<Vec<usize>, ObjError> {
    tokens
        .iter()
        .map(|token| {
            let index: usize = token
                .parse()
                .map_err(|_| malformed(line, text, format!("malformed index '{token}'")))?;
            index
                .checked_sub(1)
                .ok_or_else(|| malformed(line, text, "vertex indices are 1-based".to_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_vertices_edges_and_faces() {
        let source = "\
# a filled triangle
o tri
v 0 0 0
v 2 0 0
v 0 2 0
l 1 2
usemtl teal
f 1 2 3
";
        let objects = read_str(source).unwrap();
        assert_eq!(objects.len(), 1);
        let tri = &objects[0];
        assert_eq!(tri.id, 0);
        assert_eq!(tri.vertices.len(), 3);
        assert_eq!(tri.edges, vec![(0, 1)]);
        assert_eq!(tri.faces.len(), 1);
        assert_eq!(tri.faces[0].vertices, vec![0, 1, 2]);
        assert_eq!(tri.faces[0].fill.as_deref(), Some("teal"));
    }

    #[test]
    fn fill_tag_applies_to_the_next_face_only() {
        let source = "\
o two
v 0 0 0
v 1 0 0
v 0 1 0
usemtl red
f 1 2 3
f 1 2 3
";
        let objects = read_str(source).unwrap();
        assert_eq!(objects[0].faces[0].fill.as_deref(), Some("red"));
        assert_eq!(objects[0].faces[1].fill, None);
    }

    #[test]
    fn polyline_expands_to_consecutive_edges() {
        let source = "o path\nv 0 0 0\nv 1 0 0\nv 2 0 0\nl 1 2 3\n";
        let objects = read_str(source).unwrap();
        assert_eq!(objects[0].edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn multiple_objects_get_positional_ids() {
        let source = "o a\nv 0 0 0\no b\nv 1 1 1\ng c\nv 2 2 2\n";
        let objects = read_str(source).unwrap();
        let ids: Vec<u64> = objects.iter().map(|o| o.id).collect();
        let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn reads_a_curve_block() {
        let source = "\
o curve
v 0 0 0
v 0 1 0
v 1 1 0
v 1 0 0
ctype bspline
deg 4
curv 0 1 1 2 3 4
parm u 0 1
";
        let objects = read_str(source).unwrap();
        let curve = &objects[0].curves[0];
        assert_eq!(curve.kind, CurveKind::BSpline);
        assert_eq!(curve.degree, 4);
        assert_eq!(curve.control_points, vec![0, 1, 2, 3]);
        assert_eq!((curve.start, curve.end), (0.0, 1.0));
    }

    #[test]
    fn reads_a_surface_block_with_default_algorithm() {
        let mut source = String::from("o patch\n");
        for i in 0..16 {
            source.push_str(&format!("v {} {} 0\n", i % 4, i / 4));
        }
        source.push_str("stype bezier\ndeg 4 4\nsurf 0 1 0 1");
        for i in 1..=16 {
            source.push_str(&format!(" {i}"));
        }
        source.push('\n');

        let objects = read_str(&source).unwrap();
        let surface = &objects[0].surfaces[0];
        assert_eq!(surface.kind, SurfaceKind::Bezier);
        assert_eq!(surface.algorithm, SurfaceAlgorithm::ForwardDifferences);
        assert_eq!(surface.degrees, (4, 4));
        assert_eq!(surface.control_points.len(), 16);
    }

    #[test]
    fn malformed_number_reports_the_line() {
        let source = "o bad\nv 0 zero 0\n";
        match read_str(source) {
            Err(ObjError::Malformed { line, detail, .. }) => {
                assert_eq!(line, 2);
                assert!(detail.contains("zero"));
            }
            other => panic!("expected a malformed error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_curve_type_is_rejected() {
        let source = "o bad\nv 0 0 0\nctype nurbs\ndeg 4\ncurv 0 1 1 1 1 1\n";
        assert!(matches!(
            read_str(source),
            Err(ObjError::Malformed { line: 3, .. })
        ));
    }

    #[test]
    fn out_of_range_index_is_rejected_at_flush() {
        let source = "o bad\nv 0 0 0\nl 1 4\n";
        match read_str(source) {
            Err(ObjError::Constraint { detail, .. }) => {
                assert!(detail.contains("out of range"), "{detail}");
            }
            other => panic!("expected a constraint error, got {other:?}"),
        }
    }

    #[test]
    fn surface_control_count_must_match_degrees() {
        let source = "o bad\nv 0 0 0\nstype bezier\ndeg 4 4\nsurf 0 1 0 1 1 1 1\n";
        assert!(matches!(read_str(source), Err(ObjError::Constraint { .. })));
    }

    #[test]
    fn headerless_content_forms_an_unnamed_object() {
        let source = "v 1 2 3\n";
        let objects = read_str(source).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "");
        assert_eq!(objects[0].vertices.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_objects() {
        assert!(read_str("").unwrap().is_empty());
        assert!(read_str("# only comments\n\n").unwrap().is_empty());
    }
}
