//! Filigree OBJ -- text codec for the Wavefront-derived object format.
//!
//! One file holds many wireframes. The format is line-oriented: `o`/`g`
//! headers open a new object, `v`/`l`/`f`/`usemtl` records populate it, and
//! `ctype`/`stype` open multi-line curve and surface blocks. See
//! [`reader`] for the accepted grammar and [`writer`] for the emitted shape.
//!
//! # Quick Start
//!
//! ```
//! let source = "\
//! o square
//! v 0 0 0
//! v 1 0 0
//! v 1 1 0
//! v 0 1 0
//! l 1 2 3 4 1
//! ";
//!
//! let objects = filigree_obj::read_str(source).unwrap();
//! assert_eq!(objects.len(), 1);
//! assert_eq!(objects[0].name, "square");
//! assert_eq!(objects[0].edges.len(), 4);
//!
//! let round_trip = filigree_obj::write_str(&objects);
//! assert_eq!(filigree_obj::read_str(&round_trip).unwrap(), objects);
//! ```

#![deny(unsafe_code)]

pub mod reader;
pub mod writer;

pub use reader::{load_path, read_str};
pub use writer::{save_path, write_str};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while reading or writing object files.
///
/// Reading aborts on the first error; the variants carry the 1-based line
/// number and enough of the offending text to act on.
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    /// Unparseable record: unknown header, wrong arity, malformed number.
    #[error("line {line}: {detail} in '{text}'")]
    Malformed {
        line: usize,
        text: String,
        detail: String,
    },

    /// A well-formed record that violates an index or degree constraint.
    #[error("line {line}: {detail}")]
    Constraint { line: usize, detail: String },

    /// Filesystem failure around a load or save.
    #[error("failed to {action} '{path}': {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}
