//! Newick serialization of trees.
//!
//! Buffered ([Tree::to_newick], [Display](std::fmt::Display)) and streaming
//! ([Tree::write_newick], [write_newick_file]) output share one iterative
//! emitter, so they produce identical bytes and handle arbitrarily deep
//! trees.

use crate::model::{Tree, Vertex, VertexIndex};
use crate::parser::utils::quote_label;
use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Writes given list of trees to a file in Newick format, one tree per line.
///
/// # Arguments
/// * `path` - The file to create (or truncate)
/// * `trees` - Trees to write
///
/// # Errors
/// Returns an I/O error if creating or writing the file fails.
///
/// # Example
/// ```no_run
/// use phylowick::newick::{parse_str, write_newick_file};
///
/// let tree = parse_str("(Kiwi,(Emu,Cassowary));")?;
/// write_newick_file("ratites.nwk", &[tree])?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_newick_file<P: AsRef<Path>>(path: P, trees: &[Tree]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for tree in trees {
        tree.write_newick(&mut writer)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

// ============================================================================
// Tree output (pub)
// ============================================================================
impl Tree {
    /// Returns the Newick representation of this tree with closing semicolon.
    ///
    /// Labels are single-quoted where needed. Branch lengths use the
    /// shortest representation that reads back to the same value, so
    /// `1.0` is written as `1`. The root's length is written if present.
    ///
    /// # Example
    /// ```
    /// use phylowick::parse_newick_str;
    ///
    /// let tree = parse_newick_str("(('Little Spotted Kiwi':1.0, Tokoeka:1.0)x:0.50,Rowi:1.5);").unwrap();
    /// assert_eq!(tree.to_newick(), "(('Little Spotted Kiwi':1,Tokoeka:1)x:0.5,Rowi:1.5);");
    /// ```
    pub fn to_newick(&self) -> String {
        let mut newick = String::with_capacity(estimate_newick_len(self));
        // Writing to a String cannot fail
        let _ = emit(self, &mut newick);
        newick
    }

    /// Streams the Newick representation of this tree into `writer`.
    ///
    /// Produces exactly the bytes of [to_newick](Self::to_newick) without
    /// building the string first.
    ///
    /// # Errors
    /// Returns the first I/O error of `writer`.
    pub fn write_newick<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let mut adapter = IoAdapter {
            inner: &mut writer,
            error: None,
        };
        match emit(self, &mut adapter) {
            Ok(()) => Ok(()),
            Err(fmt::Error) => Err(adapter
                .error
                .unwrap_or_else(|| io::Error::other("formatting failed"))),
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        emit(self, f)
    }
}

// ============================================================================
// Emitter
// ============================================================================
enum Step {
    Open(VertexIndex),
    Separator,
    Close(VertexIndex),
}

/// Writes `tree` with an explicit stack instead of recursion.
fn emit<W: fmt::Write>(tree: &Tree, out: &mut W) -> fmt::Result {
    let mut stack = vec![Step::Open(tree.root_index())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Open(index) => {
                let vertex = &tree[index];
                if vertex.is_leaf() {
                    emit_label_and_length(vertex, out)?;
                    continue;
                }
                out.write_char('(')?;
                stack.push(Step::Close(index));
                for (position, &child) in vertex.children().iter().enumerate().rev() {
                    stack.push(Step::Open(child));
                    if position > 0 {
                        stack.push(Step::Separator);
                    }
                }
            }
            Step::Separator => out.write_char(',')?,
            Step::Close(index) => {
                out.write_char(')')?;
                emit_label_and_length(&tree[index], out)?;
            }
        }
    }

    out.write_char(';')
}

fn emit_label_and_length<W: fmt::Write>(vertex: &Vertex, out: &mut W) -> fmt::Result {
    out.write_str(&quote_label(vertex.label()))?;
    if let Some(length) = vertex.branch_length() {
        write!(out, ":{}", length)?;
    }
    Ok(())
}

/// Forwards formatted output to an [io::Write], keeping the I/O error.
struct IoAdapter<'a, W: Write> {
    inner: &'a mut W,
    error: Option<io::Error>,
}

impl<W: Write> fmt::Write for IoAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

/// Estimates the length of the Newick string of `tree`, used to
/// pre-allocate the output.
fn estimate_newick_len(tree: &Tree) -> usize {
    // "(", ")" and "," per internal vertex, roughly
    const INTERNAL_VERTEX_CHARS: usize = 3;
    // e.g. ":0.009529961339106089"
    const BRANCH_LENGTH_CHARS: usize = 20;

    tree.nodes()
        .map(|v| {
            let structure = if v.is_leaf() { 0 } else { INTERNAL_VERTEX_CHARS };
            let length = if v.has_branch_length() { BRANCH_LENGTH_CHARS } else { 0 };
            structure + v.label().len() + length
        })
        .sum::<usize>()
        + BUFFER_CHARS
}
