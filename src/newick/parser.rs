//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which offers methods
//! to parse files or single strings, as well as lazy parsing via a
//! [NewickIterator].

use crate::model::{BranchLength, Tree, TreeBuilder, VertexIndex};
use crate::newick::defs::{
    BRANCH_LENGTH_BYTES, DEFAULT_MAX_DEPTH, DEFAULT_NUM_VERTICES_GUESS, NEWICK_LABEL_DELIMITERS,
};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use tracing::debug;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for Newick trees with any number of children per
/// vertex, optional labels on all vertices and optional branch lengths.
///
/// # Configuration
/// * [`with_num_vertices(n)`](Self::with_num_vertices)
///     - Capacity hint for the vertex arena, otherwise it is learned from
///       the previously parsed tree.
/// * [`with_max_depth(d)`](Self::with_max_depth)
///     - Maximum parenthesis nesting, default [DEFAULT_MAX_DEPTH].
/// * [`with_comments(bool)`](Self::with_comments)
///     - Whether `[...]` comments are skipped (default) or rejected.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse single tree
/// * [`parse_all`](Self::parse_all) - Parse all trees eagerly
/// * [`into_iter`](Self::into_iter) - Parse trees lazily
///
/// # Example
/// ```
/// use phylowick::newick::NewickParser;
/// use phylowick::parser::ByteParser;
///
/// let input = "((A_meleagrides:1.0,A_vulturinum:1.0):0.5,(N_meleagris:1.0,G_plumifera:1.0):0.5);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let mut newick_parser = NewickParser::new();
///
/// let tree = newick_parser.parse_str(&mut byte_parser).unwrap();
/// assert_eq!(tree.leaf_count(), 4);
/// ```
#[derive(Debug)]
pub struct NewickParser {
    know_num_vertices: bool,
    num_vertices: usize,
    max_depth: usize,
    skip_comments: bool,
    tree_builder: TreeBuilder,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings:
    /// - Number of vertices is unknown (learned from each parsed tree)
    /// - Nesting limited to [DEFAULT_MAX_DEPTH]
    /// - Comments are skipped
    pub fn new() -> Self {
        Self {
            know_num_vertices: false,
            num_vertices: DEFAULT_NUM_VERTICES_GUESS,
            max_depth: DEFAULT_MAX_DEPTH,
            skip_comments: true,
            tree_builder: TreeBuilder::new(),
        }
    }

    /// Sets the expected number of vertices in each parsed tree.
    ///
    /// This allows pre-allocation of the arena.
    pub fn with_num_vertices(mut self, num_vertices: usize) -> Self {
        self.num_vertices = num_vertices;
        self.know_num_vertices = true;
        self
    }

    /// Sets the maximum parenthesis nesting accepted before failing.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Configures whether `[...]` comments are skipped (`true`) or treated
    /// as syntax errors (`false`).
    pub fn with_comments(mut self, skip_comments: bool) -> Self {
        self.skip_comments = skip_comments;
        self
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Consumes the parser and returns an iterator over trees from the byte source.
    ///
    /// # Arguments
    /// * `byte_parser` - A byte parser with underlying source containing only
    ///   Newick strings, except for whitespace and `[...]` comments.
    ///
    /// # Returns
    /// A [NewickIterator] allowing lazy parsing of trees.
    pub fn into_iter<B: ByteSource>(self, byte_parser: ByteParser<B>) -> NewickIterator<B> {
        NewickIterator {
            byte_parser,
            parser: self,
            done: false,
        }
    }

    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Returns
    /// * `Ok(Vec<Tree>)` - All parsed trees
    /// * `Err(ParsingError)` - If any tree fails to parse
    pub fn parse_all<B: ByteSource>(
        &mut self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<Tree>, ParsingError> {
        let mut trees = Vec::new();
        while self.has_next(&mut byte_parser)? {
            trees.push(self.parse_str(&mut byte_parser)?);
        }
        Ok(trees)
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// The tree is only built once the terminating `;` has been read.
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Tree, ParsingError> {
        self.parse_tree(parser)
            .map_err(|err| Self::prefer_io_error(parser, err))
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Skips whitespace and, if configured, comments.
    fn skip_ignorable<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<(), ParsingError> {
        if self.skip_comments {
            parser.skip_comment_and_whitespace()
        } else {
            parser.skip_whitespace();
            Ok(())
        }
    }

    /// Skips to the next tree; `false` at clean end of input.
    fn has_next<B: ByteSource>(&self, parser: &mut ByteParser<B>) -> Result<bool, ParsingError> {
        self.skip_ignorable(parser)
            .map_err(|err| Self::prefer_io_error(parser, err))?;
        if !parser.is_eof() {
            return Ok(true);
        }
        match parser.take_io_error() {
            Some(err) => Err(ParsingError::io(err, parser.position())),
            None => Ok(false),
        }
    }

    /// A reader failure surfaces as unexpected EOF; report the I/O error instead.
    fn prefer_io_error<B: ByteSource>(parser: &mut ByteParser<B>, err: ParsingError) -> ParsingError {
        match parser.take_io_error() {
            Some(io_err) => ParsingError::io(io_err, parser.position()),
            None => err,
        }
    }

    /// Parses `subtree ';'` and hands out the finished tree.
    fn parse_tree<B: ByteSource>(&mut self, parser: &mut ByteParser<B>) -> Result<Tree, ParsingError> {
        self.tree_builder.init_next(self.num_vertices);

        self.skip_ignorable(parser)?;
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(
                parser,
                "expected a tree".to_string(),
            ));
        }

        let root = self.parse_vertex(parser, 0)?;

        self.skip_ignorable(parser)?;
        if !parser.consume_if(b';') {
            return Err(Self::unexpected(parser, "';' at end of tree"));
        }

        let tree = self
            .tree_builder
            .finish_tree(root)
            .map_err(|e| ParsingError::invalid_newick_string(parser, e.to_string()))?;

        if !self.know_num_vertices {
            self.num_vertices = tree.arena_len();
        }
        debug!(
            vertices = tree.num_vertices(),
            leaves = tree.leaf_count(),
            "parsed newick tree"
        );

        Ok(tree)
    }

    /// Parses a vertex (either internal vertex or leaf) and returns its index:
    /// - `'(' vertex (',' vertex)* ')' [label] [':' length]`
    /// - `[label] [':' length]`
    fn parse_vertex<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        depth: usize,
    ) -> Result<VertexIndex, ParsingError> {
        self.skip_ignorable(parser)?;
        let children = if parser.peek_is(b'(') {
            if depth >= self.max_depth {
                return Err(ParsingError::nesting_too_deep(parser, self.max_depth));
            }
            self.parse_children(parser, depth)?
        } else {
            Vec::new()
        };

        self.skip_ignorable(parser)?;
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let branch_length = self.parse_branch_length(parser)?;

        Ok(self
            .tree_builder
            .add_internal(children, label, branch_length))
    }

    /// Parses `'(' vertex (',' vertex)* ')'` and returns the children in order.
    fn parse_children<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        depth: usize,
    ) -> Result<Vec<VertexIndex>, ParsingError> {
        parser.next_byte(); // '('

        let mut children = Vec::new();
        loop {
            children.push(self.parse_vertex(parser, depth + 1)?);

            self.skip_ignorable(parser)?;
            if parser.consume_if(b',') {
                continue;
            }
            if parser.consume_if(b')') {
                return Ok(children);
            }
            return Err(Self::unexpected(parser, "',' or ')' after child"));
        }
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a branch length and was able to parse it
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if it is not a finite number
    fn parse_branch_length<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        self.skip_ignorable(parser)?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        self.skip_ignorable(parser)?;

        let mut literal = String::new();
        while let Some(b) = parser.peek() {
            if !BRANCH_LENGTH_BYTES.contains(&b) {
                break;
            }
            literal.push(b as char);
            parser.next_byte();
        }

        match BranchLength::parse(&literal) {
            Some(length) => Ok(Some(length)),
            None => Err(ParsingError::invalid_branch_length(parser, literal)),
        }
    }

    /// Error for a missing token, distinguishing end of input.
    fn unexpected<B: ByteSource>(parser: &mut ByteParser<B>, expected: &str) -> ParsingError {
        match parser.peek() {
            None => ParsingError::unexpected_eof(parser, format!("expected {}", expected)),
            Some(b) => ParsingError::invalid_newick_string(
                parser,
                format!("Expected {} but found {:?}", expected, char::from(b)),
            ),
        }
    }
}

// =#========================================================================#=
// NEWICK ITERATOR (lazy parser)
// =#========================================================================$=
/// Iterator to parse Newick trees.
///
/// Created by [NewickParser::into_iter()].
/// Yields `Result<Tree, ParsingError>` for each tree. After the first error
/// the iterator is exhausted; there is no resynchronization.
///
/// After iteration, the underlying [NewickParser] can be retrieved
/// via [into_parser()](Self::into_parser).
pub struct NewickIterator<B: ByteSource> {
    parser: NewickParser,
    byte_parser: ByteParser<B>,
    done: bool,
}

impl<B: ByteSource> NewickIterator<B> {
    /// Consumes the iterator and returns the underlying [NewickParser].
    pub fn into_parser(self) -> NewickParser {
        self.parser
    }
}

impl<B: ByteSource> Iterator for NewickIterator<B> {
    type Item = Result<Tree, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next = match self.parser.has_next(&mut self.byte_parser) {
            Ok(true) => self.parser.parse_str(&mut self.byte_parser),
            Ok(false) => {
                self.done = true;
                return None;
            }
            Err(err) => Err(err),
        };

        if next.is_err() {
            self.done = true;
        }
        Some(next)
    }
}
