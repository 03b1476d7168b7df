//! Utility functions for quoting labels when writing Newick strings.

use std::borrow::Cow;

/// Returns whether a label has to be single-quoted to survive a Newick round trip.
///
/// That is the case if it contains whitespace or any of `()[]',:;`.
///
/// # Examples
/// ```
/// # use phylowick::parser::utils::needs_quoting;
/// assert!(!needs_quoting("Pukeko"));
/// assert!(needs_quoting("Pu[ke]ko"));
/// assert!(needs_quoting("Australasian Swamphen"));
/// assert!(needs_quoting("Baillon's_Crake"));
/// assert!(!needs_quoting(""));
/// ```
pub fn needs_quoting(label: &str) -> bool {
    label.chars().any(|c| {
        c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | '\'' | ',' | ':' | ';')
    })
}

/// Quotes a label for Newick output if necessary.
///
/// Labels that need it are wrapped in single quotes with internal single
/// quotes doubled. All other labels are returned verbatim.
///
/// # Examples
/// ```
/// # use phylowick::parser::utils::quote_label;
/// assert_eq!(quote_label("Pukeko"), "Pukeko");
/// assert_eq!(quote_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(quote_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn quote_label(label: &str) -> Cow<'_, str> {
    if needs_quoting(label) {
        Cow::Owned(format!("'{}'", label.replace('\'', "''")))
    } else {
        Cow::Borrowed(label)
    }
}
