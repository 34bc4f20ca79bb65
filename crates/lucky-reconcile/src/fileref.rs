//! # File-Reference Expressions
//!
//! Two tiny grammars used by the documentation registry:
//!
//! - **Emission**: `${file(<path>)}` — the `schemaReference` written into a
//!   model entry, pointing at a generated artifact relative to the project
//!   root.
//! - **Extraction**: a `documentation` string such as
//!   `${file(docs/models.yml):documentation}` or a bare `(docs/models.yml)`
//!   pointer, from which the external registry path is the text between
//!   the first `(` and the matching `)`.
//!
//! The extraction side is a typed parser with a defined error when the
//! pattern is absent, not an ad-hoc regex.

use thiserror::Error;

/// A documentation string that does not contain a usable file pointer.
#[derive(Error, Debug, PartialEq)]
pub enum FileRefError {
    /// No `(` / `)` pair was found.
    #[error("no '(<path>)' pointer in documentation reference '{text}'")]
    MissingPointer {
        /// The documentation string that was inspected.
        text: String,
    },

    /// The `(` / `)` pair encloses nothing.
    #[error("empty file pointer in documentation reference '{text}'")]
    EmptyPointer {
        /// The documentation string that was inspected.
        text: String,
    },
}

/// Render the `schemaReference` expression for a generated artifact.
///
/// `relative_path` is the artifact's path relative to the project root,
/// forward-slash separated.
pub fn file_ref(relative_path: &str) -> String {
    format!("${{file({relative_path})}}")
}

/// Extract the external registry path from a documentation string.
///
/// Accepts any string containing a parenthesized path — the canonical
/// `${file(docs/models.yml):documentation}` form as well as a bare
/// `(docs/models.yml)` pointer.
///
/// # Errors
///
/// Returns [`FileRefError`] when no parenthesized path is present or the
/// parentheses enclose nothing.
pub fn parse_doc_pointer(text: &str) -> Result<&str, FileRefError> {
    let open = text.find('(').ok_or_else(|| FileRefError::MissingPointer {
        text: text.to_string(),
    })?;
    let rest = &text[open + 1..];
    let close = rest.find(')').ok_or_else(|| FileRefError::MissingPointer {
        text: text.to_string(),
    })?;
    let path = rest[..close].trim();
    if path.is_empty() {
        return Err(FileRefError::EmptyPointer { text: text.to_string() });
    }
    Ok(path)
}
