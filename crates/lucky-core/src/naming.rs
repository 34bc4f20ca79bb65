//! # Naming Helpers
//!
//! Documentation model names use camelCase regardless of how the function
//! was named in the project file (`create_user`, `create-user`,
//! `CreateUser` all become `createUser`).

/// Convert a declared function name to camelCase.
///
/// Splits on `-`, `_`, and whitespace; the first token keeps its body with
/// a lowercased first character, subsequent tokens are capitalized.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut first_token = true;
    for token in name.split(|c: char| c == '-' || c == '_' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let mut chars = token.chars();
        if let Some(head) = chars.next() {
            if first_token {
                out.extend(head.to_lowercase());
                first_token = false;
            } else {
                out.extend(head.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    out
}
