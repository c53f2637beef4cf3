//! Text rendering utilities for type names and error messages.
//!
//! `std::any::type_name` produces fully qualified paths such as
//! `my_app::db::Database` or `alloc::sync::Arc<dyn my_app::Logger>`.
//! These helpers turn them into something a human can match by eye,
//! and into the *bare names* the container indexes types by.

/// Leading indirection markers, checked in order (`&mut ` before `&`).
const INDIRECTIONS: [&str; 4] = ["&mut ", "&", "*const ", "*mut "];

/// Smart pointers that count as one level of indirection.
const POINTER_WRAPPERS: [&str; 3] = ["Arc<", "Box<", "Rc<"];

/// Shortens a fully qualified type name for display.
///
/// Every path segment is reduced to its last component; generics,
/// tuples, slices and references keep their shape.
///
/// ```
/// use wirebox_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("my_app::services::UserService"), "UserService");
/// assert_eq!(
///     shorten_type_name("alloc::sync::Arc<dyn my_app::traits::Logger>"),
///     "Arc<dyn Logger>"
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let bytes = full_name.as_bytes();
    let mut result = String::with_capacity(full_name.len());
    let mut segment_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b':' if bytes.get(i + 1) == Some(&b':') => {
                // drop the path prefix accumulated so far
                i += 2;
                segment_start = i;
                continue;
            }
            b'<' | b'>' | b',' | b' ' | b'(' | b')' | b'[' | b']' | b';' | b'&' | b'*' => {
                result.push_str(&full_name[segment_start..i]);
                result.push(bytes[i] as char);
                segment_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    result.push_str(&full_name[segment_start..]);
    result
}

/// Computes the bare name of a type.
///
/// The namespace qualification is removed from every path segment and one
/// leading level of indirection is stripped: a reference or raw pointer
/// marker, or else a single `Arc`/`Box`/`Rc` wrapper.
///
/// ```
/// use wirebox_support::rendering::bare_type_name;
///
/// assert_eq!(bare_type_name("my_app::db::Database"), "Database");
/// assert_eq!(bare_type_name("&my_app::db::Database"), "Database");
/// assert_eq!(bare_type_name("alloc::sync::Arc<my_app::db::Database>"), "Database");
/// ```
pub fn bare_type_name(full_name: &str) -> String {
    let short = shorten_type_name(full_name.trim());
    strip_indirection(&short).to_string()
}

fn strip_indirection(name: &str) -> &str {
    for marker in INDIRECTIONS {
        if let Some(rest) = name.strip_prefix(marker) {
            return rest;
        }
    }

    for wrapper in POINTER_WRAPPERS {
        if let Some(inner) = name.strip_prefix(wrapper).and_then(|rest| rest.strip_suffix('>')) {
            return inner;
        }
    }

    name
}

/// Generates "did you mean?" suggestions for a missing dependency.
///
/// Both the requested key and the candidates are compared by bare name,
/// case-insensitively. Substring matches rank highest, then candidates
/// sharing a prefix of at least three characters. Ties are ordered
/// alphabetically so the output is stable.
pub fn suggest_similar<'a>(
    requested: &str,
    available: impl IntoIterator<Item = &'a str>,
    max_suggestions: usize,
) -> Vec<String> {
    let wanted = bare_type_name(requested).to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &str)> = available
        .into_iter()
        .filter_map(|candidate| {
            let bare = bare_type_name(candidate).to_lowercase();
            if bare.is_empty() {
                return None;
            }

            if bare.contains(&wanted) || wanted.contains(&bare) {
                return Some((100, candidate));
            }

            let common = bare
                .chars()
                .zip(wanted.chars())
                .take_while(|(a, b)| a == b)
                .count();

            (common >= 3).then(|| ((common * 10).min(99), candidate))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(_, name)| name.to_string())
        .collect()
}
