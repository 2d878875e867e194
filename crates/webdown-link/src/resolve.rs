//! Root-relative URL joining.

use std::borrow::Cow;

/// Join a root-relative URL (`/path`) onto `base_url`.
///
/// Runs after the engine's own resolution, so it only matters when that
/// left the leading `/` in place. One trailing slash of the base is dropped.
/// With an empty base the URL comes back unchanged. Any leading `/` counts,
/// so a protocol-relative `//host/path` left unresolved is prefixed as well.
pub fn resolve_url<'a>(assembled_url: &'a str, base_url: &str) -> Cow<'a, str> {
    if !assembled_url.starts_with('/') {
        return Cow::Borrowed(assembled_url);
    }

    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    Cow::Owned(format!("{base}{assembled_url}"))
}
