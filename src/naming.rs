use uuid::Uuid;

/// Extension of a client supplied filename, dot included.
///
/// Only the last `/`-separated segment is considered. Names without a dot,
/// dotfiles such as `.env`, and `..` have no extension. Anything after the
/// last dot is returned untouched.
pub fn extension(original: &str) -> &str {
    let part = original.rsplit('/').next().unwrap_or(original);

    match part.rfind('.') {
        None | Some(0) => "",
        Some(_) if part == ".." => "",
        Some(idx) => &part[idx..],
    }
}

/// Name a stored upload: random v4 uuid followed by the original extension.
pub fn stored_name(original: &str) -> String {
    format!("{}{}", Uuid::new_v4(), extension(original))
}
