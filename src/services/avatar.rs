//! Presentation fields derived from a person's name at creation time.
use reqwest::Url;

/// Colors a student avatar may be rendered with.
pub const AVATAR_PALETTE: [&str; 4] = ["blue", "amber", "rose", "cyan"];

const AVATAR_SERVICE_URL: &str = "https://ui-avatars.com/api/";

/// First character of each name, in order. An empty name contributes nothing.
pub fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .next()
        .into_iter()
        .chain(last_name.chars().next())
        .collect()
}

/// Picks a palette color uniformly at random.
pub fn pick_color() -> &'static str {
    AVATAR_PALETTE[fastrand::usize(..AVATAR_PALETTE.len())]
}

/// Avatar image URL for a faculty member, rendered by the external avatar
/// service from the full name.
pub fn faculty_avatar_url(first_name: &str, last_name: &str) -> String {
    let full_name = format!("{first_name} {last_name}");
    match Url::parse_with_params(
        AVATAR_SERVICE_URL,
        &[("name", full_name.trim()), ("background", "random")],
    ) {
        Ok(url) => url.to_string(),
        // The base URL is a constant, so parsing cannot fail in practice
        Err(_) => format!("{AVATAR_SERVICE_URL}?background=random"),
    }
}
