// Merge class-name fragments into one string. Absent and blank fragments
// are skipped; the rest are trimmed and joined with single spaces.
pub fn cn<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    fragments
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
