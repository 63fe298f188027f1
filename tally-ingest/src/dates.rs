//! Statement date rewriting.

/// Rewrite a statement date from `MM/DD/YYYY` to `YYYY-MM-DD`.
///
/// This is positional only: the parts are not checked against a calendar, so
/// `13/45/2021` becomes `2021-13-45`. Text that does not split into exactly
/// three `/`-separated parts is returned unchanged.
pub fn normalize_statement_date(date: &str) -> String {
    let mut it = date.split('/');
    match (it.next(), it.next(), it.next(), it.next()) {
        (Some(month), Some(day), Some(year), None) => format!("{year}-{month}-{day}"),
        _ => date.to_string(),
    }
}
