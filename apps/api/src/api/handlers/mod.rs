// HTTP handlers grouped by resource

pub mod auth;
pub mod contact;
pub mod enhanced_projects;
pub mod meta;
pub mod profile;
pub mod projects;
pub mod ui_effects;

use std::str::FromStr;

use crate::api::errors::ApiError;
use crate::domain::errors::FieldError;

/// Parses an optional enum filter from the query string
///
/// Empty values and `all` mean "no filter".
pub(crate) fn parse_filter<T>(field: &str, value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = String>,
{
    match value.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|message| ApiError::validation(vec![FieldError::new(field, message)])),
    }
}

/// Trims a free-text query value, dropping it when blank
pub(crate) fn search_term(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
