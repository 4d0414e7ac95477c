use regex::Regex;

use crate::error::PokedexError;
use crate::filter::ALL_CATEGORIES;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit. Unlike identifiers, an empty result is allowed:
/// an empty search means "no search".
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, PokedexError> {
    if input.len() > max_len {
        return Err(PokedexError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    Ok(input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string())
}

/// Validate search box input: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, PokedexError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a Pokémon name or dex number as used in `/pokemon/{name}`.
/// Returns the lowercased identifier the API expects.
pub fn validate_identifier(input: &str) -> Result<String, PokedexError> {
    let lower = input.trim().to_lowercase();
    if lower.is_empty() {
        return Err(PokedexError::InvalidInput(
            "Pokémon name is empty".to_string(),
        ));
    }
    if lower.len() > MAX_IDENTIFIER_LENGTH {
        return Err(PokedexError::InvalidInput(format!(
            "Pokémon name exceeds maximum length of {} bytes",
            MAX_IDENTIFIER_LENGTH
        )));
    }
    let re = Regex::new(r"^[a-z0-9][a-z0-9-]*$")
        .map_err(|e| PokedexError::InvalidInput(format!("regex compile error: {}", e)))?;
    if !re.is_match(&lower) {
        return Err(PokedexError::InvalidInput(format!(
            "'{}' is not a valid Pokémon name or number",
            input.trim()
        )));
    }
    Ok(lower)
}

/// Validate a category against the selector's options (which include "all").
pub fn validate_category(input: &str, options: &[String]) -> Result<String, PokedexError> {
    let lower = input.trim().to_lowercase();
    if lower.is_empty() || lower == ALL_CATEGORIES {
        return Ok(ALL_CATEGORIES.to_string());
    }
    if options.iter().any(|o| *o == lower) {
        Ok(lower)
    } else {
        Err(PokedexError::InvalidInput(format!(
            "unknown type '{}'. Valid values: {}",
            input.trim(),
            options.join(", ")
        )))
    }
}
