/// Minimal query-string access: `contrast=1.5&hue=30` style pairs, no
/// percent-decoding (the studio only sends numeric values).
pub fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then_some(v)
    })
}

/// Parses a float query parameter. A missing key yields the default; a
/// malformed value yields NaN so the color pipeline's finite-validation
/// rejects it downstream rather than silently substituting.
pub fn float_param(query: &str, key: &str, default: f64) -> f64 {
    match query_param(query, key) {
        None => default,
        Some(raw) => raw.parse::<f64>().unwrap_or(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_values_by_key() {
        assert_eq!(query_param("a=1&b=2", "b"), Some("2"));
        assert_eq!(query_param("a=1&b=2", "c"), None);
    }

    #[test]
    fn float_param_defaults_and_poisons() {
        assert_eq!(float_param("", "contrast", 1.0), 1.0);
        assert_eq!(float_param("contrast=2.5", "contrast", 1.0), 2.5);
        assert!(float_param("contrast=bogus", "contrast", 1.0).is_nan());
    }
}
