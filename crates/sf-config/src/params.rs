//! Flat parameter maps.
//!
//! Configuration loading itself lives outside this crate; requests arrive as
//! a flat key -> value map per controller instantiation.

use std::collections::BTreeMap;

/// Flat parameter map for one controller instantiation request.
pub type ParamMap = BTreeMap<String, f64>;

/// Look up a parameter, falling back to the variant default.
pub fn get_or(params: &ParamMap, key: &str, default: f64) -> f64 {
    params.get(key).copied().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_falls_back() {
        let mut params = ParamMap::new();
        params.insert("max_force".to_string(), 100.0);
        assert_eq!(get_or(&params, "max_force", 150.0), 100.0);
        assert_eq!(get_or(&params, "boundary_layer", 0.05), 0.05);
    }
}
