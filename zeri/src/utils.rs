use {
	crate::validate::Zero,
	serde::de::DeserializeOwned,
	serde_json::{Map, Value},
	std::fmt::Display,
};

/// `value` unless it is zero, then `fallback`.
pub fn default_if_empty<T: Zero>(value: T, fallback: T) -> T {
	if value.is_zero() { fallback } else { value }
}

/// `""` when disabled, otherwise `key`.
pub fn optional_key(disabled: bool, key: &str) -> &str {
	if disabled { "" } else { key }
}

/// Reads `key` from a JSON object as `T`.
///
/// Falls back to `default` when the key is missing, when the value does not
/// deserialize into `T`, or, with `check_zero`, when the value is zero.
pub fn get_or_default<T: DeserializeOwned>(src: &Map<String, Value>, key: &str, default: T, check_zero: bool) -> T {
	match src.get(key) {
		Some(value) if !(check_zero && value.is_zero()) => serde_json::from_value(value.clone()).unwrap_or(default),
		_ => default,
	}
}

/// Joins the `Display` form of each item with `delim`.
pub fn join<T: Display>(items: &[T], delim: &str) -> String {
	items.iter().map(ToString::to_string).collect::<Vec<_>>().join(delim)
}
