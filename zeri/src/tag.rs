//! Tag strings such as `primaryKey;column:user_id`.
//!
//! Field metadata is declared up front through [`Tagged`] and parsed once
//! into a [`TagSchema`]; nothing is discovered at runtime.

use std::collections::BTreeMap;

/// Upper-cased tag key -> value
pub type TagSettings = BTreeMap<String, String>;

/// Parses `key:value` pairs separated by `separator`.
///
/// A trailing `\` on a part escapes the separator. Keys are trimmed and
/// upper-cased, values trimmed; a missing or empty value defaults to the
/// key. Parts with an empty key are dropped. An empty separator leaves the
/// input as a single part.
pub fn parse_tag(input: &str, separator: &str) -> TagSettings {
	let mut settings = TagSettings::new();
	for part in split_escaped(input, separator) {
		let (key, value) = extract_key_value(&part);
		if !key.is_empty() {
			settings.insert(key, value);
		}
	}
	settings
}

fn split_escaped(input: &str, separator: &str) -> Vec<String> {
	if separator.is_empty() {
		return vec![input.to_string()];
	}

	let parts: Vec<&str> = input.split(separator).collect();
	let mut result = Vec::with_capacity(parts.len());
	let mut i = 0;
	while i < parts.len() {
		let mut current = parts[i].to_string();
		while current.ends_with('\\') && i + 1 < parts.len() {
			current.pop();
			current.push_str(separator);
			current.push_str(parts[i + 1]);
			i += 1;
		}
		result.push(current);
		i += 1;
	}
	result
}

fn extract_key_value(part: &str) -> (String, String) {
	let (key, value) = match part.split_once(':') {
		Some((key, value)) => (key, value.trim()),
		None => (part, ""),
	};
	let key = key.trim().to_uppercase();
	let value = if value.is_empty() { key.clone() } else { value.to_string() };
	(key, value)
}

/// Parsed tags of every declared field, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSchema {
	fields: Vec<(&'static str, TagSettings)>,
}

impl TagSchema {
	pub fn new(field_tags: &[(&'static str, &'static str)], separator: &str) -> Self {
		let fields = field_tags.iter().map(|(field, tag)| (*field, parse_tag(tag, separator))).collect();
		Self { fields }
	}

	pub fn settings(&self, field: &str) -> Option<&TagSettings> {
		self.fields.iter().find(|(name, _)| *name == field).map(|(_, settings)| settings)
	}

	pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.fields.iter().map(|(name, _)| *name)
	}

	/// First field whose tag carries `key` (matched case-insensitively).
	pub fn field_with(&self, key: &str) -> Option<&'static str> {
		let key = key.trim().to_uppercase();
		self.fields.iter().find(|(_, settings)| settings.contains_key(&key)).map(|(name, _)| *name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &TagSettings)> + '_ {
		self.fields.iter().map(|(name, settings)| (*name, settings))
	}
}

/// A type that declares raw tag strings for its fields.
///
/// ```
/// use zeri::tag::Tagged;
///
/// struct User {
/// 	name: String,
/// }
///
/// impl Tagged for User {
/// 	fn field_tags() -> &'static [(&'static str, &'static str)] {
/// 		&[("name", "primaryKey;column:user_id")]
/// 	}
/// }
///
/// let schema = User::tag_schema(";");
/// assert_eq!(schema.field_with("primaryKey"), Some("name"));
/// ```
pub trait Tagged {
	fn field_tags() -> &'static [(&'static str, &'static str)];

	fn tag_schema(separator: &str) -> TagSchema
	where
		Self: Sized,
	{
		TagSchema::new(Self::field_tags(), separator)
	}
}
