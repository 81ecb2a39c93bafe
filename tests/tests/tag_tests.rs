use zeri::tag::{TagSchema, TagSettings, Tagged, parse_tag};

fn settings(pairs: &[(&str, &str)]) -> TagSettings {
	pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_parse_key_value_pairs() {
	let parsed = parse_tag("primaryKey;column:user_id", ";");
	assert_eq!(parsed, settings(&[("PRIMARYKEY", "PRIMARYKEY"), ("COLUMN", "user_id")]));
}

#[test]
fn test_keys_upper_cased_and_trimmed() {
	let parsed = parse_tag(" column : email ; not null ", ";");
	assert_eq!(parsed, settings(&[("COLUMN", "email"), ("NOT NULL", "NOT NULL")]));
}

#[test]
fn test_empty_value_defaults_to_key() {
	let parsed = parse_tag("unique:;index", ";");
	assert_eq!(parsed.get("UNIQUE").map(String::as_str), Some("UNIQUE"));
	assert_eq!(parsed.get("INDEX").map(String::as_str), Some("INDEX"));
}

#[test]
fn test_value_keeps_further_colons() {
	let parsed = parse_tag("default:now():utc", ";");
	assert_eq!(parsed.get("DEFAULT").map(String::as_str), Some("now():utc"));
}

#[test]
fn test_escaped_separator_joins_parts() {
	let parsed = parse_tag(r"check:a\;b;column:c", ";");
	assert_eq!(parsed, settings(&[("CHECK", "a;b"), ("COLUMN", "c")]));

	// several escapes in a row
	let parsed = parse_tag(r"check:a\;b\;c", ";");
	assert_eq!(parsed.get("CHECK").map(String::as_str), Some("a;b;c"));
}

#[test]
fn test_trailing_escape_without_next_part_is_kept() {
	let parsed = parse_tag(r"column:path\", ";");
	assert_eq!(parsed.get("COLUMN").map(String::as_str), Some(r"path\"));
}

#[test]
fn test_empty_keys_are_skipped() {
	assert!(parse_tag("", ";").is_empty());
	assert_eq!(parse_tag(";;column:id;", ";"), settings(&[("COLUMN", "id")]));
	assert!(parse_tag(":value", ";").is_empty());
}

#[test]
fn test_custom_and_empty_separator() {
	assert_eq!(parse_tag("a:1,b:2", ","), settings(&[("A", "1"), ("B", "2")]));
	assert_eq!(parse_tag("a:1,b:2", ""), settings(&[("A", "1,b:2")]));
}

#[test]
fn test_later_duplicate_key_wins() {
	assert_eq!(parse_tag("column:a;COLUMN:b", ";"), settings(&[("COLUMN", "b")]));
}

struct Entity;

impl Tagged for Entity {
	fn field_tags() -> &'static [(&'static str, &'static str)] {
		&[("name", "primaryKey;column:user_id"), ("age", "column:age"), ("email", "column:email")]
	}
}

#[test]
fn test_schema_from_declared_tags() {
	let schema = Entity::tag_schema(";");
	assert_eq!(schema.fields().collect::<Vec<_>>(), vec!["name", "age", "email"]);
	assert_eq!(schema.settings("age"), Some(&settings(&[("COLUMN", "age")])));
	assert_eq!(schema.settings("missing"), None);
	assert_eq!(schema.field_with("primaryKey"), Some("name"));
	assert_eq!(schema.field_with(" column "), Some("name"));
	assert_eq!(schema.field_with("index"), None);
}

#[test]
fn test_schema_iterates_in_declaration_order() {
	let schema = TagSchema::new(&[("b", "x"), ("a", "y:1")], ";");
	let columns: Vec<_> = schema.iter().map(|(field, tags)| (field, tags.len())).collect();
	assert_eq!(columns, vec![("b", 1), ("a", 1)]);
}
