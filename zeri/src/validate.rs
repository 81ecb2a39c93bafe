use {
	crate::{
		consts::{FIELD_TAG_SEPARATOR, PRIMARY_KEY_TAG},
		tag::Tagged,
	},
	serde_json::{Map, Value},
	std::collections::{BTreeMap, HashMap, HashSet},
	thiserror::Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidateError {
	#[error("no primary key found")]
	NoPrimaryKey,

	#[error("primary key cannot be zero")]
	ZeroPrimaryKey,
}

/// Whether a value is its type's "empty" value.
pub trait Zero {
	fn is_zero(&self) -> bool;
}

macro_rules! impl_zero_for_numbers {
	($($ty:ty),* $(,)?) => {
		$(
			impl Zero for $ty {
				fn is_zero(&self) -> bool {
					*self == 0 as $ty
				}
			}
		)*
	};
}

impl_zero_for_numbers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Zero for bool {
	fn is_zero(&self) -> bool {
		!*self
	}
}

impl Zero for char {
	fn is_zero(&self) -> bool {
		*self == '\0'
	}
}

impl Zero for str {
	fn is_zero(&self) -> bool {
		self.is_empty()
	}
}

impl Zero for String {
	fn is_zero(&self) -> bool {
		self.is_empty()
	}
}

impl<T> Zero for [T] {
	fn is_zero(&self) -> bool {
		self.is_empty()
	}
}

impl<T, const N: usize> Zero for [T; N] {
	fn is_zero(&self) -> bool {
		N == 0
	}
}

impl<T> Zero for Vec<T> {
	fn is_zero(&self) -> bool {
		self.is_empty()
	}
}

impl<T> Zero for Option<T> {
	fn is_zero(&self) -> bool {
		self.is_none()
	}
}

impl<K, V, S> Zero for HashMap<K, V, S> {
	fn is_zero(&self) -> bool {
		self.is_empty()
	}
}

impl<K, V> Zero for BTreeMap<K, V> {
	fn is_zero(&self) -> bool {
		self.is_empty()
	}
}

impl<T: Zero + ?Sized> Zero for &T {
	fn is_zero(&self) -> bool {
		(**self).is_zero()
	}
}

/// Null, false, 0, "" and [] are zero. Objects never are, even when empty.
impl Zero for Value {
	fn is_zero(&self) -> bool {
		match self {
			Value::Null => true,
			Value::Bool(b) => !b,
			Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
			Value::String(s) => s.is_empty(),
			Value::Array(items) => items.is_empty(),
			Value::Object(_) => false,
		}
	}
}

/// A tagged type that exposes its field values for zero checks.
pub trait Entity: Tagged {
	fn field(&self, name: &str) -> Option<&dyn Zero>;
}

/// The first field tagged `primaryKey` (`;`-separated tags) must be non-zero.
pub fn check_primary_key<T: Entity>(entity: &T) -> Result<(), ValidateError> {
	let schema = T::tag_schema(FIELD_TAG_SEPARATOR);
	let field = schema.field_with(PRIMARY_KEY_TAG).ok_or(ValidateError::NoPrimaryKey)?;
	match entity.field(field) {
		Some(value) if !value.is_zero() => Ok(()),
		_ => Err(ValidateError::ZeroPrimaryKey),
	}
}

/// Whether any entry outside `skip_keys` holds a non-zero value.
pub fn has_non_zero_excluding(map: &Map<String, Value>, skip_keys: &HashSet<&str>) -> bool {
	map.iter().any(|(key, value)| !skip_keys.contains(key.as_str()) && !value.is_zero())
}
