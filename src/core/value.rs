//! Log argument values
//!
//! Every argument of a log call is converted into a [`Value`] before it is
//! rendered. The structured shapes (`List`, `Tuple`, `Set`, `Map`) are the
//! only ones that get expanded into multi-line blocks; everything else is
//! printed inline.

use super::error::Result;
use super::render;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(String),
    /// Generic string conversion of a value with no structural shape
    Display(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    /// Entries in insertion order
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Whether this value is rendered as an expanded block
    #[inline]
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            Value::List(_) | Value::Tuple(_) | Value::Set(_) | Value::Map(_)
        )
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        !self.is_structured()
    }

    /// Wrap anything printable as an opaque scalar
    pub fn display(value: impl fmt::Display) -> Self {
        Value::Display(value.to_string())
    }

    /// Wrap a value through its `Debug` representation
    pub fn debug(value: impl fmt::Debug) -> Self {
        Value::Display(format!("{:?}", value))
    }

    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    /// Build a map keeping the iteration order of `entries`
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Convert any `Serialize` type through its JSON data model.
    ///
    /// Fails only when the type itself refuses to serialize.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    fn sorted_map(mut entries: Vec<(Value, Value)>) -> Self {
        entries.sort_by_cached_key(|(k, _)| render::inline(k));
        Value::Map(entries)
    }
}

/// The string form used when a value is printed as a plain message part.
///
/// Strings are printed without quotes; structured values use their compact
/// inline representation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) | Value::Display(s) => f.write_str(s),
            other => f.write_str(&render::inline(other)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i as i128)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::list(items.iter().cloned())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>, S> From<HashSet<T, S>> for Value {
    fn from(items: HashSet<T, S>) -> Self {
        Value::set(items)
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(items: BTreeSet<T>) -> Self {
        Value::set(items)
    }
}

impl<K: Into<Value>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(entries: HashMap<K, V, S>) -> Self {
        Value::sorted_map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(entries: BTreeMap<K, V>) -> Self {
        Value::map(entries)
    }
}

macro_rules! impl_from_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Value>),+> From<($($name,)+)> for Value {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Value::Tuple(vec![$($name.into()),+])
            }
        }
    };
}

impl_from_tuple!(A);
impl_from_tuple!(A, B);
impl_from_tuple!(A, B, C);
impl_from_tuple!(A, B, C, D);
impl_from_tuple!(A, B, C, D, E);

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i as i128)
                } else if let Some(u) = n.as_u64() {
                    Value::Int(u as i128)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(entries) => Value::map(entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_shapes() {
        assert!(Value::from(vec![1, 2]).is_structured());
        assert!(Value::from((1, "a")).is_structured());
        assert!(Value::from(BTreeSet::from([1])).is_structured());
        assert!(Value::from(BTreeMap::from([("a", 1)])).is_structured());
    }

    #[test]
    fn test_scalars_are_not_structured() {
        for value in [
            Value::Null,
            Value::from(true),
            Value::from(3),
            Value::from(2.5),
            Value::from("text"),
            Value::display(std::net::Ipv4Addr::LOCALHOST),
        ] {
            assert!(value.is_scalar(), "{:?}", value);
        }
    }

    #[test]
    fn test_hash_map_is_sorted() {
        let mut map = HashMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        map.insert("mid", 3);

        let Value::Map(entries) = Value::from(map) else {
            panic!("expected a map");
        };
        let keys: Vec<String> = entries.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({"a": 1, "b": [true, null], "c": 1.5}));
        assert_eq!(
            value,
            Value::map([
                ("a", Value::Int(1)),
                ("b", Value::List(vec![Value::Bool(true), Value::Null])),
                ("c", Value::Float(1.5)),
            ])
        );
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct User {
            name: &'static str,
            age: u32,
        }

        let value = Value::from_serialize(&User { name: "kim", age: 30 }).unwrap();
        assert!(value.is_structured());
        assert_eq!(value.to_string(), r#"{"age": 30, "name": "kim"}"#);
    }

    #[test]
    fn test_display_is_unquoted_for_strings() {
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(None::<i32>).to_string(), "null");
        assert_eq!(Value::from(vec!["a"]).to_string(), r#"["a"]"#);
    }
}
