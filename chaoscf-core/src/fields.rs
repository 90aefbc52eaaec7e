//! Moving typed fields in and out of a raw JSON object.
//!
//! A typed field left `null` by the API stays in the remainder map, so that
//! absent, `null` and set fields all serialize back the way they were received.
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// Take an optional field, leaving it in `map` when it is `null`
pub(crate) fn take<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str) -> serde_json::Result<Option<T>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => map.remove(key).map(serde_json::from_value).transpose(),
    }
}

/// Take a field that must be present and set
pub(crate) fn take_required<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &'static str) -> serde_json::Result<T> {
    take(map, key)?.ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field(key))
}

/// Put a set field back
pub(crate) fn put<T: Serialize>(map: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value.and_then(|v| serde_json::to_value(v).ok()) {
        map.insert(key.to_owned(), value);
    }
}

/// `TryFrom` and `Into` a raw JSON object for a struct with an `other` remainder,
/// given its required fields, then its optional ones
macro_rules! raw_object {
    ($ty:ident { $($req:ident),* ; $($opt:ident),* }) => {
        impl TryFrom<serde_json::Map<String, serde_json::Value>> for $ty {
            type Error = serde_json::Error;

            fn try_from(mut other: serde_json::Map<String, serde_json::Value>) -> serde_json::Result<Self> {
                Ok(Self {
                    $($req: $crate::fields::take_required(&mut other, stringify!($req))?,)*
                    $($opt: $crate::fields::take(&mut other, stringify!($opt))?,)*
                    other,
                })
            }
        }

        impl From<$ty> for serde_json::Map<String, serde_json::Value> {
            fn from(value: $ty) -> Self {
                let mut map = value.other;
                $($crate::fields::put(&mut map, stringify!($req), Some(value.$req));)*
                $($crate::fields::put(&mut map, stringify!($opt), value.$opt);)*
                map
            }
        }
    };
}
pub(crate) use raw_object;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_fields_stay_behind() {
        let Value::Object(mut map) = json!({"name": null, "host": "whatever"}) else {
            unreachable!()
        };
        assert_eq!(take::<String>(&mut map, "name").unwrap(), None);
        assert_eq!(take::<String>(&mut map, "host").unwrap().as_deref(), Some("whatever"));
        assert_eq!(take::<String>(&mut map, "path").unwrap(), None);
        assert_eq!(Value::Object(map), json!({"name": null}));
    }

    #[test]
    fn required_fields() {
        let Value::Object(mut map) = json!({"name": null}) else {
            unreachable!()
        };
        let err = take_required::<String>(&mut map, "name").unwrap_err();
        assert_eq!(err.to_string(), "missing field `name`");
    }
}
