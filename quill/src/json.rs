//! Provider for [`serde_json::Value`].
//!
//! Objects are maps, arrays are sequences, `null` is an empty pass-through value.
use std::borrow::Cow;
use serde_json::{Map, Value as Json};

use crate::{Lookup, Provider, Shape, Value};

impl Provider for Json {
    fn shape(&self) -> Shape<'_> {
        match self {
            Json::Null => Shape::PassThrough(None),
            Json::Bool(true) => Shape::Scalar(Cow::Borrowed("true")),
            Json::Bool(false) => Shape::Scalar(Cow::Borrowed("false")),
            Json::Number(number) => Shape::Scalar(Cow::Owned(number.to_string())),
            Json::String(string) => Shape::Scalar(Cow::Borrowed(string)),
            Json::Array(array) => array.shape(),
            Json::Object(object) => Shape::Map(object),
        }
    }
}

impl Lookup for Map<String, Json> {
    fn lookup(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).map(|e| Value::Borrowed(e))
    }
}

impl Provider for Map<String, Json> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(self)
    }
}
