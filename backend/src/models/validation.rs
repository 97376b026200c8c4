use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::course::UnknownVariant;

/// Floats whose integral value converts to `i64` without saturating.
const I64_RANGE: std::ops::Range<f64> = (i64::MIN as f64)..(i64::MAX as f64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every violation found in one payload, in the order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Reads typed fields out of a JSON object, recording a violation for each bad one
/// instead of stopping at the first.
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    prefix: String,
    errors: ValidationErrors,
}

impl<'a> Fields<'a> {
    pub fn object(body: &'a Value) -> Result<Self, ValidationErrors> {
        match body.as_object() {
            Some(map) => Ok(Self {
                map,
                prefix: String::new(),
                errors: ValidationErrors::default(),
            }),
            None => {
                let mut errors = ValidationErrors::default();
                errors.push("body", "must be a JSON object");
                Err(errors)
            }
        }
    }

    fn nested(map: &'a Map<String, Value>, prefix: String) -> Self {
        Self {
            map,
            prefix,
            errors: ValidationErrors::default(),
        }
    }

    fn path(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn fail(&mut self, key: &str, message: impl Into<String>) {
        let path = self.path(key);
        self.errors.push(path, message);
    }

    /// Present in the payload, `null` included.
    pub fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    pub fn required_string(&mut self, key: &str) -> Option<String> {
        match self.get(key) {
            None => {
                self.fail(key, "is required");
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.fail(key, "must not be empty");
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.fail(key, "must be a string");
                None
            }
        }
    }

    /// Absent, `null` and blank strings all read as `None`.
    pub fn optional_string(&mut self, key: &str) -> Option<String> {
        self.nullable_string(key).flatten()
    }

    /// `None` when absent, `Some(None)` when explicitly cleared.
    pub fn nullable_string(&mut self, key: &str) -> Option<Option<String>> {
        if !self.has(key) {
            return None;
        }
        match self.get(key) {
            None => Some(None),
            Some(Value::String(s)) if s.trim().is_empty() => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(_) => {
                self.fail(key, "must be a string");
                None
            }
        }
    }

    pub fn required_integer(&mut self, key: &str) -> Option<i64> {
        match self.get(key) {
            None => {
                self.fail(key, "is required");
                None
            }
            Some(Value::Number(n)) => {
                let integral = n.as_i64().or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && I64_RANGE.contains(f))
                        .map(|f| f as i64)
                });
                match integral {
                    Some(i) if i >= 0 => Some(i),
                    Some(_) => {
                        self.fail(key, "must not be negative");
                        None
                    }
                    None => {
                        self.fail(key, "must be an integer");
                        None
                    }
                }
            }
            Some(_) => {
                self.fail(key, "must be an integer");
                None
            }
        }
    }

    pub fn required_non_negative(&mut self, key: &str) -> Option<f64> {
        match self.get(key) {
            None => {
                self.fail(key, "is required");
                None
            }
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if f >= 0.0 => Some(f),
                _ => {
                    self.fail(key, "must not be negative");
                    None
                }
            },
            Some(_) => {
                self.fail(key, "must be a number");
                None
            }
        }
    }

    /// Absent or `null` reads as `None`; anything outside the declared set is a violation.
    pub fn optional_enum<E>(&mut self, key: &str) -> Option<E>
    where
        E: FromStr<Err = UnknownVariant>,
    {
        match self.get(key)? {
            Value::String(s) => match s.parse() {
                Ok(v) => Some(v),
                Err(e) => {
                    self.fail(key, e.to_string());
                    None
                }
            },
            _ => {
                self.fail(key, "must be a string");
                None
            }
        }
    }

    /// `None` when absent; `null` reads as an empty list.
    pub fn string_list(&mut self, key: &str) -> Option<Vec<String>> {
        if !self.has(key) {
            return None;
        }
        let Some(value) = self.get(key) else {
            return Some(Vec::new());
        };
        let Some(items) = value.as_array() else {
            self.fail(key, "must be an array of strings");
            return None;
        };

        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => out.push(s.to_string()),
                None => self.fail(&format!("{}[{}]", key, i), "must be a string"),
            }
        }
        Some(out)
    }

    /// Reads an array of objects, validating each element with `read` under `key[i].`.
    pub fn list_of<T>(
        &mut self,
        key: &str,
        read: impl Fn(&mut Fields<'a>) -> Option<T>,
    ) -> Option<Vec<T>> {
        let value = self.get(key)?;
        let Some(items) = value.as_array() else {
            self.fail(key, "must be an array");
            return None;
        };

        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let element = self.path(&format!("{}[{}]", key, i));
            let Some(map) = item.as_object() else {
                self.errors.push(element, "must be an object");
                continue;
            };
            let mut child = Fields::nested(map, format!("{}.", element));
            let parsed = read(&mut child);
            self.errors.0.extend(child.errors.0);
            out.extend(parsed);
        }
        Some(out)
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }

    pub fn finish_with<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(v) if self.errors.is_empty() => Ok(v),
            _ => Err(self.errors),
        }
    }
}
