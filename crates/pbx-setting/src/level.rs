//! Settings, their values, and precedence-ordered levels.

use pbx_plist::{Array, Value};

/// A build-setting value: a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    String(String),
    List(Vec<String>),
}

impl SettingValue {
    /// Convert a plist value. `as_list` forces list interpretation for
    /// settings whose names are known to hold lists; a plain string is
    /// then wrapped as a one-element list.
    pub fn from_value(value: &Value, as_list: bool) -> Self {
        match value {
            Value::Array(array) => SettingValue::List(array.strings()),
            Value::String(s) if as_list => SettingValue::List(vec![s.value().to_owned()]),
            Value::String(s) => SettingValue::String(s.value().to_owned()),
            Value::Integer(n) => SettingValue::String(n.to_string()),
            Value::Boolean(b) => SettingValue::String(if *b { "YES" } else { "NO" }.to_owned()),
            Value::Real(r) => SettingValue::String(format!("{r}")),
            _ => SettingValue::String(String::new()),
        }
    }

    /// The plist rendering of this value.
    pub fn to_value(&self) -> Value {
        match self {
            SettingValue::String(s) => Value::string(s.clone()),
            SettingValue::List(items) => {
                let array: Array = items.iter().map(|item| Value::string(item.clone())).collect();
                Value::Array(array)
            }
        }
    }
}

/// A named build setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    name: String,
    value: SettingValue,
}

impl Setting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: SettingValue::String(value.into()),
        }
    }

    pub fn with_value(name: impl Into<String>, value: SettingValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &SettingValue {
        &self.value
    }
}

/// An ordered collection of settings. Earlier entries take precedence on
/// duplicate names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Level {
    settings: Vec<Setting>,
}

impl Level {
    pub fn new(settings: Vec<Setting>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Look up a setting by name; the first match wins.
    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.settings
            .iter()
            .find(|setting| setting.name == name)
            .map(Setting::value)
    }
}
