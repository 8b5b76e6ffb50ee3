//! Request parameters for Bot API calls.
//!
//! Values are either plain text (form fields) or file references, which turn
//! the request into a multipart upload.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A local file sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputFile {
    pub path: PathBuf,
    /// Explicit MIME type. Unset = let the transport guess.
    pub mime_type: Option<String>,
    /// Filename override. Unset = the path's base name.
    pub file_name: Option<String>,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mime_type: None,
            file_name: None,
        }
    }

    pub fn mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Filename sent in the multipart header.
    pub fn upload_name(&self) -> String {
        if let Some(name) = &self.file_name {
            return name.clone();
        }
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string())
    }
}

/// One parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Param {
    Text(String),
    File(InputFile),
}

impl Param {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            Self::File(_) => None,
        }
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&String> for Param {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<InputFile> for Param {
    fn from(v: InputFile) -> Self {
        Self::File(v)
    }
}

macro_rules! text_param_from {
    ($($t:ty),*) => {
        $(impl From<$t> for Param {
            fn from(v: $t) -> Self {
                Self::Text(v.to_string())
            }
        })*
    };
}

text_param_from!(i32, i64, u32, u64, usize, bool, f64);

impl From<serde_json::Value> for Param {
    /// Strings are sent bare; anything else as its JSON text.
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Ordered parameter map for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, Param>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Param>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Param> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when any value is a file, i.e. the body must be multipart.
    pub fn has_files(&self) -> bool {
        self.0.values().any(|v| matches!(v, Param::File(_)))
    }

    /// Parse `key=value` pairs. A value starting with `@` is a file path.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, crate::error::CourierError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                crate::error::CourierError::Config(format!("expected key=value, got '{pair}'"))
            })?;
            match value.strip_prefix('@') {
                Some(path) => params.insert(key, InputFile::new(Path::new(path))),
                None => params.insert(key, value),
            }
        }
        Ok(params)
    }
}

impl<K: Into<String>, V: Into<Param>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// What a single dispatch looked like, handed to error sinks.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext<'a> {
    pub endpoint: &'a str,
    pub params: &'a Params,
    pub is_multipart: bool,
    /// The update being processed when the call was made, if any.
    pub update: Option<&'a serde_json::Value>,
}
