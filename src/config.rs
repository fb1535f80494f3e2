use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::io::{read_json_from_file, read_json_from_file_async, FromFileError};

/// Name of the configuration file searched for by the locating entry points.
pub const TSCONFIG_FILENAME: &str = "tsconfig.json";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub allow_js: bool,
}

/// The parts of a tsconfig.json that decide which files are in scope.
///
/// `None` means the field was absent, which is different from an empty list:
/// only absent `files` and `include` trigger the default `**/*` inclusion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
}

impl TsConfig {
    /// Read and parse a tsconfig.json from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FromFileError> {
        let value: Value = read_json_from_file(path)?;
        Ok(Self::from(&value))
    }

    pub async fn from_file_async<P: AsRef<Path>>(path: P) -> Result<Self, FromFileError> {
        let value: Value = read_json_from_file_async(path).await?;
        Ok(Self::from(&value))
    }

    pub fn allow_js(&self) -> bool {
        self.compiler_options
            .as_ref()
            .map_or(false, |options| options.allow_js)
    }
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let array = value?.as_array()?;
    Some(
        array
            .iter()
            .filter_map(Value::as_str)
            .map(ToOwned::to_owned)
            .collect(),
    )
}

// JavaScript truthiness, since tsconfig files are read by JavaScript tooling.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<&Value> for TsConfig {
    /// Fields with an unexpected JSON type are treated as absent rather than
    /// rejected.
    fn from(value: &Value) -> Self {
        let compiler_options = value
            .get("compilerOptions")
            .filter(|options| options.is_object())
            .map(|options| CompilerOptions {
                allow_js: options.get("allowJs").map_or(false, is_truthy),
            });
        Self {
            files: string_list(value.get("files")),
            include: string_list(value.get("include")),
            exclude: string_list(value.get("exclude")),
            compiler_options,
        }
    }
}

impl From<Value> for TsConfig {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}
