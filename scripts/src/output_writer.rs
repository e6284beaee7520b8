use std::{fmt::LowerHex, fs, fs::File, io::Read, path::PathBuf};

use json::JsonValue;

use crate::errors::ScriptError;

/// Location of a value in the output file
pub enum OutputKeys {
    /// Address of a deployed contract
    Deployment { key: &'static str },
    /// Hash of a transaction sent under the given key
    Tx { key: &'static str, tx_key: String },
}

/// Read a recorded value
pub fn read_output_file(file_path: &str, key: OutputKeys) -> Result<String, ScriptError> {
    if !PathBuf::from(file_path).exists() {
        return Err(ScriptError::JsonOutputError(format!(
            "output file {file_path} not found"
        )));
    }

    // Parse it's json content into objects
    let parsed_json = get_json_from_file(file_path)?;
    let value = match key {
        OutputKeys::Deployment { key } => &parsed_json[key]["deploy"],
        OutputKeys::Tx { key, ref tx_key } => &parsed_json[key]["txs"][tx_key.as_str()],
    };

    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ScriptError::JsonOutputError(String::from("value not recorded")))
}

/// Records the given value, creating the file if needed
pub fn write_output_file<T: LowerHex>(
    file_path: &str,
    key: OutputKeys,
    value: T,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, create it
    if !PathBuf::from(file_path).exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;
    }

    // Parse it's json content into objects
    let mut parsed_json = get_json_from_file(file_path)?;

    // Update the right key
    match key {
        OutputKeys::Deployment { key } => {
            parsed_json[key]["deploy"] = JsonValue::String(format!("{value:#x}"))
        }
        OutputKeys::Tx { key, tx_key } => {
            parsed_json[key]["txs"][tx_key.as_str()] = JsonValue::String(format!("{value:#x}"))
        }
    };

    // Write the updated json back to the file
    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    Ok(())
}

/// Parses the JSON file at the given path
fn get_json_from_file(file_path: &str) -> Result<JsonValue, ScriptError> {
    let mut file_contents = String::new();
    File::open(file_path)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::JsonOutputError(e.to_string()))
}
