use super::write_failed;
use crate::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export any serializable data structure to pretty-printed JSON
pub fn export_json<T, P>(data: &T, output_path: P) -> Result<(), ExportError>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let output_path = output_path.as_ref();
    let json_data = serde_json::to_string_pretty(data)
        .map_err(|e| ExportError::Serialization(e.to_string()))?;

    let mut file = std::fs::File::create(output_path).map_err(|e| write_failed(output_path, e))?;
    file.write_all(json_data.as_bytes())
        .map_err(|e| write_failed(output_path, e))?;

    Ok(())
}
