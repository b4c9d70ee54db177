//! Reading content to verify from arguments, files and stdin

use serde::Deserialize;
use std::path::Path;
use tokio::io::AsyncReadExt;
use verigate_errors::{Error, InputError};

/// One line of a batch file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BatchItem {
    pub content: String,
    pub source: String,
}

/// Resolve the content for `verify`: the argument, else the file, else stdin
pub async fn read_content(content: Option<String>, file: Option<&Path>) -> Result<String, Error> {
    if let Some(content) = content {
        return Ok(content);
    }

    match file {
        Some(path) => read_text_file(path).await,
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .map_err(|e| InputError::ReadFailed {
                    path: "<stdin>".to_string(),
                    message: e.to_string(),
                })?;
            String::from_utf8(buf).map_err(|_| {
                InputError::NotUtf8 {
                    path: "<stdin>".to_string(),
                }
                .into()
            })
        }
    }
}

/// Read and parse a JSON-lines batch file
pub async fn read_batch(path: &Path) -> Result<Vec<BatchItem>, Error> {
    let text = read_text_file(path).await?;
    Ok(parse_batch(&text)?)
}

async fn read_text_file(path: &Path) -> Result<String, Error> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| InputError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|_| {
        InputError::NotUtf8 {
            path: path.display().to_string(),
        }
        .into()
    })
}

/// Parse every non-blank line; the first bad line fails the whole batch
pub fn parse_batch(text: &str) -> Result<Vec<BatchItem>, InputError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| InputError::MalformedLine {
                line: index + 1,
                message: e.to_string(),
            })
        })
        .collect()
}
