//! File upload: a base64 zip archive holding exactly one file.

use std::fs;
use std::io::{self, Cursor};
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use tracing::info;
use wd_protocol::{BodyParams, CommandError, LocatorParams};
use zip::ZipArchive;

use crate::handler::{BuildResult, HandlerContext};
use crate::params::string_param;
use crate::scope::SessionScope;

/// Directory uploads for a session are extracted into.
pub fn session_upload_dir(ctx: &HandlerContext, scope: &SessionScope) -> PathBuf {
    ctx.upload_dir.join(format!("strontiumsession{}", scope.id()))
}

fn open_archive(bytes: Vec<u8>) -> Result<(ZipArchive<Cursor<Vec<u8>>>, PathBuf), CommandError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| CommandError::invalid_parameter(format!("Uploaded file is not a zip archive: {e}")))?;
    if archive.len() != 1 {
        return Err(CommandError::invalid_parameter("Sending multiple files is not supported."));
    }
    let name = archive
        .by_index(0)
        .map_err(|e| CommandError::invalid_parameter(format!("zip entry: {e}")))?
        .enclosed_name()
        .ok_or_else(|| CommandError::invalid_parameter("Uploaded file has an unsafe name"))?;
    Ok((archive, name))
}

pub fn upload_file(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let encoded = string_param(body, "file")?;
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| CommandError::invalid_parameter(format!("Parameter 'file' is not base64: {e}")))?;
    let (mut archive, name) = open_archive(bytes)?;
    let dir = session_upload_dir(ctx, &scope);
    let target = dir.join(name);

    Ok(scope.into_handler(&format!("upload file to {}", target.display()), move |_| {
        let io_error = |e: io::Error| CommandError::unhandled(format!("Failed to store upload: {e}"));
        let mut entry = archive
            .by_index(0)
            .map_err(|e| CommandError::unhandled(format!("zip entry: {e}")))?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let mut out = fs::File::create(&target).map_err(io_error)?;
        io::copy(&mut entry, &mut out).map_err(io_error)?;
        info!("Upload stored at {}", target.display());
        Ok(json!(target.to_string_lossy()))
    }))
}
