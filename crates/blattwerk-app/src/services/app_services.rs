// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — owns persisted settings and runs document tools off
// the UI thread.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use blattwerk_core::error::{BlattwerkError, Result};
use blattwerk_core::{AppConfig, InputFile, ProcessedFile, ToolId};
use blattwerk_document::{PdfReader, ToolOptions};
use tracing::{info, warn};

use super::data_dir;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// Cheap to clone; the config sits behind an `Arc<Mutex<>>` so closures and
/// async blocks can hold their own handle.
#[derive(Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
}

impl AppServices {
    /// Initialise from the platform data directory. Call once at app startup.
    pub fn init() -> Self {
        Self::with_data_dir(data_dir::data_dir())
    }

    /// Initialise from an explicit directory.
    pub fn with_data_dir(dir: PathBuf) -> Self {
        info!(path = %dir.display(), "initialising app services");
        let config = load_config(&dir).unwrap_or_default();
        Self {
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
        }
    }

    // -- Config Persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = config.clone();
        persist_config(&self.data_dir, config)
    }

    // -- Files ---------------------------------------------------------------

    /// Read a picked file into memory, named after its file name.
    pub fn read_input(path: &Path) -> Result<InputFile> {
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".into());
        Ok(InputFile::new(name, data))
    }

    /// Write one tool output to disk.
    pub fn write_output(path: &Path, file: &ProcessedFile) -> Result<()> {
        std::fs::write(path, &file.data)?;
        info!(path = %path.display(), bytes = file.size, "output saved");
        Ok(())
    }

    // -- Documents -----------------------------------------------------------

    /// Page count of an in-memory PDF.
    pub fn page_count(data: &[u8]) -> Result<usize> {
        Ok(PdfReader::from_bytes(data)?.page_count())
    }

    /// Run a tool on the blocking pool.
    pub async fn run_tool(
        &self,
        tool: ToolId,
        inputs: Vec<InputFile>,
        options: ToolOptions,
    ) -> Result<Vec<ProcessedFile>> {
        info!(%tool, inputs = inputs.len(), "running tool");
        let outcome = tokio::task::spawn_blocking(move || {
            blattwerk_document::process(tool, &inputs, &options)
        })
        .await
        .map_err(|err| BlattwerkError::Io(std::io::Error::other(err)))?;

        if let Err(ref err) = outcome {
            warn!(%tool, error = %err, "tool failed");
        }
        outcome
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<AppConfig>(&data) {
        Ok(mut config) => {
            config.reorder = config.reorder.sanitized();
            Some(config)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
