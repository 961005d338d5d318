//! Beatmap generation command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use notefall_core::{BeatmapConfig, BeatmapFile};
use tracing::info;

pub fn run(beatmap: &BeatmapConfig, output: Option<&Path>) -> Result<()> {
    let mut loader = beatmap.loader().context("Failed to set up note sources")?;
    let generated = loader.load();

    let source = generated
        .source
        .map(|kind| kind.to_string())
        .unwrap_or_else(|| "none".to_string());
    eprintln!(
        "Generated {} notes from {} source (seed {})",
        generated.notes.len(),
        source,
        loader.seed()
    );

    let music_file = generated.music_file.clone().or_else(|| {
        beatmap
            .music_path
            .as_ref()
            .map(|path| path.display().to_string())
    });
    let content = BeatmapFile::from_events(&generated.notes, music_file).to_json_pretty()?;

    if let Some(path) = output {
        fs::write(path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Beatmap written to {}", path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}
