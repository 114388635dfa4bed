use anyhow::Result;
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Once;
use futures::stream::{self, StreamExt};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::providers::create_provider;
use crate::translation::BatchEngine;
use crate::ts_catalog::TsCatalog;

// @module: Application controller for catalog translation

/// Outcome of processing one catalog file in folder mode
enum FileOutcome {
    Translated,
    Skipped,
    Failed,
}

/// Main application controller for catalog translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_language.is_empty() && !self.config.target_language.is_empty()
    }

    /// Run the main workflow for a single catalog file
    pub async fn run(&self, input_file: PathBuf, output: Option<PathBuf>, force_overwrite: bool) -> Result<()> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(input_file, output, &multi_progress, force_overwrite).await
    }

    /// Run the controller with progress reporting
    async fn run_with_progress(
        &self,
        input_file: PathBuf,
        output: Option<PathBuf>,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }
        if !FileManager::is_catalog_file(&input_file) {
            return Err(anyhow::anyhow!("Input file is not a .ts catalog: {:?}", input_file));
        }

        let output_path = output
            .unwrap_or_else(|| FileManager::generate_output_path(&input_file, &self.config.output_suffix));
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, translation already exists (use -f to force overwrite)");
            return Ok(());
        }

        // Fire a background connection check once per process
        static INIT_TEST: Once = Once::new();
        INIT_TEST.call_once(|| {
            let translation = self.config.translation.clone();
            tokio::spawn(async move {
                if let Ok(provider) = create_provider(&translation) {
                    if let Err(e) = provider.test_connection().await {
                        warn!("Provider connection test failed: {}", e);
                    }
                }
            });
        });

        let mut catalog = TsCatalog::parse(&input_file)?;
        let mut units = catalog.units();

        // Capture pending positions before the run so only new translations
        // are written back into the catalog afterwards
        let pending_positions: Vec<usize> = units.iter()
            .enumerate()
            .filter(|(_, unit)| unit.needs_translation())
            .map(|(position, _)| position)
            .collect();

        if pending_positions.is_empty() {
            info!("Nothing to translate in {:?}, catalog is already complete", input_file);
            return Ok(());
        }

        info!("🌐 tslate: {} - {}",
            self.config.translation.provider.display_name(),
            self.config.translation.get_model());
        info!("Translating {} pending unit(s) from {} to {}",
            pending_positions.len(), self.config.source_language, self.config.target_language);

        // Create a progress bar for translation tracking
        let progress_bar = multi_progress.add(ProgressBar::new(pending_positions.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} units ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let provider = create_provider(&self.config.translation)?;
        let engine = BatchEngine::new(
            provider,
            &self.config.source_language,
            &self.config.target_language,
            self.config.translation.batch_size,
            self.config.translation.max_retries,
        )?;

        let pb = progress_bar.clone();
        let report = engine
            .run_with_progress(&mut units, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await?;

        progress_bar.finish_and_clear();

        // Map the new translations back into the catalog by position
        let mut translations = BTreeMap::new();
        for position in pending_positions {
            if let Some(text) = &units[position].translation {
                translations.insert(position, text.clone());
            }
        }
        catalog.apply_translations(&translations);
        catalog.write_to_file(&output_path)?;

        info!("Success: {} ({} unit(s) translated in {})",
            output_path.display(),
            report.translated,
            Self::format_duration(start_time.elapsed()));

        Ok(())
    }

    /// Run the workflow in folder mode, processing all catalog files in a directory
    ///
    /// Files whose translated output already exists are skipped unless
    /// `force_overwrite` is set. Files are processed concurrently up to the
    /// configured limit; failures are reported at the end rather than
    /// aborting the other files.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let catalog_files = FileManager::find_catalog_files(&input_dir)?;
        if catalog_files.is_empty() {
            return Err(anyhow::anyhow!("No catalog files found in directory: {:?}", input_dir));
        }

        // Create multi-progress instance for multiple file processing
        let multi_progress = MultiProgress::new();

        let folder_pb = multi_progress.add(ProgressBar::new(catalog_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let concurrency = self.config.translation.get_concurrent_files().max(1);

        let outcomes: Vec<FileOutcome> = stream::iter(catalog_files.iter().map(|catalog_file| {
            let multi_progress = &multi_progress;
            let folder_pb = folder_pb.clone();
            async move {
                let file_name = catalog_file.file_name()
                    .map(|f| f.to_string_lossy().to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                folder_pb.set_message(format!("Processing: {}", file_name));

                let output_path = FileManager::generate_output_path(catalog_file, &self.config.output_suffix);
                let outcome = if output_path.exists() && !force_overwrite {
                    warn!("Skipping {}, translation already exists (use -f to force overwrite)", file_name);
                    FileOutcome::Skipped
                } else {
                    match self.run_with_progress(catalog_file.clone(), None, multi_progress, force_overwrite).await {
                        Ok(_) => FileOutcome::Translated,
                        Err(e) => {
                            error!("Error processing file {}: {}", file_name, e);
                            FileOutcome::Failed
                        }
                    }
                };

                folder_pb.inc(1);
                outcome
            }
        }))
        .buffer_unordered(concurrency)
        .collect()
        .await;

        folder_pb.finish_with_message("Folder processing complete");

        let success_count = outcomes.iter().filter(|o| matches!(o, FileOutcome::Translated)).count();
        let skip_count = outcomes.iter().filter(|o| matches!(o, FileOutcome::Skipped)).count();
        let error_count = outcomes.iter().filter(|o| matches!(o, FileOutcome::Failed)).count();

        info!("Folder processing completed: {} processed, {} skipped, {} errors - Duration: {}",
            success_count, skip_count, error_count,
            Self::format_duration(start_time.elapsed()));

        if error_count > 0 {
            return Err(anyhow::anyhow!("{} file(s) failed to translate", error_count));
        }

        Ok(())
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
