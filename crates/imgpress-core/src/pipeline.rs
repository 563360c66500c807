//! Stage sequencing.
//!
//! A run is: validate → load → decode → resize → encode → artifact. Each
//! stage starts only once the previous one has produced its value, and runs
//! at most once. Runs through the same [`Pipeline`] are serialized: a run
//! started while another is in flight waits for it to finish.

use std::sync::Arc;

use futures::lock::Mutex;
use once_cell::sync::OnceCell;

use crate::artifact::OutputArtifact;
use crate::config::PipelineConfig;
use crate::decode::decode;
use crate::encode::encode;
use crate::error::PipelineError;
use crate::handle::HandleRegistry;
use crate::load::{load, SourceFile};
use crate::request::EncodeRequest;
use crate::resize::{resize, resolve_dimensions};
use crate::validate::validate;

static GLOBAL: OnceCell<Pipeline> = OnceCell::new();

/// The transcode pipeline.
#[derive(Debug)]
pub struct Pipeline {
    config: Arc<PipelineConfig>,
    registry: Arc<HandleRegistry>,
    gate: Mutex<()>,
}

impl Pipeline {
    /// A pipeline with its own configuration and handle registry.
    pub fn new(config: PipelineConfig, registry: Arc<HandleRegistry>) -> Self {
        Self {
            config: Arc::new(config),
            registry,
            gate: Mutex::new(()),
        }
    }

    /// The process-wide pipeline: global configuration and global registry.
    pub fn global() -> &'static Pipeline {
        GLOBAL.get_or_init(|| {
            Pipeline::new(PipelineConfig::global().clone(), HandleRegistry::global())
        })
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The registry that owns this pipeline's transient handles.
    pub fn registry(&self) -> &Arc<HandleRegistry> {
        &self.registry
    }

    /// Whether a run is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.gate.try_lock().is_none()
    }

    /// Run with the configured default request.
    pub async fn run_default(&self, file: SourceFile) -> Result<OutputArtifact, PipelineError> {
        let request = self.config.default_request;
        self.run(file, &request).await
    }

    /// Transcode `file` according to `request`.
    ///
    /// The loaded resource is released before this returns, on every path.
    pub async fn run(
        &self,
        file: SourceFile,
        request: &EncodeRequest,
    ) -> Result<OutputArtifact, PipelineError> {
        let _gate = self.gate.lock().await;
        let name = file.name().to_string();

        match self.run_stages(file, request).await {
            Ok(artifact) => {
                log::info!(
                    "{name} -> {} {}x{} ({} bytes)",
                    artifact.mime(),
                    artifact.width(),
                    artifact.height(),
                    artifact.bytes().len()
                );
                Ok(artifact)
            }
            Err(err) => {
                log::warn!("{name}: {err}");
                Err(err)
            }
        }
    }

    async fn run_stages(
        &self,
        file: SourceFile,
        request: &EncodeRequest,
    ) -> Result<OutputArtifact, PipelineError> {
        let declared = validate(&file, &self.config.allow_list)?;

        let resource = load(file, declared, &self.registry, self.config.max_file_size).await?;
        let limits = self.config.decode_limits();
        let source = decode(&resource, &limits).await?;
        drop(resource);

        let requested = (request.width, request.height);
        if !request.is_pass_through() {
            let (width, height) = resolve_dimensions(source.dimensions(), requested);
            limits.check(width, height)?;
        }
        let surface = resize(source, requested, self.config.resize_filter);
        let encoded = encode(&surface, request.output_mime, request.quality).await?;
        drop(surface);

        Ok(OutputArtifact::new(
            encoded,
            &self.registry,
            &self.config.download_stem,
        ))
    }
}
