use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use chunkscribe::application::ports::{MediaStore, TranscriptionOptions};
use chunkscribe::application::services::{
    SegmentExtractor, SplitService, StorageJanitor, TranscribeService, TranscriptionDispatcher,
};
use chunkscribe::domain::StorageArea;
use chunkscribe::infrastructure::audio::{
    DurationProbeFactory, FfmpegSlicer, TranscriptionEngineFactory,
};
use chunkscribe::infrastructure::observability::{TracingConfig, init_tracing};
use chunkscribe::infrastructure::storage::LocalMediaStore;
use chunkscribe::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    )?;

    let store = Arc::new(
        LocalMediaStore::new(PathBuf::from(&settings.storage.root))
            .context("Failed to initialise media storage")?,
    );
    tracing::info!(root = %store.root().display(), "Media storage ready");

    let store: Arc<dyn MediaStore> = store;
    let probe = DurationProbeFactory::create(&settings.media);
    let slicer = Arc::new(FfmpegSlicer::new(&settings.media.ffmpeg_path));
    let engine = TranscriptionEngineFactory::create(&settings.transcription)
        .context("Failed to configure transcription engine")?;

    let janitor = StorageJanitor::new(Arc::clone(&store));
    let extractor = SegmentExtractor::new(slicer, Arc::clone(&store));

    let split_service = Arc::new(SplitService::new(
        Arc::clone(&store),
        probe,
        extractor,
        janitor.clone(),
        settings.segmentation.max_segment_bytes,
    ));

    let options = TranscriptionOptions {
        language: settings
            .transcription
            .language
            .clone()
            .filter(|language| !language.is_empty()),
        temperature: settings.transcription.temperature,
        ..TranscriptionOptions::default()
    };
    let dispatcher = TranscriptionDispatcher::new(engine, Arc::clone(&store), options);
    let transcribe_service = Arc::new(TranscribeService::new(
        Arc::clone(&store),
        dispatcher,
        janitor,
    ));

    let state = AppState {
        split_service,
        transcribe_service,
        segments_dir: store.local_path(&StorageArea::Chunks.root()),
        public_base_url: settings.server.public_base_url.clone(),
        max_upload_bytes: settings.server.max_upload_mb * 1024 * 1024,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!(
        environment = %environment,
        provider = ?settings.transcription.provider,
        "Listening on {}",
        addr
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
