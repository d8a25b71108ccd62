#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use args::{Args, Command, SayArgs, ServeArgs};
use clap::Parser;
use relay_server::Server;
use tokio_util::sync::CancellationToken;
use tts_adapter::TtsProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Variables from a local .env, if present, before clap reads the environment
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize telemetry
    relay_telemetry::init(&args.log_level, args.log_format.into())?;

    match args.command {
        Some(Command::Say(say_args)) => say(&say_args).await,
        Some(Command::Serve(serve_args)) => serve(&serve_args).await,
        None => serve(&args.serve).await,
    }
}

async fn serve(args: &ServeArgs) -> anyhow::Result<()> {
    let config = args.load_config()?;

    tracing::info!(
        config_path = args.config.as_ref().map(|path| path.display().to_string()),
        model = %config.synthesis.model_path.display(),
        "starting speech-relay"
    );

    // Build server; loads the model before binding
    let server = tokio::task::spawn_blocking(move || Server::new(&config)).await??;

    // Set up graceful shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    // Run server
    server.serve(shutdown).await?;

    tracing::info!("speech-relay stopped");
    Ok(())
}

async fn say(args: &SayArgs) -> anyhow::Result<()> {
    let provider = TtsProvider::new(args.adapter_config()?);

    let text = args.text.clone();
    let (format, audio) = tokio::task::spawn_blocking(move || provider.get_tts_audio(&text, None, None)).await?;
    let (Some(format), Some(audio)) = (format, audio) else {
        anyhow::bail!("synthesis failed, see the log above");
    };

    tokio::fs::write(&args.output, &audio).await?;

    tracing::info!(
        output = %args.output.display(),
        %format,
        bytes = audio.len(),
        "speech saved"
    );

    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
