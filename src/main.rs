mod args;

use android_backup_run::{
    BackupRequest, Orchestrator, PipelineEvent, ProcessRunner, create_pipeline_channel,
    spawn_pipeline,
};
use args::Args;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let backup_dir = match args.resolve_backup_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("❌ Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    runtime.block_on(run_backup(&args, backup_dir))
}

async fn run_backup(args: &Args, backup_dir: PathBuf) -> ExitCode {
    let request = BackupRequest {
        backup_directory: backup_dir,
        convert_to_archive: args.convert,
        extract_archive: args.extract,
    };
    let (events, mut event_rx) = create_pipeline_channel();
    let orchestrator = Orchestrator::new(
        &args.tool_config(),
        Arc::new(ProcessRunner),
        args.selection_policy(),
        events,
    );
    let worker = spawn_pipeline(orchestrator, request);

    let mut last_progress = 0;
    while let Some(event) = event_rx.recv().await {
        if let PipelineEvent::Progress(percent) = event {
            last_progress = percent;
        }
        if args.json {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => log::warn!("Failed to encode event {event:?}: {e}"),
            }
        } else {
            print_event(&event);
        }
    }

    if let Err(e) = worker.await {
        eprintln!("❌ Backup worker failed: {e}");
        return ExitCode::FAILURE;
    }
    // The completion message is the same for every run; a reset progress bar
    // is the only sign the run stopped early.
    if last_progress == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_event(event: &PipelineEvent) {
    match event {
        PipelineEvent::Progress(percent) => println!("[{percent:>3}%]"),
        PipelineEvent::Log(line) => println!("       {line}"),
        PipelineEvent::Completed(message) => println!("✅ {message}"),
    }
}
