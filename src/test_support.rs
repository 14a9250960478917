// Shared fixtures for unit tests: a scripted command runner and container builders
use crate::archive::format::{AB_MAGIC, HEADER_LEN};
use crate::pipeline::PipelineEvent;
use crate::process::{CommandOutput, CommandRunner};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// One recorded external command.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    /// The adb sub-command, skipping a leading `-s <serial>`.
    pub fn subcommand(&self) -> Option<&str> {
        match self.args.first().map(String::as_str) {
            Some("-s") => self.args.get(2).map(String::as_str),
            other => other,
        }
    }
}

type Handler = Box<dyn Fn(&Invocation) -> io::Result<CommandOutput> + Send + Sync>;

/// Records every invocation and answers with a caller-provided script.
pub struct ScriptedRunner {
    calls: Mutex<Vec<Invocation>>,
    handler: Handler,
}

impl ScriptedRunner {
    pub fn new(
        handler: impl Fn(&Invocation) -> io::Result<CommandOutput> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.subcommand().map(str::to_string))
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &Path, args: &[OsString]) -> io::Result<CommandOutput> {
        let invocation = Invocation {
            program: program.to_path_buf(),
            args: args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        };
        self.calls.lock().unwrap().push(invocation.clone());
        (self.handler)(&invocation)
    }
}

pub fn ok_output(stdout: &str) -> io::Result<CommandOutput> {
    Ok(CommandOutput {
        exit_code: Some(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    })
}

pub fn failed_output(code: i32, stderr: &str) -> io::Result<CommandOutput> {
    Ok(CommandOutput {
        exit_code: Some(code),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    })
}

pub const DEVICES_ONE: &str = "List of devices attached\n1d36d8f1\tdevice\n\n";

/// `ANDROID BACKUP` followed by filler up to the 24-byte header, then the payload.
pub fn container_bytes(payload: &[u8]) -> Vec<u8> {
    let mut bytes = AB_MAGIC.to_vec();
    bytes.extend_from_slice(b"\n5\n1\nnone\n");
    assert_eq!(bytes.len(), HEADER_LEN);
    bytes.extend_from_slice(payload);
    bytes
}

/// Payload of a real unencrypted backup: a one-entry tar stream, zlib-deflated.
pub fn compressed_tar_payload() -> Vec<u8> {
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    let data = b"hello";
    let mut header = tar::Header::new_ustar();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_entry_type(tar::EntryType::Regular);
    let mut builder = tar::Builder::new(Vec::new());
    builder
        .append_data(&mut header, "apps/com.example/f/hello.txt", &data[..])
        .unwrap();
    let tar_bytes = builder.into_inner().unwrap();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&tar_bytes).unwrap();
    encoder.finish().unwrap()
}

/// Drains a closed event channel.
pub async fn drain(mut rx: mpsc::Receiver<PipelineEvent>) -> Vec<PipelineEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

pub fn progress_of(events: &[PipelineEvent]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::Progress(p) => Some(*p),
            _ => None,
        })
        .collect()
}

pub fn logs_of(events: &[PipelineEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::Log(line) => Some(line.clone()),
            _ => None,
        })
        .collect()
}
