// Trial runner - one simulator invocation per call
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::parameter_set::ParameterSet;
use crate::core::extractor::{parse_report, ReportLayout, RunResult};
use crate::error::HarnessError;
use crate::utils::logging::{self, OperationCategory};

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const STDERR_TAIL_CHARS: usize = 400;

/// Anything that can turn a parameter set into a simulator report.
pub trait Simulator {
    fn invoke(&self, params: &ParameterSet) -> Result<String, HarnessError>;
}

/// Runs the simulator as a child process:
/// `<program> [leading args..] <connectivity> <tx> <block> <link>`.
///
/// With a timeout set, the child runs in its own process group and the whole
/// group is killed on expiry, so wrapper scripts do not leave orphans behind.
#[derive(Debug, Clone)]
pub struct ProcessSimulator {
    program: PathBuf,
    leading_args: Vec<String>,
    timeout: Option<Duration>,
}

/// Absolute expiry of one invocation plus the configured limit for reporting.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    limit: Duration,
}

type Drained = Receiver<std::io::Result<Vec<u8>>>;

impl ProcessSimulator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: None,
        }
    }

    pub fn with_leading_args(mut self, args: Vec<String>) -> Self {
        self.leading_args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(unix)]
        if self.timeout.is_some() {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        command
    }
}

impl Simulator for ProcessSimulator {
    fn invoke(&self, params: &ParameterSet) -> Result<String, HarnessError> {
        let _timing = logging::start_timing("simulator_invoke", OperationCategory::SimulatorProcess);

        debug!(program = %self.program.display(), args = %params, "spawning simulator");

        let mut child = self
            .command()
            .args(params.as_args())
            .spawn()
            .map_err(|e| HarnessError::SimulatorInvocation {
                exit_code: None,
                reason: format!("failed to start {}: {}", self.program.display(), e),
            })?;
        let deadline = self.timeout.map(|limit| Deadline { at: Instant::now() + limit, limit });

        // Drain both pipes on their own threads so a chatty child never blocks
        // on a full pipe while we wait for it.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // The deadline covers the pipes too: a grandchild can hold them open
        // long after the direct child has exited.
        let outcome = wait(&mut child, deadline).and_then(|status| {
            let stdout = collect(&stdout, deadline)?;
            let stderr = collect(&stderr, deadline)?;
            Ok((status, stdout, stderr))
        });
        let (status, stdout, stderr) = match outcome {
            Ok(drained) => drained,
            Err(e) => {
                if matches!(e, HarnessError::SimulatorTimeout(_)) {
                    warn!(program = %self.program.display(), args = %params, "simulator timed out, killing it");
                    terminate(&mut child);
                }
                return Err(e);
            }
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(HarnessError::SimulatorInvocation {
                exit_code: status.code(),
                reason: format!("simulator exited with {}; stderr: {}", status, tail(stderr.trim())),
            });
        }

        Ok(String::from_utf8(stdout)?)
    }
}

/// Invoke the simulator once and extract its report.
pub fn run_trial(
    simulator: &dyn Simulator,
    layout: &ReportLayout,
    params: &ParameterSet,
) -> Result<RunResult, HarnessError> {
    let output = simulator.invoke(params)?;
    parse_report(&output, layout)
}

fn wait(child: &mut Child, deadline: Option<Deadline>) -> Result<ExitStatus, HarnessError> {
    let Some(deadline) = deadline else {
        return Ok(child.wait()?);
    };

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline.at {
            return Err(HarnessError::SimulatorTimeout(deadline.limit));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill the child and, on unix, everything left in its process group.
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: plain syscall on a group id we created at spawn; no memory is shared.
        unsafe {
            libc::killpg(pgid, libc::SIGKILL);
        }
    }
    // Already-exited races are harmless here.
    let _ = child.kill();
    let _ = child.wait();
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Drained {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let read = match pipe {
            Some(mut pipe) => pipe.read_to_end(&mut buf).map(|_| buf),
            None => Ok(buf),
        };
        // The receiver is gone once the invocation has timed out.
        let _ = tx.send(read);
    });
    rx
}

fn collect(pipe: &Drained, deadline: Option<Deadline>) -> Result<Vec<u8>, HarnessError> {
    let received = match deadline {
        None => pipe.recv().map_err(|_| reader_lost()),
        Some(deadline) => pipe
            .recv_timeout(deadline.at.saturating_duration_since(Instant::now()))
            .map_err(|e| match e {
                RecvTimeoutError::Timeout => HarnessError::SimulatorTimeout(deadline.limit),
                RecvTimeoutError::Disconnected => reader_lost(),
            }),
    }?;
    Ok(received?)
}

fn reader_lost() -> HarnessError {
    HarnessError::SimulatorInvocation {
        exit_code: None,
        reason: "output reader thread panicked".to_string(),
    }
}

fn tail(text: &str) -> &str {
    match text.char_indices().rev().nth(STDERR_TAIL_CHARS) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}
