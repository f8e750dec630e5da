use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::CapabilityError;

const CAPABILITY: &str = "speech recognition";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpeechEvent {
    Transcript(String),
    Error(String),
}

/// A fire-and-forget dictation session: start it, poll until it yields one
/// event, or stop it. There are no partial results.
pub trait SpeechRecognizer {
    fn start(&mut self) -> Result<(), CapabilityError>;
    fn stop(&mut self);
    fn is_listening(&self) -> bool;
    fn poll(&mut self) -> Option<SpeechEvent>;
}

/// Recognizer for systems with nothing configured.
pub struct Unavailable;

impl SpeechRecognizer for Unavailable {
    fn start(&mut self) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unsupported(CAPABILITY))
    }

    fn stop(&mut self) {}

    fn is_listening(&self) -> bool {
        false
    }

    fn poll(&mut self) -> Option<SpeechEvent> {
        None
    }
}

struct Session {
    child: Child,
    rx: Receiver<Result<String, String>>,
    output: Option<Result<String, String>>,
}

/// Runs an external speech-to-text command through the shell; whatever it
/// prints on stdout before exiting successfully is the transcript.
///
/// The command runs in its own process group so stopping it also ends any
/// pipeline the shell started.
pub struct CommandRecognizer {
    command: String,
    session: Option<Session>,
}

impl CommandRecognizer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            session: None,
        }
    }

    fn shell(&self) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.command);
            cmd
        }
        #[cfg(not(windows))]
        {
            use std::os::unix::process::CommandExt;

            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&self.command).process_group(0);
            cmd
        }
    }
}

/// Kill the recognizer and everything it spawned.
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        // The group id equals the shell's pid (process_group(0)).
        let group = format!("-{}", child.id());
        let killed = Command::new("kill")
            .args(["-KILL", "--", &group])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success());
        if !killed {
            log::warn!("could not kill speech process group {group}");
        }
    }
    let _ = child.kill();
}

impl SpeechRecognizer for CommandRecognizer {
    fn start(&mut self) -> Result<(), CapabilityError> {
        if self.session.is_some() {
            return Ok(());
        }

        let mut child = self
            .shell()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CapabilityError::failed(CAPABILITY, e))?;
        let Some(mut stdout) = child.stdout.take() else {
            terminate(&mut child);
            return Err(CapabilityError::failed(CAPABILITY, "no stdout pipe"));
        };

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut transcript = String::new();
            let read = stdout
                .read_to_string(&mut transcript)
                .map(|_| transcript)
                .map_err(|e| e.to_string());
            // The receiver is gone when the session was stopped.
            let _ = tx.send(read);
        });

        log::info!("speech session started: {}", self.command);
        self.session = Some(Session {
            child,
            rx,
            output: None,
        });
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            terminate(&mut session.child);
            // Reap off the UI thread.
            thread::spawn(move || {
                let _ = session.child.wait();
            });
            log::info!("speech session stopped");
        }
    }

    fn is_listening(&self) -> bool {
        self.session.is_some()
    }

    /// Yields once stdout has closed and the command has exited.
    fn poll(&mut self) -> Option<SpeechEvent> {
        let session = self.session.as_mut()?;
        if session.output.is_none() {
            session.output = match session.rx.try_recv() {
                Ok(output) => Some(output),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    Some(Err("recognizer ended without a result".to_string()))
                }
            };
        }

        let status = match session.child.try_wait() {
            Ok(Some(status)) => Ok(status),
            Ok(None) => return None,
            Err(e) => Err(e.to_string()),
        };
        let output = session.output.take()?;
        let event = match (output, status) {
            (Err(e), _) | (Ok(_), Err(e)) => SpeechEvent::Error(e),
            (Ok(transcript), Ok(status)) if status.success() => {
                SpeechEvent::Transcript(transcript.trim().to_string())
            }
            (Ok(_), Ok(status)) => SpeechEvent::Error(format!("recognizer exited with {status}")),
        };
        self.session = None;
        Some(event)
    }
}

/// A command recognizer when one is configured, otherwise [`Unavailable`].
pub fn create_recognizer(command: Option<&str>) -> Box<dyn SpeechRecognizer> {
    match command.map(str::trim).filter(|c| !c.is_empty()) {
        Some(command) => Box::new(CommandRecognizer::new(command)),
        None => Box::new(Unavailable),
    }
}
