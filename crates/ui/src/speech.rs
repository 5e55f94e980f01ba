use std::{
    env, io,
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Stdio},
};

use reader_core::{
    config::SpeechConfig,
    speech::{SpeechEngine, Utterance, Voice},
    SpeechError,
};
use tracing::{debug, info, warn};

/// Speaks by running an external program (`espeak-ng`, `say`, ...) with the
/// text as its last argument.
pub struct CommandSpeechEngine {
    program: PathBuf,
    args: Vec<String>,
    voice_flag: Option<String>,
    voices: Vec<Voice>,
    child: Option<Child>,
}

impl CommandSpeechEngine {
    /// `None` when the configured program is not installed.
    pub fn from_config(config: &SpeechConfig) -> Option<Self> {
        let (name, args) = config.command.split_first()?;
        let Some(program) = find_program(name) else {
            warn!("speech program {name} not found, read-aloud disabled");
            return None;
        };
        let voices = list_voices(&config.voices_command);
        info!(program = %program.display(), voices = voices.len(), "speech engine ready");
        Some(Self {
            program,
            args: args.to_vec(),
            voice_flag: config.voice_flag.clone(),
            voices,
            child: None,
        })
    }
}

impl SpeechEngine for CommandSpeechEngine {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        self.cancel();
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let (Some(flag), Some(voice)) = (&self.voice_flag, &utterance.voice) {
            cmd.arg(flag).arg(&voice.name);
        }
        cmd.arg(&utterance.text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        self.child = Some(cmd.spawn()?);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            debug!("speech process killed");
        }
    }

    fn poll_finished(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        let finished = has_exited(child.try_wait());
        if finished {
            self.child = None;
        }
        finished
    }
}

impl Drop for CommandSpeechEngine {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A child that can no longer be waited on counts as finished.
fn has_exited(status: io::Result<Option<ExitStatus>>) -> bool {
    match status {
        Ok(Some(status)) => {
            if !status.success() {
                warn!("speech process exited with {status}");
            }
            true
        }
        Ok(None) => false,
        Err(e) => {
            warn!("speech process lost: {e}");
            true
        }
    }
}

fn find_program(name: &str) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.components().count() > 1 {
        return direct.is_file().then(|| direct.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn list_voices(command: &[String]) -> Vec<Voice> {
    let Some((name, args)) = command.split_first() else {
        return Vec::new();
    };
    match Command::new(name).args(args).stderr(Stdio::null()).output() {
        Ok(output) => parse_voice_listing(&String::from_utf8_lossy(&output.stdout)),
        Err(e) => {
            warn!("could not list voices with {name}: {e}");
            Vec::new()
        }
    }
}

/// Reads `espeak-ng --voices` tables and `say -v ?` listings.
pub(crate) fn parse_voice_listing(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with("Pty") {
                return None;
            }
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() >= 4 && cols[0].parse::<u32>().is_ok() {
                // Pty Language Age/Gender VoiceName File
                return Some(Voice {
                    name: cols[3].to_string(),
                    lang: Some(cols[1].to_string()),
                });
            }
            let described = line.split('#').next().unwrap_or(line);
            let mut words: Vec<&str> = described.split_whitespace().collect();
            let lang = words.pop()?;
            if words.is_empty() {
                return None;
            }
            Some(Voice {
                name: words.join(" "),
                lang: Some(lang.to_string()),
            })
        })
        .collect()
}
