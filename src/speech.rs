use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};

/// Parameters for one utterance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voice<'a> {
    pub locale: &'a str,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// Fire-and-forget text-to-speech. Implementations never block on playback
/// and stay silent when speech is unavailable.
pub trait Speaker {
    fn speak(&mut self, text: &str, voice: Voice<'_>);

    fn is_available(&self) -> bool;
}

pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&mut self, _text: &str, _voice: Voice<'_>) {}

    fn is_available(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeechEngine {
    EspeakNg,
    Say,
}

impl SpeechEngine {
    pub fn for_platform() -> Self {
        if cfg!(target_os = "macos") {
            SpeechEngine::Say
        } else {
            SpeechEngine::EspeakNg
        }
    }

    pub fn program(self) -> &'static str {
        match self {
            SpeechEngine::EspeakNg => "espeak-ng",
            SpeechEngine::Say => "say",
        }
    }

    /// Arguments for speaking `text`. `say` only understands rate.
    pub fn args(self, text: &str, voice: Voice<'_>) -> Vec<String> {
        let rate = voice.rate.clamp(0.1, 10.0);
        match self {
            SpeechEngine::EspeakNg => {
                let pitch = voice.pitch.clamp(0.0, 2.0);
                let volume = voice.volume.clamp(0.0, 1.0);
                vec![
                    "-v".to_string(),
                    espeak_voice(voice.locale),
                    "-s".to_string(),
                    ((175.0 * rate).round() as u32).to_string(),
                    "-p".to_string(),
                    ((50.0 * pitch).round().min(99.0) as u32).to_string(),
                    "-a".to_string(),
                    ((100.0 * volume).round() as u32).to_string(),
                    "--".to_string(),
                    text.to_string(),
                ]
            }
            SpeechEngine::Say => vec![
                "-r".to_string(),
                ((175.0 * rate).round() as u32).to_string(),
                "--".to_string(),
                text.to_string(),
            ],
        }
    }
}

/// `ja-JP` becomes `ja`, `en-US` becomes `en-us`.
fn espeak_voice(locale: &str) -> String {
    let lower = locale.to_ascii_lowercase();
    match lower.split_once('-') {
        Some(("en", region)) => format!("en-{region}"),
        Some((lang, _)) => lang.to_string(),
        None => lower,
    }
}

/// Speaks by spawning a system speech command. A new utterance interrupts
/// the previous one. The first failed spawn disables the speaker.
pub struct CommandSpeaker {
    engine: SpeechEngine,
    program: String,
    current: Option<Child>,
    disabled: bool,
}

impl CommandSpeaker {
    pub fn new(engine: SpeechEngine) -> Self {
        Self {
            engine,
            program: engine.program().to_string(),
            current: None,
            disabled: false,
        }
    }

    fn stop_current(&mut self) {
        if let Some(mut child) = self.current.take() {
            if matches!(child.try_wait(), Ok(None)) {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

impl Default for CommandSpeaker {
    fn default() -> Self {
        Self::new(SpeechEngine::for_platform())
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str, voice: Voice<'_>) {
        let text = text.trim();
        if self.disabled || text.is_empty() {
            return;
        }
        self.stop_current();
        let spawned = Command::new(&self.program)
            .args(self.engine.args(text, voice))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => {
                debug!(program = %self.program, locale = voice.locale, "speaking");
                self.current = Some(child);
            }
            Err(e) => {
                warn!(program = %self.program, error = %e, "speech unavailable; disabling");
                self.disabled = true;
            }
        }
    }

    fn is_available(&self) -> bool {
        !self.disabled
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.stop_current();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(locale: &str) -> Voice<'_> {
        Voice {
            locale,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }

    #[test]
    fn test_espeak_voice_names() {
        assert_eq!(espeak_voice("ja-JP"), "ja");
        assert_eq!(espeak_voice("en-US"), "en-us");
        assert_eq!(espeak_voice("es-ES"), "es");
        assert_eq!(espeak_voice("he"), "he");
    }

    #[test]
    fn test_espeak_args_scale_parameters() {
        let args = SpeechEngine::EspeakNg.args("hello", voice("en-US"));
        assert_eq!(
            args,
            vec!["-v", "en-us", "-s", "175", "-p", "50", "-a", "100", "--", "hello"]
        );
    }

    #[test]
    fn test_say_args_only_rate() {
        let args = SpeechEngine::Say.args("hola", voice("es-ES"));
        assert_eq!(args, vec!["-r", "175", "--", "hola"]);
    }

    #[test]
    fn test_missing_program_disables_speaker() {
        let mut speaker = CommandSpeaker {
            engine: SpeechEngine::EspeakNg,
            program: "milim-no-such-speech-program".to_string(),
            current: None,
            disabled: false,
        };
        assert!(speaker.is_available());
        speaker.speak("hello", voice("en-US"));
        assert!(!speaker.is_available());
        assert!(speaker.current.is_none());
    }

    #[test]
    fn test_null_speaker_is_silent() {
        let mut speaker = NullSpeaker;
        speaker.speak("anything", voice("en-US"));
        assert!(!speaker.is_available());
    }
}
