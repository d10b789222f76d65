//! The completion chime.
//!
//! Three ascending sine tones (a C major triad) staggered by 100 ms, each
//! with a short linear attack and an exponential decay. The chime is
//! rendered to a WAV file once and handed to whichever system player is
//! available. Without a player the terminal bell is requested instead; the
//! owner of the terminal rings it.

use std::f64::consts::TAU;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::error::PomodoroError;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 22_050;

/// Tone frequencies in Hz: C5, E5, G5.
pub const TONES: [f64; 3] = [523.25, 659.25, 783.99];

const STAGGER: f64 = 0.1;
const TONE_LENGTH: f64 = 0.8;
const ATTACK: f64 = 0.05;
const PEAK_GAIN: f64 = 0.15;
const FLOOR_GAIN: f64 = 0.01;

/// Players tried in order, each invoked as `<player> <file>`.
const PLAYERS: [&str; 3] = ["paplay", "aplay", "afplay"];

/// Gain of a single tone `t` seconds after it starts.
#[must_use]
pub fn envelope(t: f64) -> f64 {
    if !(0.0..TONE_LENGTH).contains(&t) {
        0.0
    } else if t < ATTACK {
        PEAK_GAIN * t / ATTACK
    } else {
        let decay = (t - ATTACK) / (TONE_LENGTH - ATTACK);
        PEAK_GAIN * (FLOOR_GAIN / PEAK_GAIN).powf(decay)
    }
}

/// Total chime length in seconds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn duration_secs() -> f64 {
    STAGGER * (TONES.len() - 1) as f64 + TONE_LENGTH
}

/// Render the chime as 16-bit mono PCM.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render(sample_rate: u32) -> Vec<i16> {
    let rate = f64::from(sample_rate);
    let len = (duration_secs() * rate).round() as usize;

    (0..len)
        .map(|n| {
            let t = n as f64 / rate;
            let value: f64 = TONES
                .iter()
                .enumerate()
                .map(|(i, freq)| {
                    let local = t - STAGGER * i as f64;
                    envelope(local) * (TAU * freq * local).sin()
                })
                .sum();
            (value.clamp(-1.0, 1.0) * f64::from(i16::MAX)) as i16
        })
        .collect()
}

/// Wrap PCM samples in a canonical 44-byte-header WAV container.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + samples.len() * 2);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }

    out
}

/// A pending terminal bell, raised from the player thread.
#[derive(Debug, Clone, Default)]
pub struct BellSignal(Arc<AtomicBool>);

impl BellSignal {
    /// Create a lowered signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a bell.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a bell was requested since the last call.
    #[must_use]
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Plays the rendered chime through a system audio player.
#[derive(Debug, Clone)]
pub struct ChimePlayer {
    path: PathBuf,
    players: Vec<String>,
    bell: BellSignal,
}

impl ChimePlayer {
    /// Render the chime to `path` unless it is already there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn prepare(path: &Path) -> Result<Self, PomodoroError> {
        if !path.exists() {
            let wav = encode_wav(&render(SAMPLE_RATE), SAMPLE_RATE);
            std::fs::write(path, wav)?;
            tracing::debug!(path = %path.display(), "rendered chime");
        }

        Ok(Self {
            path: path.to_path_buf(),
            players: PLAYERS.iter().map(ToString::to_string).collect(),
            bell: BellSignal::new(),
        })
    }

    /// Path of the rendered chime.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Handle raised when no player could play the chime.
    #[must_use]
    pub fn bell(&self) -> BellSignal {
        self.bell.clone()
    }

    /// Play in the background. Raises the bell signal if no player works.
    pub fn play(&self) -> JoinHandle<()> {
        let path = self.path.clone();
        let players = self.players.clone();
        let bell = self.bell.clone();

        std::thread::spawn(move || {
            for player in &players {
                let played = Command::new(player)
                    .arg(&path)
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .is_ok_and(|status| status.success());
                if played {
                    tracing::trace!(player = %player, "chime played");
                    return;
                }
            }

            tracing::debug!("no audio player available, requesting bell");
            bell.raise();
        })
    }
}

/// Write the terminal bell to `out`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn ring_bell(out: &mut impl Write) -> io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        assert_eq!(envelope(-0.01), 0.0);
        assert_eq!(envelope(0.0), 0.0);
        assert!((envelope(ATTACK) - PEAK_GAIN).abs() < 1e-9);
        assert!(envelope(0.4) < PEAK_GAIN);
        assert!(envelope(0.4) > FLOOR_GAIN);
        assert!((envelope(TONE_LENGTH - 1e-9) - FLOOR_GAIN).abs() < 1e-4);
        assert_eq!(envelope(TONE_LENGTH), 0.0);
    }

    #[test]
    fn test_tones_ascend() {
        assert!(TONES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_length_and_level() {
        let samples = render(SAMPLE_RATE);
        assert_eq!(samples.len(), 22_050);

        let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap();
        // Three tones at 0.15 peak gain never clip.
        assert!(peak > 0);
        assert!(f64::from(peak) <= 0.45 * f64::from(i16::MAX) + 1.0);
    }

    #[test]
    fn test_wav_header() {
        let wav = encode_wav(&[0, 1, -1], 8000);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 6);
        assert_eq!(wav.len(), 44 + 6);
    }

    #[test]
    fn test_missing_players_raise_bell() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut player = ChimePlayer::prepare(&dir.path().join("chime.wav")).unwrap();
        player.players = vec!["pomodoro-test-no-such-player".to_string()];
        let bell = player.bell();

        assert!(!bell.take());
        player.play().join().unwrap();
        assert!(bell.take());
        assert!(!bell.take());
    }

    #[test]
    fn test_ring_bell_writes_bel() {
        let mut out = Vec::new();
        ring_bell(&mut out).unwrap();
        assert_eq!(out, b"\x07");
    }

    #[test]
    fn test_prepare_writes_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chime.wav");

        let player = ChimePlayer::prepare(&path).unwrap();
        assert_eq!(player.path(), path.as_path());
        let first = std::fs::metadata(&path).unwrap().len();
        assert_eq!(first, 44 + 22_050 * 2);

        std::fs::write(&path, b"keep").unwrap();
        ChimePlayer::prepare(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"keep");
    }
}
