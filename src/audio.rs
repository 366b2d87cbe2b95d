/*
 * @file audio.rs
 * @brief Microphone capture and WAV encoding for voice mode
 * @author Kevin Thomas
 * @date 2025
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Audio recording functionality.
//!
//! This module handles microphone input recording using CPAL and encodes the
//! captured PCM as an in-memory WAV payload for the recognizer. CPAL is only
//! compiled in with the `microphone` feature.

use std::io::Cursor;
use std::time::Duration;

use anyhow::{Context, Result};
use hound::{WavSpec, WavWriter};

/// Sample rate for audio recording (16kHz).
///
/// Value is expressed in Hertz and matches what the recognizer is told.
pub const SAMPLE_RATE: u32 = 16000;

/// Number of audio channels (mono).
const CHANNELS: u16 = 1;

/// Bits per sample for WAV encoding.
const BITS_PER_SAMPLE: u16 = 16;

/// Length of the capture window for each voice turn.
pub const LISTEN_TIMEOUT: Duration = Duration::from_secs(5);

/// Minimum RMS amplitude considered speech.
const SILENCE_RMS_THRESHOLD: f32 = 150.0;

/// A source of recorded speech.
pub trait Microphone: Send + Sync {
    /// Records for `window` and returns 16 kHz mono PCM samples.
    ///
    /// # Errors
    /// Returns an error if no device is available or the stream fails.
    fn capture(&self, window: Duration) -> Result<Vec<i16>>;
}

/// The system default input device.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultMicrophone;

impl Microphone for DefaultMicrophone {
    fn capture(&self, window: Duration) -> Result<Vec<i16>> {
        record_audio(window)
    }
}

/// Records audio from the default input device for a fixed duration.
///
/// # Parameters
/// * `window` - How long the stream stays open.
///
/// # Returns
/// A vector of 16-bit PCM audio samples.
///
/// # Errors
/// Returns an error if:
/// - No input device is available
/// - The audio stream cannot be created
/// - Recording fails
#[cfg(feature = "microphone")]
pub fn record_audio(window: Duration) -> Result<Vec<i16>> {
    use cpal::traits::StreamTrait;

    let device = capture::default_input_device()?;
    let config = capture::input_config();
    let samples = capture::shared_samples();
    let stream = capture::build_input_stream(&device, &config, samples.clone())?;
    stream.play()?;
    std::thread::sleep(window);
    drop(stream);
    let guard = samples
        .lock()
        .map_err(|_| anyhow::anyhow!("Sample buffer poisoned"))?;
    Ok(guard.clone())
}

/// Stand-in used when the crate is built without the `microphone` feature.
///
/// # Errors
/// Always fails, so voice turns degrade to empty input.
#[cfg(not(feature = "microphone"))]
pub fn record_audio(_window: Duration) -> Result<Vec<i16>> {
    anyhow::bail!(
        "microphone capture is not available in this build (enable the `microphone` feature)"
    )
}

/// Checks that a microphone can be opened before voice mode starts.
///
/// # Errors
/// Returns an error if no input device exists.
#[cfg(feature = "microphone")]
pub fn ensure_input_device() -> Result<()> {
    capture::default_input_device().map(|_| ())
}

/// Stand-in used when the crate is built without the `microphone` feature.
///
/// # Errors
/// Always fails: this build cannot capture audio.
#[cfg(not(feature = "microphone"))]
pub fn ensure_input_device() -> Result<()> {
    anyhow::bail!("this build has no microphone support (enable the `microphone` feature)")
}

/// Encodes samples as a 16 kHz mono 16-bit WAV file in memory.
///
/// # Parameters
/// * `samples` - Signed 16-bit PCM frames.
///
/// # Returns
/// The complete WAV file bytes, header included.
///
/// # Errors
/// Returns an error if the WAV writer fails.
pub fn encode_wav(samples: &[i16]) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).context("Failed to start WAV stream")?;
        for &sample in samples {
            writer.write_sample(sample)?;
        }
        writer.finalize().context("Failed to finalize WAV stream")?;
    }
    Ok(cursor.into_inner())
}

/// Detects whether audio samples contain meaningful speech content.
///
/// # Details
/// Compares the root mean square energy of the signal against a fixed
/// threshold so silent captures are not sent for recognition.
pub fn contains_speech(samples: &[i16]) -> bool {
    if samples.is_empty() {
        return false;
    }
    let energy = samples
        .iter()
        .map(|sample| (*sample as f32).powi(2))
        .sum::<f32>()
        / samples.len() as f32;
    energy.sqrt() >= SILENCE_RMS_THRESHOLD
}

#[cfg(feature = "microphone")]
mod capture {
    use std::sync::{Arc, Mutex};

    use anyhow::Result;
    use cpal::traits::{DeviceTrait, HostTrait};
    use cpal::{Device, Stream, StreamConfig, StreamError};
    use tracing::warn;

    use super::{CHANNELS, SAMPLE_RATE};

    /// Locates the system default input device.
    ///
    /// # Errors
    /// Returns an error when the user has no available microphone.
    pub(super) fn default_input_device() -> Result<Device> {
        cpal::default_host()
            .default_input_device()
            .ok_or_else(|| anyhow::anyhow!("No input device"))
    }

    /// Builds the CPAL stream configuration used by the recorder.
    pub(super) fn input_config() -> StreamConfig {
        StreamConfig {
            channels: CHANNELS,
            sample_rate: cpal::SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        }
    }

    /// Creates the shared buffer that accumulates captured samples.
    pub(super) fn shared_samples() -> Arc<Mutex<Vec<i16>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    /// Builds and configures the CPAL input stream.
    ///
    /// # Errors
    /// Returns any stream-construction issues wrapped in [`anyhow::Error`].
    pub(super) fn build_input_stream(
        device: &Device,
        config: &StreamConfig,
        samples: Arc<Mutex<Vec<i16>>>,
    ) -> Result<Stream> {
        device
            .build_input_stream(
                config,
                move |data: &[f32], _: &_| push_samples(&samples, data),
                log_stream_error,
                None,
            )
            .map_err(|err| anyhow::anyhow!(err))
    }

    /// Converts floating-point frames into 16-bit PCM and appends them to the buffer.
    pub(super) fn push_samples(buffer: &Arc<Mutex<Vec<i16>>>, data: &[f32]) {
        if let Ok(mut guard) = buffer.lock() {
            guard.extend(data.iter().map(|&sample| (sample * i16::MAX as f32) as i16));
        }
    }

    fn log_stream_error(error: StreamError) {
        warn!(error = %error, "audio stream error");
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_wav_produces_riff_header() {
        let samples = vec![0_i16, i16::MAX / 2, -i16::MAX / 2];
        let bytes = encode_wav(&samples).expect("encode wav");
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(bytes.len(), 44 + samples.len() * 2);
    }

    #[test]
    fn encoded_wav_reads_back() {
        let samples = vec![10_i16, -10, 300];
        let bytes = encode_wav(&samples).unwrap();
        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
        assert_eq!(reader.spec().channels, 1);
        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn contains_speech_requires_energy() {
        assert!(!contains_speech(&[]));
        assert!(!contains_speech(&[0_i16; 1600]));
        let loud = vec![i16::MAX / 2; 1600];
        assert!(contains_speech(&loud));
    }

    #[cfg(not(feature = "microphone"))]
    #[test]
    fn capture_without_feature_fails_cleanly() {
        let err = DefaultMicrophone.capture(LISTEN_TIMEOUT).unwrap_err();
        assert!(err.to_string().contains("microphone"));
        assert!(ensure_input_device().is_err());
    }
}
