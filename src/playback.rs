//! Playback controller: renders an MP3 clip as audible sound on a
//! dedicated thread. The caller gets control back immediately; outcomes
//! come back over an mpsc channel so a failed decode or a missing output
//! device can never unwind into the UI.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use minimp3::{Decoder, Frame};

use crate::error::TtsError;
use crate::session::AudioClip;

/// Output stream rate. Most devices accept 48kHz stereo; the decoded clip
/// is resampled up to it.
const OUTPUT_SAMPLE_RATE: u32 = 48000;

pub enum PlaybackEvent {
    Finished,
    Failed(TtsError),
}

/// Fire-and-forget playback. Each call is an independent attempt; two
/// overlapping calls produce two overlapping streams.
pub fn play(clip: AudioClip, events: Sender<PlaybackEvent>) {
    std::thread::spawn(move || {
        let event = match play_blocking(&clip) {
            Ok(()) => PlaybackEvent::Finished,
            Err(e) => {
                eprintln!("Playback: {}", e);
                PlaybackEvent::Failed(e)
            }
        };
        // The UI may have shut down already; nobody left to notify is fine.
        let _ = events.send(event);
    });
}

fn play_blocking(clip: &AudioClip) -> Result<(), TtsError> {
    if clip.is_empty() {
        return Err(TtsError::PlaybackFailed(anyhow!("Empty audio buffer")));
    }
    let (samples, source_rate) = decode_mp3(clip.as_bytes())?;
    let samples = resample_linear(&samples, source_rate, OUTPUT_SAMPLE_RATE);
    let player = AudioPlayer::open(OUTPUT_SAMPLE_RATE)?;
    player.enqueue(samples);
    player.drain();
    Ok(())
}

/// Decode a whole MP3 buffer to mono PCM. Returns the samples and the
/// source sample rate reported by the frames.
fn decode_mp3(data: &[u8]) -> Result<(Vec<i16>, u32), TtsError> {
    let mut decoder = Decoder::new(Cursor::new(data));
    let mut samples: Vec<i16> = Vec::new();
    let mut source_rate = OUTPUT_SAMPLE_RATE;

    loop {
        match decoder.next_frame() {
            Ok(Frame {
                data,
                sample_rate,
                channels,
                ..
            }) => {
                source_rate = sample_rate as u32;
                samples.extend(downmix_to_mono(&data, channels));
            }
            Err(minimp3::Error::Eof) => break,
            // Junk between frames gets skipped, not fatal
            Err(minimp3::Error::SkippedData) => continue,
            Err(e) => {
                if samples.is_empty() {
                    return Err(TtsError::PlaybackFailed(anyhow!("MP3 decode error: {}", e)));
                }
                break;
            }
        }
    }

    if samples.is_empty() {
        return Err(TtsError::PlaybackFailed(anyhow!(
            "Clip contained no decodable audio frames"
        )));
    }
    Ok((samples, source_rate))
}

fn downmix_to_mono(data: &[i16], channels: usize) -> Vec<i16> {
    if channels <= 1 {
        return data.to_vec();
    }
    data.chunks(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / frame.len() as i32) as i16
        })
        .collect()
}

/// Simple linear resampling, good enough for speech clips.
fn resample_linear(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let new_len = (samples.len() as f64 / ratio) as usize;
    let mut output = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let src_pos = i as f64 * ratio;
        let src_idx = src_pos as usize;
        let frac = src_pos - src_idx as f64;

        let s1 = samples.get(src_idx).copied().unwrap_or(0);
        let s2 = samples.get(src_idx + 1).copied().unwrap_or(s1);

        let interpolated = s1 as f64 * (1.0 - frac) + s2 as f64 * frac;
        output.push(interpolated as i16);
    }

    output
}

/// Mono sample queue feeding a stereo cpal output stream. The stream pulls
/// from the queue in its callback; `drain` blocks until it has eaten
/// everything.
struct AudioPlayer {
    _stream: cpal::Stream,
    queue: Arc<Mutex<VecDeque<i16>>>,
}

impl AudioPlayer {
    fn open(sample_rate: u32) -> Result<Self, TtsError> {
        use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| TtsError::PlaybackFailed(anyhow!("No audio output device found")))?;

        // Stereo, since many devices refuse mono configs
        let config = cpal::StreamConfig {
            channels: 2,
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let queue: Arc<Mutex<VecDeque<i16>>> = Arc::new(Mutex::new(VecDeque::new()));

        // f32 output first, i16 as fallback for devices that only take it
        let queue_f32 = queue.clone();
        let stream = match device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut buf = queue_f32.lock().unwrap();
                for frame in data.chunks_mut(2) {
                    let sample = buf.pop_front().unwrap_or(0) as f32 / 32768.0;
                    for out in frame.iter_mut() {
                        *out = sample;
                    }
                }
            },
            |err| eprintln!("Playback: stream error: {}", err),
            None,
        ) {
            Ok(stream) => stream,
            Err(_) => {
                let queue_i16 = queue.clone();
                device
                    .build_output_stream(
                        &config,
                        move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                            let mut buf = queue_i16.lock().unwrap();
                            for frame in data.chunks_mut(2) {
                                let sample = buf.pop_front().unwrap_or(0);
                                for out in frame.iter_mut() {
                                    *out = sample;
                                }
                            }
                        },
                        |err| eprintln!("Playback: stream error: {}", err),
                        None,
                    )
                    .map_err(|e| {
                        TtsError::PlaybackFailed(anyhow!("Failed to open output stream: {}", e))
                    })?
            }
        };

        stream
            .play()
            .map_err(|e| TtsError::PlaybackFailed(anyhow!("Failed to start output stream: {}", e)))?;

        Ok(Self {
            _stream: stream,
            queue,
        })
    }

    fn enqueue(&self, samples: Vec<i16>) {
        if let Ok(mut buf) = self.queue.lock() {
            buf.extend(samples);
        }
    }

    /// Block until the callback has consumed the queue, plus a short grace
    /// period for whatever the device still has buffered.
    fn drain(&self) {
        loop {
            let len = self.queue.lock().map(|b| b.len()).unwrap_or(0);
            if len == 0 {
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        std::thread::sleep(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_passes_mono_through() {
        assert_eq!(downmix_to_mono(&[1, 2, 3], 1), vec![1, 2, 3]);
    }

    #[test]
    fn downmix_averages_stereo_pairs() {
        assert_eq!(downmix_to_mono(&[100, 200, -50, 50], 2), vec![150, 0]);
    }

    #[test]
    fn resample_is_identity_at_equal_rates() {
        let samples = vec![1, 2, 3, 4];
        assert_eq!(resample_linear(&samples, 24000, 24000), samples);
    }

    #[test]
    fn resample_doubles_length_from_24k_to_48k() {
        let samples: Vec<i16> = (0..240).collect();
        let out = resample_linear(&samples, 24000, 48000);
        assert_eq!(out.len(), 480);
        // Interpolated midpoints sit between their neighbors
        assert_eq!(out[0], 0);
        assert_eq!(out[2], 1);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_mp3(&[0u8; 512]).unwrap_err();
        assert!(matches!(err, TtsError::PlaybackFailed(_)));
    }

    #[test]
    fn empty_buffer_fails_to_decode() {
        let err = decode_mp3(&[]).unwrap_err();
        assert!(matches!(err, TtsError::PlaybackFailed(_)));
    }
}
