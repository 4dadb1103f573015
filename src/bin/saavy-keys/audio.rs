//! Audio output for the keyboard screen
//!
//! Each keyboard session gets its own mixer pair. The backend half goes to
//! the voice cache; the mixer half is moved into the cpal callback, or kept
//! here and drained every tick when no device is available.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};

use saavy_keys::{
    synth::mixer::{mixer_pair, Mixer, MixerBackend, MixerConfig},
    MAX_BLOCK_SIZE,
};

enum Output {
    Device {
        // Dropping the stream stops the callback
        _stream: cpal::Stream,
        device: String,
        sample_rate: u32,
    },
    Offline {
        mixer: Mixer,
        reason: String,
    },
}

pub struct AudioOutput {
    output: Output,
}

impl AudioOutput {
    /// Open the default output device, falling back to a silent mixer.
    pub fn open(config: MixerConfig) -> (MixerBackend, AudioOutput) {
        match open_device(config) {
            Ok((backend, output)) => (backend, AudioOutput { output }),
            Err(err) => {
                log::warn!("no audio output, keyboard will be silent: {:#}", err);
                let (backend, mixer) = mixer_pair(config);
                let output = Output::Offline {
                    mixer,
                    reason: err.to_string(),
                };
                (backend, AudioOutput { output })
            }
        }
    }

    /// Keep an offline mixer's command queue from filling up.
    pub fn tick(&mut self) {
        if let Output::Offline { mixer, .. } = &mut self.output {
            mixer.drain_commands();
        }
    }

    pub fn status(&self) -> String {
        match &self.output {
            Output::Device {
                device,
                sample_rate,
                ..
            } => format!("{} @ {:.1}kHz", device, *sample_rate as f32 / 1000.0),
            Output::Offline { reason, .. } => format!("no audio ({})", reason),
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self.output, Output::Offline { .. })
    }
}

fn open_device(config: MixerConfig) -> EyreResult<(MixerBackend, Output)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let supported = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    if supported.sample_format() != cpal::SampleFormat::F32 {
        bail!("unsupported sample format {}", supported.sample_format());
    }

    let name = device.name().unwrap_or_else(|_| "default".to_string());
    let sample_rate = supported.sample_rate().0;
    let channels = supported.channels() as usize;

    let (backend, mut mixer) = mixer_pair(config.output_rate(sample_rate));
    let mut block = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &supported.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut block[..frames];
                    mixer.render_block(block);

                    // Mono to all channels
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames;
                }
            },
            |err| log::error!("audio stream error: {}", err),
            None,
        )
        .wrap_err("failed to build output stream")?;
    stream.play().wrap_err("failed to start output stream")?;

    log::info!(
        "audio output on {} at {} Hz, {} channels",
        name,
        sample_rate,
        channels
    );
    Ok((
        backend,
        Output::Device {
            _stream: stream,
            device: name,
            sample_rate,
        },
    ))
}
