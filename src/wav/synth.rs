//! Sine synthesis of a tone timeline

use crate::error::{Error, Result};
use crate::play::resolver::ToneEvent;
use std::f64::consts::PI;

/// Peak amplitude of a rendered tone
pub const AMPLITUDE: f64 = 32767.0;

/// Rate the tone phase is computed against, whatever the output rate
pub const PHASE_RATE: f64 = 44100.0;

/// Number of samples an event of `duration` seconds occupies
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    (duration * sample_rate as f64).round().max(0.0) as usize
}

/// Render tone events to a flat sample buffer
///
/// The phase restarts at zero for every event. Rests produce zeros.
pub fn render(events: &[ToneEvent], sample_rate: u32) -> Result<Vec<f64>> {
    let total_duration: f64 = events.iter().map(|e| e.duration).sum();
    let reserve = (total_duration * sample_rate as f64).ceil();
    if !reserve.is_finite() || reserve >= usize::MAX as f64 {
        log::error!("Could not allocate enough memory for {total_duration}s of audio");
        return Err(Error::Allocation {
            samples: usize::MAX,
        });
    }
    let reserve = reserve.max(0.0) as usize + 1;

    let mut samples = Vec::new();
    if samples.try_reserve_exact(reserve).is_err() {
        log::error!("Could not allocate enough memory for {reserve} samples");
        return Err(Error::Allocation { samples: reserve });
    }

    for event in events {
        add_sound(&mut samples, event, sample_rate)?;
    }

    log::debug!("Rendered {} samples at {} Hz", samples.len(), sample_rate);
    Ok(samples)
}

fn add_sound(samples: &mut Vec<f64>, event: &ToneEvent, sample_rate: u32) -> Result<()> {
    let count = sample_count(event.duration, sample_rate);
    if samples.try_reserve(count).is_err() {
        return Err(Error::Allocation {
            samples: samples.len().saturating_add(count),
        });
    }

    if event.is_rest() {
        samples.resize(samples.len() + count, 0.0);
        return Ok(());
    }

    let step = 2.0 * PI * event.frequency / PHASE_RATE;
    samples.extend((0..count).map(|i| AMPLITUDE * (step * i as f64).sin()));
    Ok(())
}
