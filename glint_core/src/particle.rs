// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-light particles and their brightness oscillator.
//!
//! Each [`Particle`] breathes independently:
//!
//! ```text
//! wave  = 0.5 + 0.5 · sin(t · angular_speed · 1000 + phase)
//! alpha = floor + (peak − floor) · wave
//! ```
//!
//! where `t` is the frame timestamp in milliseconds. `wave` stays in
//! `[0, 1]`, so `alpha` stays in `[floor, peak]`: a particle never vanishes
//! and never exceeds its own peak.

use alloc::vec::Vec;
use core::f64::consts::TAU;

use kurbo::{Point, Size};
use rand::Rng;

use crate::config::{ParticleConfig, Span};

/// One point light. Immutable once generated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Center, in canvas pixels.
    pub position: Point,
    /// Radius, in canvas pixels.
    pub radius: f64,
    /// Brightest alpha this particle reaches.
    pub peak: f64,
    /// Oscillator speed (radians per millisecond, before the ×1000 scale).
    pub angular_speed: f64,
    /// Starting point in the oscillator cycle.
    pub phase: f64,
}

impl Particle {
    /// Draws a particle positioned uniformly within `bounds`.
    pub fn sample<R: Rng>(rng: &mut R, bounds: Size, config: &ParticleConfig) -> Self {
        let x = Span::new(0.0, bounds.width).sample(rng);
        let y = Span::new(0.0, bounds.height).sample(rng);
        Self {
            position: Point::new(x, y),
            radius: config.radius.sample(rng),
            peak: config.peak.sample(rng),
            angular_speed: config.angular_speed.sample(rng),
            phase: config.phase.sample(rng),
        }
    }

    /// Oscillator value in `[0, 1]` at `timestamp_ms`.
    #[must_use]
    pub fn wave(&self, timestamp_ms: f64) -> f64 {
        0.5 + 0.5 * libm::sin(timestamp_ms * self.angular_speed * 1000.0 + self.phase)
    }

    /// Alpha in `[floor, peak]` at `timestamp_ms`.
    #[must_use]
    pub fn alpha(&self, timestamp_ms: f64, floor: f64) -> f64 {
        floor + (self.peak - floor) * self.wave(timestamp_ms)
    }

    /// Length of one full breath, in milliseconds of frame time.
    #[must_use]
    pub fn period_ms(&self) -> f64 {
        TAU / (self.angular_speed * 1000.0)
    }
}

/// Draws a fresh set of `config.count` particles over `bounds`.
pub fn generate<R: Rng>(rng: &mut R, bounds: Size, config: &ParticleConfig) -> Vec<Particle> {
    (0..config.count)
        .map(|_| Particle::sample(rng, bounds, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn generates_configured_count_within_bounds() {
        let config = ParticleConfig::hero();
        let bounds = Size::new(1280.0, 720.0);
        let particles = generate(&mut rng(), bounds, &config);
        assert_eq!(particles.len(), 160);

        let rect = Rect::from_origin_size(Point::ORIGIN, bounds);
        for p in &particles {
            assert!(rect.contains(p.position), "{:?} outside canvas", p.position);
            assert!(config.radius.contains(p.radius), "radius {}", p.radius);
            assert!(config.peak.contains(p.peak), "peak {}", p.peak);
            assert!(
                config.angular_speed.contains(p.angular_speed),
                "speed {}",
                p.angular_speed
            );
            assert!(p.phase >= 0.0 && p.phase < TAU, "phase {}", p.phase);
        }
    }

    #[test]
    fn alpha_stays_between_floor_and_peak() {
        let config = ParticleConfig::hero();
        let particles = generate(&mut rng(), Size::new(400.0, 300.0), &config);
        for p in &particles {
            let mut t = 0.0;
            while t < 120_000.0 {
                let a = p.alpha(t, config.floor_alpha);
                assert!(
                    a >= config.floor_alpha - 1e-12 && a <= p.peak + 1e-12,
                    "alpha {a} outside [{}, {}] at t={t}",
                    config.floor_alpha,
                    p.peak
                );
                t += 97.3;
            }
            assert!(p.peak <= 0.65, "peak {} above 0.65", p.peak);
        }
    }

    #[test]
    fn wave_hits_extremes_at_quarter_phases() {
        let p = Particle {
            position: Point::ORIGIN,
            radius: 1.0,
            peak: 0.5,
            angular_speed: 0.000_005,
            phase: 0.0,
        };
        let quarter = p.period_ms() / 4.0;
        assert!((p.wave(quarter) - 1.0).abs() < 1e-9, "crest at a quarter period");
        assert!((p.wave(3.0 * quarter) - 0.0).abs() < 1e-9, "trough at three quarters");
        assert!((p.alpha(3.0 * quarter, 0.04) - 0.04).abs() < 1e-9, "trough is the floor");
        assert!((p.alpha(quarter, 0.04) - 0.5).abs() < 1e-9, "crest is the peak");
    }

    #[test]
    fn phase_decorrelates_particles() {
        let a = Particle {
            position: Point::ORIGIN,
            radius: 1.0,
            peak: 0.5,
            angular_speed: 0.000_005,
            phase: 0.0,
        };
        let b = Particle { phase: 1.0, ..a };
        assert!((a.wave(0.0) - b.wave(0.0)).abs() > 0.1);
    }

    #[test]
    fn zero_sized_bounds_do_not_panic() {
        let particles = generate(&mut rng(), Size::ZERO, &ParticleConfig::hero());
        assert_eq!(particles.len(), 160);
        assert!(particles.iter().all(|p| p.position == Point::ORIGIN));
    }
}
