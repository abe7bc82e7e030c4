//! Result-reveal confetti.
//!
//! An `AnimationSession` owns a batch of particles and a frame counter. The
//! browser loop only calls `step()` once per animation frame and paints what it
//! gets back; all motion lives here so it can be tested without a canvas.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::f64::consts::PI;

pub const PARTICLE_COUNT: usize = 180;
pub const FRAME_COUNT: u32 = 180;
pub const CONFETTI_COLORS: [&str; 5] = ["#ff006e", "#ffbe0b", "#3a86ff", "#06d6a0", "#fb5607"];

/// Tunables for one confetti burst.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConfettiSettings {
    pub particle_count: usize,
    /// Frames the session runs before it stops and clears the surface.
    pub frames: u32,
    pub colors: Vec<String>,
}

impl Default for ConfettiSettings {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            frames: FRAME_COUNT,
            colors: CONFETTI_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// One falling square. Position is its centre, rotation in radians.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
    pub color: String,
}

impl Particle {
    /// Random particle somewhere above a `width` x `height` viewport.
    pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64, colors: &[String]) -> Self {
        let color = if colors.is_empty() {
            CONFETTI_COLORS[0].to_string()
        } else {
            colors[rng.random_range(0..colors.len())].clone()
        };
        // Scaled unit samples so a zero-sized viewport never yields an empty range.
        Self {
            x: rng.random::<f64>() * width,
            y: -20.0 - rng.random::<f64>() * height,
            size: 5.0 + rng.random::<f64>() * 8.0,
            speed_y: 2.0 + rng.random::<f64>() * 4.0,
            speed_x: -2.0 + rng.random::<f64>() * 4.0,
            rotation: rng.random::<f64>() * PI,
            rotation_speed: -0.2 + rng.random::<f64>() * 0.4,
            color,
        }
    }

    fn advance(&mut self) {
        self.x += self.speed_x;
        self.y += self.speed_y;
        self.rotation += self.rotation_speed;
    }

    /// Where this particle is after `frames` further updates.
    pub fn at_frame(&self, frames: u32) -> Particle {
        let k = frames as f64;
        Particle {
            x: self.x + self.speed_x * k,
            y: self.y + self.speed_y * k,
            rotation: self.rotation + self.rotation_speed * k,
            ..self.clone()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Paint the particles and schedule another frame.
    Running,
    /// Last frame consumed; clear the surface and stop.
    Finished,
}

/// A single fire-and-forget burst.
#[derive(Clone, Debug)]
pub struct AnimationSession {
    particles: Vec<Particle>,
    frame_count: u32,
    total_frames: u32,
}

impl AnimationSession {
    pub fn launch<R: Rng>(
        settings: &ConfettiSettings,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Self {
        let particles = (0..settings.particle_count)
            .map(|_| Particle::spawn(rng, width, height, &settings.colors))
            .collect();
        Self {
            particles,
            frame_count: 0,
            total_frames: settings.frames,
        }
    }

    /// Advances every particle by one frame. After the final frame this is a
    /// no-op that keeps returning `Finished`.
    pub fn step(&mut self) -> FrameStatus {
        if self.is_finished() {
            return FrameStatus::Finished;
        }
        for p in &mut self.particles {
            p.advance();
        }
        self.frame_count += 1;
        if self.is_finished() {
            FrameStatus::Finished
        } else {
            FrameStatus::Running
        }
    }

    pub fn is_finished(&self) -> bool {
        self.frame_count >= self.total_frames
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// Seeded generator for a new burst. Uses the platform entropy source and falls
/// back to `fallback_seed` (a timestamp in the browser) when it is unavailable.
pub fn session_rng(fallback_seed: f64) -> SmallRng {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => SmallRng::seed_from_u64(u64::from_le_bytes(buf)),
        Err(err) => {
            tracing::warn!(%err, "entropy unavailable, seeding confetti from clock");
            SmallRng::seed_from_u64(fallback_seed.to_bits())
        }
    }
}
