//! Mouse-trail particle engine.
//!
//! Every pointer move appends a burst of particles at the pointer. Each frame the
//! whole surface is cleared, every particle moves by its velocity (no delta-time
//! scaling, so frame rate sets speed), shrinks by the configured decay and is drawn,
//! and particles whose radius reached zero are dropped.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::PageConfig;
use crate::host::{Point, RenderSurface};

/// Spawn radii lie in `(MIN_RADIUS, MAX_RADIUS]`.
pub const MIN_RADIUS: f64 = 1.0;
pub const MAX_RADIUS: f64 = 6.0;
pub const MAX_SPEED: f64 = 1.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Particle {
    fn random(at: Point, rng: &mut impl Rng) -> Self {
        Self {
            x: at.x,
            y: at.y,
            radius: MAX_RADIUS - rng.gen_range(0.0..MAX_RADIUS - MIN_RADIUS),
            dx: rng.gen_range(-MAX_SPEED..=MAX_SPEED),
            dy: rng.gen_range(-MAX_SPEED..=MAX_SPEED),
        }
    }

    fn step(&mut self, decay: f64) {
        self.x += self.dx;
        self.y += self.dy;
        self.radius -= decay;
    }

    pub fn is_alive(&self) -> bool {
        self.radius > 0.0
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

pub struct ParticleEngine<S> {
    surface: S,
    particles: Vec<Particle>,
    rng: StdRng,
    burst_size: usize,
    decay: f64,
    color: String,
}

impl<S: RenderSurface> ParticleEngine<S> {
    pub fn new(surface: S, config: &PageConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            surface,
            particles: Vec::new(),
            rng,
            burst_size: config.burst_size,
            decay: config.particle_decay,
            color: config.particle_color.clone(),
        }
    }

    /// Append one burst of fresh particles at `at`.
    pub fn spawn_burst(&mut self, at: Point) {
        self.particles.reserve(self.burst_size);
        for _ in 0..self.burst_size {
            let p = Particle::random(at, &mut self.rng);
            self.particles.push(p);
        }
    }

    /// One animation frame: clear, move + shrink + draw, then cull.
    pub fn advance_frame(&mut self) {
        let region = self.surface.full_rect();
        self.surface.clear(region);
        for p in &mut self.particles {
            p.step(self.decay);
            // Canvas rejects negative arc radii; dying particles are skipped, not drawn.
            if p.is_alive() {
                self.surface.fill_circle(p.position(), p.radius, &self.color);
            }
        }
        self.particles.retain(Particle::is_alive);
    }

    /// Match the surface to the viewport. Negative or NaN sizes saturate to 0.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.set_dimensions(width as u32, height as u32);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
