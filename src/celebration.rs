use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{Duration, Instant};

/// How long a particle stays on screen
pub const PARTICLE_TTL: Duration = Duration::from_millis(1000);

/// Cosmetic spark positioned in percent-space of the drawing area
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u64,
    /// 0..100, left to right
    pub x: f64,
    /// 0..100, top to bottom
    pub y: f64,
    pub born: Instant,
}

impl Particle {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.born)
    }

    /// Fraction of the lifetime already used, 0..=1
    pub fn fade(&self, now: Instant, ttl: Duration) -> f64 {
        if ttl.is_zero() {
            return 1.0;
        }
        (self.age(now).as_secs_f64() / ttl.as_secs_f64()).min(1.0)
    }
}

/// Self-expiring list of particles. Nothing here feeds back into scoring.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    next_id: u64,
    ttl: Duration,
    rng: StdRng,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            next_id: 0,
            ttl: PARTICLE_TTL,
            rng,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn spawn(&mut self, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.particles.push(Particle {
            id,
            x: self.rng.gen_range(0.0..100.0),
            y: self.rng.gen_range(0.0..100.0),
            born: now,
        });
        id
    }

    pub fn burst(&mut self, count: usize, now: Instant) {
        for _ in 0..count {
            self.spawn(now);
        }
    }

    /// Drop every particle that has lived its full lifetime
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.particles.retain(|p| p.age(now) < ttl);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut field = ParticleField::with_seed(1);
        let now = Instant::now();
        let a = field.spawn(now);
        let b = field.spawn(now);
        assert_ne!(a, b);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_positions_in_percent_space() {
        let mut field = ParticleField::with_seed(9);
        field.burst(200, Instant::now());
        for p in field.iter() {
            assert!((0.0..100.0).contains(&p.x));
            assert!((0.0..100.0).contains(&p.y));
        }
    }

    #[test]
    fn test_particles_expire_after_ttl() {
        let mut field = ParticleField::with_seed(2);
        let t0 = Instant::now();
        field.burst(3, t0);
        field.spawn(t0 + Duration::from_millis(500));

        field.expire(t0 + Duration::from_millis(999));
        assert_eq!(field.len(), 4);

        field.expire(t0 + Duration::from_millis(1000));
        assert_eq!(field.len(), 1);

        field.expire(t0 + Duration::from_millis(1500));
        assert!(field.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut field = ParticleField::with_seed(3);
        field.burst(5, Instant::now());
        field.clear();
        assert!(field.is_empty());
    }

    #[test]
    fn test_ids_keep_increasing_after_clear() {
        let mut field = ParticleField::with_seed(4);
        let now = Instant::now();
        let first = field.spawn(now);
        field.clear();
        let second = field.spawn(now);
        assert!(second > first);
    }

    #[test]
    fn test_fade() {
        let t0 = Instant::now();
        let p = Particle {
            id: 0,
            x: 1.0,
            y: 1.0,
            born: t0,
        };
        assert_eq!(p.fade(t0, PARTICLE_TTL), 0.0);
        assert!((p.fade(t0 + Duration::from_millis(500), PARTICLE_TTL) - 0.5).abs() < 1e-9);
        assert_eq!(p.fade(t0 + Duration::from_secs(5), PARTICLE_TTL), 1.0);
    }
}
