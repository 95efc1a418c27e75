use crate::mesh_data::VERTEX_COUNT;
use gl::types::GLfloat;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{SystemTime, UNIX_EPOCH};

/// one rgb triple per vertex
pub const COLOR_VALUES: usize = VERTEX_COUNT * 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorSeed {
    /// seconds since the epoch, so every run looks different
    WallClock,
    Fixed(u64),
}

impl ColorSeed {
    pub fn resolve(self) -> u64 {
        match self {
            ColorSeed::Fixed(seed) => seed,
            ColorSeed::WallClock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

/// Every channel is drawn from a uniform `[0, 1)`.
pub fn generate_colors(seed: u64) -> Vec<GLfloat> {
    let mut rng = StdRng::seed_from_u64(seed);
    Uniform::new(0.0, 1.0)
        .sample_iter(&mut rng)
        .take(COLOR_VALUES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_channel_in_unit_interval() {
        for seed in [0, 1, 42, u64::MAX] {
            let colors = generate_colors(seed);
            assert_eq!(colors.len(), 108);
            assert!(colors.iter().all(|c| (0.0..1.0).contains(c)));
        }
    }

    #[test]
    fn fixed_seed_reproduces() {
        assert_eq!(generate_colors(7), generate_colors(7));
        assert_ne!(generate_colors(7), generate_colors(8));
        assert_eq!(ColorSeed::Fixed(7).resolve(), 7);
    }
}
