//! Scrolling parallax starfield (background decoration)

use rand::Rng;

use crate::consts::*;

#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Depth factor: speed multiplier and brightness
    pub z: f32,
    pub size: f32,
}

impl Star {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            x: rng.random::<f32>() * CANVAS_WIDTH,
            y: rng.random::<f32>() * CANVAS_HEIGHT,
            z: rng.random_range(0.5..2.0),
            size: if rng.random_bool(0.1) { 2.0 } else { 1.0 },
        }
    }

    /// Nearer stars are brighter
    pub fn brightness(&self) -> f32 {
        self.z / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        Self {
            stars: (0..count).map(|_| Star::random(rng)).collect(),
        }
    }

    /// Scroll down; stars leaving the bottom wrap to the top at a new column
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.y += STAR_SPEED_BASE * star.z * dt;
            if star.y > CANVAS_HEIGHT {
                star.y = 0.0;
                star.x = rng.random::<f32>() * CANVAS_WIDTH;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_stars_stay_on_field() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut field = Starfield::new(STAR_COUNT, &mut rng);
        assert_eq!(field.stars.len(), STAR_COUNT);
        for _ in 0..500 {
            field.update(0.1, &mut rng);
        }
        for star in &field.stars {
            assert!((0.0..=CANVAS_HEIGHT).contains(&star.y));
            assert!((0.0..=CANVAS_WIDTH).contains(&star.x));
        }
    }
}
