use std::env;

use geothin_core::Coordinates;

pub fn bench_seed() -> u64 {
    env::var("GEOTHIN_BENCH_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0xC0FFEE)
}

/// Seeded xorshift generator.
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_unit(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x as f64 / u64::MAX as f64
    }

    /// Uniform lon/lat point inside `[lon0, lon0 + span] x [lat0, lat0 + span]`.
    pub fn point_in(&mut self, lon0: f64, lat0: f64, span: f64) -> [f64; 2] {
        [lon0 + self.next_unit() * span, lat0 + self.next_unit() * span]
    }
}

/// Occurrence-like cloud: clustered hot spots over a uniform background.
pub fn occurrence_cloud(n: usize, seed: u64) -> Coordinates {
    let mut rng = XorShift64::new(seed);
    let hot_spots: Vec<[f64; 2]> = (0..8).map(|_| rng.point_in(-10.0, 35.0, 8.0)).collect();
    (0..n)
        .map(|i| {
            if i % 3 == 0 {
                rng.point_in(-10.0, 35.0, 8.0)
            } else {
                let c = hot_spots[i % hot_spots.len()];
                rng.point_in(c[0], c[1], 0.3)
            }
        })
        .collect()
}
