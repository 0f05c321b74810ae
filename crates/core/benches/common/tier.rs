use std::env;
use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTier {
    Quick,
    Full,
}

pub fn bench_tier() -> BenchTier {
    match env::var("GEOTHIN_BENCH_TIER").as_deref() {
        Ok("full") => BenchTier::Full,
        _ => BenchTier::Quick,
    }
}

impl BenchTier {
    pub fn sizes(self) -> &'static [usize] {
        match self {
            BenchTier::Quick => &[1_000, 10_000],
            BenchTier::Full => &[1_000, 10_000, 100_000],
        }
    }
}

pub fn configure_group<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, tier: BenchTier) {
    let (sample_size, measurement) = match tier {
        BenchTier::Quick => (20, Duration::from_secs(3)),
        BenchTier::Full => (30, Duration::from_secs(8)),
    };
    group.sample_size(sample_size);
    group.measurement_time(measurement);
}
