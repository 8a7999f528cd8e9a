//! Random site sets (uniform in a box + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler for site sets used by tests,
//!   benchmarks, and the CLI. The same `(seed, index)` token always yields the
//!   same sites.
//!
//! Code cross-refs: `sites::prepare`, `sweep::compute`

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::Point;
use crate::sites::prepare;

/// Axis-aligned sampling box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub min: Point,
    pub max: Point,
}

impl Default for Bounds2 {
    fn default() -> Self {
        Self {
            min: Vector2::new(0.0, 0.0),
            max: Vector2::new(100.0, 100.0),
        }
    }
}

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SiteCfg {
    pub count: usize,
    pub bounds: Bounds2,
    /// Snap coordinates to integers (produces co-height and collinear sites).
    pub integer: bool,
}

impl Default for SiteCfg {
    fn default() -> Self {
        Self {
            count: 64,
            bounds: Bounds2::default(),
            integer: false,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer over seed and index.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw up to `cfg.count` distinct sites in sweep order.
///
/// Fewer sites come back only when snapping to integers produced duplicates.
pub fn draw_sites(cfg: SiteCfg, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.to_std_rng();
    let lo = cfg.bounds.min;
    let hi = cfg.bounds.max;
    let pts: Vec<Point> = (0..cfg.count)
        .map(|_| {
            let x = lo.x + rng.gen::<f64>() * (hi.x - lo.x);
            let y = lo.y + rng.gen::<f64>() * (hi.y - lo.y);
            if cfg.integer {
                Vector2::new(x.round(), y.round())
            } else {
                Vector2::new(x, y)
            }
        })
        .collect();
    prepare(&pts)
}
