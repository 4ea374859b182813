//! Uniform draws for signal generation. Production uses a seedable
//! `fastrand::Rng`; tests script the exact draw sequence.

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn next_f64(&mut self) -> f64 {
        self.f64()
    }
}

/// Entropy-seeded unless `seed` is given.
pub fn rng_from_seed(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    }
}

/// Uniform integer in the inclusive range `lo..=hi`.
pub fn uniform_int(rng: &mut dyn RandomSource, lo: u32, hi: u32) -> u32 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let span = hi - lo;
    let offset = (unit_draw(rng) * f64::from(span + 1)).floor() as u32;
    lo + offset.min(span)
}

/// Fisher–Yates shuffle driven by `rng`.
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = uniform_int(rng, 0, i as u32) as usize;
        items.swap(i, j);
    }
}

/// One draw clamped into `[0, 1)`; scripted sources may hand back anything.
pub fn unit_draw(rng: &mut dyn RandomSource) -> f64 {
    let r = rng.next_f64();
    if r.is_nan() || r < 0.0 {
        0.0
    } else if r >= 1.0 {
        1.0 - f64::EPSILON
    } else {
        r
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: Vec<f64>,
    pos: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "scripted random needs at least one draw");
        Self { draws, pos: 0 }
    }

    pub fn constant(r: f64) -> Self {
        Self::new(vec![r])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let r = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        r
    }
}
