// File: crates/chart-geometry/src/scale.rs
// Summary: Domain intervals and the linear domain -> pixel scale, degenerate-domain safe.

/// Value-space interval an axis covers. `min` is not required to be below `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub const fn new(min: f64, max: f64) -> Self { Self { min, max } }

    /// Domain spanning every value yielded, or `None` when the iterator is empty
    /// or holds only non-finite values.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        (min <= max).then_some(Self { min, max })
    }

    pub fn is_finite(&self) -> bool { self.min.is_finite() && self.max.is_finite() }
    pub fn is_degenerate(&self) -> bool { self.min == self.max }
    pub fn span(&self) -> f64 { self.max - self.min }

    /// Inclusive containment regardless of orientation.
    pub fn contains(&self, v: f64) -> bool {
        let (lo, hi) = self.ordered();
        v >= lo && v <= hi
    }

    /// `(low, high)` regardless of orientation.
    pub fn ordered(&self) -> (f64, f64) {
        if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) }
    }

    /// Widen a zero-width domain symmetrically by `pad` on both sides.
    pub fn widen_if_degenerate(self, pad: f64) -> Self {
        if self.is_degenerate() { Self::new(self.min - pad, self.max + pad) } else { self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mapping {
    /// Non-finite or zero-width domain: every value lands on one pixel.
    Constant(f64),
    Linear,
}

/// Linear mapping from a data domain onto a pixel range. No clamping:
/// out-of-domain values extrapolate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: Domain,
    range: (f64, f64),
    mapping: Mapping,
}

impl LinearScale {
    pub fn new(domain: Domain, range: (f64, f64)) -> Self {
        let (r0, r1) = range;
        let mapping = if !domain.is_finite() {
            Mapping::Constant(r0)
        } else if domain.is_degenerate() {
            Mapping::Constant((r0 + r1) * 0.5)
        } else {
            Mapping::Linear
        };
        Self { domain, range, mapping }
    }

    pub fn domain(&self) -> Domain { self.domain }
    pub fn range(&self) -> (f64, f64) { self.range }

    /// Domain value -> pixel.
    #[inline]
    pub fn scale(&self, value: f64) -> f64 {
        match self.mapping {
            Mapping::Constant(px) => px,
            Mapping::Linear => {
                let (r0, r1) = self.range;
                let d = self.domain;
                r0 + ((value - d.min) / (d.max - d.min)) * (r1 - r0)
            }
        }
    }

    /// Pixel -> domain value. Constant scales and zero-width ranges invert to the domain start.
    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let (r0, r1) = self.range;
        match self.mapping {
            Mapping::Linear if r1 != r0 => {
                let d = self.domain;
                d.min + ((px - r0) / (r1 - r0)) * (d.max - d.min)
            }
            _ => self.domain.min,
        }
    }
}

/// Closure form of [`LinearScale`]: `linear_scale(domain, range)(value)`.
pub fn linear_scale(domain: Domain, range: (f64, f64)) -> impl Fn(f64) -> f64 {
    let s = LinearScale::new(domain, range);
    move |v| s.scale(v)
}
