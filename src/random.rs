use rand::Rng;

/// Source of uniform samples in `[0, 1)`.
///
/// Every `rand::Rng` is one; tests can also script exact sequences.
pub trait UnitRandom {
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`, consuming exactly one sample.
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let idx = (self.next_unit() * len as f64) as usize;
        idx.min(len - 1)
    }
}

impl<R: Rng + ?Sized> UnitRandom for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

#[cfg(test)]
pub(crate) struct Scripted {
    values: Vec<f64>,
    next: usize,
}

#[cfg(test)]
impl Scripted {
    pub(crate) fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }

    pub(crate) fn consumed(&self) -> usize {
        self.next
    }
}

#[cfg(test)]
impl UnitRandom for Scripted {
    fn next_unit(&mut self) -> f64 {
        let v = self.values.get(self.next).copied().unwrap_or(0.0);
        self.next += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn index_is_uniform_buckets_of_the_unit_interval() {
        let mut r = Scripted::new(&[0.0, 0.24, 0.25, 0.5, 0.99]);
        assert_eq!(r.index(4), 0);
        assert_eq!(r.index(4), 0);
        assert_eq!(r.index(4), 1);
        assert_eq!(r.index(4), 2);
        assert_eq!(r.index(4), 3);
        assert_eq!(r.consumed(), 5);
    }

    #[test]
    fn rng_samples_stay_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
