//! Weighted categorical sampling

use rand::Rng;

use super::GenerateError;

/// A categorical distribution over fixed choices
///
/// Holds the cumulative weights so each draw is one uniform sample and a
/// binary search.
#[derive(Debug, Clone)]
pub struct WeightedChoice<T> {
    choices: Vec<T>,
    cumulative: Vec<f64>,
}

impl<T> WeightedChoice<T> {
    /// Build a distribution from `(choice, weight)` pairs
    ///
    /// Weights need not sum to one. Zero weights are allowed, negative or
    /// non-finite weights are not, and at least one weight must be positive.
    pub fn new(pairs: impl IntoIterator<Item = (T, f64)>) -> Result<Self, GenerateError> {
        let mut choices = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0;

        for (choice, weight) in pairs {
            if !weight.is_finite() || weight < 0.0 {
                return Err(GenerateError::InvalidConfig(format!(
                    "Invalid weight: {}",
                    weight
                )));
            }
            total += weight;
            choices.push(choice);
            cumulative.push(total);
        }

        if total <= 0.0 {
            return Err(GenerateError::InvalidConfig(
                "Weighted choice needs a positive total weight".to_string(),
            ));
        }

        Ok(Self {
            choices,
            cumulative,
        })
    }

    /// Draw one choice
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let total = self.cumulative[self.cumulative.len() - 1];
        let x = rng.gen_range(0.0..total);
        let idx = self.cumulative.partition_point(|c| *c <= x);
        &self.choices[idx.min(self.choices.len() - 1)]
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rejects_bad_weights() {
        assert!(WeightedChoice::new(vec![("a", -1.0)]).is_err());
        assert!(WeightedChoice::new(vec![("a", 0.0), ("b", 0.0)]).is_err());
        assert!(WeightedChoice::<&str>::new(Vec::new()).is_err());
        assert!(WeightedChoice::new(vec![("a", f64::NAN)]).is_err());
    }

    #[test]
    fn test_zero_weight_never_drawn() {
        let choice = WeightedChoice::new(vec![("never", 0.0), ("always", 3.0), ("gone", 0.0)])
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(*choice.sample(&mut rng), "always");
        }
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let choice = WeightedChoice::new(vec![(0usize, 60.0), (1, 30.0), (2, 10.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 3];
        for _ in 0..20_000 {
            counts[*choice.sample(&mut rng)] += 1;
        }
        assert!(counts[0] > counts[1] && counts[1] > counts[2]);
        let share = counts[0] as f64 / 20_000.0;
        assert!((share - 0.6).abs() < 0.03, "share was {}", share);
    }
}
