//! Priority-tiered random choice.
//!
//! Agents collect candidate cells with a priority tier and then pick uniformly
//! among the candidates of the best tier seen. Offering a candidate from a
//! better tier discards everything collected so far.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Tiered<T> {
    tier: u8,
    items: Vec<T>,
}

impl<T> Default for Tiered<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tiered<T> {
    pub fn new() -> Self {
        Self {
            tier: 0,
            items: Vec::with_capacity(8),
        }
    }

    /// Offer a candidate. Higher tiers win.
    pub fn offer(&mut self, tier: u8, item: T) {
        if self.items.is_empty() || tier > self.tier {
            self.items.clear();
            self.tier = tier;
            self.items.push(item);
        } else if tier == self.tier {
            self.items.push(item);
        }
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.items.len()
    }

    /// Tier of the surviving candidates, if any
    #[cfg(test)]
    fn best_tier(&self) -> Option<u8> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.tier)
        }
    }

    #[cfg(test)]
    fn candidates(&self) -> &[T] {
        &self.items
    }
}

impl<T: Copy> Tiered<T> {
    /// Pick one surviving candidate uniformly at random
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
        self.items.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_picks_nothing() {
        let tiered: Tiered<u32> = Tiered::new();
        assert!(tiered.is_empty());
        assert_eq!(tiered.best_tier(), None);
        assert_eq!(tiered.pick(&mut StepRng::new(0, 0)), None);
    }

    #[test]
    fn test_higher_tier_replaces_lower() {
        let mut tiered = Tiered::new();
        tiered.offer(0, 'a');
        tiered.offer(0, 'b');
        tiered.offer(1, 'c');
        tiered.offer(0, 'd');
        tiered.offer(1, 'e');

        assert_eq!(tiered.best_tier(), Some(1));
        assert_eq!(tiered.candidates(), &['c', 'e']);
    }

    #[test]
    fn test_lower_tier_kept_when_nothing_better() {
        let mut tiered = Tiered::new();
        tiered.offer(0, 1);
        tiered.offer(0, 2);
        assert_eq!(tiered.len(), 2);
        assert_eq!(tiered.best_tier(), Some(0));
    }

    #[test]
    fn test_pick_stays_within_best_tier() {
        let mut tiered = Tiered::new();
        tiered.offer(0, 10);
        tiered.offer(2, 20);
        tiered.offer(2, 30);
        tiered.offer(1, 40);

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = tiered.pick(&mut rng).unwrap();
            assert!(picked == 20 || picked == 30);
        }
    }

    #[test]
    fn test_zero_rng_picks_first() {
        let mut tiered = Tiered::new();
        tiered.offer(0, 'x');
        tiered.offer(0, 'y');
        assert_eq!(tiered.pick(&mut StepRng::new(0, 0)), Some('x'));
    }
}
