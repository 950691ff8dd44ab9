use crate::{AgentAddress, ConfigError, RandSource, ThreadRandom};
use std::sync::atomic::{AtomicU64, Ordering};

/// Odd 64-bit constant (2^64 / golden ratio) used to spread the pick
/// counter across the index space.
const COUNTER_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Picks an agent for each request attempt.
///
/// Selection is uniform with replacement. Each pick mixes a random draw with
/// a per-selector counter so back-to-back picks still spread across agents
/// even if the random source is weak. No health is tracked; a retry simply
/// picks again and may land on the same agent.
#[derive(Debug)]
pub struct EndpointSelector<R = ThreadRandom>
where
    R: RandSource<u64>,
{
    agents: Vec<AgentAddress>,
    picks: AtomicU64,
    rng: R,
}

impl<R> EndpointSelector<R>
where
    R: RandSource<u64>,
{
    /// # Errors
    ///
    /// [`ConfigError::NoAgents`] if `agents` is empty.
    pub fn new(agents: Vec<AgentAddress>, rng: R) -> Result<Self, ConfigError> {
        if agents.is_empty() {
            return Err(ConfigError::NoAgents);
        }
        Ok(Self {
            agents,
            picks: AtomicU64::new(0),
            rng,
        })
    }

    pub fn pick(&self) -> AgentAddress {
        self.agents[self.pick_index()]
    }

    pub fn agents(&self) -> &[AgentAddress] {
        &self.agents
    }

    fn pick_index(&self) -> usize {
        let len = self.agents.len() as u64;
        if len == 1 {
            return 0;
        }
        let tick = self.picks.fetch_add(1, Ordering::Relaxed);
        let mixed = self.rng.rand() ^ tick.wrapping_mul(COUNTER_SPREAD);
        // Widening multiply maps the 64-bit draw onto 0..len without the
        // bias of a plain modulo.
        ((u128::from(mixed) * u128::from(len)) >> 64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeededRandom;
    use std::net::Ipv4Addr;

    fn agents(n: u8) -> Vec<AgentAddress> {
        (0..n)
            .map(|i| AgentAddress::new(Ipv4Addr::new(10, 0, 0, i), 6200))
            .collect()
    }

    struct ConstRand(u64);

    impl RandSource<u64> for ConstRand {
        fn rand(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn rejects_empty_pool() {
        assert!(matches!(
            EndpointSelector::new(Vec::new(), ThreadRandom),
            Err(ConfigError::NoAgents)
        ));
    }

    #[test]
    fn single_agent_is_always_picked() {
        let selector = EndpointSelector::new(agents(1), ThreadRandom).unwrap();
        for _ in 0..100 {
            assert_eq!(selector.pick(), selector.agents()[0]);
        }
    }

    #[test]
    fn counter_spreads_a_stuck_random_source() {
        let selector = EndpointSelector::new(agents(4), ConstRand(0)).unwrap();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            seen.insert(selector.pick());
        }
        assert!(seen.len() > 1, "picks clustered on {seen:?}");
    }

    #[test]
    fn picks_are_uniform_chi_square() {
        const K: usize = 5;
        const DRAWS: usize = 20_000;
        let selector = EndpointSelector::new(agents(K as u8), SeededRandom::new(0x5EED)).unwrap();
        let pool = selector.agents().to_vec();

        let mut counts = [0usize; K];
        for _ in 0..DRAWS {
            let picked = selector.pick();
            let idx = pool.iter().position(|a| *a == picked).unwrap();
            counts[idx] += 1;
        }

        let expected = DRAWS as f64 / K as f64;
        let chi_square: f64 = counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        // Critical value for 4 degrees of freedom at p = 0.001.
        assert!(chi_square < 18.467, "chi^2 = {chi_square}, counts = {counts:?}");
    }

    #[test]
    fn picks_from_many_threads() {
        let selector = EndpointSelector::new(agents(3), ThreadRandom).unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        assert!(selector.agents().contains(&selector.pick()));
                    }
                });
            }
        });
    }
}
