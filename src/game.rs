//! The reduction rule and the game loop

use rand::SeedableRng;

use crate::pool::{Bean, Pool};
use crate::{Error, Pcg};

/// Play the game until one bean survives
///
/// While the tin holds at least two beans, two are taken at random. A
/// same-colored pair is thrown away and a blue bean from the reservoir
/// takes its place; a mixed pair keeps its green bean and loses the blue
/// one. Every step removes exactly one bean from the tin, so a tin of `n`
/// beans finishes in `n - 1` steps.
///
/// The tin is left holding exactly the returned bean.
///
/// # Errors
///
/// - [`Error::EmptyTin`] if the tin has no beans at all.
/// - [`Error::ReservoirExhausted`] if a same-colored pair needs a blue
///   replacement and the reservoir has none left. The tin state is
///   unspecified afterwards; size the reservoir with at least `n - 1` blue
///   beans to rule this out.
/// - [`Error::PoolFull`] if the tin was built with no room to put a bean
///   back, which a tin of only beans can never trigger.
pub fn play(rng: &mut Pcg, tin: &mut Pool, reservoir: &mut Pool) -> Result<Bean, Error> {
    let mut survivor = match tin.take_random(rng) {
        Some(bean) => bean,
        None => return Err(Error::EmptyTin),
    };

    while let Some(second) = tin.take_random(rng) {
        let keep = if survivor == second {
            reservoir
                .take_bean(rng, Bean::Blue)
                .ok_or(Error::ReservoirExhausted(Bean::Blue))?
        } else {
            Bean::Green
        };
        tin.put_back(keep)?;
        survivor = tin.take_random(rng).unwrap(); // just put back
    }

    tin.put_back(survivor)?;
    Ok(survivor)
}

/// The survivor the parity argument predicts
///
/// Pure: looks only at the current green count. Green survives iff the
/// count of green beans is odd.
pub fn expected_survivor(tin: &Pool) -> Bean {
    if tin.count_of(Bean::Green) % 2 == 1 {
        Bean::Green
    } else {
        Bean::Blue
    }
}

/// A game session owning the pseudorandom generator
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    rng: Pcg,
}

impl Game {
    /// Create a new session
    ///
    /// Seed is autogenerated from entropy.
    pub fn new() -> Self {
        Self::from_rng(Pcg::from_entropy())
    }

    /// Create a new session with a seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Pcg::seed_from_u64(seed))
    }

    fn from_rng(rng: Pcg) -> Self {
        Self { rng }
    }

    /// See [`play`]
    pub fn play(&mut self, tin: &mut Pool, reservoir: &mut Pool) -> Result<Bean, Error> {
        play(&mut self.rng, tin, reservoir)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn reservoir_for(tin: &Pool) -> Pool {
        Pool::reservoir(tin.count_active().saturating_sub(1), 0, 2)
    }

    #[test_case("BBBGG" => Bean::Blue ; "two greens even")]
    #[test_case("BBBGGG" => Bean::Green ; "three greens odd")]
    #[test_case("G" => Bean::Green ; "single green terminal")]
    #[test_case("B" => Bean::Blue ; "single blue terminal")]
    #[test_case("BG" => Bean::Green ; "mixed pair keeps green")]
    #[test_case("GGGGGGGG" => Bean::Blue ; "all green even")]
    #[test_case("BBBBBBB" => Bean::Blue ; "all blue")]
    fn survivor(s: &str) -> Bean {
        let mut tin: Pool = s.parse().unwrap();
        let mut reservoir = reservoir_for(&tin);
        let survivor = Game::with_seed(7).play(&mut tin, &mut reservoir).unwrap();
        assert_eq!(tin.count_active(), 1);
        assert_eq!(tin.slots().iter().flatten().next(), Some(&survivor));
        survivor
    }

    #[test]
    fn parity_holds_for_every_seed() {
        let tins = ["BBBGG", "BBBGGG", "G", "B", "BG", "GGB-B", "GBGBGBGB"];
        for s in tins {
            let expected = expected_survivor(&s.parse().unwrap());
            for seed in 0..200 {
                let mut tin: Pool = s.parse().unwrap();
                let mut reservoir = reservoir_for(&tin);
                let survivor = Game::with_seed(seed)
                    .play(&mut tin, &mut reservoir)
                    .unwrap();
                assert_eq!(survivor, expected, "tin {s} seed {seed}");
            }
        }
    }

    #[test]
    fn active_count_decreases_by_one_per_step() {
        // replay the loop by hand to watch each step
        let mut rng = Pcg::seed_from_u64(99);
        let mut tin: Pool = "BBGGBG".parse().unwrap();
        let mut reservoir = reservoir_for(&tin);
        while tin.count_active() >= 2 {
            let before = tin.count_active();
            let a = tin.take_random(&mut rng).unwrap();
            let b = tin.take_random(&mut rng).unwrap();
            let keep = if a == b {
                reservoir.take_bean(&mut rng, Bean::Blue).unwrap()
            } else {
                Bean::Green
            };
            tin.put_back(keep).unwrap();
            assert_eq!(tin.count_active(), before - 1);
        }
        assert_eq!(tin.count_active(), 1);
    }

    #[test]
    fn reservoir_shrinks_only_on_same_colored_pairs() {
        let mut rng = Pcg::seed_from_u64(4);
        let mut tin: Pool = "GGBBGB".parse().unwrap();
        let mut reservoir = reservoir_for(&tin);
        while tin.count_active() >= 2 {
            let blues = reservoir.count_of(Bean::Blue);
            let a = tin.take_random(&mut rng).unwrap();
            let b = tin.take_random(&mut rng).unwrap();
            let keep = if a == b {
                reservoir.take_bean(&mut rng, Bean::Blue).unwrap()
            } else {
                Bean::Green
            };
            tin.put_back(keep).unwrap();
            let spent = if a == b { 1 } else { 0 };
            assert_eq!(reservoir.count_of(Bean::Blue), blues - spent);
        }
    }

    #[test]
    fn empty_tin_is_rejected() {
        let mut tin: Pool = "---".parse().unwrap();
        let mut reservoir = Pool::reservoir(2, 0, 0);
        let err = Game::with_seed(0).play(&mut tin, &mut reservoir);
        assert!(matches!(err, Err(Error::EmptyTin)));
    }

    #[test]
    fn starved_reservoir_fails_instead_of_lying() {
        // an all-blue tin of 6 needs 5 replacements, give it none
        let mut reservoir = Pool::reservoir(0, 0, 2);
        let mut tin: Pool = "BBBBBB".parse().unwrap();
        let err = Game::with_seed(1).play(&mut tin, &mut reservoir);
        assert!(matches!(err, Err(Error::ReservoirExhausted(Bean::Blue))));
    }

    #[test]
    fn expected_survivor_ignores_vacant_slots() {
        assert_eq!(expected_survivor(&"G-B-".parse().unwrap()), Bean::Green);
        assert_eq!(expected_survivor(&"GG-B".parse().unwrap()), Bean::Blue);
        assert_eq!(expected_survivor(&"BBB".parse().unwrap()), Bean::Blue);
    }
}
