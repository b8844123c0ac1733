//! The coffee tin game
//!
//! A tin holds green and blue beans. Two beans are drawn at random and
//! replaced by a fixed rule: a same-colored pair is discarded and a blue
//! bean from a reservoir takes its place, a mixed pair keeps only its green
//! bean. Repeat until one bean survives. The parity of the initial green
//! count alone decides the survivor: odd means green, even means blue.
//!
//! Build a [`Pool`] for the tin and one for the reservoir, then run
//! [`play`] with your own [`Pcg`], or let [`Game`] manage the generator.
//!
//! ```
//! use coffee_tin::{Bean, Game, Pool};
//!
//! let mut tin: Pool = "BBBGG".parse().unwrap();
//! let mut reservoir = Pool::reservoir(4, 0, 4);
//! let survivor = Game::with_seed(42).play(&mut tin, &mut reservoir).unwrap();
//! assert_eq!(survivor, Bean::Blue); // 2 greens, even
//! ```
//!
//! All [`Display`](std::fmt::Display) implementations of the crate *may*
//! output ANSI color codes. Use something like
//! [anstream](https://docs.rs/anstream/) if you dont want colors.

pub mod game;
pub mod pool;

pub use game::{expected_survivor, play, Game};
pub use pool::{Bean, Pool, PoolFull, PoolParseError};

/// Pseudorandom generator used by the whole crate
pub type Pcg = rand_pcg::Pcg64;

macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}
pub(crate) use regex;

/// Game error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The game was started on a tin with no beans
    #[error("the tin has no beans")]
    EmptyTin,
    /// The reservoir could not supply a replacement bean
    ///
    /// The reservoir was sized too small for the tin: a tin of `n` beans can
    /// need up to `n - 1` blue replacements.
    #[error("the reservoir has no {} beans left", .0.name())]
    ReservoirExhausted(Bean),
    #[error(transparent)]
    PoolFull(#[from] PoolFull),
}
