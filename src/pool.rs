//! Fixed-capacity bean pools

use std::{fmt::Display, str::FromStr};

use owo_colors::OwoColorize;
use rand::seq::SliceRandom;

use crate::regex;
use crate::Pcg;

/// A bean of one of the two colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bean {
    Green,
    Blue,
}

impl Bean {
    /// Compact one letter form, as used by [`Pool::from_str`]
    pub fn letter(self) -> char {
        match self {
            Bean::Green => 'G',
            Bean::Blue => 'B',
        }
    }

    /// Lowercase color name, for plain text
    pub fn name(self) -> &'static str {
        match self {
            Bean::Green => "green",
            Bean::Blue => "blue",
        }
    }
}

impl Display for Bean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bean::Green => write!(f, "{}", self.letter().green().bold()),
            Bean::Blue => write!(f, "{}", self.letter().blue().bold()),
        }
    }
}

/// A fixed number of slots, each vacant or holding a [`Bean`]
///
/// The slot count is fixed at creation; only slot contents change. A slot
/// goes vacant when a bean is taken and occupied again when one is put
/// back, so slot indices stay stable for the lifetime of the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    slots: Vec<Option<Bean>>,
}

/// Error from [`Pool::put_back`]: every slot is occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no vacant slot in the pool")]
pub struct PoolFull;

impl Pool {
    /// Create a pool with every slot occupied
    pub fn new(beans: impl IntoIterator<Item = Bean>) -> Self {
        Self {
            slots: beans.into_iter().map(Some).collect(),
        }
    }

    /// Create a replacement bean supply
    ///
    /// `blue` and `green` beans plus `vacant` empty slots, in that order.
    /// The game only ever asks the reservoir for blue beans, but the
    /// traditional bag carries both colors.
    pub fn reservoir(blue: usize, green: usize, vacant: usize) -> Self {
        let mut slots = vec![Some(Bean::Blue); blue];
        slots.extend(std::iter::repeat(None).take(vacant));
        slots.extend(std::iter::repeat(Some(Bean::Green)).take(green));
        Self { slots }
    }

    /// Total number of slots, vacant or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot contents, `None` marking a vacant slot
    pub fn slots(&self) -> &[Option<Bean>] {
        &self.slots
    }

    /// Number of occupied slots
    pub fn count_active(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Number of occupied slots holding `bean`
    pub fn count_of(&self, bean: Bean) -> usize {
        self.slots.iter().flatten().filter(|&&b| b == bean).count()
    }

    /// Take a bean chosen uniformly among all occupied slots
    ///
    /// The chosen slot becomes vacant. Returns `None`, without touching the
    /// pool, if no slot is occupied.
    pub fn take_random(&mut self, rng: &mut Pcg) -> Option<Bean> {
        self.take_where(rng, |_| true)
    }

    /// Take a bean chosen uniformly among occupied slots holding `bean`
    ///
    /// Returns `None`, without touching the pool, if no such slot exists.
    pub fn take_bean(&mut self, rng: &mut Pcg, bean: Bean) -> Option<Bean> {
        self.take_where(rng, |b| b == bean)
    }

    fn take_where(&mut self, rng: &mut Pcg, matches: impl Fn(Bean) -> bool) -> Option<Bean> {
        let candidates = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| matches((*slot)?).then_some(i))
            .collect::<Vec<_>>();
        let &index = candidates.choose(rng)?;
        self.slots[index].take()
    }

    /// Place `bean` into the first vacant slot
    ///
    /// The lowest vacant index is always used so insertion is deterministic.
    pub fn put_back(&mut self, bean: Bean) -> Result<(), PoolFull> {
        let vacant = self.slots.iter_mut().find(|s| s.is_none()).ok_or(PoolFull)?;
        *vacant = Some(bean);
        Ok(())
    }
}

/// Error from [`Pool::from_str`]
#[derive(Debug, thiserror::Error)]
pub enum PoolParseError {
    #[error("empty pool")]
    Empty,
    #[error("invalid pool: {0}")]
    Invalid(String),
}

impl FromStr for Pool {
    type Err = PoolParseError;

    /// Parse compact notation: one letter per slot, `G`, `B` or `-` for a
    /// vacant slot, case insensitive, commas and whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = regex!(r"\A[GBgb\-](?:[,\s]*[GBgb\-])*\z");
        let s = s.trim();
        if s.is_empty() {
            return Err(PoolParseError::Empty);
        }
        if !re.is_match(s) {
            return Err(PoolParseError::Invalid(s.to_string()));
        }
        let slots = s
            .chars()
            .filter_map(|c| match c.to_ascii_uppercase() {
                'G' => Some(Some(Bean::Green)),
                'B' => Some(Some(Bean::Blue)),
                '-' => Some(None),
                _ => None, // separator
            })
            .collect();
        Ok(Self { slots })
    }
}

impl Display for Pool {
    /// `[B, B, -, G]`, vacant slots dimmed
    ///
    /// The [alternate modifier](std::fmt#sign0) prints the compact form
    /// accepted by [`Pool::from_str`].
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !f.alternate() {
            f.write_str("[")?;
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 && !f.alternate() {
                f.write_str(", ")?;
            }
            match slot {
                Some(bean) => bean.fmt(f)?,
                None => write!(f, "{}", '-'.dimmed())?,
            }
        }
        if !f.alternate() {
            f.write_str("]")?;
        }
        Ok(())
    }
}
