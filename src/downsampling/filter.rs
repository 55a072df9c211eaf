use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

use std::borrow::Borrow;

use crate::error::{Result, MiniBalanceError};
use crate::sample::{Instance, Label, Sample};


/// Drops instances of the majority label at random.
/// 
/// Instances of any other label are always kept.
/// Each instance of the majority label is dropped independently
/// with probability `drop_probability`.
/// 
/// **Note that** the outcomes are drawn afresh on every traversal:
/// filtering the same instances twice generally keeps two different
/// subsets. Callers that need to read the filtered instances more than
/// once must collect them first, e.g., by [`MajorityDropFilter::downsample`].
#[derive(Debug, Clone)]
pub struct MajorityDropFilter {
    majority: Label,
    drop_probability: f64,
    coin: Bernoulli,
}


impl MajorityDropFilter {
    /// Construct a new filter.
    /// `drop_probability` must lie in `[0, 1]`.
    pub fn new(majority: Label, drop_probability: f64) -> Result<Self> {
        let coin = Bernoulli::new(drop_probability)
            .map_err(|_| MiniBalanceError::InvalidConfiguration(format!(
                "drop probability must be in [0, 1] (was {drop_probability})"
            )))?;

        Ok(Self { majority, drop_probability, coin, })
    }


    /// Returns the label whose instances are dropped.
    #[inline]
    pub fn majority(&self) -> &Label {
        &self.majority
    }


    /// Returns the probability of dropping a majority instance.
    #[inline]
    pub fn drop_probability(&self) -> f64 {
        self.drop_probability
    }


    /// Returns `true` if `instance` survives one draw.
    #[inline]
    pub fn keep<R: Rng>(&self, instance: &Instance, rng: &mut R) -> bool {
        instance.label() != &self.majority || !self.coin.sample(rng)
    }


    /// Returns a lazy view of `instances` without the dropped ones.
    pub fn filter<'f, I, R>(&'f self, instances: I, rng: &'f mut R)
        -> StochasticMajorityFilter<'f, I::IntoIter, R>
        where I: IntoIterator,
              I::Item: Borrow<Instance>,
              R: Rng,
    {
        StochasticMajorityFilter {
            instances: instances.into_iter(),
            filter: self,
            rng,
        }
    }


    /// Traverses `sample` once and collects the kept instances.
    pub fn downsample<R: Rng>(&self, sample: &Sample, rng: &mut R)
        -> Sample
    {
        self.filter(sample, rng)
            .cloned()
            .collect()
    }
}


/// The iterator returned by [`MajorityDropFilter::filter`].
pub struct StochasticMajorityFilter<'f, I, R> {
    instances: I,
    filter: &'f MajorityDropFilter,
    rng: &'f mut R,
}


impl<I, R> Iterator for StochasticMajorityFilter<'_, I, R>
    where I: Iterator,
          I::Item: Borrow<Instance>,
          R: Rng,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let instance = self.instances.next()?;
            if self.filter.keep(instance.borrow(), &mut *self.rng) {
                return Some(instance);
            }
        }
    }


    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.instances.size_hint().1)
    }
}
