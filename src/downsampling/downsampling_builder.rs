use rand::rngs::StdRng;
use tracing::{debug, info};

use std::fmt;

use crate::common::checker;
use crate::config::DownsamplingConfig;
use crate::error::{Result, MiniBalanceError};
use crate::model_builder::{ModelBuilder, UpdatableModelBuilder, ModelId};
use crate::sample::{Instance, Sample};

use super::proportions::ClassificationProportions;
use super::drop_probability::drop_probability;
use super::filter::MajorityDropFilter;
use super::downsampling_classifier::DownsamplingClassifier;


/// The maximal number of instances logged (and attached to the error)
/// when a training sample does not have exactly two labels.
pub const DIAGNOSTIC_SAMPLE_SIZE: usize = 10;


/// The update/strip operations of an inner builder,
/// captured once when the downsampling builder is constructed.
pub struct UpdateCapability<B: ModelBuilder> {
    update: fn(&B, &mut B::Model, &Sample, bool, &mut StdRng) -> Result<()>,
    strip: fn(&B, &mut B::Model) -> Result<()>,
}


impl<B: UpdatableModelBuilder> UpdateCapability<B> {
    /// Captures the update/strip operations of `B`.
    #[inline]
    pub fn of() -> Self {
        Self { update: B::update_model, strip: B::strip_data, }
    }
}


impl<B: ModelBuilder> Clone for UpdateCapability<B> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}


impl<B: ModelBuilder> Copy for UpdateCapability<B> {}


impl<B: ModelBuilder> fmt::Debug for UpdateCapability<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UpdateCapability")
    }
}


/// A model builder that rebalances a two-label sample
/// before handing it to another builder.
/// 
/// If the minority label makes up less than
/// `target_minority_proportion` of the sample,
/// majority instances are dropped at random so that, in expectation,
/// the minority label makes up exactly that proportion of what remains.
/// Otherwise the sample is passed through untouched.
/// 
/// # Example
/// ```no_run
/// use minibalance::prelude::*;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// 
/// # fn run(sample: Sample) -> minibalance::Result<()> {
/// let tree = DTreeBuilder::new()
///     .max_depth(4)
///     .criterion(Criterion::Gini);
/// let builder = DownsamplingClassifierBuilder::with_updates(tree, 0.3)?;
/// 
/// let mut rng = StdRng::seed_from_u64(1234);
/// let f = builder.build_model(&sample, &mut rng)?;
/// println!("drop probability: {}", f.drop_probability());
/// # Ok(())
/// # }
/// ```
pub struct DownsamplingClassifierBuilder<B: ModelBuilder> {
    builder: B,
    capability: Option<UpdateCapability<B>>,
    target_minority_proportion: f64,
}


impl<B: ModelBuilder> DownsamplingClassifierBuilder<B> {
    /// Construct a new instance of `DownsamplingClassifierBuilder`
    /// that cannot update or strip the models it builds.
    /// `target_minority_proportion` must lie in `(0, 1)`.
    pub fn new(builder: B, target_minority_proportion: f64) -> Result<Self> {
        checker::check_open_unit_interval(
            "target_minority_proportion", target_minority_proportion
        )?;

        Ok(Self { builder, capability: None, target_minority_proportion, })
    }


    /// Construct a new instance of `DownsamplingClassifierBuilder`
    /// from a configuration.
    #[inline]
    pub fn from_config(builder: B, config: &DownsamplingConfig)
        -> Result<Self>
    {
        Self::new(builder, config.target_minority_proportion)
    }


    /// Returns the target proportion of the minority label.
    #[inline]
    pub fn target_minority_proportion(&self) -> f64 {
        self.target_minority_proportion
    }


    /// Returns the wrapped builder.
    #[inline]
    pub fn inner(&self) -> &B {
        &self.builder
    }


    /// Returns `true` if this builder can update
    /// and strip the models it builds.
    #[inline]
    pub fn supports_updates(&self) -> bool {
        self.capability.is_some()
    }
}


impl<B: UpdatableModelBuilder> DownsamplingClassifierBuilder<B> {
    /// Enables `update_model` and `strip_data`
    /// by capturing the inner builder's implementations.
    #[inline]
    pub fn with_update_capability(mut self) -> Self {
        self.capability = Some(UpdateCapability::of());
        self
    }


    /// A shorthand for `new(builder, target)?.with_update_capability()`.
    #[inline]
    pub fn with_updates(builder: B, target_minority_proportion: f64)
        -> Result<Self>
    {
        Ok(Self::new(builder, target_minority_proportion)?
            .with_update_capability())
    }
}


impl<B: ModelBuilder> ModelBuilder for DownsamplingClassifierBuilder<B> {
    type Model = DownsamplingClassifier<B::Model>;


    fn name(&self) -> &str {
        "Downsampling"
    }


    fn build_model(&self, sample: &Sample, rng: &mut StdRng)
        -> Result<Self::Model>
    {
        let proportions = ClassificationProportions::analyze(sample)?;
        if proportions.len() != 2 {
            let diagnostic_sample = diagnostic_sample(sample, &proportions);
            return Err(MiniBalanceError::InvalidTrainingData {
                observed_label_count: proportions.len(),
                proportions,
                diagnostic_sample,
            });
        }

        let (majority, majority_proportion) = proportions.majority()
            .ok_or(MiniBalanceError::EmptyDataset)?;
        let (minority, _) = proportions.minority()
            .ok_or(MiniBalanceError::EmptyDataset)?;
        let natural_minority = 1f64 - majority_proportion;


        if natural_minority >= self.target_minority_proportion {
            debug!(
                natural_minority,
                target = self.target_minority_proportion,
                "minority label is frequent enough; no downsampling"
            );
            let wrapped = self.builder.build_model(sample, rng)?;
            return Ok(DownsamplingClassifier::new(
                wrapped, majority.clone(), minority.clone(), 0f64
            ));
        }


        let drop = drop_probability(
            natural_minority, self.target_minority_proportion
        );
        let filter = MajorityDropFilter::new(majority.clone(), drop)?;

        // Collect once so that the inner builder sees a single subset
        // however many times it reads its input.
        let downsampled = filter.downsample(sample, rng);
        debug!(
            majority = %majority,
            drop_probability = drop,
            before = sample.len(),
            after = downsampled.len(),
            "downsampled the majority label"
        );

        let wrapped = self.builder.build_model(&downsampled, rng)?;
        Ok(DownsamplingClassifier::new(
            wrapped, majority.clone(), minority.clone(), drop
        ))
    }


    fn updatable(&mut self, updatable: bool) -> &mut Self {
        self.builder.updatable(updatable);
        self
    }


    fn set_id(&mut self, id: ModelId) {
        self.builder.set_id(id);
    }
}


impl<B: ModelBuilder> UpdatableModelBuilder for DownsamplingClassifierBuilder<B> {
    /// Downsamples `sample` with the labels and the drop probability
    /// stored in `model`, then updates the wrapped model in place.
    fn update_model(
        &self,
        model: &mut Self::Model,
        sample: &Sample,
        split_nodes: bool,
        rng: &mut StdRng,
    ) -> Result<()>
    {
        let capability = self.capability
            .ok_or(MiniBalanceError::UnsupportedUpdate)?;

        let filter = MajorityDropFilter::new(
            model.majority_label().clone(), model.drop_probability()
        )?;
        let downsampled = filter.downsample(sample, rng);
        debug!(
            before = sample.len(),
            after = downsampled.len(),
            split_nodes,
            "updating the wrapped model"
        );

        (capability.update)(
            &self.builder, model.wrapped_mut(), &downsampled, split_nodes, rng
        )
    }


    fn strip_data(&self, model: &mut Self::Model) -> Result<()> {
        let capability = self.capability
            .ok_or_else(|| MiniBalanceError::UnsupportedOperation(
                "cannot strip data without an updatable model builder"
                    .to_string()
            ))?;

        (capability.strip)(&self.builder, model.wrapped_mut())
    }
}


/// Picks up to `DIAGNOSTIC_SAMPLE_SIZE` evenly spaced instances
/// of the least frequent label and logs them.
fn diagnostic_sample(
    sample: &Sample,
    proportions: &ClassificationProportions,
) -> Vec<Instance>
{
    let Some((rare, _)) = proportions.minority() else {
        return Vec::new();
    };

    let rows = sample.iter()
        .filter(|instance| instance.label() == rare)
        .collect::<Vec<_>>();
    let step = (rows.len() / DIAGNOSTIC_SAMPLE_SIZE).max(1);

    info!(
        n_instances = sample.len(),
        n_labels = proportions.len(),
        %proportions,
        "training data must have exactly two labels"
    );
    rows.into_iter()
        .step_by(step)
        .take(DIAGNOSTIC_SAMPLE_SIZE)
        .enumerate()
        .map(|(i, instance)| {
            info!("instance {}: {instance}", i * step);
            instance.clone()
        })
        .collect()
}
