use rand::prelude::*;
use rand_distr::Normal;

use minibalance::prelude::*;
use minibalance::{
    ClassificationProportions,
    DownsamplingConfig,
    DIAGNOSTIC_SAMPLE_SIZE,
};


/// Predicts the label proportions of its training sample everywhere.
struct Prior;


#[derive(Debug, Clone)]
struct PriorClassifier {
    prediction: PredictionMap,
    n_seen: usize,
}


impl Classifier for PriorClassifier {
    fn predict(&self, _attributes: &Attributes) -> PredictionMap {
        self.prediction.clone()
    }


    fn classify(&self, _attributes: &Attributes) -> Label {
        self.prediction.most_likely()
            .cloned()
            .unwrap_or(Label::from(0))
    }
}


impl ModelBuilder for Prior {
    type Model = PriorClassifier;


    fn name(&self) -> &str {
        "Prior"
    }


    fn build_model(&self, sample: &Sample, _rng: &mut StdRng)
        -> Result<PriorClassifier>
    {
        let prediction = ClassificationProportions::analyze(sample)?
            .iter()
            .map(|(label, &p)| (label.clone(), p))
            .collect();
        Ok(PriorClassifier { prediction, n_seen: sample.len() })
    }
}


/// `n_majority` instances of label `0` around `x = 0`
/// followed by `n_minority` instances of label `1` around `x = 3`.
fn imbalanced(n_majority: usize, n_minority: usize, seed: u64) -> Sample {
    let mut rng = StdRng::seed_from_u64(seed);
    let majority = Normal::new(0.0, 1.0).unwrap();
    let minority = Normal::new(3.0, 1.0).unwrap();

    let mut sample = Sample::new();
    for _ in 0..n_majority {
        let x: f64 = majority.sample(&mut rng);
        sample.push(Instance::from_pairs([("x", x)], 0));
    }
    for _ in 0..n_minority {
        let x: f64 = minority.sample(&mut rng);
        sample.push(Instance::from_pairs([("x", x)], 1));
    }
    sample
}


#[test]
fn ninety_ten_sample_drops_eight_ninths_of_the_majority() {
    let sample = imbalanced(900, 100, 1);
    let builder = DownsamplingClassifierBuilder::new(Prior, 0.5).unwrap();

    let mut rng = StdRng::seed_from_u64(1234);
    let model = builder.build_model(&sample, &mut rng).unwrap();

    assert!((model.drop_probability() - 0.888_888_9).abs() < 1e-6);
    assert_eq!(model.majority_label(), &Label::from(0));
    assert_eq!(model.minority_label(), &Label::from(1));
    assert!(model.wrapped().n_seen < sample.len());
}


#[test]
fn frequent_minority_trains_on_the_full_sample() {
    let sample = imbalanced(600, 400, 2);
    let mut builder = DownsamplingClassifierBuilder::with_updates(
        DTreeBuilder::new(), 0.3
    ).unwrap();
    builder.updatable(true);

    let mut rng = StdRng::seed_from_u64(1234);
    let model = builder.build_model(&sample, &mut rng).unwrap();

    assert_eq!(model.drop_probability(), 0.0);
    assert_eq!(model.wrapped().retained_instances(), sample.len());
}


#[test]
fn downsampling_reaches_the_target_in_expectation() {
    let sample = imbalanced(9_500, 500, 3);
    let builder = DownsamplingClassifierBuilder::new(Prior, 0.3).unwrap();
    let minority = Label::from(1);

    let mut rng = StdRng::seed_from_u64(77);
    let n_trials = 100;
    let mean = (0..n_trials)
        .map(|_| {
            let model = builder.build_model(&sample, &mut rng).unwrap();
            model.wrapped().prediction.get(&minority)
        })
        .sum::<f64>()
        / n_trials as f64;

    assert!((mean - 0.3).abs() < 0.02, "mean minority proportion: {mean}");
}


#[test]
fn target_must_lie_strictly_between_zero_and_one() {
    for target in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
        let result = DownsamplingClassifierBuilder::new(Prior, target);
        assert!(
            matches!(result, Err(MiniBalanceError::InvalidConfiguration(_))),
            "target {target} was accepted"
        );
    }
}


#[test]
fn three_labels_are_rejected_with_a_diagnostic_sample() {
    let sample = (0..100)
        .map(|i| {
            let label = if i < 50 { 0 } else if i < 80 { 1 } else { 2 };
            Instance::from_pairs([("x", i as f64)], label)
        })
        .collect::<Sample>();
    let builder = DownsamplingClassifierBuilder::new(Prior, 0.5).unwrap();

    let mut rng = StdRng::seed_from_u64(1234);
    let err = builder.build_model(&sample, &mut rng).unwrap_err();
    match err {
        MiniBalanceError::InvalidTrainingData {
            observed_label_count,
            proportions,
            diagnostic_sample,
        } => {
            assert_eq!(observed_label_count, 3);
            assert_eq!(proportions.len(), 3);
            assert!(!diagnostic_sample.is_empty());
            assert!(diagnostic_sample.len() <= DIAGNOSTIC_SAMPLE_SIZE);
            assert!(
                diagnostic_sample.iter()
                    .all(|instance| instance.label() == &Label::from(2))
            );
        },
        err => panic!("unexpected error: {err}"),
    }
}


#[test]
fn a_single_label_is_rejected() {
    let sample = imbalanced(10, 0, 4);
    let builder = DownsamplingClassifierBuilder::new(Prior, 0.5).unwrap();

    let mut rng = StdRng::seed_from_u64(1234);
    let err = builder.build_model(&sample, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        MiniBalanceError::InvalidTrainingData { observed_label_count: 1, .. }
    ));
}


#[test]
fn an_empty_sample_is_rejected() {
    let builder = DownsamplingClassifierBuilder::new(Prior, 0.5).unwrap();
    let mut rng = StdRng::seed_from_u64(1234);
    let err = builder.build_model(&Sample::new(), &mut rng).unwrap_err();
    assert!(matches!(err, MiniBalanceError::EmptyDataset));
}


#[test]
fn builders_without_updates_refuse_to_update_or_strip() {
    let sample = imbalanced(90, 10, 5);
    let builder = DownsamplingClassifierBuilder::new(Prior, 0.5).unwrap();
    assert!(!builder.supports_updates());

    let mut rng = StdRng::seed_from_u64(1234);
    let mut model = builder.build_model(&sample, &mut rng).unwrap();

    let err = builder.update_model(&mut model, &sample, false, &mut rng)
        .unwrap_err();
    assert!(matches!(err, MiniBalanceError::UnsupportedUpdate));

    let err = builder.strip_data(&mut model).unwrap_err();
    assert!(matches!(err, MiniBalanceError::UnsupportedOperation(_)));
}


#[test]
fn updates_reuse_the_stored_drop_probability() {
    let sample = imbalanced(900, 100, 6);
    let mut builder = DownsamplingClassifierBuilder::with_updates(
        DTreeBuilder::new().max_depth(3), 0.5
    ).unwrap();
    builder.updatable(true);
    assert!(builder.supports_updates());

    let mut rng = StdRng::seed_from_u64(1234);
    let mut model = builder.build_model(&sample, &mut rng).unwrap();
    let drop = model.drop_probability();
    let size = model.wrapped().size();
    let before = model.wrapped().retained_instances();

    // A single-label batch would be rejected by a fresh build.
    let batch = imbalanced(1_000, 0, 7);
    builder.update_model(&mut model, &batch, false, &mut rng).unwrap();

    assert_eq!(model.drop_probability(), drop);
    assert_eq!(model.majority_label(), &Label::from(0));
    assert_eq!(model.minority_label(), &Label::from(1));
    assert_eq!(model.wrapped().size(), size);

    // About 1000 / 9 majority instances survive the filter.
    let added = model.wrapped().retained_instances() - before;
    assert!((70..=155).contains(&added), "added {added} instances");
}


#[test]
fn stripping_keeps_the_shape_and_the_predictions() {
    let sample = imbalanced(900, 100, 8);
    let mut builder = DownsamplingClassifierBuilder::with_updates(
        DTreeBuilder::new().max_depth(4), 0.5
    ).unwrap();
    builder.updatable(true);

    let mut rng = StdRng::seed_from_u64(1234);
    let mut model = builder.build_model(&sample, &mut rng).unwrap();
    let size = model.wrapped().size();
    let depth = model.wrapped().mean_depth();
    let predictions = sample.iter()
        .map(|instance| model.predict(instance.attributes()))
        .collect::<Vec<_>>();
    assert!(model.wrapped().retained_instances() > 0);

    builder.strip_data(&mut model).unwrap();

    assert_eq!(model.wrapped().retained_instances(), 0);
    assert_eq!(model.wrapped().size(), size);
    assert_eq!(model.wrapped().mean_depth(), depth);
    let stripped = sample.iter()
        .map(|instance| model.predict(instance.attributes()))
        .collect::<Vec<_>>();
    assert_eq!(stripped, predictions);
}


#[test]
fn orchestrators_nest() {
    let sample = imbalanced(900, 100, 9);
    let inner = DownsamplingClassifierBuilder::with_updates(
        DTreeBuilder::new().max_depth(3), 0.3
    ).unwrap();
    let mut outer = DownsamplingClassifierBuilder::with_updates(inner, 0.5)
        .unwrap();
    outer.updatable(true);

    let mut rng = StdRng::seed_from_u64(1234);
    let mut model = outer.build_model(&sample, &mut rng).unwrap();

    assert!((model.drop_probability() - 0.888_888_9).abs() < 1e-6);
    // The outer filter already lifted the minority close to one half.
    assert_eq!(model.wrapped().drop_probability(), 0.0);
    assert!(model.wrapped().wrapped().retained_instances() > 0);

    let batch = imbalanced(90, 10, 10);
    outer.update_model(&mut model, &batch, true, &mut rng).unwrap();
    outer.strip_data(&mut model).unwrap();
    assert_eq!(model.wrapped().wrapped().retained_instances(), 0);
}


#[test]
fn probabilities_are_delegated_and_can_be_unbiased() {
    let sample = imbalanced(9_500, 500, 11);
    let builder = DownsamplingClassifierBuilder::new(Prior, 0.5).unwrap();

    let mut rng = StdRng::seed_from_u64(1234);
    let model = builder.build_model(&sample, &mut rng).unwrap();
    let x = sample[0].attributes();
    let (majority, minority) = (Label::from(0), Label::from(1));

    assert_eq!(
        model.probability_of(x, &minority),
        model.wrapped().probability_of(x, &minority)
    );
    assert!((model.probability_of(x, &minority) - 0.5).abs() < 0.05);

    // Undoing the downsampling recovers the natural proportion.
    let unbiased = model.unbiased_probability_of(x, &minority);
    assert!((unbiased - 0.05).abs() < 0.01, "unbiased: {unbiased}");
    let complement = model.unbiased_probability_of(x, &majority);
    assert!((unbiased + complement - 1.0).abs() < 1e-12);
    assert_eq!(model.unbiased_probability_of(x, &Label::from("other")), 0.0);
}


#[test]
fn builder_reads_its_target_from_json() {
    let config = DownsamplingConfig::from_json(
        r#"{ "target_minority_proportion": 0.4 }"#
    ).unwrap();
    let builder = DownsamplingClassifierBuilder::from_config(Prior, &config)
        .unwrap();
    assert_eq!(builder.target_minority_proportion(), 0.4);

    let config = DownsamplingConfig { target_minority_proportion: 1.0 };
    assert!(DownsamplingClassifierBuilder::from_config(Prior, &config).is_err());
}


#[test]
fn trained_models_survive_a_json_round_trip() {
    let sample = imbalanced(900, 100, 12);
    let mut builder = DownsamplingClassifierBuilder::with_updates(
        DTreeBuilder::new().max_depth(3), 0.5
    ).unwrap();
    builder.updatable(true);

    let mut rng = StdRng::seed_from_u64(1234);
    let model = builder.build_model(&sample, &mut rng).unwrap();

    let json = serde_json::to_string(&model).unwrap();
    let back: DownsamplingClassifier<DTreeClassifier> =
        serde_json::from_str(&json).unwrap();

    assert_eq!(back.majority_label(), &Label::from(0));
    assert_eq!(back.minority_label(), &Label::from(1));
    assert_eq!(back.wrapped().size(), model.wrapped().size());
    assert_eq!(
        back.wrapped().retained_instances(),
        model.wrapped().retained_instances()
    );
    assert!((back.drop_probability() - model.drop_probability()).abs() < 1e-12);

    let minority = Label::from(1);
    for instance in sample.iter() {
        let x = instance.attributes();
        assert_eq!(back.classify(x), model.classify(x));
        let (p, q) = (back.probability_of(x, &minority), model.probability_of(x, &minority));
        assert!((p - q).abs() < 1e-12, "reloaded {p}, trained {q}");
    }
    assert!(
        sample.iter().any(|x| model.probability_of(x.attributes(), &minority) > 0.0)
    );

    // An updatable model keeps working after the reload.
    let mut back = back;
    builder.update_model(&mut back, &imbalanced(90, 10, 13), true, &mut rng)
        .unwrap();
}


#[test]
fn proportions_in_errors_survive_a_json_round_trip() {
    let sample = imbalanced(30, 10, 14);
    let proportions = ClassificationProportions::analyze(&sample).unwrap();

    let json = serde_json::to_string(&proportions).unwrap();
    let back: ClassificationProportions = serde_json::from_str(&json).unwrap();

    assert_eq!(back, proportions);
    assert_eq!(back.get(&Label::from(1)), Some(0.25));
}
