use bayes_inference::{
    ApproximateInference, Assignment, BayesianNetwork, DiscreteNetwork, ExactInference,
    Inferencer, SamplingConfig,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

fn burglary() -> DiscreteNetwork<bool> {
    DiscreteNetwork::builder()
        .boolean_node("Burglary", &[], vec![(vec![], 0.001)])
        .boolean_node("Earthquake", &[], vec![(vec![], 0.002)])
        .boolean_node(
            "Alarm",
            &["Burglary", "Earthquake"],
            vec![
                (vec![true, true], 0.95),
                (vec![true, false], 0.94),
                (vec![false, true], 0.29),
                (vec![false, false], 0.001),
            ],
        )
        .boolean_node("JohnCalls", &["Alarm"], vec![(vec![true], 0.90), (vec![false], 0.05)])
        .boolean_node("MaryCalls", &["Alarm"], vec![(vec![true], 0.70), (vec![false], 0.01)])
        .build()
        .unwrap()
}

/// X0 -> X1 -> ... -> X(n-1), every link a noisy copy.
fn chain(length: usize) -> DiscreteNetwork<bool> {
    let mut builder = DiscreteNetwork::builder().boolean_node("X0", &[], vec![(vec![], 0.5)]);
    for i in 1..length {
        let parent = format!("X{}", i - 1);
        builder = builder.boolean_node(
            &format!("X{i}"),
            &[parent.as_str()],
            vec![(vec![true], 0.8), (vec![false], 0.3)],
        );
    }
    builder.build().unwrap()
}

fn benchmark_exact_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_inference");

    let network = burglary();
    let burglary = network.variable("Burglary").unwrap().clone();
    let evidence =
        Assignment::from_names(&network, [("JohnCalls", true), ("MaryCalls", true)]).unwrap();
    let engine = ExactInference::new();

    group.bench_function("burglary_given_calls", |b| {
        b.iter(|| black_box(engine.ask(&network, &burglary, &evidence)));
    });

    // Hidden variables grow with the chain, so cost grows exponentially.
    for length in [4, 8, 12] {
        let network = chain(length);
        let head = network.variable("X0").unwrap().clone();
        let tail = format!("X{}", length - 1);
        let evidence = Assignment::from_names(&network, [(tail.as_str(), true)]).unwrap();

        group.bench_with_input(BenchmarkId::new("chain", length), &length, |b, _| {
            b.iter(|| black_box(engine.ask(&network, &head, &evidence)));
        });
    }

    group.finish();
}

fn benchmark_rejection_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("rejection_sampling");
    group.measurement_time(Duration::from_secs(10));

    let network = burglary();
    let alarm = network.variable("Alarm").unwrap().clone();
    let evidence = Assignment::from_names(&network, [("JohnCalls", true)]).unwrap();

    for count in [1_000, 10_000, 100_000] {
        let engine = ApproximateInference::with_config(
            SamplingConfig::default().with_sample_limit(count).with_seed(1),
        );

        group.bench_function(format!("alarm_sequential_{count}"), |b| {
            b.iter(|| black_box(engine.ask(&network, &alarm, &evidence)));
        });

        #[cfg(feature = "parallel")]
        group.bench_function(format!("alarm_parallel_{count}"), |b| {
            b.iter(|| black_box(engine.ask_par(&network, &alarm, &evidence)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_exact_inference,
    benchmark_rejection_sampling
);
criterion_main!(benches);
