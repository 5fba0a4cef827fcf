#![allow(dead_code)]

use bayes_inference::DiscreteNetwork;

/// Cloudy -> {Sprinkler, Rain} -> WetGrass.
pub fn sprinkler() -> DiscreteNetwork<bool> {
    DiscreteNetwork::builder()
        .boolean_node("Cloudy", &[], vec![(vec![], 0.5)])
        .boolean_node("Sprinkler", &["Cloudy"], vec![(vec![true], 0.1), (vec![false], 0.5)])
        .boolean_node("Rain", &["Cloudy"], vec![(vec![true], 0.8), (vec![false], 0.2)])
        .boolean_node(
            "WetGrass",
            &["Sprinkler", "Rain"],
            vec![
                (vec![true, true], 0.99),
                (vec![true, false], 0.9),
                (vec![false, true], 0.9),
                (vec![false, false], 0.0),
            ],
        )
        .build()
        .expect("sprinkler network is well formed")
}

/// Burglary and Earthquake -> Alarm -> {JohnCalls, MaryCalls}.
pub fn burglary() -> DiscreteNetwork<bool> {
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
        .expect("burglary network is well formed")
}

/// Two-node chain A -> B.
pub fn chain() -> DiscreteNetwork<bool> {
    DiscreteNetwork::builder()
        .boolean_node("A", &[], vec![(vec![], 0.5)])
        .boolean_node("B", &["A"], vec![(vec![true], 0.9), (vec![false], 0.2)])
        .build()
        .expect("chain network is well formed")
}
