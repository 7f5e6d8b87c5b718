use neatling_lib::{NeatConfig, Run};

const CONFIG: &str = r#"
[genome]
inputs = 4
outputs = 2
initial_connections = 3

[mutation]
add_connection_prob = 0.4
add_node_prob = 0.2

[population]
size = 20
seed = 2024
"#;

#[test]
fn test_run_population_thinks() {
    let config = NeatConfig::from_toml(CONFIG).expect("valid config");
    let mut run = Run::new(config).expect("run");
    for _ in 0..3 {
        run.advance().expect("advance");
    }

    let outputs = run
        .population()
        .think_all(&[0.1, 0.2, 0.3, 0.4])
        .expect("think");
    assert_eq!(outputs.len(), 20);
    assert!(outputs.iter().flatten().all(|o| (0.0..=1.0).contains(o)));
}

#[test]
fn test_snapshot_json_round_trip() {
    let config = NeatConfig::from_toml(CONFIG).expect("valid config");
    let run = Run::new(config).expect("run");
    let genome = run.population().get(0).expect("non-empty");

    let snapshot = genome.snapshot();
    let json = serde_json::to_string(&snapshot).expect("serialize");
    let back: neatling_lib::GenomeSnapshot = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(back.nodes, snapshot.nodes);
    assert_eq!(back.connections.len(), snapshot.connections.len());
    for (c1, c2) in snapshot.connections.iter().zip(back.connections.iter()) {
        assert_eq!((c1.from, c1.to), (c2.from, c2.to));
        assert!((c1.weight - c2.weight).abs() < 1e-6);
        assert_eq!(c1.enabled, c2.enabled);
        assert_eq!(c1.innovation, c2.innovation);
    }
}
