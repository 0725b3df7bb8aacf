use matnet::{Matrix, Network, TrainConfig, TrainingBatch};
use tracing_subscriber::EnvFilter;

fn main() -> matnet::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Classic XOR dataset, one column per sample.
    let rows = [
        ([0.0, 0.0], 0.0),
        ([0.0, 1.0], 1.0),
        ([1.0, 0.0], 1.0),
        ([1.0, 1.0], 0.0),
    ];
    let batch: TrainingBatch = rows
        .iter()
        .map(|(x, y)| (Matrix::column(x.to_vec()), Matrix::column(vec![*y])))
        .collect();

    // 2 -> 4 -> 1, all layers use the flipped sigmoid.
    let mut net = Network::with_layers(&[2, 4, 1])?;
    net.randomize_with_seed(0);

    let report = net.train(
        std::slice::from_ref(&batch),
        Some(&batch),
        &TrainConfig::default(),
    )?;
    println!(
        "iterations={} final_average_cost={:?}",
        report.iterations,
        report.final_cost()
    );

    for (x, y) in &rows {
        let out = net.predict(&Matrix::column(x.to_vec()))?;
        println!("x={x:?} expected={y} output={}", out.data()[0]);
    }

    Ok(())
}
