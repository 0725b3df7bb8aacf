use matnet::{Matrix, Network, TrainingBatch};
use tracing_subscriber::EnvFilter;

fn main() -> matnet::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut batch = TrainingBatch::new();
    batch.add_sample(
        Matrix::column(vec![1.0, 0.0, 0.0]),
        Matrix::column(vec![1.0, 0.0]),
    );
    batch.add_sample(
        Matrix::column(vec![0.0, 0.0, 1.0]),
        Matrix::column(vec![0.0, 1.0]),
    );

    let mut net = Network::with_layers(&[3, 4, 2])?;
    net.randomize_with_seed(42);
    for _ in 0..200 {
        net.process_batch(0.5, &batch)?;
    }

    let path = std::env::temp_dir().join("matnet_save_load_text.txt");
    net.save(&path)?;
    println!("saved to {}:\n{}", path.display(), net.to_text());

    let mut loaded = Network::load(&path)?;
    let input = Matrix::column(vec![1.0, 0.0, 0.0]);
    let a = net.predict(&input)?.clone();
    let b = loaded.predict(&input)?;
    println!(
        "original={:?} loaded={:?} identical={}",
        a.data(),
        b.data(),
        &a == b
    );

    std::fs::remove_file(&path)?;
    Ok(())
}
