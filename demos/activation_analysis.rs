//! Activation analysis on synthetic trials
//!
//! Runs every analysis procedure on a small synthetic pupillometry session,
//! prints the correlation reports and writes each figure as an SVG file to
//! the system temp directory.
//!
//! Run with `RUST_LOG=lcne=debug` to see alignment and t-SNE settings.

use std::path::Path;

use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};
use lcne::prelude::*;
use plotters::prelude::*;

type Backend = NdArray<f32>;

const TRIALS: usize = 60;
const FEATURES: usize = 4;

fn session() -> lcne::Result<ObservationFrame> {
    let pupil = (0..TRIALS)
        .map(|t| 3.5 + 0.4 * (t as f64 * 0.25).sin() + if t % 3 == 0 { 0.3 } else { 0.0 })
        .collect();
    let condition = (0..TRIALS)
        .map(|t| if t % 3 == 0 { "High Load" } else { "Low Load" }.to_string())
        .collect();
    // Session was recorded with one trial fewer than the model sees
    Ok(ObservationFrame::new(pupil, condition)?.head(TRIALS - 1))
}

fn save(name: &str, analysis: &Analysis, dir: &Path) -> lcne::Result<()> {
    for (i, figure) in analysis.figures.iter().enumerate() {
        let path = dir.join(format!("{name}_{i}.svg"));
        let root = SVGBackend::new(&path, (1500, 1000)).into_drawing_area();
        figure.render(&root)?;
        println!("  wrote {}", path.display());
    }
    if let Some(report) = &analysis.correlations {
        println!("{report}");
    }
    Ok(())
}

fn main() -> lcne::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== LC-NE Activation Analysis ===\n");
    let device = Default::default();
    let frame = session()?;
    let config = AnalysisConfig::default().with_tsne_max_iter(500);
    let dir = std::env::temp_dir();

    let trials = Tensor::<Backend, 2>::random([TRIALS, FEATURES], Distribution::Default, &device);
    let sequences = trials.clone().unsqueeze_dim::<3>(1);

    println!("LSTM with LC-NE gadget");
    let gadget = LstmGadget::<Backend>::new(FEATURES, 16, &device);
    save("gadget", &pca_gadget(&gadget, sequences.clone(), &frame, &config)?, &dir)?;

    println!("LC-NE LSTM");
    let lcne_lstm = LcneLstm::<Backend>::new(FEATURES, 16, &device);
    save("lcne_lstm", &pca_lcne_lstm(&lcne_lstm, trials.clone(), &frame, &config)?, &dir)?;

    println!("Vanilla LC-NE network");
    let network = LcneNetwork::<Backend>::new(FEATURES, 16, &device);
    save("lcne", &pca_lcne(&network, trials.clone(), &frame, &config)?, &dir)?;
    save("firing", &firing_lcne(&network, trials.clone(), &frame, &config)?, &dir)?;

    println!("Feed-forward baseline");
    let ff = FeedForwardNet::<Backend>::new(FEATURES, 32, 16, &device);
    save("feed_forward", &pca_feed_forward(&ff, trials, &frame, &config)?, &dir)?;

    println!("LSTM baseline");
    let lstm = LstmRegressor::<Backend>::new(FEATURES, 16, &device);
    save("lstm", &pca_lstm(&lstm, sequences, &frame, &config)?, &dir)?;

    Ok(())
}
