#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::indexing_slicing)]

//! Measures how chain lengths evolve as a `ChainedHashMap` fills up under different
//! load factor thresholds, and plots the results.

use chainmap::ChainedHashMap;
use plotters::prelude::*;
use rand::Rng;

const TOTAL_KEYS: usize = 100_000;
const SAMPLES: usize = 20;
const INITIAL_CAPACITY: usize = 10;
const THRESHOLDS: [f64; 4] = [0.5, 0.7, 1.0, 2.0];

/// Chain statistics taken after a batch of insertions
#[derive(Debug, Clone, Copy)]
struct Sample {
    entries: usize,
    capacity: usize,
    longest_chain: usize,
    mean_chain: f64,
}

fn sample<K>(map: &ChainedHashMap<K, ()>) -> Sample {
    let (occupied, longest) = map
        .chain_lengths()
        .filter(|&len| len > 0)
        .fold((0_usize, 0_usize), |(count, longest), len| (count.saturating_add(1), longest.max(len)));

    let mean_chain = if occupied == 0 { 0.0 } else { map.len() as f64 / occupied as f64 };
    Sample { entries: map.len(), capacity: map.capacity(), longest_chain: longest, mean_chain }
}

fn run(threshold: f64, keys: &[u64]) -> Vec<Sample> {
    let mut map = ChainedHashMap::with_config(INITIAL_CAPACITY, threshold);
    let batch = keys.len() / SAMPLES;
    let mut samples = Vec::with_capacity(SAMPLES);

    for chunk in keys.chunks(batch.max(1)) {
        map.extend(chunk.iter().map(|&key| (key, ())));
        samples.push(sample(&map));
    }

    samples
}

fn plot(
    path: &str,
    caption: &str,
    y_desc: &str,
    results: &[(f64, Vec<Sample>)],
    metric: fn(&Sample) -> f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = results
        .iter()
        .flat_map(|(_, samples)| samples.iter().map(metric))
        .fold(0.0, f64::max) *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..TOTAL_KEYS, 0.0..max_y.max(1.0))?;

    chart
        .configure_mesh()
        .x_desc("Entries Inserted")
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    let colors = [
        RGBColor(220, 50, 50),
        RGBColor(50, 90, 220),
        RGBColor(50, 180, 50),
        RGBColor(180, 50, 180),
    ];

    for (index, (threshold, samples)) in results.iter().enumerate() {
        let style = ShapeStyle::from(&colors[index % colors.len()]).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|sample| (sample.entries, metric(sample))),
                style,
            ))?
            .label(format!("threshold {threshold}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..TOTAL_KEYS).map(|_| rng.random()).collect();

    let mut results = Vec::with_capacity(THRESHOLDS.len());
    for threshold in THRESHOLDS {
        let samples = run(threshold, &keys);
        if let Some(last) = samples.last() {
            println!(
                "threshold {threshold}: {} entries, {} buckets, longest chain {}, mean chain {:.2}",
                last.entries, last.capacity, last.longest_chain, last.mean_chain
            );
        }
        results.push((threshold, samples));
    }

    plot(
        "longest_chain.png",
        "Longest Chain While Filling",
        "Longest Chain (entries)",
        &results,
        |sample| sample.longest_chain as f64,
    )?;
    plot(
        "mean_chain_length.png",
        "Mean Length of Non-Empty Chains",
        "Mean Chain Length (entries)",
        &results,
        |sample| sample.mean_chain,
    )?;
    plot("bucket_count.png", "Bucket Count While Filling", "Buckets", &results, |sample| {
        sample.capacity as f64
    })?;

    println!("Generated plots: longest_chain.png, mean_chain_length.png, bucket_count.png");

    Ok(())
}
