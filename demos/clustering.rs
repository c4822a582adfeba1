//! DBSCAN on a small 2D dataset: labels, point roles, and a parameter sweep.
//!
//! Run with `RUST_LOG=debug` to see the engine's log lines.

use dbscan_core::{Dbscan, IndexKind, PointKind, k_distances, sweep};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three groups in 2D plus two stray points.
    let data: Vec<Vec<f32>> = vec![
        // Cluster A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Cluster B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Cluster C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
        // Strays
        vec![2.5, 8.0],
        vec![7.5, -3.0],
    ];

    let k = 3;
    let kd = k_distances(&data, k).unwrap();
    println!("=== {k}-distances (descending) ===");
    println!("  {:?}", kd);

    let fit = Dbscan::new(0.5, k).fit(&data).unwrap();
    println!("\n=== DBSCAN (eps=0.5, min_pts={k}) ===");
    for (i, point) in data.iter().enumerate() {
        let tag = match (fit.point_kind(i), fit.label(i)) {
            (PointKind::Noise, _) | (_, None) => "noise".to_string(),
            (PointKind::Core, Some(c)) => format!("cluster {c} (core)"),
            (PointKind::Border, Some(c)) => format!("cluster {c} (border)"),
        };
        println!("  point {:2} ({:5.1}, {:5.1}) => {}", i, point[0], point[1], tag);
    }
    println!("  {:?}", fit.summary());

    println!("\n=== Sweep ===");
    let cells = sweep(&data, &[0.1, 0.3, 0.5, 1.0, 6.0], &[2, 3, 5], IndexKind::Auto).unwrap();
    for cell in cells {
        println!(
            "  eps={:4.1} min_pts={} => {} clusters, {:5.1}% noise",
            cell.epsilon,
            cell.min_pts,
            cell.n_clusters,
            cell.noise_fraction * 100.0
        );
    }
}
