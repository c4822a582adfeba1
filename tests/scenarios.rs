use std::collections::VecDeque;

use dbscan_core::{Dbscan, ErrorKind, IndexKind, PointKind};

/// Connected components of the "within eps" graph, numbered by lowest member.
fn eps_components(data: &[Vec<f32>], eps: f32) -> Vec<usize> {
    let close = |a: &[f32], b: &[f32]| {
        let d2: f64 = a
            .iter()
            .zip(b)
            .map(|(&x, &y)| (f64::from(x) - f64::from(y)).powi(2))
            .sum();
        d2 <= f64::from(eps).powi(2)
    };

    let mut comp = vec![usize::MAX; data.len()];
    let mut next = 0;
    for start in 0..data.len() {
        if comp[start] != usize::MAX {
            continue;
        }
        comp[start] = next;
        let mut queue = VecDeque::from([start]);
        while let Some(i) = queue.pop_front() {
            for j in 0..data.len() {
                if comp[j] == usize::MAX && close(&data[i], &data[j]) {
                    comp[j] = next;
                    queue.push_back(j);
                }
            }
        }
        next += 1;
    }
    comp
}

#[test]
fn line_cluster_with_outlier() {
    let mut data: Vec<Vec<f32>> = (0..10).map(|i| vec![i as f32 * 0.1, 0.0]).collect();
    data.push(vec![0.45, 10.0]);

    let fit = Dbscan::new(0.5, 3).fit(&data).unwrap();

    assert_eq!(fit.n_clusters(), 1);
    assert!(fit.labels()[..10].iter().all(|l| *l == Some(0)));
    assert_eq!(fit.label(10), None);
    // Even the endpoints have at least five points within 0.5.
    assert_eq!(fit.core_sample_indices(), (0..10).collect::<Vec<_>>());
    assert_eq!(fit.point_kind(10), PointKind::Noise);
    assert_eq!(fit.labels_signed()[10], -1);

    let summary = fit.summary();
    assert_eq!(summary.n_core, 10);
    assert_eq!(summary.n_border, 0);
    assert_eq!(summary.n_noise, 1);
}

fn bridged_groups() -> (Vec<Vec<f32>>, Vec<Vec<f32>>, Vec<f32>) {
    // The bridge is exactly eps = 0.5 from the nearest core on each side and
    // has only three points in range, so with min_pts = 4 it is a border point
    // of both groups.
    let left = vec![vec![0.0, 0.0], vec![0.125, 0.0], vec![0.25, 0.0], vec![0.5, 0.0]];
    let right = vec![vec![1.5, 0.0], vec![1.75, 0.0], vec![1.875, 0.0], vec![2.0, 0.0]];
    (left, right, vec![1.0, 0.0])
}

#[test]
fn shared_border_goes_to_lower_index_cluster() {
    let (left, right, bridge) = bridged_groups();
    let mut data = left;
    data.push(bridge);
    data.extend(right);

    let fit = Dbscan::new(0.5, 4).fit(&data).unwrap();
    assert_eq!(fit.n_clusters(), 2);
    assert_eq!(fit.point_kind(4), PointKind::Border);
    assert_eq!(fit.label(4), Some(0));
    assert_eq!(fit.label(0), Some(0));
    assert_eq!(fit.label(5), Some(1));
}

#[test]
fn shared_border_follows_input_order() {
    let (left, right, bridge) = bridged_groups();
    let mut data = right;
    data.push(bridge);
    data.extend(left);

    let fit = Dbscan::new(0.5, 4).fit(&data).unwrap();
    assert_eq!(fit.n_clusters(), 2);
    // The right group now comes first and keeps the bridge.
    assert_eq!(fit.label(0), Some(0));
    assert_eq!(fit.label(4), Some(0));
    assert_eq!(fit.label(5), Some(1));
}

#[test]
fn empty_input() {
    let data: Vec<Vec<f32>> = Vec::new();
    let fit = Dbscan::new(0.3, 10).fit(&data).unwrap();
    assert!(fit.labels().is_empty());
    assert_eq!(fit.n_clusters(), 0);
    assert!(fit.core_sample_indices().is_empty());
}

#[test]
fn min_pts_one_gives_connected_components() {
    let data: Vec<Vec<f32>> = (0..40)
        .map(|i| {
            let t = i as f32;
            vec![(t * 1.7).sin() * 4.0, (t * 0.9).cos() * 4.0]
        })
        .collect();

    for eps in [0.3f32, 0.8, 1.5] {
        let fit = Dbscan::new(eps, 1).fit(&data).unwrap();
        assert_eq!(fit.noise_count(), 0);
        assert_eq!(fit.core_sample_indices().len(), data.len());

        let expected: Vec<Option<usize>> =
            eps_components(&data, eps).into_iter().map(Some).collect();
        assert_eq!(fit.labels(), expected.as_slice());
    }
}

#[test]
fn rerun_is_stable() {
    let data: Vec<Vec<f32>> = (0..150)
        .map(|i| {
            let t = i as f32 * 0.05;
            vec![t.cos() * (1.0 + (i % 3) as f32), t.sin(), (i % 4) as f32 * 0.1]
        })
        .collect();

    for index in [IndexKind::Auto, IndexKind::BruteForce, IndexKind::Grid] {
        let dbscan = Dbscan::new(0.25, 4).with_index(index);
        let first = dbscan.fit(&data).unwrap();
        let second = dbscan.fit(&data).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn extreme_radius_matches_across_indexes() {
    // Far apart relative to eps at both ends of the f32 range.
    let cases: [(Vec<Vec<f32>>, f32); 2] = [
        (vec![vec![0.0], vec![1e-24]], 1e-25),
        (vec![vec![0.0], vec![1e30]], 1.9e19),
    ];
    for (data, eps) in cases {
        for index in [IndexKind::BruteForce, IndexKind::Grid] {
            let fit = Dbscan::new(eps, 2).with_index(index).fit(&data).unwrap();
            assert_eq!(fit.labels(), &[None, None], "{index:?} eps={eps}");
            assert!(fit.core_sample_indices().is_empty());
        }
    }

    // Within range at the same scales: one cluster either way.
    let cases: [(Vec<Vec<f32>>, f32); 2] = [
        (vec![vec![0.0], vec![1e-25]], 1e-25),
        (vec![vec![0.0], vec![1e19]], 1.9e19),
    ];
    for (data, eps) in cases {
        for index in [IndexKind::BruteForce, IndexKind::Grid] {
            let fit = Dbscan::new(eps, 2).with_index(index).fit(&data).unwrap();
            assert_eq!(fit.labels(), &[Some(0), Some(0)], "{index:?} eps={eps}");
        }
    }
}

#[test]
fn errors_leave_no_result() {
    let ragged = vec![vec![0.0, 0.0], vec![1.0, 1.0, 1.0]];
    let err = Dbscan::new(0.5, 3).fit(&ragged).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let non_finite = vec![vec![0.0, f32::NEG_INFINITY]];
    let err = Dbscan::new(0.5, 3).fit(&non_finite).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = Dbscan::new(0.0, 3).fit(&[vec![0.0]]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}
