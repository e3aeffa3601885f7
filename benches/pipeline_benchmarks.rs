//! Benchmarks for the gesture decision path
//!
//! Covers everything between landmark extraction and pointer output.
//! Model inference and camera capture are excluded so the numbers track
//! the per frame cost the pipeline adds on top of detection.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use finger_pointer::dispatch::{GestureDispatcher, GestureIntent};
use finger_pointer::gesture::{fingertip_midpoint, Finger, GestureClassifier};
use finger_pointer::hand_detection::{landmark_index, HandLandmarks, Landmark};
use finger_pointer::mapping::ScreenMapper;
use finger_pointer::smoothing::TrajectorySmoother;
use std::time::{Duration, Instant};

const OPEN_HAND: [(f32, f32); 21] = [
    (300.0, 520.0),
    (240.0, 480.0),
    (200.0, 420.0),
    (170.0, 370.0),
    (150.0, 330.0),
    (260.0, 340.0),
    (250.0, 280.0),
    (245.0, 235.0),
    (240.0, 190.0),
    (310.0, 330.0),
    (310.0, 260.0),
    (310.0, 210.0),
    (310.0, 160.0),
    (360.0, 340.0),
    (365.0, 275.0),
    (368.0, 230.0),
    (370.0, 185.0),
    (410.0, 360.0),
    (425.0, 305.0),
    (432.0, 270.0),
    (440.0, 235.0),
];

fn synthetic_hand(pinched: Option<Finger>) -> HandLandmarks {
    let mut points = OPEN_HAND;
    if let Some(finger) = pinched {
        let (thumb_x, thumb_y) = points[landmark_index::THUMB_TIP];
        points[finger.tip_index()] = (thumb_x + 6.0, thumb_y + 6.0);
    }
    let landmarks = points.iter().map(|&(x, y)| Landmark::new(x, y)).collect();
    HandLandmarks::from_points(landmarks, 0.95).expect("valid 21 point hand")
}

fn default_mapper() -> ScreenMapper {
    let smoother = TrajectorySmoother::new(13, 1, 60);
    ScreenMapper::new(1200.0, 720.0, 1920.0, 1080.0, 0.1, smoother)
        .expect("valid mapper geometry")
}

fn benchmark_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    let classifier = GestureClassifier::new();
    let hands = vec![
        ("open", synthetic_hand(None)),
        ("index_pinch", synthetic_hand(Some(Finger::Index))),
        ("middle_pinch", synthetic_hand(Some(Finger::Middle))),
        ("ring_pinch", synthetic_hand(Some(Finger::Ring))),
    ];

    for (name, hand) in &hands {
        group.bench_with_input(BenchmarkId::new("classify", name), hand, |b, hand| {
            b.iter(|| black_box(classifier.classify(black_box(hand))));
        });
    }

    group.finish();
}

fn benchmark_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let classifier = GestureClassifier::new();
    let mut dispatcher = GestureDispatcher::new(
        Duration::from_millis(200),
        Duration::from_millis(500),
        0.5,
    );

    let open_touch = classifier.classify(&synthetic_hand(None));
    let pinch_touch = classifier.classify(&synthetic_hand(Some(Finger::Index)));

    group.bench_function("movement", |b| {
        b.iter(|| black_box(dispatcher.dispatch(black_box(open_touch), Instant::now())));
    });

    group.bench_function("click_with_cooldown", |b| {
        b.iter(|| black_box(dispatcher.dispatch(black_box(pinch_touch), Instant::now())));
    });

    group.finish();
}

fn benchmark_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapping");

    let mut mapper = default_mapper();
    // Warm past the bootstrap so the fitted path is measured
    for i in 0..80 {
        let v = f64::from(i);
        mapper.map_to_screen(500.0 + v, 300.0 + v);
    }

    group.bench_function("map_to_screen", |b| {
        b.iter(|| black_box(mapper.map_to_screen(black_box(612.0), black_box(348.0))));
    });

    group.finish();
}

fn benchmark_full_decision_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_decision_path");

    // A drifting open hand keeps the pipeline in movement mode, which is
    // the hot path during normal use
    let frames: Vec<HandLandmarks> = (0..100)
        .map(|i| {
            let drift = i as f32 * 2.0;
            let landmarks = OPEN_HAND
                .iter()
                .map(|&(x, y)| Landmark::new(x + drift, y))
                .collect();
            HandLandmarks::from_points(landmarks, 0.95).expect("valid 21 point hand")
        })
        .collect();

    let classifier = GestureClassifier::new();
    let mut dispatcher = GestureDispatcher::new(
        Duration::from_millis(200),
        Duration::from_millis(500),
        0.5,
    );
    let mut mapper = default_mapper();

    group.bench_function("movement_sequence_100", |b| {
        b.iter(|| {
            mapper.reset();
            for hand in &frames {
                let touch = classifier.classify(hand);
                if let Some(intent) = dispatcher.dispatch(touch, Instant::now()) {
                    match intent {
                        GestureIntent::MovePointer | GestureIntent::Scroll => {
                            let pointer = fingertip_midpoint(hand, Finger::Thumb, Finger::Index);
                            black_box(
                                mapper.map_to_screen(
                                    f64::from(pointer.x),
                                    f64::from(pointer.y),
                                ),
                            );
                        }
                        GestureIntent::LeftClick | GestureIntent::RightClick => {
                            black_box(intent);
                        }
                    }
                }
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_classification,
    benchmark_dispatch,
    benchmark_mapping,
    benchmark_full_decision_path
);
criterion_main!(benches);
