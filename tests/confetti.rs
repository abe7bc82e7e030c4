// Confetti session behaviour with deterministic seeds.

use duck_quiz::confetti::{AnimationSession, ConfettiSettings, FRAME_COUNT, FrameStatus};
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[test]
fn burst_runs_exactly_frame_count_updates() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut session =
        AnimationSession::launch(&ConfettiSettings::default(), 1280.0, 720.0, &mut rng);
    let mut updates = 0;
    while session.step() == FrameStatus::Running {
        updates += 1;
    }
    // The finishing call is itself an update.
    assert_eq!(updates + 1, FRAME_COUNT);
    assert_eq!(session.frame_count(), FRAME_COUNT);
    for _ in 0..10 {
        assert_eq!(session.step(), FrameStatus::Finished);
    }
    assert_eq!(session.frame_count(), FRAME_COUNT);
}

#[test]
fn positions_depend_only_on_initial_state_and_frame() {
    let settings = ConfettiSettings::default();
    let mut a = AnimationSession::launch(&settings, 640.0, 480.0, &mut SmallRng::seed_from_u64(5));
    let b = AnimationSession::launch(&settings, 640.0, 480.0, &mut SmallRng::seed_from_u64(5));
    for _ in 0..90 {
        a.step();
    }
    for (moved, start) in a.particles().iter().zip(b.particles()) {
        let expected = start.at_frame(90);
        assert!((moved.x - expected.x).abs() < 1e-9);
        assert!((moved.y - expected.y).abs() < 1e-9);
        assert!((moved.rotation - expected.rotation).abs() < 1e-9);
        assert_eq!(moved.size, start.size);
        assert_eq!(moved.color, start.color);
    }
}

#[test]
fn overlapping_bursts_are_independent() {
    let settings = ConfettiSettings::default();
    let mut first =
        AnimationSession::launch(&settings, 300.0, 300.0, &mut SmallRng::seed_from_u64(1));
    for _ in 0..100 {
        first.step();
    }
    let mut second =
        AnimationSession::launch(&settings, 300.0, 300.0, &mut SmallRng::seed_from_u64(2));
    assert_eq!(second.frame_count(), 0);
    second.step();
    assert_eq!(first.frame_count(), 100);
    assert_eq!(second.frame_count(), 1);
}
