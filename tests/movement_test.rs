//! Stepped movement and collision avoidance

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_sim::simulation::{
    Axis, Motion, NoOpMonitor, PathSegment, Position, SimVehicle, StepOutcome, VehicleId,
    VehicleRegistry,
};

fn motion() -> Motion {
    Motion::new(5.0, Duration::from_millis(1), 30.0)
}

fn register(registry: &VehicleRegistry, id: usize, position: Position) -> Arc<SimVehicle> {
    let vehicle = Arc::new(SimVehicle::new(VehicleId(id), position));
    registry.insert(Arc::clone(&vehicle));
    vehicle
}

#[test]
fn test_step_moves_until_target_and_may_overshoot() {
    let registry = VehicleRegistry::new();
    let motion = Motion::new(4.0, Duration::from_millis(1), 30.0);
    let vehicle = register(&registry, 0, Position::new(0.0, 0.0));
    let segment = PathSegment::right(10.0);

    assert_eq!(motion.step(&vehicle, &segment, &registry), StepOutcome::Moved);
    assert_eq!(motion.step(&vehicle, &segment, &registry), StepOutcome::Moved);
    assert_eq!(motion.step(&vehicle, &segment, &registry), StepOutcome::Moved);
    // 12 >= 10: the last step passed the target
    assert_eq!(vehicle.position(), Position::new(12.0, 0.0));
    assert_eq!(motion.step(&vehicle, &segment, &registry), StepOutcome::Arrived);
}

#[test]
fn test_vehicle_on_other_lane_does_not_block() {
    let registry = VehicleRegistry::new();
    let mover = register(&registry, 0, Position::new(0.0, 0.0));
    register(&registry, 1, Position::new(10.0, 5.0));
    let outcome = motion().step(&mover, &PathSegment::right(100.0), &registry);
    assert_eq!(outcome, StepOutcome::Moved);
}

/// Two vehicles head towards each other on one lane; the second turns off
/// before they meet. The first must hold while the second is still in the
/// way and keep moving once the lane is clear.
#[test]
fn test_collision_avoidance_suppresses_a_step() {
    let registry = VehicleRegistry::new();
    let motion = motion();
    let a = register(&registry, 0, Position::new(0.0, 100.0));
    let b = register(&registry, 1, Position::new(100.0, 100.0));
    let a_route = [PathSegment::right(200.0)];
    let b_route = [PathSegment::left(65.0), PathSegment::down(200.0)];

    let (mut a_leg, mut b_leg) = (0, 0);
    let mut held_while_other_moved = false;
    for _ in 0..500 {
        if a_leg == a_route.len() && b_leg == b_route.len() {
            break;
        }
        let a_outcome = if a_leg < a_route.len() {
            motion.step(&a, &a_route[a_leg], &registry)
        } else {
            StepOutcome::Arrived
        };
        if a_outcome == StepOutcome::Arrived && a_leg < a_route.len() {
            a_leg += 1;
        }
        let b_outcome = if b_leg < b_route.len() {
            motion.step(&b, &b_route[b_leg], &registry)
        } else {
            StepOutcome::Arrived
        };
        if b_outcome == StepOutcome::Arrived && b_leg < b_route.len() {
            b_leg += 1;
        }

        if a_outcome == StepOutcome::Held && b_outcome == StepOutcome::Moved {
            held_while_other_moved = true;
        }

        let (pa, pb) = (a.position(), b.position());
        if pa.y == pb.y {
            assert!((pa.x - pb.x).abs() >= 30.0, "lane overlap at {pa:?} / {pb:?}");
        }
    }

    assert!(held_while_other_moved, "no step was ever suppressed");
    assert_eq!(a.position(), Position::new(200.0, 100.0));
    assert_eq!(b.position(), Position::new(65.0, 200.0));
}

/// Followers queue up behind a stationary vehicle and keep the minimum lane
/// distance; once it is gone they all finish their segment.
#[test]
fn test_followers_keep_lane_distance() {
    let registry = Arc::new(VehicleRegistry::new());
    let motion = motion();
    let leader = register(&registry, 100, Position::new(200.0, 50.0));
    let segment = PathSegment::right(300.0);

    let followers: Vec<_> = (0..4)
        .map(|k| register(&registry, k, Position::new(-40.0 * k as f32, 50.0)))
        .collect();

    let handles: Vec<_> = followers
        .iter()
        .map(|vehicle| {
            let vehicle = Arc::clone(vehicle);
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                motion.follow_segment(&vehicle, &segment, &registry, &NoOpMonitor);
                registry.remove(vehicle.id());
                vehicle.position()
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(500));
    let mut xs: Vec<f32> = followers.iter().map(|v| v.position().x).collect();
    xs.push(leader.position().x);
    xs.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(xs[0], 200.0, "followers must not pass the stationary vehicle");
    for pair in xs.windows(2) {
        assert!(pair[0] - pair[1] >= 30.0, "gap too small: {xs:?}");
    }

    registry.remove(leader.id());
    for handle in handles {
        let end = handle.join().expect("follower panicked");
        assert!(end.x >= 300.0);
    }
    assert!(registry.is_empty());
}

#[test]
fn test_admission_waits_for_clear_spawn_point() {
    let registry = VehicleRegistry::new();
    let first = Arc::new(SimVehicle::new(VehicleId(0), Position::new(445.0, -20.0)));
    let second = Arc::new(SimVehicle::new(VehicleId(1), Position::new(445.0, -20.0)));

    assert!(registry.try_admit(&first, 30.0));
    assert!(!registry.try_admit(&second, 30.0));
    assert!(!registry.contains(VehicleId(1)));

    first.shift(Axis::Vertical, 30.0);
    assert!(registry.try_admit(&second, 30.0));
    assert_eq!(registry.len(), 2);
}

/// A vehicle turning onto a lane waits at the corner until the vehicle
/// already driving that lane is far enough past, then follows it.
#[test]
fn test_turning_vehicle_merges_into_a_gap() {
    let registry = VehicleRegistry::new();
    let motion = motion();
    let turning = register(&registry, 0, Position::new(385.0, 420.0));
    let through = register(&registry, 1, Position::new(380.0, 425.0));
    let turning_route = [PathSegment::down(425.0), PathSegment::right(475.0)];
    let through_leg = PathSegment::right(475.0);

    // landing on the exit row now would put it 5 units ahead of `through`
    assert_eq!(
        motion.step(&turning, &turning_route[0], &registry),
        StepOutcome::Held
    );
    assert_eq!(turning.position(), Position::new(385.0, 420.0));

    let mut leg = 0;
    let mut through_on_map = true;
    for _ in 0..300 {
        if through_on_map && motion.step(&through, &through_leg, &registry) == StepOutcome::Arrived
        {
            registry.remove(through.id());
            through_on_map = false;
        }
        if leg < turning_route.len()
            && motion.step(&turning, &turning_route[leg], &registry) == StepOutcome::Arrived
        {
            leg += 1;
        }

        let (t, b) = (turning.position(), through.position());
        if through_on_map && t.y == b.y {
            assert!((t.x - b.x).abs() >= 30.0, "merged too close: {t:?} / {b:?}");
        }
        if leg == turning_route.len() {
            break;
        }
    }

    assert_eq!(leg, turning_route.len());
    assert_eq!(turning.position(), Position::new(475.0, 425.0));
    assert_eq!(turning.lane(), Some(Axis::Horizontal));
}
