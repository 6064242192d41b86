//! Gate exclusivity

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use parking_sim::simulation::{Gate, VehicleId};

#[test]
fn test_gate_is_exclusive_under_contention() {
    let gate = Arc::new(Gate::new());
    let contenders = 8;
    let barrier = Arc::new(Barrier::new(contenders));
    let inside = Arc::new(AtomicUsize::new(0));
    let crossings = Arc::new(AtomicUsize::new(0));
    let violation = Arc::new(AtomicBool::new(false));

    let mut handles = Vec::new();
    for id in 0..contenders {
        let gate = Arc::clone(&gate);
        let barrier = Arc::clone(&barrier);
        let inside = Arc::clone(&inside);
        let crossings = Arc::clone(&crossings);
        let violation = Arc::clone(&violation);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..5 {
                let guard = gate.enter(VehicleId(id));
                if inside.fetch_add(1, Ordering::SeqCst) > 0 {
                    violation.store(true, Ordering::SeqCst);
                }
                if gate.holder() != Some(VehicleId(id)) {
                    violation.store(true, Ordering::SeqCst);
                }
                thread::sleep(Duration::from_millis(1));
                inside.fetch_sub(1, Ordering::SeqCst);
                crossings.fetch_add(1, Ordering::SeqCst);
                drop(guard);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("gate thread panicked");
    }

    assert!(!violation.load(Ordering::SeqCst), "two vehicles inside the gate");
    assert_eq!(crossings.load(Ordering::SeqCst), contenders * 5);
    assert_eq!(gate.holder(), None);
}

#[test]
fn test_guard_releases_gate_on_drop() {
    let gate = Gate::new();
    {
        let guard = gate.enter(VehicleId(3));
        assert_eq!(guard.vehicle(), VehicleId(3));
        assert_eq!(gate.holder(), Some(VehicleId(3)));
    }
    assert_eq!(gate.holder(), None);
    let _again = gate.enter(VehicleId(4));
    assert_eq!(gate.holder(), Some(VehicleId(4)));
}
