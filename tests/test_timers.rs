use arena_shooter::timers::*;

#[test]
fn ms_to_ticks_at_sixty_hz() {
    assert_eq!(ms_to_ticks(1000, 60), 60);
    assert_eq!(ms_to_ticks(500, 60), 30);
    assert_eq!(ms_to_ticks(750, 60), 45);
    assert_eq!(ms_to_ticks(100, 60), 6);
    assert_eq!(ms_to_ticks(0, 60), 0);
    // never rounds a real duration down to nothing
    assert_eq!(ms_to_ticks(1, 60), 1);
}

#[test]
fn countdown_expires_once() {
    let mut c = Countdown::default();
    assert!(!c.is_active());
    assert!(!c.tick());

    c.start(3);
    assert!(c.is_active());
    assert!(!c.tick());
    assert!(!c.tick());
    assert!(c.tick());
    assert!(!c.is_active());
    assert!(!c.tick());
}

#[test]
fn countdown_clear_cancels() {
    let mut c = Countdown::default();
    c.start(10);
    c.clear();
    assert!(!c.is_active());
    assert_eq!(c.remaining(), 0);
}

#[test]
fn repeating_fires_every_interval() {
    let mut r = Repeating::every(3);
    let fired: Vec<bool> = (0..7).map(|_| r.tick()).collect();
    assert_eq!(fired, vec![false, false, true, false, false, true, false]);
}

#[test]
fn repeating_stop_silences_timer() {
    let mut r = Repeating::every(2);
    r.stop();
    assert!(!r.is_running());
    assert!((0..10).all(|_| !r.tick()));
}

#[test]
fn repeating_set_interval_restarts_phase() {
    let mut r = Repeating::every(5);
    r.tick();
    r.tick();
    r.set_interval(2);
    assert_eq!(r.interval(), 2);
    assert!(!r.tick());
    assert!(r.tick());
}
