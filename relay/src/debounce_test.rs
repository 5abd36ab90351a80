use super::*;
use uuid::Uuid;

const WINDOW: Duration = Duration::from_millis(300);

#[test]
fn nothing_due_inside_window() {
    let mut d = Debouncer::new(WINDOW);
    let t0 = Instant::now();
    let id = Uuid::new_v4();
    d.schedule(id, GeometryPatch::position(10.0, 20.0), t0);
    assert!(d.is_pending(id));
    assert!(d.take_due(t0 + Duration::from_millis(299)).is_empty());
    assert_eq!(d.take_due(t0 + WINDOW), vec![(id, GeometryPatch::position(10.0, 20.0))]);
    assert!(d.is_empty());
}

#[test]
fn rescheduling_merges_and_extends() {
    let mut d = Debouncer::new(WINDOW);
    let t0 = Instant::now();
    let id = Uuid::new_v4();
    d.schedule(id, GeometryPatch::position(10.0, 20.0), t0);
    let resize = GeometryPatch { width: Some(400.0), ..GeometryPatch::default() };
    d.schedule(id, resize, t0 + Duration::from_millis(200));

    assert!(d.take_due(t0 + WINDOW).is_empty());
    assert_eq!(d.next_deadline(), Some(t0 + Duration::from_millis(500)));
    let due = d.take_due(t0 + Duration::from_millis(500));
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].1, GeometryPatch { x: Some(10.0), y: Some(20.0), width: Some(400.0), height: None });
}

#[test]
fn later_values_win() {
    let mut d = Debouncer::new(WINDOW);
    let t0 = Instant::now();
    let id = Uuid::new_v4();
    d.schedule(id, GeometryPatch::position(10.0, 20.0), t0);
    d.schedule(id, GeometryPatch::position(30.0, 40.0), t0);
    assert_eq!(d.take(id), Some(GeometryPatch::position(30.0, 40.0)));
    assert_eq!(d.take(id), None);
}

#[test]
fn slides_debounce_independently() {
    let mut d = Debouncer::new(WINDOW);
    let t0 = Instant::now();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    d.schedule(a, GeometryPatch::position(1.0, 1.0), t0);
    d.schedule(b, GeometryPatch::position(2.0, 2.0), t0 + Duration::from_millis(100));
    assert_eq!(d.next_deadline(), Some(t0 + WINDOW));

    let due = d.take_due(t0 + WINDOW);
    assert_eq!(due, vec![(a, GeometryPatch::position(1.0, 1.0))]);
    assert!(d.is_pending(b));
}

#[test]
fn drain_flushes_everything_in_deadline_order() {
    let mut d = Debouncer::new(WINDOW);
    let t0 = Instant::now();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    d.schedule(b, GeometryPatch::position(2.0, 2.0), t0 + Duration::from_millis(50));
    d.schedule(a, GeometryPatch::position(1.0, 1.0), t0);
    let ids: Vec<SlideId> = d.drain().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![a, b]);
    assert_eq!(d.next_deadline(), None);
    assert_eq!(d.len(), 0);
}
