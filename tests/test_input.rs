use money_shooter::compute::{init_state, tick};
use money_shooter::catalog::find_by_value;
use money_shooter::entities::{Enemy, RoundState};
use money_shooter::input::*;

fn over_state() -> RoundState {
    let mut s = init_state(1000.0, 800.0, 0);
    s.enemies.push(Enemy::spawn(find_by_value(1).unwrap(), 500.0, 400.0));
    tick(&s).0
}

// ── Button geometry ───────────────────────────────────────────────────────────

#[test]
fn button_sits_bottom_right_with_margin() {
    let b = new_round_button(1000.0, 800.0);
    assert_eq!(b, Rect { x: 840.0, y: 730.0, width: 140.0, height: 50.0 });
}

#[test]
fn rect_edges_are_inclusive() {
    let b = new_round_button(1000.0, 800.0);
    assert!(b.contains(840.0, 730.0));
    assert!(b.contains(980.0, 780.0));
    assert!(!b.contains(839.9, 750.0));
    assert!(!b.contains(900.0, 780.1));
}

// ── Press resolution ──────────────────────────────────────────────────────────

#[test]
fn press_while_active_fires_anywhere() {
    let s = init_state(1000.0, 800.0, 0);
    assert_eq!(resolve_press(&s, 10.0, 10.0), Some(PointerAction::Fire));
    // Even on the (hidden) button area.
    assert_eq!(resolve_press(&s, 900.0, 750.0), Some(PointerAction::Fire));
}

#[test]
fn press_outside_playfield_is_ignored() {
    let s = init_state(1000.0, 800.0, 0);
    assert_eq!(resolve_press(&s, -1.0, 10.0), None);
    assert_eq!(resolve_press(&s, 10.0, 801.0), None);
    assert_eq!(resolve_press(&over_state(), 1001.0, 750.0), None);
}

#[test]
fn press_when_over_only_hits_button() {
    let s = over_state();
    assert!(s.is_over());
    assert_eq!(resolve_press(&s, 900.0, 750.0), Some(PointerAction::NewRound));
    assert_eq!(resolve_press(&s, 100.0, 100.0), None);
}

// ── Cell ↔ world ──────────────────────────────────────────────────────────────

#[test]
fn cell_centre_in_world_units() {
    assert_eq!(cell_to_world(0, 0), (5.0, 10.0));
    assert_eq!(cell_to_world(10, 3), (105.0, 70.0));
}

#[test]
fn world_to_cell_round_trips_cell_centres() {
    let (x, y) = cell_to_world(42, 17);
    assert_eq!(world_to_cell(x, y, 120, 40), Some((42, 17)));
}

#[test]
fn world_to_cell_rejects_off_screen_points() {
    assert_eq!(world_to_cell(-1.0, 5.0, 10, 10), None);
    assert_eq!(world_to_cell(5.0, -60.0, 10, 10), None);
    assert_eq!(world_to_cell(100.0, 5.0, 10, 10), None);
    assert_eq!(world_to_cell(5.0, 200.0, 10, 10), None);
    assert_eq!(world_to_cell(99.0, 199.0, 10, 10), Some((9, 9)));
}

#[test]
fn viewport_scales_terminal_size() {
    assert_eq!(viewport(120, 40), (1200.0, 800.0));
}

#[test]
fn bottom_right_cells_land_on_button() {
    // A 100×40 terminal: the button covers the cells the summary draws it on.
    let (w, h) = viewport(100, 40);
    let b = new_round_button(w, h);
    let (x, y) = cell_to_world(90, 37);
    assert!(b.contains(x, y));
}
