//! End-to-end behaviour of the map engine without any network.

use tileview::prelude::*;

fn map_at(zoom: u8, width: f64, height: f64) -> TileMap {
    let config = MapConfig {
        initial_zoom: zoom,
        viewport: Size::new(width, height),
        base_url: "http://tiles.test/".into(),
        token: "t0k".into(),
        ..MapConfig::default()
    };
    TileMap::new(config).unwrap()
}

fn coords(z: u8, xy: &[(u32, u32)]) -> Vec<TileCoord> {
    xy.iter().map(|&(x, y)| TileCoord::new(x, y, z)).collect()
}

#[test]
fn scenario_a_single_world_tile() {
    let tiles = tiles_for_viewport(0, 128.0, 128.0, 800.0, 600.0);
    assert_eq!(tiles, coords(0, &[(0, 0)]));
}

#[test]
fn scenario_b_viewport_covers_whole_world() {
    let tiles = tiles_for_viewport(1, 256.0, 256.0, 800.0, 600.0);
    assert_eq!(tiles, coords(1, &[(0, 0), (1, 0), (0, 1), (1, 1)]));
}

#[test]
fn scenario_c_zoom_in_doubles_center() {
    let mut map = map_at(1, 800.0, 600.0);
    assert_eq!(map.state().center(), Point::new(256.0, 256.0));

    assert!(map.zoom_in());
    assert_eq!(map.zoom(), 2);
    assert_eq!(map.state().center(), Point::new(512.0, 512.0));
}

#[test]
fn scenario_d_zoom_out_at_minimum_is_a_no_op() {
    let mut map = map_at(0, 800.0, 600.0);
    let before = *map.state();
    let generation = map.generation();
    let held = map.tiles().coords();

    assert!(!map.can_zoom_out());
    assert!(!map.zoom_out());
    assert_eq!(*map.state(), before);
    assert_eq!(map.generation(), generation);
    assert_eq!(map.tiles().coords(), held);
}

#[test]
fn zoom_round_trip_restores_center() {
    let mut map = map_at(1, 800.0, 600.0);
    map.pan(-37.0, 11.0);
    let before = *map.state();

    assert!(map.zoom_in());
    assert!(map.zoom_out());
    assert_eq!(*map.state(), before);
}

#[test]
fn small_viewport_selects_partial_grid() {
    // 300x200 around (512, 512) at z2: x 362..662, y 412..612
    let tiles = tiles_for_viewport(2, 512.0, 512.0, 300.0, 200.0);
    assert_eq!(tiles, coords(2, &[(1, 1), (2, 1), (1, 2), (2, 2)]));
}

#[test]
fn viewport_edge_on_tile_boundary_excludes_next_tile() {
    // Exactly one tile wide: [256, 512) touches tile 2 only at its edge.
    let tiles = tiles_for_viewport(2, 384.0, 384.0, 256.0, 256.0);
    assert_eq!(tiles, coords(2, &[(1, 1)]));
}

#[test]
fn degenerate_inputs_yield_nothing() {
    assert!(tiles_for_viewport(2, 512.0, 512.0, 0.0, 600.0).is_empty());
    assert!(tiles_for_viewport(2, 512.0, 512.0, -5.0, -5.0).is_empty());
    assert!(tiles_for_viewport(2, f64::NAN, 512.0, 800.0, 600.0).is_empty());
    assert!(tiles_for_viewport(2, 512.0, 512.0, f64::INFINITY, 600.0).is_empty());
    assert!(tiles_for_viewport(1, -5000.0, 256.0, 800.0, 600.0).is_empty());
}

#[test]
fn pan_reveals_tiles_without_duplicates() {
    let mut map = map_at(3, 400.0, 300.0);
    for _ in 0..20 {
        map.pan(64.0, 0.0);
        map.pan(0.0, -48.0);
    }

    let held = map.tiles().coords();
    let mut deduped = held.clone();
    deduped.dedup();
    assert_eq!(held, deduped);
    for coord in map.visible_tiles() {
        assert!(map.contains_tile(&coord), "{} missing", coord);
    }
}

#[test]
fn accumulated_tiles_stay_near_viewport() {
    let mut map = map_at(3, 300.0, 300.0);
    let moves = [(900.0, 0.0), (0.0, 900.0), (-1800.0, -400.0), (300.0, 1200.0)];
    for (dx, dy) in moves {
        map.pan(dx, dy);
        let keep = map.visible_range().unwrap().expand(2);
        for entry in map.tiles().iter() {
            assert_eq!(entry.coord.z, 3);
            assert!(keep.contains(&entry.coord), "{} outside keep buffer", entry.coord);
        }
    }
}

#[test]
fn overscan_prefetches_one_ring() {
    let map = map_at(3, 256.0, 256.0);
    // Centered on the corner of four tiles.
    let visible = map.visible_range().unwrap();
    assert_eq!(visible.len(), 4);
    assert_eq!(map.tiles().len(), visible.expand(1).len());
    assert_eq!(map.tiles().len(), 16);
}

#[test]
fn resize_to_larger_window_adds_tiles() {
    let mut map = map_at(2, 200.0, 200.0);
    let before = map.visible_tiles().len();
    assert!(map.resize(1024.0, 1024.0));
    assert_eq!(map.visible_tiles().len(), 16);
    assert!(map.visible_tiles().len() > before);
    assert!(!map.resize(1024.0, 1024.0));
}

#[test]
fn zoom_discards_old_tiles() {
    let mut map = map_at(1, 800.0, 600.0);
    map.take_fetch_requests();
    assert!(map.zoom_in());
    assert!(map.tiles().iter().all(|entry| entry.coord.z == 2));
    assert!(map.tiles().iter().all(|entry| entry.status.is_pending()));
}

#[test]
fn stale_results_never_change_state() {
    let mut map = map_at(1, 800.0, 600.0);
    let old = map.take_fetch_requests();

    map.zoom_in();
    let counts = map.info().tiles;
    for request in &old {
        assert!(!map.apply_fetch_result(FetchOutcome::success(request, vec![0; 8])));
        assert!(!map.apply_fetch_result(FetchOutcome::failure(
            request,
            TileFetchError::from_status(500)
        )));
    }
    assert_eq!(map.info().tiles, counts);
    assert!(map.cache().is_empty());
}

#[test]
fn fetch_requests_carry_tokenised_urls() {
    let mut map = map_at(0, 800.0, 600.0);
    let requests = map.take_fetch_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://tiles.test/tiles/0/0/0?token=t0k");
    assert_eq!(requests[0].generation, map.generation());
}

#[test]
fn failed_tiles_are_requested_again_after_leaving() {
    let mut map = map_at(3, 256.0, 256.0);
    map.pan(1024.0, 1024.0);
    let target = TileCoord::new(0, 0, 3);
    let request = map
        .take_fetch_requests()
        .into_iter()
        .find(|r| r.coord == target)
        .unwrap();
    map.apply_fetch_result(FetchOutcome::failure(&request, TileFetchError::from_status(404)));
    assert!(map.tiles().get(&target).unwrap().status.is_failed());

    map.pan(-2048.0, -2048.0);
    assert!(!map.contains_tile(&target));
    map.pan(2048.0, 2048.0);
    assert!(map.tiles().get(&target).unwrap().status.is_pending());
}

#[test]
fn render_tiles_follow_the_center() {
    let mut map = map_at(1, 800.0, 600.0);
    let first = map.render_tiles();
    map.pan(10.0, -20.0);
    let second = map.render_tiles();

    let a = first.iter().find(|t| t.tile_id == "1-0-0").unwrap();
    let b = second.iter().find(|t| t.tile_id == "1-0-0").unwrap();
    assert_eq!(b.position.x - a.position.x, 10.0);
    assert_eq!(b.position.y - a.position.y, -20.0);
}

#[test]
fn info_reports_state() {
    let mut map = map_at(2, 800.0, 600.0);
    map.take_fetch_requests();
    let info = map.info();
    assert_eq!(info.zoom, 2);
    assert_eq!(info.tiles_per_side, 4);
    assert_eq!(info.world_size, 1024.0);
    assert_eq!(info.visible_count, 16);
    assert_eq!(info.tiles.loading, 16);
    assert!(info.to_string().contains("Zoom: 2"));
}
