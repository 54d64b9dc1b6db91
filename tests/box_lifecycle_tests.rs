//! Integration tests for the plock box lifecycle and resize behavior

use sbx::plock::{Plock, PlockTypeId};
use sbx::world::{PlockBox, PlockId, StorageLimits};
use sbx::ErrorFlags;

fn filled_box(width: u16, height: u16) -> PlockBox {
    let mut plock_box = PlockBox::create();
    plock_box.init(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            plock_box
                .set_plock_id(x, y, PlockId(y as u32 * 100 + x as u32 + 1))
                .unwrap();
        }
    }
    plock_box
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_init_then_deinit() {
    let mut plock_box = PlockBox::create();
    plock_box.init(16, 9).unwrap();
    plock_box.deinit().unwrap();

    assert!(!plock_box.is_initialized());
    let err = plock_box.size().unwrap_err();
    assert!(err.has(ErrorFlags::BOX_NOT_INIT));
    assert_eq!(plock_box.plocks().size(), 0);
    assert_eq!(plock_box.plock_ids().size(), (0, 0));

    plock_box.destroy().unwrap();
}

#[test]
fn test_double_init_keeps_first_data() {
    let mut plock_box = PlockBox::create();
    plock_box.init(4, 4).unwrap();
    plock_box
        .place(1, 1, Plock::new(PlockTypeId(3), 55.0))
        .unwrap();

    let err = plock_box.init(8, 8).unwrap_err();
    assert!(err.has(ErrorFlags::BOX_ALREADY_INIT));

    assert_eq!(plock_box.size().unwrap(), (4, 4));
    assert_eq!(plock_box.plocks().size(), 16);
    assert_eq!(plock_box.plock_at(1, 1).unwrap().type_id, PlockTypeId(3));
}

#[test]
fn test_destroy_initialized_box_is_refused() {
    let mut plock_box = PlockBox::create();
    plock_box.init(3, 3).unwrap();
    plock_box.set_plock_id(2, 2, PlockId(5)).unwrap();

    let (mut plock_box, report) = plock_box.destroy().unwrap_err();
    assert!(report.has(ErrorFlags::BOX_NOT_DEINIT));

    // Still intact after the refused destroy
    assert_eq!(plock_box.plock_id(2, 2), Some(PlockId(5)));
    plock_box.deinit().unwrap();
    plock_box.destroy().unwrap();
}

#[test]
fn test_reinit_after_deinit() {
    let mut plock_box = filled_box(5, 5);
    plock_box.deinit().unwrap();
    plock_box.init(2, 3).unwrap();

    assert_eq!(plock_box.size().unwrap(), (2, 3));
    assert_eq!(plock_box.plock_id(0, 0), Some(PlockId::UNSET));
}

// ============================================================================
// Partial init failures
// ============================================================================

#[test]
fn test_plock_array_failure_during_init() {
    let mut plock_box = PlockBox::with_limits(StorageLimits {
        max_plocks: 10,
        ..StorageLimits::default()
    });

    let err = plock_box.init(4, 4).unwrap_err();
    assert!(err.has(ErrorFlags::PLOCKS_INIT_FAILED));
    assert!(err.has(ErrorFlags::MEMORY_FAILURE));
    assert!(!plock_box.is_initialized());

    // Nothing was allocated, so there is nothing to deinit
    let err = plock_box.deinit().unwrap_err();
    assert!(err.has(ErrorFlags::BOX_ALREADY_DEINIT));
    plock_box.destroy().unwrap();
}

#[test]
fn test_partial_init_is_cleaned_by_deinit() {
    let mut plock_box = PlockBox::with_limits(StorageLimits {
        max_plock_ids: 10,
        ..StorageLimits::default()
    });

    let err = plock_box.init(4, 4).unwrap_err();
    assert!(err.has(ErrorFlags::PLOCK_IDS_INIT_FAILED));
    assert!(!err.has(ErrorFlags::PLOCKS_INIT_FAILED));
    assert!(!plock_box.is_initialized());

    // The plock array half succeeded and is still held
    assert_eq!(plock_box.plocks().size(), 16);

    plock_box.deinit().unwrap();
    assert_eq!(plock_box.plocks().size(), 0);
    plock_box.destroy().unwrap();
}

// ============================================================================
// Resize scenarios
// ============================================================================

#[test]
fn test_grow_keeps_positions() {
    let mut plock_box = PlockBox::create();
    plock_box.init(5, 5).unwrap();
    assert_eq!(plock_box.size().unwrap(), (5, 5));

    plock_box.set_plock_id(2, 3, PlockId(7)).unwrap();
    plock_box.set_size(8, 10).unwrap();

    assert_eq!(plock_box.size().unwrap(), (8, 10));
    assert_eq!(plock_box.plock_id(2, 3), Some(PlockId(7)));
    assert_eq!(plock_box.plock_id(6, 9), Some(PlockId::UNSET));
    assert_eq!(plock_box.plocks().size(), 80);
}

#[test]
fn test_shrink_keeps_top_left() {
    let original = filled_box(10, 10);
    let mut plock_box = filled_box(10, 10);

    plock_box.set_size(3, 3).unwrap();

    assert_eq!(plock_box.size().unwrap(), (3, 3));
    assert_eq!(plock_box.plocks().size(), 9);
    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(plock_box.plock_id(x, y), original.plock_id(x, y));
        }
    }
    assert_eq!(plock_box.plock_id(3, 0), None);
}

#[test]
fn test_resize_keeps_plocks_by_index() {
    let mut plock_box = PlockBox::create();
    plock_box.init(3, 3).unwrap();
    let water = Plock::new(PlockTypeId(2), 12.0);
    let id = plock_box.place(2, 0, water).unwrap();
    let slot = id.index().unwrap();

    plock_box.set_size(6, 6).unwrap();

    // The slot keeps its plock, and (2, 0) still points at it
    assert_eq!(plock_box.plock_id(2, 0), Some(id));
    assert_eq!(plock_box.plocks().get(slot), Some(&water));
    assert_eq!(plock_box.plock_at(2, 0), Some(&water));
    assert_eq!(plock_box.stats().occupied, 1);
}

#[test]
fn test_place_after_resize_keeps_other_positions() {
    let mut plock_box = PlockBox::create();
    plock_box.init(5, 5).unwrap();
    let sand = Plock::new(PlockTypeId(1), 20.0);
    let water = Plock::new(PlockTypeId(2), 12.0);

    let sand_id = plock_box.place(0, 1, sand).unwrap();
    plock_box.set_size(8, 10).unwrap();
    let water_id = plock_box.place(5, 0, water).unwrap();

    assert_ne!(sand_id, water_id);
    assert_eq!(plock_box.plock_at(0, 1), Some(&sand));
    assert_eq!(plock_box.plock_at(5, 0), Some(&water));
    assert_eq!(plock_box.stats().occupied, 2);
}

#[test]
fn test_place_after_shrink_reuses_orphaned_slots() {
    let mut plock_box = PlockBox::create();
    plock_box.init(2, 2).unwrap();
    // (0, 0) is placed last and lands in slot 3
    for (x, y) in [(1, 1), (0, 1), (1, 0), (0, 0)] {
        plock_box
            .place(x, y, Plock::new(PlockTypeId(1), 0.0))
            .unwrap();
    }

    // Slot 0 now belongs to no position and (0, 0) points past the array
    plock_box.set_size(1, 1).unwrap();
    assert_eq!(plock_box.plock_at(0, 0), None);

    let stone = Plock::new(PlockTypeId(3), 5.0);
    plock_box.place(0, 0, stone).unwrap();

    assert_eq!(plock_box.plock_at(0, 0), Some(&stone));
    assert_eq!(plock_box.plocks().size(), 1);
}

#[test]
fn test_repeated_resizes() {
    let mut plock_box = filled_box(6, 4);
    let corner = plock_box.plock_id(1, 1);

    for (width, height) in [(10, 2), (2, 10), (7, 7), (2, 2), (12, 12)] {
        plock_box.set_size(width, height).unwrap();
        assert_eq!(plock_box.size().unwrap(), (width, height));
        assert_eq!(
            plock_box.plocks().size(),
            width as u32 * height as u32
        );
    }
    assert_eq!(plock_box.plock_id(1, 1), corner);
    assert_eq!(plock_box.plock_id(5, 3), Some(PlockId::UNSET));
}
