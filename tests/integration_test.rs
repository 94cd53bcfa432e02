use anyhow::Result;
use rvtree::{
    compute_window, compute_window_filtered, count_items, mount_rows, read_forest, write_forest, ForestFile,
    ForestGenerator, ManualSizeObserver, TreeItem, ViewportConfig, ViewportController, ViewportPhase,
};
use serde_json::{json, Value};
use std::env;
use std::fs;

fn temp_path(name: &str) -> String {
    env::temp_dir().join(name).to_string_lossy().to_string()
}

#[test]
fn test_write_and_read_forest() -> Result<()> {
    let path = temp_path("rvtree_integration_forest.jsonl");
    let _ = fs::remove_file(&path);

    let roots: Vec<TreeItem<u64, Value>> = vec![
        TreeItem::branch(
            1,
            json!({"name": "a"}),
            vec![
                TreeItem::leaf(2, json!({"name": "a1"})),
                TreeItem::branch(3, json!({"name": "a2"}), vec![]),
            ],
        )
        .opened(),
        TreeItem::leaf(4, json!({"name": "b"})),
    ];

    let written = write_forest(&path, &roots, json!({"source": "integration"}))?;
    assert_eq!(written, 4);

    let forest: ForestFile<u64, Value> = read_forest(&path)?;
    assert_eq!(forest.metadata["source"], "integration");
    assert_eq!(forest.total_nodes, 4);
    // Empty child lists and leaves survive distinctly
    assert_eq!(forest.roots, roots);

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_brotli_forest_roundtrip_feeds_controller() -> Result<()> {
    let path = temp_path("rvtree_integration_forest.jsonl.br");
    let _ = fs::remove_file(&path);

    let generator = ForestGenerator::with_config(6, 4, 5, 1234);
    let roots = generator.generate();
    write_forest(&path, &roots, json!({"seed": generator.seed}))?;

    let forest: ForestFile<u64, Value> = read_forest(&path)?;
    assert_eq!(forest.total_nodes, count_items(&roots));
    assert_eq!(forest.roots, roots);

    let controller = ViewportController::new(forest.roots, ViewportConfig::with_item_size(22.0))?;
    let expected_rows: usize = roots.iter().map(|r| 1 + r.children().len()).sum();
    assert_eq!(controller.entry_count(), expected_rows);

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_flat_list_window() -> Result<()> {
    // 10 leaves of 20 in a 50 viewport: rows 0 and 1 fully, row 2 partially visible
    let items: Vec<TreeItem<u32, ()>> = (0..10).map(|i| TreeItem::leaf(i, ())).collect();
    let mut controller = ViewportController::new(items, ViewportConfig::with_item_size(20.0))?;

    let observer = ManualSizeObserver::new();
    controller.mount(observer.clone());
    assert_eq!(controller.phase(), ViewportPhase::Unmeasured);
    assert!(controller.window().is_empty());

    observer.report(50.0);
    controller.pump();

    assert_eq!(controller.window().range(), 0..3);
    assert_eq!(controller.content_height(), 200.0);
    Ok(())
}

#[test]
fn test_expanding_large_parent_shifts_rows() -> Result<()> {
    let children = (1..=100).map(|i| TreeItem::leaf(i, ())).collect();
    let items = vec![TreeItem::branch(0u32, (), children), TreeItem::leaf(101, ())];
    let mut controller = ViewportController::new(items, ViewportConfig::with_item_size(10.0))?;
    controller.resize(30.0);
    controller.scroll_to(0.0);

    assert_eq!(controller.entry_count(), 2);
    let before = controller.content_height();

    let mounted = mount_rows(&mut controller, |entry, toggle, _| {
        if entry.id == 0 {
            toggle.toggle_expand();
        }
        entry.id
    });
    assert_eq!(mounted.rows.len(), 2);

    assert_eq!(controller.entry_count(), 102);
    assert_eq!(controller.content_height() - before, 1000.0);
    assert_eq!(controller.scroll_offset(), 0.0);
    assert_eq!(controller.entries()[101].id, 101);
    assert_eq!(controller.entries()[101].top, 1010.0);
    Ok(())
}

#[test]
fn test_scrolling_large_generated_forest() -> Result<()> {
    let roots = ForestGenerator::with_config(50, 4, 8, 77).generate();
    let config = ViewportConfig::with_item_size(22.0).render_ahead(3);
    let mut controller = ViewportController::new(roots, config)?;
    controller.resize(600.0);
    let passes = controller.flatten_passes();

    let content = controller.content_height();
    let mut offset = 0.0;
    while offset < content {
        controller.scroll_to(offset);
        let window = controller.window();
        let reference = compute_window_filtered(controller.entries(), offset, 600.0, 3);
        assert!(window.covers(&reference), "offset {}: {:?} vs {:?}", offset, window, reference);
        assert_eq!(window, reference, "offset {}", offset);
        assert_eq!(window, compute_window(controller.entries(), offset, 600.0, 3));
        assert!(window.len() <= (600.0 / 22.0) as usize + 2 + 6);
        offset += 137.5;
    }

    assert_eq!(controller.flatten_passes(), passes);
    Ok(())
}

#[test]
fn test_observer_released_on_drop() -> Result<()> {
    let observer = ManualSizeObserver::new();
    {
        let items = vec![TreeItem::leaf("only", ())];
        let mut controller = ViewportController::new(items, ViewportConfig::default())?;
        controller.mount(observer.clone());
        assert!(observer.is_observed());
    }
    assert!(!observer.is_observed());
    assert_eq!(observer.dispose_count(), 1);
    Ok(())
}
