//! Tests for shared location types.

use symgraph_core::types::{FxHashSet, Location, Position};

#[test]
fn test_location_display_and_zero() {
    let loc = Location::at("src/app.ts", Position::new(12, 5));
    assert_eq!(loc.to_string(), "src/app.ts:12:5");
    assert!(!loc.is_zero());
    assert!(Location::zero("src/app.ts").is_zero());
}

#[test]
fn test_location_dedup_key() {
    let mut seen = FxHashSet::default();
    assert!(seen.insert(Location::new("a.ts", 1, 1)));
    assert!(!seen.insert(Location::new("a.ts", 1, 1)));
    assert!(seen.insert(Location::new("a.ts", 1, 2)));
}

#[test]
fn test_location_json_shape() {
    let json = serde_json::to_value(Location::new("a.ts", 3, 4)).unwrap();
    assert_eq!(json, serde_json::json!({"file": "a.ts", "line": 3, "column": 4}));
}
