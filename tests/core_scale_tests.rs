use approx::assert_relative_eq;
use timeline_rs::core::{
    BandScale, CategoryScale, LinearScale, TimelineEntry, TimelineScales, distinct_categories,
    subcategory_groups,
};

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((10.0, 110.0), (0.0, 1000.0)).expect("valid scale");

    let original = 42.5;
    let px = scale.map(original);
    assert_relative_eq!(px, 325.0);
    assert_relative_eq!(scale.invert(px), original, epsilon = 1e-9);
}

#[test]
fn degenerate_domain_maps_to_range_midpoint() {
    let scale = LinearScale::new((5.0, 5.0), (0.0, 400.0)).expect("valid scale");
    assert!(scale.is_degenerate());
    assert_eq!(scale.map(123.0), 200.0);
    assert_eq!(scale.invert(17.0), 5.0);
}

#[test]
fn non_finite_domain_is_rejected() {
    assert!(LinearScale::new((0.0, f64::NAN), (0.0, 1.0)).is_err());
    assert!(LinearScale::new((0.0, 1.0), (f64::INFINITY, 1.0)).is_err());
}

#[test]
fn band_scale_follows_padding_rules() {
    let scale = BandScale::new(["a", "b", "c"], (0.0, 300.0))
        .and_then(|scale| scale.with_padding(0.2))
        .expect("band scale");

    // step = 300 / (3 - 0.2 + 0.4)
    let step = 300.0 / 3.2;
    assert_relative_eq!(scale.step(), step);
    assert_relative_eq!(scale.bandwidth(), step * 0.8);
    assert_relative_eq!(scale.position("a").expect("a"), step * 0.2);
    assert_relative_eq!(
        scale.position("c").expect("c") + scale.bandwidth(),
        300.0 - step * 0.2,
        epsilon = 1e-9
    );
    assert_eq!(scale.position("missing"), None);
}

#[test]
fn unpadded_band_scale_tiles_range() {
    let scale = BandScale::new(["a", "b"], (0.0, 100.0)).expect("band scale");
    assert_eq!(scale.position("a"), Some(0.0));
    assert_eq!(scale.position("b"), Some(50.0));
    assert_eq!(scale.bandwidth(), 50.0);
}

#[test]
fn horizontal_domain_pads_max_end_by_one_percent() {
    let entries = vec![
        TimelineEntry::new("A", 0.0, 10.0),
        TimelineEntry::new("B", 5.0, 10.0),
    ];
    let scales = TimelineScales::from_entries(&entries, 700.0, 210.0).expect("scales");
    let (lo, hi) = scales.x.domain();
    assert_relative_eq!(lo, -0.15);
    assert_relative_eq!(hi, 15.15);
    assert_eq!(scales.x.range(), (0.0, 700.0));
}

#[test]
fn empty_entries_have_no_scales() {
    assert!(TimelineScales::from_entries(&[], 700.0, 210.0).is_err());
}

#[test]
fn single_level_layout_uses_categories_in_first_seen_order() {
    let entries = vec![
        TimelineEntry::new("deploy", 3.0, 1.0),
        TimelineEntry::new("build", 0.0, 2.0),
        TimelineEntry::new("deploy", 5.0, 1.0),
    ];
    let categories: Vec<_> = distinct_categories(&entries).into_iter().collect();
    assert_eq!(categories, vec!["deploy", "build"]);
    assert!(subcategory_groups(&entries).is_none());

    let scales = TimelineScales::from_entries(&entries, 700.0, 210.0).expect("scales");
    assert!(!scales.y.is_grouped());
    assert_eq!(
        scales.y.position(&entries[0]),
        scales.y.position(&entries[2])
    );
}

#[test]
fn grouped_layout_nests_subcategory_bands_inside_categories() {
    let entries = vec![
        TimelineEntry::new("A", 0.0, 1.0).with_subcategory("x"),
        TimelineEntry::new("A", 1.0, 1.0).with_subcategory("y"),
        TimelineEntry::new("B", 0.0, 1.0).with_subcategory("x"),
        TimelineEntry::new("B", 2.0, 1.0),
    ];
    let scales = TimelineScales::from_entries(&entries, 700.0, 200.0).expect("scales");
    let CategoryScale::Grouped { outer, inner } = &scales.y else {
        panic!("expected grouped layout");
    };

    assert_eq!(outer.bandwidth(), 100.0);
    let inner_b: Vec<_> = inner["B"].domain().iter().cloned().collect();
    assert_eq!(inner_b, vec!["x".to_owned(), String::new()]);

    for entry in &entries {
        let (y, height) = scales.y.require_position(entry).expect("position");
        let (band_top, band_height) = scales.y.category_band(&entry.category).expect("band");
        assert!(y >= band_top);
        assert!(y + height <= band_top + band_height + 1e-9);
    }
}

#[test]
fn ticks_use_round_steps() {
    let scale = LinearScale::new((-0.15, 15.15), (0.0, 700.0)).expect("valid scale");
    assert_eq!(scale.ticks(8), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]);
}
