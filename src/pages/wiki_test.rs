use super::*;

#[test]
fn empty_search_lists_everything() {
    assert_eq!(filter_entries("").len(), ENTRIES.len());
    assert_eq!(filter_entries("   ").len(), ENTRIES.len());
}

#[test]
fn search_is_case_insensitive_over_title_and_summary() {
    let by_title = filter_entries("ROMANA");
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].category, "history");

    // "principiantes" only appears in a summary.
    let by_summary = filter_entries("principiantes");
    assert_eq!(by_summary.len(), 1);
    assert_eq!(by_summary[0].category, "gameplay");
}

#[test]
fn search_with_no_match_is_empty() {
    assert!(filter_entries("zzzzzz").is_empty());
}

#[test]
fn page_count_rounds_up() {
    assert_eq!(page_count(0), 0);
    assert_eq!(page_count(4), 1);
    assert_eq!(page_count(5), 2);
    assert_eq!(page_count(6), 2);
}

#[test]
fn pagination_appears_only_for_multiple_pages() {
    // Full catalog spans two pages; a narrowed search fits on one.
    assert!(page_count(filter_entries("").len()) > 1);
    assert_eq!(page_count(filter_entries("romana").len()), 1);
}

#[test]
fn pagination_slices_one_based() {
    let all = filter_entries("");
    let first = page_items(&all, 1);
    let second = page_items(&all, 2);

    assert_eq!(first.len(), ITEMS_PER_PAGE);
    assert_eq!(second.len(), ENTRIES.len() - ITEMS_PER_PAGE);
    assert_eq!(first[0], ENTRIES[0]);
    assert_eq!(second[0], ENTRIES[ITEMS_PER_PAGE]);
}

#[test]
fn out_of_range_page_is_empty() {
    let all = filter_entries("");
    assert!(page_items(&all, 5).is_empty());
}

#[test]
fn category_label_falls_back_to_general() {
    assert_eq!(category_label("strategy"), "Guías de Estrategia");
    assert_eq!(category_label("unknown"), "General");
}

#[test]
fn every_entry_uses_a_known_category() {
    for entry in ENTRIES {
        assert!(
            CATEGORIES.iter().any(|(id, _)| *id == entry.category),
            "unknown category {}",
            entry.category
        );
    }
}
