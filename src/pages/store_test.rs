use super::*;

#[test]
fn catalog_holds_eight_items() {
    assert_eq!(CATALOG.len(), 8);
}

#[test]
fn filter_none_returns_whole_catalog() {
    assert_eq!(filter_items(None).len(), CATALOG.len());
}

#[test]
fn filter_by_kind_is_exhaustive_and_disjoint() {
    let chests = filter_items(Some(ItemKind::Chest));
    let currency = filter_items(Some(ItemKind::Currency));
    let specials = filter_items(Some(ItemKind::Special));

    assert!(chests.iter().all(|i| i.kind == ItemKind::Chest));
    assert!(currency.iter().all(|i| i.kind == ItemKind::Currency));
    assert!(specials.iter().all(|i| i.kind == ItemKind::Special));
    assert_eq!(chests.len() + currency.len() + specials.len(), CATALOG.len());
}

#[test]
fn price_label_formats_cents() {
    let item = StoreItem {
        name: "x",
        description: "",
        price_cents: 499,
        image: "",
        kind: ItemKind::Chest,
        highlight: false,
    };
    assert_eq!(item.price_label(), "€4.99");

    let round = StoreItem { price_cents: 2000, ..item };
    assert_eq!(round.price_label(), "€20.00");
}
