//! End-to-end behaviour of combination generation and selection resolution.

use lapak_commerce::prelude::*;
use proptest::prelude::*;

fn key(pairs: &[(&str, &str)]) -> CombinationKey {
    pairs.iter().copied().collect()
}

fn find<'a>(combos: &'a [VariantCombination], pairs: &[(&str, &str)]) -> &'a VariantCombination {
    let key = key(pairs);
    combos
        .iter()
        .find(|c| c.combination == key)
        .unwrap_or_else(|| panic!("no combination {key}"))
}

#[test]
fn warna_ukuran_walkthrough() {
    let mut types = vec![
        VariantType::with_values("Warna", ["Merah", "Biru"]),
        VariantType::with_values("Ukuran", ["S", "M"]),
    ];

    let mut combos = generate(&types, &[]);
    let keys: Vec<_> = combos.iter().map(|c| c.combination.clone()).collect();
    assert_eq!(
        keys,
        [
            key(&[("Warna", "Merah"), ("Ukuran", "S")]),
            key(&[("Warna", "Merah"), ("Ukuran", "M")]),
            key(&[("Warna", "Biru"), ("Ukuran", "S")]),
            key(&[("Warna", "Biru"), ("Ukuran", "M")]),
        ]
    );
    assert!(combos.iter().all(|c| c.price.is_zero() && c.stock == 0));

    combos[0].price = Money::idr(50000);
    combos[0].stock = 10;

    types[1].push_value("L");
    let combos = generate(&types, &combos);
    assert_eq!(combos.len(), 6);

    let merah_s = find(&combos, &[("Warna", "Merah"), ("Ukuran", "S")]);
    assert_eq!(merah_s.price, Money::idr(50000));
    assert_eq!(merah_s.stock, 10);

    for pairs in [[("Warna", "Merah"), ("Ukuran", "L")], [("Warna", "Biru"), ("Ukuran", "L")]] {
        let fresh = find(&combos, &pairs);
        assert!(fresh.price.is_zero());
        assert_eq!(fresh.stock, 0);
    }
}

#[test]
fn base_product_without_combinations() {
    let product = Product::new(StoreId::new("str_1"), "Tas Kanvas", Money::idr(100000), 5);
    let selected = SelectedVariants::new().with("Warna", "Merah").with("Ukuran", "S");
    let offer = resolve(&product, &[], &selected);
    assert_eq!(offer.price, Money::idr(100000));
    assert_eq!(offer.stock, 5);
}

#[test]
fn removing_a_value_drops_exactly_its_combinations() {
    let mut types = vec![
        VariantType::with_values("Warna", ["Merah", "Biru", "Hijau"]),
        VariantType::with_values("Ukuran", ["S", "M"]),
    ];
    let mut combos = generate(&types, &[]);
    for (i, combo) in combos.iter_mut().enumerate() {
        combo.price = Money::idr(1000 * (i as i64 + 1));
        combo.sku = Some(format!("SKU-{i}"));
    }
    let before = combos.clone();

    types[0].values.retain(|v| v.value != "Biru");
    let after = generate(&types, &combos);

    let expected: Vec<_> = before
        .iter()
        .filter(|c| c.combination.get("Warna") != Some("Biru"))
        .cloned()
        .collect();
    assert_eq!(after, expected);
}

#[test]
fn buyer_flow_from_draft_to_cart() {
    let mut draft = VariantDraft::new(Currency::IDR);
    let warna = draft.add_type("Warna").unwrap();
    let ukuran = draft.add_type("Ukuran").unwrap();
    for v in ["Merah", "Biru"] {
        draft.add_value(&warna, v).unwrap();
    }
    for v in ["S", "M"] {
        draft.add_value(&ukuran, v).unwrap();
    }
    draft
        .apply_to_all(&CombinationUpdate::price(Money::idr(60000)).with_stock(4))
        .unwrap();

    let mut product = Product::new(StoreId::new("str_1"), "Kaos Polos", Money::idr(100000), 0);
    product.images.push("https://cdn.example/kaos.jpg".into());
    let payload = ProductPayload::from_draft(&product, &draft).unwrap();
    assert_eq!(payload.price, 60000);
    assert_eq!(payload.stock, 16);

    // The page starts on the first combination, then the buyer switches color.
    let combos = draft.combinations();
    let mut selected = initial_selection(combos);
    assert_eq!(resolve(&product, combos, &selected).price, Money::idr(60000));

    selected.deselect("Warna");
    let partial = resolve(&product, combos, &selected);
    assert_eq!(partial.price, Money::idr(100000));
    assert!(partial.combination_id.is_none());

    selected.select("Warna", "Biru");
    let offer = resolve(&product, combos, &selected);
    assert!(offer.is_variant());

    let mut cart = Cart::new(Currency::IDR);
    cart.add_offer(&product, &offer, None, 4).unwrap();
    assert!(cart.add_offer(&product, &offer, None, 1).is_err());
    assert_eq!(cart.subtotal().unwrap(), Money::idr(240000));
}

fn arb_types() -> impl Strategy<Value = Vec<VariantType>> {
    prop::collection::vec(0usize..4, 0..4).prop_map(|counts| {
        counts
            .iter()
            .enumerate()
            .map(|(i, &n)| VariantType::with_values(format!("T{i}"), (0..n).map(|v| format!("v{v}"))))
            .collect()
    })
}

proptest! {
    #[test]
    fn combination_count_is_product_of_value_counts(types in arb_types()) {
        let expected = if types.is_empty() {
            0
        } else {
            types.iter().map(|t| t.values.len()).product::<usize>()
        };
        prop_assert_eq!(generate(&types, &[]).len(), expected);
    }

    #[test]
    fn regeneration_is_idempotent(types in arb_types(), price in 1i64..1_000_000, stock in 0i64..500) {
        let mut first = generate(&types, &[]);
        for combo in &mut first {
            combo.price = Money::idr(price);
            combo.stock = stock;
        }
        let second = generate(&types, &first);
        prop_assert_eq!(&second, &first);
        prop_assert_eq!(generate(&types, &second), first);
    }

    #[test]
    fn resolver_matches_only_exact_keys(types in arb_types(), drop_one in any::<bool>()) {
        let product = Product::new(StoreId::new("str_1"), "P", Money::idr(7), 3);
        let mut combos = generate(&types, &[]);
        for combo in &mut combos {
            combo.price = Money::idr(100);
        }
        for combo in &combos {
            let mut selected = combo.combination.clone();
            if drop_one {
                let first = selected.iter().next().map(|(k, _)| k.to_string());
                if let Some(name) = first {
                    selected.deselect(&name);
                }
                prop_assert_eq!(resolve(&product, &combos, &selected).price, Money::idr(7));
            } else {
                let offer = resolve(&product, &combos, &selected);
                prop_assert_eq!(offer.combination_id.as_ref(), Some(&combo.id));
            }
        }
    }
}
