//! Cart and line item types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CartId, CombinationId, LineItemId, ProductId, StoreId, UserId};
use crate::money::{Currency, Money};
use crate::variants::ResolvedOffer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A buyer's cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub id: CartId,
    /// Owner, when the buyer is signed in.
    pub user_id: Option<UserId>,
    pub items: Vec<LineItem>,
    pub currency: Currency,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(currency: Currency) -> Self {
        Self {
            id: CartId::generate(),
            user_id: None,
            items: Vec::new(),
            currency,
            updated_at: Utc::now(),
        }
    }

    pub fn for_user(user_id: UserId, currency: Currency) -> Self {
        let mut cart = Self::new(currency);
        cart.user_id = Some(user_id);
        cart
    }

    /// Add `quantity` units of a resolved offer.
    ///
    /// Lines are merged per product + combination. Fails when the quantity is
    /// not positive, exceeds the offer's stock or the per-line limit, or the
    /// offer is priced in another currency.
    pub fn add_offer(
        &mut self,
        product: &Product,
        offer: &ResolvedOffer,
        variant_label: Option<String>,
        quantity: i64,
    ) -> Result<LineItemId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if offer.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: offer.price.currency.code().to_string(),
            });
        }

        let existing = self.items.iter().position(|i| {
            i.product_id == product.id && i.combination_id == offer.combination_id
        });
        let already = existing.map(|pos| self.items[pos].quantity).unwrap_or(0);
        let wanted = already
            .checked_add(quantity)
            .ok_or(CommerceError::Overflow)?;

        if wanted > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                wanted,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        if wanted > offer.stock {
            return Err(CommerceError::InsufficientInventory {
                product_id: product.id.to_string(),
                requested: wanted,
                available: offer.stock.max(0),
            });
        }

        let id = match existing {
            Some(pos) => {
                let item = &mut self.items[pos];
                item.quantity = wanted;
                item.unit_price = offer.price;
                item.update_total()?;
                item.id.clone()
            }
            None => {
                let mut item = LineItem::new(product, offer, quantity)?;
                item.variant_label = variant_label;
                let id = item.id.clone();
                self.items.push(item);
                id
            }
        };
        self.updated_at = Utc::now();
        Ok(id)
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn update_quantity(
        &mut self,
        line_item_id: &LineItemId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(line_item_id));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| &i.id == line_item_id)
            .ok_or_else(|| CommerceError::ItemNotInCart(line_item_id.to_string()))?;
        item.quantity = quantity;
        item.update_total()?;
        self.updated_at = Utc::now();
        Ok(true)
    }

    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        Money::try_sum(self.items.iter().map(|i| &i.total_price), self.currency)
    }

    /// Lines grouped by store, in first-added order. Each store ships its
    /// own parcel at checkout.
    pub fn by_store(&self) -> Vec<(&StoreId, Vec<&LineItem>)> {
        let mut groups: Vec<(&StoreId, Vec<&LineItem>)> = Vec::new();
        for item in &self.items {
            match groups.iter_mut().find(|(store, _)| *store == &item.store_id) {
                Some((_, items)) => items.push(item),
                None => groups.push((&item.store_id, vec![item])),
            }
        }
        groups
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub id: LineItemId,
    pub product_id: ProductId,
    pub store_id: StoreId,
    /// Matched combination, `None` for products bought without variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combination_id: Option<CombinationId>,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Variant label (e.g., "Merah / S").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_label: Option<String>,
    pub quantity: i64,
    pub unit_price: Money,
    /// unit_price * quantity.
    pub total_price: Money,
}

impl LineItem {
    fn new(product: &Product, offer: &ResolvedOffer, quantity: i64) -> Result<Self, CommerceError> {
        let total_price = offer.price.try_multiply(quantity)?;
        Ok(Self {
            id: LineItemId::generate(),
            product_id: product.id.clone(),
            store_id: product.store_id.clone(),
            combination_id: offer.combination_id.clone(),
            product_name: product.name.clone(),
            variant_label: None,
            quantity,
            unit_price: offer.price,
            total_price,
        })
    }

    fn update_total(&mut self) -> Result<(), CommerceError> {
        self.total_price = self.unit_price.try_multiply(self.quantity)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::{generate, resolve, SelectedVariants, VariantType};

    fn product(store: &str, price: i64, stock: i64) -> Product {
        Product::new(StoreId::new(store), "Kaos Polos", Money::idr(price), stock)
    }

    #[test]
    fn test_add_base_offer() {
        let p = product("str_1", 100000, 5);
        let mut cart = Cart::new(Currency::IDR);
        let offer = resolve(&p, &[], &SelectedVariants::new());
        cart.add_offer(&p, &offer, None, 2).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().unwrap(), Money::idr(200000));
        assert!(cart.items[0].combination_id.is_none());
    }

    #[test]
    fn test_add_variant_offer_keeps_combination_id() {
        let p = product("str_1", 100000, 5);
        let types = vec![VariantType::with_values("Warna", ["Merah", "Biru"])];
        let mut combos = generate(&types, &[]);
        combos[1].price = Money::idr(80000);
        combos[1].stock = 3;

        let selected = SelectedVariants::new().with("Warna", "Biru");
        let offer = resolve(&p, &combos, &selected);
        let mut cart = Cart::new(Currency::IDR);
        let line = cart
            .add_offer(&p, &offer, Some(combos[1].label(&types)), 1)
            .unwrap();

        let item = cart.get_item(&line).unwrap();
        assert_eq!(item.combination_id.as_ref(), Some(&combos[1].id));
        assert_eq!(item.variant_label.as_deref(), Some("Biru"));
        assert_eq!(item.unit_price, Money::idr(80000));
    }

    #[test]
    fn test_same_offer_merges_and_respects_stock() {
        let p = product("str_1", 100000, 3);
        let offer = ResolvedOffer::from_product(&p);
        let mut cart = Cart::new(Currency::IDR);
        let first = cart.add_offer(&p, &offer, None, 2).unwrap();
        let second = cart.add_offer(&p, &offer, None, 1).unwrap();
        assert_eq!(first, second);
        assert_eq!(cart.item_count(), 3);

        let err = cart.add_offer(&p, &offer, None, 1).unwrap_err();
        assert_eq!(
            err,
            CommerceError::InsufficientInventory {
                product_id: p.id.to_string(),
                requested: 4,
                available: 3,
            }
        );
    }

    #[test]
    fn test_invalid_quantities() {
        let p = product("str_1", 1000, MAX_QUANTITY_PER_ITEM + 10);
        let offer = ResolvedOffer::from_product(&p);
        let mut cart = Cart::new(Currency::IDR);
        assert_eq!(
            cart.add_offer(&p, &offer, None, 0),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert!(matches!(
            cart.add_offer(&p, &offer, None, MAX_QUANTITY_PER_ITEM + 1),
            Err(CommerceError::QuantityExceedsLimit(..))
        ));
    }

    #[test]
    fn test_currency_mismatch() {
        let mut p = product("str_1", 1000, 5);
        p.price = Money::new(1000, Currency::USD);
        let offer = ResolvedOffer::from_product(&p);
        let mut cart = Cart::new(Currency::IDR);
        assert!(matches!(
            cart.add_offer(&p, &offer, None, 1),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_update_and_remove() {
        let p = product("str_1", 1000, 50);
        let offer = ResolvedOffer::from_product(&p);
        let mut cart = Cart::new(Currency::IDR);
        let line = cart.add_offer(&p, &offer, None, 1).unwrap();

        assert!(cart.update_quantity(&line, 5).unwrap());
        assert_eq!(cart.subtotal().unwrap(), Money::idr(5000));
        assert!(cart.update_quantity(&line, 0).unwrap());
        assert!(cart.is_empty());
        assert!(cart.update_quantity(&line, 2).is_err());
    }

    #[test]
    fn test_group_by_store() {
        let a = product("str_a", 1000, 5);
        let b = product("str_b", 2000, 5);
        let a2 = product("str_a", 3000, 5);
        let mut cart = Cart::new(Currency::IDR);
        for p in [&a, &b, &a2] {
            cart.add_offer(p, &ResolvedOffer::from_product(p), None, 1).unwrap();
        }

        let groups = cart.by_store();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0.as_str(), "str_a");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1.len(), 1);
    }
}
