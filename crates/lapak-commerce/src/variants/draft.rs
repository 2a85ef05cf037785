//! Seller-side variant authoring state.

use crate::error::CommerceError;
use crate::ids::{CombinationId, VariantTypeId, VariantValueId};
use crate::money::{Currency, Money};
use crate::variants::{CombinationGenerator, CombinationUpdate, VariantCombination, VariantType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The variant section of a product form while the seller edits it.
///
/// Every structural edit regenerates the combination table, so prices,
/// stock and SKUs typed into surviving rows are kept. Unlike the generator,
/// the draft rejects blank names, duplicate type names and duplicate values
/// within a type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "DraftParts")]
pub struct VariantDraft {
    currency: Currency,
    types: Vec<VariantType>,
    combinations: Vec<VariantCombination>,
}

/// Stored form of a draft; loading goes through [`VariantDraft::from_parts`].
#[derive(Deserialize)]
struct DraftParts {
    #[serde(default)]
    currency: Currency,
    #[serde(default)]
    types: Vec<VariantType>,
    #[serde(default)]
    combinations: Vec<VariantCombination>,
}

impl TryFrom<DraftParts> for VariantDraft {
    type Error = CommerceError;

    fn try_from(parts: DraftParts) -> Result<Self, Self::Error> {
        Self::from_parts(parts.currency, parts.types, parts.combinations)
    }
}

impl VariantDraft {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            types: Vec::new(),
            combinations: Vec::new(),
        }
    }

    /// Rebuild a draft from stored types and combinations, regenerating so
    /// the table agrees with the types.
    ///
    /// Stored names go through the same checks as [`add_type`](Self::add_type)
    /// and [`add_value`](Self::add_value), and every row must be priced in
    /// the draft's currency.
    pub fn from_parts(
        currency: Currency,
        types: Vec<VariantType>,
        combinations: Vec<VariantCombination>,
    ) -> Result<Self, CommerceError> {
        for (i, ty) in types.iter().enumerate() {
            check_stored(&ty.name, "variant type name")?;
            if types[..i].iter().any(|t| t.name == ty.name) {
                return Err(CommerceError::validation(format!(
                    "variant type '{}' already exists",
                    ty.name
                )));
            }
            for (j, v) in ty.values.iter().enumerate() {
                check_stored(&v.value, "variant value")?;
                if ty.values[..j].iter().any(|o| o.value == v.value) {
                    return Err(CommerceError::validation(format!(
                        "'{}' already has value '{}'",
                        ty.name, v.value
                    )));
                }
            }
        }
        if let Some(row) = combinations.iter().find(|c| c.price.currency != currency) {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: row.price.currency.code().to_string(),
            });
        }

        let mut draft = Self {
            currency,
            types,
            combinations,
        };
        draft.regenerate();
        Ok(draft)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn types(&self) -> &[VariantType] {
        &self.types
    }

    pub fn combinations(&self) -> &[VariantCombination] {
        &self.combinations
    }

    pub fn has_variants(&self) -> bool {
        !self.types.is_empty()
    }

    /// False while some type still has no values, i.e. the combination
    /// table is empty because it cannot be built yet.
    pub fn is_complete(&self) -> bool {
        self.types.iter().all(|t| !t.values.is_empty())
    }

    pub fn add_type(&mut self, name: &str) -> Result<VariantTypeId, CommerceError> {
        let name = clean(name, "variant type name")?;
        if self.types.iter().any(|t| t.name == name) {
            return Err(CommerceError::validation(format!(
                "variant type '{name}' already exists"
            )));
        }
        let ty = VariantType::new(name);
        let id = ty.id.clone();
        self.types.push(ty);
        self.regenerate();
        Ok(id)
    }

    /// Rename a type, carrying its combinations over to the new name.
    pub fn rename_type(&mut self, id: &VariantTypeId, name: &str) -> Result<(), CommerceError> {
        let name = clean(name, "variant type name")?;
        if self.types.iter().any(|t| t.name == name && &t.id != id) {
            return Err(CommerceError::validation(format!(
                "variant type '{name}' already exists"
            )));
        }
        let ty = self.type_mut(id)?;
        let old = std::mem::replace(&mut ty.name, name.clone());
        for combo in &mut self.combinations {
            combo.combination.rename_type(&old, &name);
        }
        self.regenerate();
        Ok(())
    }

    pub fn remove_type(&mut self, id: &VariantTypeId) -> Result<VariantType, CommerceError> {
        let pos = self
            .types
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| CommerceError::VariantTypeNotFound(id.to_string()))?;
        let removed = self.types.remove(pos);
        self.regenerate();
        Ok(removed)
    }

    pub fn add_value(
        &mut self,
        type_id: &VariantTypeId,
        value: &str,
    ) -> Result<VariantValueId, CommerceError> {
        let value = clean(value, "variant value")?;
        let ty = self.type_mut(type_id)?;
        if ty.has_value(&value) {
            return Err(CommerceError::validation(format!(
                "'{}' already has value '{value}'",
                ty.name
            )));
        }
        let id = ty.push_value(value);
        self.regenerate();
        Ok(id)
    }

    /// Rename a value, carrying its combinations over to the new value.
    pub fn rename_value(
        &mut self,
        type_id: &VariantTypeId,
        value_id: &VariantValueId,
        value: &str,
    ) -> Result<(), CommerceError> {
        let value = clean(value, "variant value")?;
        let ty = self.type_mut(type_id)?;
        if ty.values.iter().any(|v| v.value == value && &v.id != value_id) {
            return Err(CommerceError::validation(format!(
                "'{}' already has value '{value}'",
                ty.name
            )));
        }
        let type_name = ty.name.clone();
        let slot = ty
            .values
            .iter_mut()
            .find(|v| &v.id == value_id)
            .ok_or_else(|| CommerceError::VariantValueNotFound(value_id.to_string()))?;
        let old = std::mem::replace(&mut slot.value, value.clone());
        for combo in &mut self.combinations {
            combo.combination.rename_value(&type_name, &old, &value);
        }
        self.regenerate();
        Ok(())
    }

    /// Remove a value; combinations using it are dropped.
    pub fn remove_value(
        &mut self,
        type_id: &VariantTypeId,
        value_id: &VariantValueId,
    ) -> Result<(), CommerceError> {
        let ty = self.type_mut(type_id)?;
        let pos = ty
            .values
            .iter()
            .position(|v| &v.id == value_id)
            .ok_or_else(|| CommerceError::VariantValueNotFound(value_id.to_string()))?;
        ty.values.remove(pos);
        self.regenerate();
        Ok(())
    }

    pub fn set_value_image(
        &mut self,
        type_id: &VariantTypeId,
        value_id: &VariantValueId,
        image: Option<String>,
    ) -> Result<(), CommerceError> {
        let ty = self.type_mut(type_id)?;
        let value = ty
            .values
            .iter_mut()
            .find(|v| &v.id == value_id)
            .ok_or_else(|| CommerceError::VariantValueNotFound(value_id.to_string()))?;
        value.image = image;
        Ok(())
    }

    pub fn update_combination(
        &mut self,
        id: &CombinationId,
        update: &CombinationUpdate,
    ) -> Result<(), CommerceError> {
        self.combinations
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| CommerceError::CombinationNotFound(id.to_string()))?
            .apply(update)
    }

    /// Apply the same edit to every row ("set all prices").
    pub fn apply_to_all(&mut self, update: &CombinationUpdate) -> Result<(), CommerceError> {
        // A bad edit changes no row.
        self.combinations
            .iter()
            .try_for_each(|c| c.clone().apply(update))?;
        for combo in &mut self.combinations {
            combo.apply(update)?;
        }
        Ok(())
    }

    /// Lowest and highest combination price, if any combinations exist.
    pub fn price_range(&self) -> Option<(Money, Money)> {
        let min = self.combinations.iter().map(|c| c.price).min_by_key(|m| m.amount)?;
        let max = self.combinations.iter().map(|c| c.price).max_by_key(|m| m.amount)?;
        Some((min, max))
    }

    pub fn total_stock(&self) -> Result<i64, CommerceError> {
        self.combinations
            .iter()
            .try_fold(0i64, |acc, c| acc.checked_add(c.stock))
            .ok_or(CommerceError::Overflow)
    }

    /// Presence checks run when the seller submits the product form.
    pub fn validate_for_submit(&self) -> Result<(), CommerceError> {
        if let Some(empty) = self.types.iter().find(|t| t.values.is_empty()) {
            return Err(CommerceError::validation(format!(
                "variant type '{}' has no values",
                empty.name
            )));
        }
        if let Some(unpriced) = self.combinations.iter().find(|c| !c.price.is_positive()) {
            return Err(CommerceError::validation(format!(
                "variant '{}' has no price",
                unpriced.label(&self.types)
            )));
        }
        Ok(())
    }

    fn type_mut(&mut self, id: &VariantTypeId) -> Result<&mut VariantType, CommerceError> {
        self.types
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| CommerceError::VariantTypeNotFound(id.to_string()))
    }

    fn regenerate(&mut self) {
        let generator = CombinationGenerator::new(self.currency);
        self.combinations = generator.generate(&self.types, &self.combinations);
        debug!(
            types = self.types.len(),
            combinations = self.combinations.len(),
            complete = self.is_complete(),
            "variant draft regenerated"
        );
    }
}

fn clean(input: &str, what: &str) -> Result<String, CommerceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CommerceError::validation(format!("{what} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn check_stored(input: &str, what: &str) -> Result<(), CommerceError> {
    if clean(input, what)? != input {
        return Err(CommerceError::validation(format!(
            "{what} '{input}' has surrounding whitespace"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::CombinationKey;

    fn key(pairs: &[(&str, &str)]) -> CombinationKey {
        pairs.iter().copied().collect()
    }

    fn find<'a>(draft: &'a VariantDraft, pairs: &[(&str, &str)]) -> Option<&'a VariantCombination> {
        let key = key(pairs);
        draft.combinations().iter().find(|c| c.combination == key)
    }

    fn kaos_draft() -> (VariantDraft, VariantTypeId, VariantTypeId) {
        let mut draft = VariantDraft::new(Currency::IDR);
        let warna = draft.add_type("Warna").unwrap();
        let ukuran = draft.add_type("Ukuran").unwrap();
        draft.add_value(&warna, "Merah").unwrap();
        draft.add_value(&warna, "Biru").unwrap();
        draft.add_value(&ukuran, "S").unwrap();
        draft.add_value(&ukuran, "M").unwrap();
        (draft, warna, ukuran)
    }

    #[test]
    fn test_incomplete_until_every_type_has_values() {
        let mut draft = VariantDraft::new(Currency::IDR);
        let warna = draft.add_type("Warna").unwrap();
        assert!(!draft.is_complete());
        assert!(draft.combinations().is_empty());

        draft.add_value(&warna, "Merah").unwrap();
        assert!(draft.is_complete());
        assert_eq!(draft.combinations().len(), 1);

        draft.add_type("Ukuran").unwrap();
        assert!(!draft.is_complete());
        assert!(draft.combinations().is_empty());
    }

    #[test]
    fn test_rejects_blank_and_duplicate_names() {
        let (mut draft, warna, _) = kaos_draft();
        assert!(draft.add_type("  ").is_err());
        assert!(draft.add_type("Warna").is_err());
        assert!(draft.add_value(&warna, "Merah").is_err());
        assert!(draft.add_value(&warna, "").is_err());
        assert_eq!(
            draft.add_value(&VariantTypeId::new("vty_missing"), "X"),
            Err(CommerceError::VariantTypeNotFound("vty_missing".into()))
        );
    }

    #[test]
    fn test_edits_survive_adding_values() {
        let (mut draft, _, ukuran) = kaos_draft();
        let id = find(&draft, &[("Warna", "Merah"), ("Ukuran", "S")]).unwrap().id.clone();
        draft
            .update_combination(&id, &CombinationUpdate::price(Money::idr(50000)).with_stock(10))
            .unwrap();

        draft.add_value(&ukuran, "L").unwrap();
        assert_eq!(draft.combinations().len(), 6);
        let merah_s = find(&draft, &[("Warna", "Merah"), ("Ukuran", "S")]).unwrap();
        assert_eq!(merah_s.price, Money::idr(50000));
        assert_eq!(merah_s.stock, 10);
    }

    #[test]
    fn test_remove_value_drops_its_combinations() {
        let (mut draft, warna, _) = kaos_draft();
        let biru = draft.types()[0].values[1].id.clone();
        draft.remove_value(&warna, &biru).unwrap();
        assert_eq!(draft.combinations().len(), 2);
        assert!(find(&draft, &[("Warna", "Biru"), ("Ukuran", "S")]).is_none());
    }

    #[test]
    fn test_rename_type_keeps_prices() {
        let (mut draft, warna, _) = kaos_draft();
        draft.apply_to_all(&CombinationUpdate::price(Money::idr(75000))).unwrap();
        draft.rename_type(&warna, "Color").unwrap();
        assert_eq!(draft.combinations().len(), 4);
        let combo = find(&draft, &[("Color", "Merah"), ("Ukuran", "M")]).unwrap();
        assert_eq!(combo.price, Money::idr(75000));
    }

    #[test]
    fn test_rename_value_keeps_prices() {
        let (mut draft, warna, _) = kaos_draft();
        let merah = draft.types()[0].values[0].id.clone();
        draft.apply_to_all(&CombinationUpdate::stock(3)).unwrap();
        draft.rename_value(&warna, &merah, "Merah Marun").unwrap();
        let combo = find(&draft, &[("Warna", "Merah Marun"), ("Ukuran", "S")]).unwrap();
        assert_eq!(combo.stock, 3);
        assert!(draft.rename_value(&warna, &merah, "Biru").is_err());
    }

    #[test]
    fn test_remove_type_resets_table() {
        let (mut draft, _, ukuran) = kaos_draft();
        draft.apply_to_all(&CombinationUpdate::price(Money::idr(10000))).unwrap();
        draft.remove_type(&ukuran).unwrap();
        assert_eq!(draft.combinations().len(), 2);
        assert!(draft.combinations().iter().all(|c| c.price.is_zero()));
    }

    #[test]
    fn test_apply_to_all_is_all_or_nothing() {
        let (mut draft, _, _) = kaos_draft();
        assert!(draft.apply_to_all(&CombinationUpdate::stock(-5)).is_err());
        assert!(draft.combinations().iter().all(|c| c.stock == 0));
    }

    #[test]
    fn test_validate_for_submit() {
        let (mut draft, _, _) = kaos_draft();
        let err = draft.validate_for_submit().unwrap_err();
        assert_eq!(err, CommerceError::validation("variant 'Merah / S' has no price"));

        draft.apply_to_all(&CombinationUpdate::price(Money::idr(45000))).unwrap();
        assert!(draft.validate_for_submit().is_ok());

        draft.add_type("Bahan").unwrap();
        assert_eq!(
            draft.validate_for_submit(),
            Err(CommerceError::validation("variant type 'Bahan' has no values"))
        );
    }

    #[test]
    fn test_price_range_and_stock() {
        let (mut draft, _, _) = kaos_draft();
        let ids: Vec<_> = draft.combinations().iter().map(|c| c.id.clone()).collect();
        for (i, id) in ids.iter().enumerate() {
            let update = CombinationUpdate::price(Money::idr(40000 + i as i64 * 5000)).with_stock(2);
            draft.update_combination(id, &update).unwrap();
        }
        assert_eq!(draft.price_range(), Some((Money::idr(40000), Money::idr(55000))));
        assert_eq!(draft.total_stock().unwrap(), 8);
        assert_eq!(VariantDraft::default().price_range(), None);
    }

    #[test]
    fn test_from_parts_drops_stale_rows() {
        let (draft, _, _) = kaos_draft();
        let mut combos = draft.combinations().to_vec();
        combos.push(VariantCombination::new(key(&[("Warna", "Hijau")]), Currency::IDR));
        let rebuilt =
            VariantDraft::from_parts(Currency::IDR, draft.types().to_vec(), combos).unwrap();
        assert_eq!(rebuilt.combinations(), draft.combinations());
    }

    #[test]
    fn test_from_parts_rejects_foreign_currency_rows() {
        let (draft, _, _) = kaos_draft();
        let mut combos = draft.combinations().to_vec();
        combos[1].price = Money::new(100, Currency::USD);

        let err = VariantDraft::from_parts(Currency::IDR, draft.types().to_vec(), combos)
            .unwrap_err();
        assert_eq!(
            err,
            CommerceError::CurrencyMismatch {
                expected: "IDR".into(),
                got: "USD".into(),
            }
        );
    }

    #[test]
    fn test_from_parts_rejects_duplicate_and_blank_names() {
        let (draft, _, _) = kaos_draft();
        let mut types = draft.types().to_vec();
        types.push(types[0].clone());
        assert!(VariantDraft::from_parts(Currency::IDR, types, Vec::new()).is_err());

        let mut types = draft.types().to_vec();
        types[1].values[1].value = "S".into();
        assert!(VariantDraft::from_parts(Currency::IDR, types, Vec::new()).is_err());

        let mut types = draft.types().to_vec();
        types[0].name = " Warna".into();
        assert!(VariantDraft::from_parts(Currency::IDR, types, Vec::new()).is_err());
    }

    #[test]
    fn test_failed_bulk_edit_leaves_every_row_untouched() {
        let (draft, _, _) = kaos_draft();
        let mut combos = draft.combinations().to_vec();
        combos[0].price = Money::idr(30000);
        let mut draft =
            VariantDraft::from_parts(Currency::IDR, draft.types().to_vec(), combos).unwrap();
        // Only reachable by hand; loading rejects mixed currencies.
        draft.combinations[3].price = Money::new(100, Currency::USD);
        let before = draft.combinations().to_vec();

        let update = CombinationUpdate::price(Money::idr(5000)).with_stock(3);
        assert!(matches!(
            draft.apply_to_all(&update),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
        assert_eq!(draft.combinations(), before.as_slice());

        let negative = CombinationUpdate::price(Money::idr(5000)).with_stock(-1);
        assert!(draft.apply_to_all(&negative).is_err());
        assert_eq!(draft.combinations(), before.as_slice());
    }

    #[test]
    fn test_deserialize_goes_through_from_parts() {
        let (mut draft, _, _) = kaos_draft();
        draft
            .apply_to_all(&CombinationUpdate::price(Money::idr(45000)).with_stock(4))
            .unwrap();
        let json = serde_json::to_string(&draft).unwrap();
        let loaded: VariantDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, draft);
        assert_eq!(loaded.currency(), Currency::IDR);

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["combinations"][0]["price"]["currency"] = "USD".into();
        assert!(serde_json::from_value::<VariantDraft>(value).is_err());

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["types"][0]["values"][1]["value"] = "Merah".into();
        assert!(serde_json::from_value::<VariantDraft>(value).is_err());
    }
}
