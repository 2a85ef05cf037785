//! Variant commands: combination tables, selection resolving and
//! interactive listing authoring.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Input};
use lapak_commerce::prelude::*;
use serde::Serialize;

use super::{VariantsArgs, VariantsCommand};
use crate::context::Context;
use crate::listing::{Listing, LoadedListing};
use crate::output::{column_widths, stock_badge};

/// Run the variants command.
pub fn run(args: VariantsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        VariantsCommand::Generate { file, payload } => generate_table(&file, payload, ctx),
        VariantsCommand::Resolve { file, select } => resolve_selection(&file, &select, ctx),
        VariantsCommand::Author { output, force } => author(&output, force, ctx),
    }
}

fn load_listing(file: &str, ctx: &Context) -> Result<LoadedListing> {
    let path = ctx.resolve_path(file);
    ctx.output.debug(&format!("Loading listing {}", path.display()));

    let catalog = &ctx.config.catalog;
    let loaded = Listing::load(&path)?
        .into_catalog(catalog.currency, catalog.store_id.as_deref())?;

    for key in &loaded.unmatched {
        ctx.output
            .warn(&format!("No variant matches combination row {}", key));
    }

    Ok(loaded)
}

fn generate_table(file: &str, payload: bool, ctx: &Context) -> Result<()> {
    let LoadedListing { product, draft, .. } = load_listing(file, ctx)?;

    if payload {
        let payload = ProductPayload::from_draft(&product, &draft)
            .context("Listing is not ready to submit")?;
        ctx.output.json(&payload);
        return Ok(());
    }

    if ctx.output.is_json() {
        ctx.output.json(&draft);
        return Ok(());
    }

    ctx.output.header(&product.name);
    if !draft.has_variants() {
        ctx.output.kv("price", &product.price.display());
        ctx.output.kv("stock", &stock_badge(product.stock));
        ctx.output.info("No variant types; the base price and stock apply.");
        return Ok(());
    }

    if !draft.is_complete() {
        for ty in draft.types().iter().filter(|t| t.values.is_empty()) {
            ctx.output
                .warn(&format!("Variant type '{}' has no values yet", ty.name));
        }
        return Ok(());
    }

    print_combinations(&draft, ctx);

    if let Some((min, max)) = draft.price_range() {
        let range = if min == max {
            min.display()
        } else {
            format!("{} - {}", min.display(), max.display())
        };
        ctx.output.kv("price range", &range);
    }
    ctx.output.kv("total stock", &draft.total_stock()?.to_string());

    Ok(())
}

fn print_combinations(draft: &VariantDraft, ctx: &Context) {
    let header = ["Variant", "Price", "Stock", "SKU"];
    let rows: Vec<Vec<String>> = draft
        .combinations()
        .iter()
        .map(|c| {
            vec![
                c.label(draft.types()),
                c.price.display(),
                stock_badge(c.stock),
                c.sku.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    let widths = column_widths(&header, &rows);
    ctx.output.table_row(&header, &widths);
    for row in &rows {
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &widths);
    }
}

#[derive(Serialize)]
struct ResolveReport<'a> {
    selected: &'a SelectedVariants,
    offer: &'a ResolvedOffer,
    available: Vec<(&'a str, Vec<&'a str>)>,
}

fn resolve_selection(file: &str, select: &[String], ctx: &Context) -> Result<()> {
    let LoadedListing { product, draft, .. } = load_listing(file, ctx)?;

    let selected = if select.is_empty() {
        initial_selection(draft.combinations())
    } else {
        parse_selection(select)?
    };

    let index = VariantIndex::new(draft.combinations());
    let offer = index.resolve(&product, &selected);
    let available: Vec<(&str, Vec<&str>)> = draft
        .types()
        .iter()
        .map(|t| {
            (
                t.name.as_str(),
                available_values(draft.types(), draft.combinations(), &selected, &t.name),
            )
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&ResolveReport {
            selected: &selected,
            offer: &offer,
            available,
        });
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("selection", &selected.to_string());
    ctx.output.kv("price", &offer.price.display());
    ctx.output.kv("stock", &stock_badge(offer.stock));
    match &offer.combination_id {
        Some(id) => ctx.output.kv("variant", id.as_str()),
        None if draft.has_variants() => ctx
            .output
            .info("Selection matches no variant; showing the base price and stock."),
        None => {}
    }

    for (type_name, values) in &available {
        let values = if values.is_empty() {
            "(none in stock)".to_string()
        } else {
            values.join(", ")
        };
        ctx.output.list_item(&format!("{}: {}", type_name, values));
    }

    Ok(())
}

/// Parse repeated `Type=Value` arguments into a selection.
fn parse_selection(pairs: &[String]) -> Result<SelectedVariants> {
    let mut selected = SelectedVariants::new();
    for pair in pairs {
        let Some((type_name, value)) = pair.split_once('=') else {
            bail!("Invalid selection '{}', expected TYPE=VALUE", pair);
        };
        let (type_name, value) = (type_name.trim(), value.trim());
        if type_name.is_empty() || value.is_empty() {
            bail!("Invalid selection '{}', expected TYPE=VALUE", pair);
        }
        selected.select(type_name, value);
    }
    Ok(selected)
}

fn author(output: &str, force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(output);
    if path.exists() && !force {
        bail!(
            "Listing already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    let currency = ctx.config.catalog.currency;
    ctx.output.header("New listing");

    let name: String = Input::new().with_prompt("Product name").interact_text()?;
    let price: i64 = Input::new()
        .with_prompt(format!("Base price ({})", currency.code()))
        .default(0)
        .interact_text()?;
    let stock: i64 = Input::new()
        .with_prompt("Base stock")
        .default(0)
        .interact_text()?;
    let images: String = Input::new()
        .with_prompt("Image URLs (comma separated)")
        .allow_empty(true)
        .interact_text()?;

    let store = ctx.config.catalog.store_id.as_deref().unwrap_or("str_local");
    let mut product = Product::new(
        StoreId::new(store),
        name,
        Money::new(price, currency),
        stock,
    );
    product.images = split_list(&images);

    let mut draft = VariantDraft::new(currency);
    while Confirm::new()
        .with_prompt("Add a variant type?")
        .default(draft.types().is_empty())
        .interact()?
    {
        if let Err(e) = prompt_type(&mut draft) {
            ctx.output.warn(&format!("{:#}", e));
        }
    }

    if draft.has_variants() && draft.is_complete() {
        prompt_combinations(&mut draft, ctx)?;
    }

    if let Err(e) = draft.validate_for_submit() {
        ctx.output.warn(&format!("Listing is not ready to submit yet: {}", e));
    }

    Listing::from_draft(&product, &draft).save(&path)?;
    ctx.output.success(&format!(
        "Wrote {} with {} variant(s)",
        path.display(),
        draft.combinations().len()
    ));

    Ok(())
}

fn prompt_type(draft: &mut VariantDraft) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("Variant type (e.g. Warna)")
        .interact_text()?;
    let type_id = draft.add_type(&name)?;

    let values: String = Input::new()
        .with_prompt(format!("Values for {} (comma separated)", name.trim()))
        .interact_text()?;
    for value in split_list(&values) {
        draft.add_value(&type_id, &value)?;
    }
    Ok(())
}

fn prompt_combinations(draft: &mut VariantDraft, ctx: &Context) -> Result<()> {
    let currency = draft.currency();

    if Confirm::new()
        .with_prompt("Same price and stock for every variant?")
        .default(true)
        .interact()?
    {
        let price: i64 = Input::new()
            .with_prompt(format!("Price ({})", currency.code()))
            .interact_text()?;
        let stock: i64 = Input::new().with_prompt("Stock").interact_text()?;
        let update = CombinationUpdate::price(Money::new(price, currency)).with_stock(stock);
        draft.apply_to_all(&update)?;
        return Ok(());
    }

    let rows: Vec<(CombinationId, String)> = draft
        .combinations()
        .iter()
        .map(|c| (c.id.clone(), c.label(draft.types())))
        .collect();

    for (id, label) in rows {
        let price: i64 = Input::new()
            .with_prompt(format!("{} price ({})", label, currency.code()))
            .interact_text()?;
        let stock: i64 = Input::new()
            .with_prompt(format!("{} stock", label))
            .default(0)
            .interact_text()?;
        let sku: String = Input::new()
            .with_prompt(format!("{} SKU", label))
            .allow_empty(true)
            .interact_text()?;

        let update = CombinationUpdate::price(Money::new(price, currency))
            .with_stock(stock)
            .with_sku(sku);
        if let Err(e) = draft.update_combination(&id, &update) {
            ctx.output.warn(&format!("{}: {}", label, e));
        }
    }

    Ok(())
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
