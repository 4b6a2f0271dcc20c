//! CSV import command.

use anyhow::{bail, Context as _, Result};
use async_trait::async_trait;
use indicatif::ProgressBar;
use medihub_commerce::catalog::{Product, ProductDraft, ProductPatch};
use medihub_commerce::import::{
    import_drafts, infer_mapping, parse_csv, project_rows, ColumnMapping, ImportField, RowOutcome,
};
use medihub_commerce::{CatalogStore, CommerceError, ProductId};

use super::ImportArgs;
use crate::context::Context;
use crate::output::truncate;

/// Rows shown in a dry-run preview.
const PREVIEW_ROWS: usize = 10;

/// Run the import command.
pub async fn run(args: ImportArgs, ctx: &Context) -> Result<()> {
    ctx.require_admin()?;

    let path = ctx.resolve_path(&args.file);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;
    let table = parse_csv(&text).with_context(|| format!("Invalid CSV file: {}", path.display()))?;

    let mut mapping = infer_mapping(&table.headers);
    for spec in &args.mappings {
        let (field, column) = parse_mapping_override(spec)?;
        if let Some(idx) = column {
            if idx >= table.headers.len() {
                bail!(
                    "Column {} is out of range; the file has {} column(s)",
                    idx,
                    table.headers.len()
                );
            }
        }
        mapping.set(field, column);
    }

    let drafts = project_rows(&table.rows, &mapping, &ctx.config.commerce.import_placeholder_image);

    if args.dry_run {
        print_preview(&table.headers, &mapping, &drafts, ctx);
        return Ok(());
    }

    if drafts.is_empty() {
        ctx.output.warn("The file has no data rows.");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        print_mapping(&table.headers, &mapping, ctx);
        use dialoguer::Confirm;
        let confirmed = Confirm::new()
            .with_prompt(format!("Import {} product(s)?", drafts.len()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let catalog = ctx.backend.catalog_store();
    let tracked = TrackedCatalog {
        inner: &catalog,
        bar: ctx.output.progress(drafts.len() as u64, "Importing"),
    };
    let report = import_drafts(&tracked, drafts).await;
    tracked.bar.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    for outcome in &report.outcomes {
        if let RowOutcome::Failed { row, error } = outcome {
            ctx.output.warn(&format!("Row {}: {}", row, error));
        }
    }
    ctx.output.success(&format!(
        "Imported {} product(s), {} failed",
        report.created_count(),
        report.failed_count()
    ));
    Ok(())
}

/// Parse `field=index` or `field=none`.
fn parse_mapping_override(spec: &str) -> Result<(ImportField, Option<usize>)> {
    let (field, column) = spec
        .split_once('=')
        .with_context(|| format!("Mapping '{}' must be field=index or field=none", spec))?;
    let field: ImportField = field.trim().parse()?;
    let column = match column.trim() {
        "none" | "ignore" | "" => None,
        idx => Some(
            idx.parse::<usize>()
                .with_context(|| format!("Invalid column index '{}'", idx))?,
        ),
    };
    Ok((field, column))
}

fn print_mapping(headers: &[String], mapping: &ColumnMapping, ctx: &Context) {
    ctx.output.header("Column mapping");
    for field in ImportField::ALL {
        let source = match mapping.get(field) {
            Some(idx) => format!(
                "column {} ({})",
                idx,
                headers.get(idx).map(String::as_str).unwrap_or("?")
            ),
            None => "ignored".to_string(),
        };
        ctx.output.kv(field.as_str(), &source);
    }
}

fn print_preview(headers: &[String], mapping: &ColumnMapping, drafts: &[ProductDraft], ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "mapping": mapping,
            "drafts": drafts,
        }));
        return;
    }

    print_mapping(headers, mapping, ctx);
    ctx.output.header("Preview");
    let widths = [30, 26, 12, 8];
    ctx.output.table_row(&["NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
    for draft in drafts.iter().take(PREVIEW_ROWS) {
        ctx.output.table_row(
            &[
                &truncate(&draft.name, 30),
                draft.category.label(),
                &draft.price.display(),
                &draft.stock.to_string(),
            ],
            &widths,
        );
    }
    if drafts.len() > PREVIEW_ROWS {
        ctx.output
            .info(&format!("... and {} more row(s)", drafts.len() - PREVIEW_ROWS));
    }
    ctx.output.info("Dry run: nothing was imported.");
}

/// Catalog that ticks a progress bar on every create.
struct TrackedCatalog<'a, S: ?Sized> {
    inner: &'a S,
    bar: ProgressBar,
}

#[async_trait]
impl<'a, S> CatalogStore for TrackedCatalog<'a, S>
where
    S: CatalogStore + ?Sized,
{
    async fn list_all(&self) -> Result<Vec<Product>, CommerceError> {
        self.inner.list_all().await
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
        self.inner.get_by_id(id).await
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, CommerceError> {
        self.bar.set_message(draft.name.clone());
        let result = self.inner.create(draft).await;
        self.bar.inc(1);
        result
    }

    async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<Product, CommerceError> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &ProductId) -> Result<(), CommerceError> {
        self.inner.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapping_override() {
        assert_eq!(
            parse_mapping_override("category=1").unwrap(),
            (ImportField::Category, Some(1))
        );
        assert_eq!(
            parse_mapping_override("price=none").unwrap(),
            (ImportField::Price, None)
        );
        assert_eq!(
            parse_mapping_override("shortDescription = 4").unwrap(),
            (ImportField::ShortDescription, Some(4))
        );
        assert!(parse_mapping_override("price").is_err());
        assert!(parse_mapping_override("rating=2").is_err());
        assert!(parse_mapping_override("stock=-1").is_err());
    }
}
