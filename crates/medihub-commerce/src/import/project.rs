//! Turning mapped CSV rows into product drafts.

use crate::catalog::{Category, Gallery, ProductDraft};
use crate::import::mapping::{ColumnMapping, ImportField};
use crate::money::Money;

/// Name given to rows whose name cell is missing or blank.
pub const FALLBACK_PRODUCT_NAME: &str = "Imported Product";

/// Build one draft per row. Never fails; bad cells fall back to defaults.
pub fn project_rows<R: AsRef<[String]>>(
    rows: &[R],
    mapping: &ColumnMapping,
    placeholder: &str,
) -> Vec<ProductDraft> {
    rows.iter()
        .map(|row| project_row(row.as_ref(), mapping, placeholder))
        .collect()
}

/// Build a draft from a single row.
///
/// Numeric cells are read leniently: the longest numeric prefix is used and
/// anything unparsable, negative or unmapped becomes 0. An unknown category
/// label becomes the first category.
pub fn project_row(row: &[String], mapping: &ColumnMapping, placeholder: &str) -> ProductDraft {
    let name = cell(row, mapping, ImportField::Name)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_PRODUCT_NAME);
    let category = cell(row, mapping, ImportField::Category)
        .and_then(Category::from_label)
        .unwrap_or_else(Category::first);
    let price = cell(row, mapping, ImportField::Price)
        .and_then(leading_float)
        .map(Money::from_decimal)
        .unwrap_or(Money::ZERO);
    let stock = cell(row, mapping, ImportField::Stock)
        .and_then(leading_int)
        .map(|n| u32::try_from(n.max(0)).unwrap_or(u32::MAX))
        .unwrap_or(0);
    let description = cell(row, mapping, ImportField::ShortDescription).unwrap_or("");

    ProductDraft::new(name, category, price, stock)
        .with_descriptions(description, description)
        .with_gallery(Gallery::with_placeholder("", Vec::new(), placeholder))
}

/// The mapped cell for a field. Columns past the end of the row read as
/// missing.
fn cell<'a>(row: &'a [String], mapping: &ColumnMapping, field: ImportField) -> Option<&'a str> {
    mapping
        .get(field)
        .and_then(|idx| row.get(idx))
        .map(String::as_str)
}

/// Parse the longest decimal prefix of `s`, e.g. `"4500.50 KES"` -> 4500.5.
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Parse the longest integer prefix of `s`, e.g. `"12 units"` -> 12.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }

    let text = &s[..sign + digits];
    match text.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) if text.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IMPORT_PLACEHOLDER_IMAGE;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn full_mapping() -> ColumnMapping {
        ColumnMapping {
            name: Some(0),
            category: Some(1),
            price: Some(2),
            stock: Some(3),
            short_description: Some(4),
        }
    }

    #[test]
    fn test_project_full_row() {
        let rows = vec![row(&["Walker", "Mobility & Rehabilitation", "6500", "12", "Foldable"])];
        let drafts = project_rows(&rows, &full_mapping(), IMPORT_PLACEHOLDER_IMAGE);
        let draft = &drafts[0];

        assert_eq!(draft.name, "Walker");
        assert_eq!(draft.slug, "walker");
        assert_eq!(draft.category, Category::MobilityRehabilitation);
        assert_eq!(draft.price, Money::new(6500));
        assert_eq!(draft.stock, 12);
        assert_eq!(draft.short_description, "Foldable");
        assert_eq!(draft.long_description, "Foldable");
        assert_eq!(draft.gallery.primary(), IMPORT_PLACEHOLDER_IMAGE);
        assert_eq!(draft.rating, 0.0);
        assert_eq!(draft.reviews, 0);
        assert!(draft.specifications.is_empty());
        assert!(!draft.featured);
    }

    #[test]
    fn test_bad_cells_default() {
        let rows = vec![row(&["", "Vitamins", "abc", "-5", ""])];
        let draft = &project_rows(&rows, &full_mapping(), IMPORT_PLACEHOLDER_IMAGE)[0];

        assert_eq!(draft.name, FALLBACK_PRODUCT_NAME);
        assert_eq!(draft.slug, "imported-product");
        assert_eq!(draft.category, Category::DiagnosticMonitoring);
        assert_eq!(draft.price, Money::ZERO);
        assert_eq!(draft.stock, 0);
        assert_eq!(draft.short_description, "");
    }

    #[test]
    fn test_unmapped_and_short_rows() {
        let mapping = ColumnMapping {
            name: Some(0),
            price: Some(7),
            ..ColumnMapping::default()
        };
        let rows = vec![row(&["Gauze Pack"])];
        let draft = &project_rows(&rows, &mapping, IMPORT_PLACEHOLDER_IMAGE)[0];

        assert_eq!(draft.name, "Gauze Pack");
        assert_eq!(draft.price, Money::ZERO);
        assert_eq!(draft.stock, 0);
        assert_eq!(draft.category, Category::first());
    }

    #[test]
    fn test_mapping_with_overridden_columns() {
        // Product Title,Cost (KES),Qty with category pinned to the cost column
        let mapping = ColumnMapping {
            name: Some(0),
            category: Some(1),
            price: Some(1),
            stock: Some(2),
            short_description: None,
        };
        let rows = vec![row(&["Wheelchair", "15000", "3"])];
        let draft = &project_rows(&rows, &mapping, IMPORT_PLACEHOLDER_IMAGE)[0];
        assert_eq!(draft.category, Category::DiagnosticMonitoring);
        assert_eq!(draft.price, Money::new(15000));
        assert_eq!(draft.stock, 3);
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(leading_float("4500"), Some(4500.0));
        assert_eq!(leading_float("  12.5kg"), Some(12.5));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("3."), Some(3.0));
        assert_eq!(leading_float("1e3 units"), Some(1000.0));
        assert_eq!(leading_float("2e"), Some(2.0));
        assert_eq!(leading_float("-7"), Some(-7.0));
        assert_eq!(leading_float("KES 100"), None);
        assert_eq!(leading_float("."), None);
        assert_eq!(leading_float(""), None);
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("12 units"), Some(12));
        assert_eq!(leading_int("7.9"), Some(7));
        assert_eq!(leading_int("+3"), Some(3));
        assert_eq!(leading_int("-4"), Some(-4));
        assert_eq!(leading_int("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(leading_int("x1"), None);
        assert_eq!(leading_int("-"), None);
    }

    #[test]
    fn test_price_rounds_to_whole_shillings() {
        let rows = vec![row(&["Thermometer", "", "1299.6", "40"])];
        let draft = &project_rows(&rows, &full_mapping(), IMPORT_PLACEHOLDER_IMAGE)[0];
        assert_eq!(draft.price, Money::new(1300));
    }

    #[test]
    fn test_huge_stock_saturates() {
        let rows = vec![row(&["Gloves", "", "10", "9999999999"])];
        let draft = &project_rows(&rows, &full_mapping(), IMPORT_PLACEHOLDER_IMAGE)[0];
        assert_eq!(draft.stock, u32::MAX);
    }
}
