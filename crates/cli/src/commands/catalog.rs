//! Dump the seeded product catalog.

use cubed_storefront::catalog::ProductCatalog;

use super::CommandError;

/// Run `cubed-cli catalog`.
pub fn run() -> Result<(), CommandError> {
    let catalog = ProductCatalog::seeded();
    let json = serde_json::to_string_pretty(catalog.all())?;
    println!("{json}");
    Ok(())
}
