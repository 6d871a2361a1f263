use colored::Colorize;

use spla_core::CatalogKind;

use crate::GlobalOpts;

pub async fn run(opts: &GlobalOpts) -> Result<(), String> {
    let mut session = super::open_session(opts).await?;
    session
        .refresh_catalogs()
        .await
        .map_err(|e| format!("refresh failed: {e}"))?;

    println!("  {} catalogs", "Refreshed".green().bold());
    for kind in CatalogKind::ALL {
        println!(
            "  {:<8} {} items",
            kind.to_string(),
            session.catalogs().get(kind).len()
        );
    }
    println!("  {}", "Filters were reset to allow everything.".dimmed());

    Ok(())
}
