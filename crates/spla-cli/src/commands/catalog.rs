use comfy_table::{ContentArrangement, Table};

use crate::GlobalOpts;

pub async fn run(opts: &GlobalOpts, kind: &str) -> Result<(), String> {
    let kind = super::parse_kind(kind)?;
    let session = super::open_session(opts).await?;
    let locale = session.locale();
    let selection = session.selections().get(kind);

    if selection.catalog().is_empty() {
        println!("  No {kind} catalog loaded.");
        return Ok(());
    }

    let committed = selection.committed();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Name", "Allowed"]);
    for item in selection.catalog().items() {
        let allowed = committed.is_empty() || committed.contains(&item.key);
        table.add_row(vec![
            item.key.as_str(),
            item.display_name(locale),
            if allowed { "yes" } else { "no" },
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} items, {} available",
        selection.catalog().len(),
        session.available_count(kind)
    );

    Ok(())
}
