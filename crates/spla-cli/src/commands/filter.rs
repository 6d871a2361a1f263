use colored::Colorize;

use crate::GlobalOpts;

pub async fn run(
    opts: &GlobalOpts,
    kind: &str,
    all: bool,
    none: bool,
    keys: &[String],
) -> Result<(), String> {
    let kind = super::parse_kind(kind)?;
    let mut session = super::open_session(opts).await?;

    if all || none || !keys.is_empty() {
        let catalog = session.selections().get(kind).catalog();
        if let Some(unknown) = keys.iter().find(|key| !catalog.contains(key)) {
            return Err(format!("unknown {kind} '{unknown}'"));
        }

        session.select_all(kind, all);
        for key in keys {
            session.toggle_filter_item(kind, key, true);
        }
        session.apply_filter(Some(kind));
        println!("  {} {kind} filter", "Applied".green().bold());
    }

    let selection = session.selections().get(kind);
    let locale = session.locale();
    let committed = selection.committed();
    if committed.is_empty() {
        println!("  {kind}: no filter, all {} items allowed", selection.catalog().len());
    } else {
        let names: Vec<&str> = selection
            .catalog()
            .items()
            .iter()
            .filter(|item| committed.contains(&item.key))
            .map(|item| item.display_name(locale))
            .collect();
        println!(
            "  {kind}: {} of {} allowed: {}",
            names.len(),
            selection.catalog().len(),
            names.join(", ")
        );
    }

    Ok(())
}
