pub mod catalog;
pub mod draw;
pub mod filter;
pub mod refresh;
pub mod roster;
pub mod session;

use std::sync::Arc;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use spla_catalog::{DirFetcher, Fetcher, HttpFetcher};
use spla_core::{CatalogKind, FileStore, SlotId, Team};
use spla_session::{CatalogStatus, DrawSession, SessionConfig};

use crate::GlobalOpts;

/// Build the session config from the config file (if any) and flag overrides.
fn load_config(opts: &GlobalOpts) -> Result<SessionConfig, String> {
    let mut config = match &opts.config {
        Some(path) => SessionConfig::from_file(path).map_err(|e| e.to_string())?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    if let Some(locale) = &opts.locale {
        config = config.with_locale(locale.as_str());
    }
    if let Some(url) = &opts.base_url {
        config = config.with_base_url(url.as_str());
    }
    Ok(config)
}

/// Open a session over the file store, warning if catalogs could not load.
async fn open_session(opts: &GlobalOpts) -> Result<DrawSession, String> {
    let config = load_config(opts)?;
    let fetcher: Arc<dyn Fetcher> = match &opts.catalog_dir {
        Some(dir) => Arc::new(DirFetcher::new(dir)),
        None => Arc::new(HttpFetcher::new(&config.catalog).map_err(|e| e.to_string())?),
    };
    let store = Arc::new(FileStore::open(&opts.store));
    tracing::debug!(
        store = %opts.store.display(),
        offline = opts.catalog_dir.is_some(),
        "opening session"
    );

    let session = DrawSession::open(config, store, fetcher).await;
    if let CatalogStatus::Failed(reason) = session.status() {
        eprintln!(
            "  {} catalogs unavailable: {reason}",
            "warning:".yellow().bold()
        );
    }
    Ok(session)
}

fn parse_kind(kind: &str) -> Result<CatalogKind, String> {
    kind.parse::<CatalogKind>()
        .map_err(|_| format!("unknown catalog '{kind}' (expected rule, stage, or weapon)"))
}

fn section_title(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Rule => "Rule",
        CatalogKind::Stage => "Stage",
        CatalogKind::Weapon => "Weapons",
    }
}

/// Render the draw results as text, one section per kind.
fn render_results(session: &DrawSession) -> String {
    let locale = session.locale();
    let mut out = String::new();

    for kind in CatalogKind::ALL {
        match SlotId::shared(kind) {
            Some(slot) => {
                if let Some(item) = session.result(slot) {
                    out.push_str(&format!(
                        "  {:<8} {}\n",
                        format!("{}:", section_title(kind)).bold(),
                        item.display_name(locale)
                    ));
                }
            }
            None => {
                let members = session.members();
                let drawn: Vec<_> = members
                    .iter()
                    .filter_map(|m| {
                        session
                            .result(SlotId::Weapon(m.index))
                            .map(|item| (m, item))
                    })
                    .collect();
                if drawn.is_empty() {
                    continue;
                }
                out.push_str(&format!("  {}\n", section_title(kind).bold()));
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["#", "Member", "Team", "Weapon"]);
                for (member, item) in drawn {
                    table.add_row(vec![
                        member.index.to_string(),
                        member.name.clone(),
                        team_label(session, member.index),
                        item.display_name(locale).to_string(),
                    ]);
                }
                out.push_str(&format!("{table}\n"));
            }
        }
    }

    out
}

fn team_label(session: &DrawSession, index: u32) -> String {
    match session.teams().team_of(index) {
        Some(team) => team.to_string(),
        None => "—".to_string(),
    }
}

/// Render the confirmed roster and, if divided, both teams.
fn render_roster(session: &DrawSession) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Member", "Team"]);
    for member in session.members() {
        table.add_row(vec![
            member.index.to_string(),
            member.name.clone(),
            team_label(session, member.index),
        ]);
    }

    let mut out = format!("{table}\n");
    let teams = session.teams();
    if !teams.is_empty() {
        let names = session.members();
        for team in [Team::Alpha, Team::Bravo] {
            let listed: Vec<&str> = teams
                .members_of(team)
                .into_iter()
                .filter_map(|i| names.iter().find(|m| m.index == i))
                .map(|m| m.name.as_str())
                .collect();
            out.push_str(&format!("  {}: {}\n", team.to_string().bold(), listed.join(", ")));
        }
    }
    out
}
