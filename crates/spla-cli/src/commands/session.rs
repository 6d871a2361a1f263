use std::io::{self, BufRead, Write};

use colored::Colorize;

use spla_core::CatalogKind;
use spla_session::{CatalogStatus, DrawSession, Intent, SessionError};

use crate::GlobalOpts;

pub async fn run(opts: &GlobalOpts) -> Result<(), String> {
    let mut session = super::open_session(opts).await?;

    println!("  {} spla session", "Starting".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            println!("Goodbye!");
            break;
        }

        match process(&mut session, input).await {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
            }
            Err(e) => println!("{}\n", e.yellow()),
        }
    }

    Ok(())
}

/// Handle one line: a view command or an intent.
async fn process(session: &mut DrawSession, input: &str) -> Result<String, String> {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match parts[0].to_lowercase().as_str() {
        "help" => return Ok(help()),
        "status" => return Ok(status(session)),
        "results" => return Ok(super::render_results(session)),
        "roster" => return Ok(super::render_roster(session)),
        "list" => return list(session, rest),
        _ => {}
    }

    let intent: Intent = input.parse().map_err(|e: SessionError| match e {
        SessionError::UnknownCommand(cmd) => {
            format!("unknown command '{cmd}' (type 'help' for commands)")
        }
        other => other.to_string(),
    })?;
    session
        .dispatch(intent.clone())
        .await
        .map_err(|e| e.to_string())?;
    Ok(describe(session, &intent))
}

/// Summarize the state an intent just changed.
fn describe(session: &DrawSession, intent: &Intent) -> String {
    match intent {
        Intent::Draw(_) | Intent::DrawAll => super::render_results(session),
        Intent::ToggleFilterItem { kind, .. } | Intent::SelectAll { kind, .. } => {
            filter_line(session, *kind)
        }
        Intent::ApplyFilter(kind) | Intent::DiscardFilter(kind) => {
            let kinds = match kind {
                Some(kind) => vec![*kind],
                None => CatalogKind::ALL.to_vec(),
            };
            kinds
                .into_iter()
                .map(|kind| filter_line(session, kind))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Intent::SetMemberCount(_) | Intent::SetMemberName { .. } | Intent::ToggleTeamDivision(_) => {
            let pending = session.roster().pending();
            format!(
                "  roster (unconfirmed): {} members, teams {}. 'confirm' to save, 'revert' to discard.",
                pending.member_count,
                if pending.team_division { "on" } else { "off" }
            )
        }
        Intent::ConfirmRoster | Intent::DiscardRoster | Intent::DivideTeams => {
            super::render_roster(session)
        }
        Intent::RefreshCatalog => format!(
            "  {} catalogs; filters reset.",
            "Refreshed".green().bold()
        ),
        Intent::ToggleSection { name, open } => {
            format!("  {name} {}", if *open { "expanded" } else { "collapsed" })
        }
    }
}

fn filter_line(session: &DrawSession, kind: CatalogKind) -> String {
    let selection = session.selections().get(kind);
    let marker = if selection.is_dirty() {
        " (unapplied)".yellow().to_string()
    } else {
        String::new()
    };
    format!(
        "  {kind}: {} of {} checked, {} available{marker}",
        selection.pending().len(),
        selection.catalog().len(),
        session.available_count(kind)
    )
}

fn list(session: &DrawSession, rest: &str) -> Result<String, String> {
    let kind = super::parse_kind(rest)?;
    let selection = session.selections().get(kind);
    let locale = session.locale();
    let lines: Vec<String> = selection
        .catalog()
        .items()
        .iter()
        .map(|item| {
            let check = if selection.is_pending_selected(&item.key) {
                "[x]"
            } else {
                "[ ]"
            };
            format!("  {check} {:<20} {}", item.key, item.display_name(locale))
        })
        .collect();
    if lines.is_empty() {
        return Ok(format!("  No {kind} catalog loaded."));
    }
    Ok(lines.join("\n"))
}

fn status(session: &DrawSession) -> String {
    let mut out = String::new();
    match session.status() {
        CatalogStatus::Ready => out.push_str(&format!("  Catalogs: {}\n", "ready".green())),
        CatalogStatus::Failed(reason) => {
            out.push_str(&format!("  Catalogs: {} ({reason})\n", "unavailable".red()))
        }
    }
    for kind in CatalogKind::ALL {
        out.push_str(&filter_line(session, kind));
        out.push('\n');
    }
    let roster = session.roster();
    out.push_str(&format!(
        "  Members: {}{}\n",
        roster.member_count(),
        if session.is_roster_dirty() {
            " (unconfirmed edits)".yellow().to_string()
        } else {
            String::new()
        }
    ));
    out.push_str(&format!(
        "  Teams: {}",
        if roster.committed().team_division {
            "on"
        } else {
            "off"
        }
    ));
    out
}

fn help() -> String {
    [
        "  draw [rule|stage|weapon|all]    draw from the applied filters",
        "  list <kind>                     show the pending filter",
        "  filter <kind> <key> on|off      check or uncheck one item",
        "  filter <kind> all|none          check or uncheck everything",
        "  apply [kind]                    apply and save pending filters",
        "  cancel [kind]                   discard pending filter edits",
        "  members <n>                     set the member count",
        "  name <index> [name]             rename a member (blank resets)",
        "  teams on|off                    toggle team division",
        "  confirm | revert                save or discard roster edits",
        "  divide                          re-split the teams",
        "  refresh                         re-fetch catalogs, reset filters",
        "  section <name> open|close       expand or collapse a section",
        "  status | results | roster       show current state",
        "  help | quit",
    ]
    .join("\n")
}
