use colored::Colorize;

use spla_core::{CatalogKind, CoreError};
use spla_session::SessionError;

use crate::GlobalOpts;

pub async fn run(opts: &GlobalOpts, target: &str) -> Result<(), String> {
    let mut session = super::open_session(opts).await?;

    let result = if target.eq_ignore_ascii_case("all") {
        session.draw_all()
    } else {
        let kind = super::parse_kind(target)?;
        session.draw(kind)
    };

    match result {
        Ok(()) => {
            print!("{}", super::render_results(&session));
            Ok(())
        }
        Err(SessionError::Core(CoreError::EmptyPool(kind))) => Err(empty_pool_message(kind)),
        Err(e) => Err(e.to_string()),
    }
}

fn empty_pool_message(kind: CatalogKind) -> String {
    format!(
        "no {kind} available to draw from ({})",
        "check the catalog with `spla catalog` or run `spla refresh`".dimmed()
    )
}
