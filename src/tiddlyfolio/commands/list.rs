use crate::commands::{CmdMessage, CmdResult, TiddlerSummary};
use crate::error::Result;
use crate::model::TiddlerKind;
use crate::store::WikiStore;
use crate::tags::decorate;

/// Lists tiddlers in document order. System tiddlers are skipped unless
/// `include_system` is set; `tag` keeps only tiddlers carrying that tag
/// (given bare or bracketed).
pub fn run<S: WikiStore>(store: &S, tag: Option<&str>, include_system: bool) -> Result<CmdResult> {
    let doc = store.load()?;
    let wanted = tag.map(|t| decorate(t.trim()));

    let listed: Vec<TiddlerSummary> = doc
        .tiddlers
        .iter()
        .filter(|t| include_system || t.kind() == TiddlerKind::User)
        .filter(|t| match &wanted {
            Some(wanted) => t.tags().is_some_and(|tags| tags.contains(wanted)),
            None => true,
        })
        .map(TiddlerSummary::from)
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No tiddlers found."));
    }
    Ok(result.with_listed_tiddlers(listed))
}
