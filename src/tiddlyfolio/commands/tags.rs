use crate::commands::tag_list;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::timestamp;
use crate::store::WikiStore;
use chrono::{DateTime, Utc};

/// Reports the tag index. With `rebuild`, also rewrites the Tag List tiddler
/// even when no tag changed (e.g. after editing tags in the browser).
pub fn run<S: WikiStore>(store: &mut S, rebuild: bool, now: DateTime<Utc>) -> Result<CmdResult> {
    let mut doc = store.load()?;
    let index = doc.tag_index();
    let mut result = CmdResult::default().with_tags(index.as_slice().to_vec());

    if index.is_empty() {
        result.add_message(CmdMessage::info("No tags in use."));
    }

    if rebuild {
        let outcome = tag_list::regenerate(&mut doc, &timestamp(now))?;
        store.save(&doc)?;
        result.add_message(CmdMessage::success(format!(
            "{} rebuilt -> {}",
            outcome.title,
            store.destination().display()
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tag_list::TAG_LIST_TITLE;
    use crate::reader::read_document;
    use crate::store::memory::InMemoryStore;
    use crate::test_utils::MOCK_WIKI;

    #[test]
    fn test_lists_tags_without_writing() {
        let mut store = InMemoryStore::new(MOCK_WIKI);
        let result = run(&mut store, false, Utc::now()).unwrap();
        assert_eq!(result.tags, vec!["blue".to_string(), "[[red dot]]".to_string()]);
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn test_rebuild_writes_the_tag_list() {
        let mut store = InMemoryStore::new(MOCK_WIKI);
        run(&mut store, true, Utc::now()).unwrap();
        assert_eq!(store.saves(), 1);

        let doc = read_document(store.text().as_bytes()).unwrap();
        assert!(doc.get(TAG_LIST_TITLE).unwrap().text().contains("!!! red dot\n"));
    }
}
