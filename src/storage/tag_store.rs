use std::collections::BTreeSet;

use log::debug;

use crate::{tag::Tag, traits::Indexable};

use super::{collection::Collection, persistence::Persistence};

pub const TAGS_KEY: &str = "tags";

/// Tags in insertion order, which is also their display order.
///
/// Names are not deduplicated here; callers check before `add_tag`.
pub struct TagStore {
  tags: Collection<Tag>,
}

impl TagStore {
  pub fn new(persistence: Box<dyn Persistence>) -> Self {
    Self {
      tags: Collection::new(TAGS_KEY, persistence),
    }
  }

  pub fn tags(&self) -> &[Tag] {
    self.tags.all()
  }

  pub fn add_tag(&mut self, tag: Tag) {
    debug!("add tag: {} id: {}", tag.name(), tag.id());
    self.tags.add(tag);
  }

  pub fn remove_tag(&mut self, id: uuid::Uuid) -> usize {
    let removed = self.tags.remove_all(id);
    debug!("removed {} tags with id: {}", removed, id);
    removed
  }

  pub fn tag_by_id(&self, id: uuid::Uuid) -> Option<&Tag> {
    self.tags.get_by_id(id)
  }

  pub fn find_by_name(&self, name: &str) -> Option<&Tag> {
    let name = name.to_lowercase();
    self
      .tags
      .all()
      .iter()
      .find(|t| t.name().to_lowercase() == name)
  }

  /// Tags referenced by `ids`, in store order. Unknown ids are skipped.
  pub fn find_tags(&self, ids: &BTreeSet<uuid::Uuid>) -> Vec<Tag> {
    self
      .tags
      .all()
      .iter()
      .filter(|t| ids.contains(&t.id()))
      .cloned()
      .collect()
  }
}
