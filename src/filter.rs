use std::collections::BTreeSet;

use crate::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
  Price,
  CreatedDate,
  UpdatedDate,
  TotalAmount,
}

impl SortKey {
  pub const ALL: [SortKey; 4] = [
    SortKey::Price,
    SortKey::CreatedDate,
    SortKey::UpdatedDate,
    SortKey::TotalAmount,
  ];

  pub fn name(&self) -> &'static str {
    match self {
      SortKey::Price => "price",
      SortKey::CreatedDate => "created",
      SortKey::UpdatedDate => "updated",
      SortKey::TotalAmount => "total",
    }
  }

  pub fn compare(&self, a: &Item, b: &Item) -> std::cmp::Ordering {
    match self {
      SortKey::Price => a.price().cmp(&b.price()),
      SortKey::CreatedDate => a.created_date().cmp(&b.created_date()),
      SortKey::UpdatedDate => a.updated_date().cmp(&b.updated_date()),
      SortKey::TotalAmount => a.total_amount().cmp(&b.total_amount()),
    }
  }
}

impl std::str::FromStr for SortKey {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    SortKey::ALL
      .into_iter()
      .find(|key| key.name() == s)
      .ok_or_else(|| format!("unknown sort key: {}", s))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
  pub key: SortKey,
  pub ascending: bool,
}

impl Default for SortOption {
  fn default() -> Self {
    Self {
      key: SortKey::CreatedDate,
      ascending: false,
    }
  }
}

impl SortOption {
  pub fn new(key: SortKey, ascending: bool) -> Self {
    Self { key, ascending }
  }

  /// Picking the active key again flips its direction. Any other key
  /// starts out descending.
  pub fn select(self, key: SortKey) -> Self {
    let ascending = self.key == key && !self.ascending;
    Self { key, ascending }
  }

  /// Sort order from command-line flags. A direction without a key applies
  /// to the default key.
  pub fn from_flags(key: Option<SortKey>, ascending: bool) -> Self {
    Self {
      key: key.unwrap_or(SortOption::default().key),
      ascending,
    }
  }

  pub fn compare(&self, a: &Item, b: &Item) -> std::cmp::Ordering {
    let ordering = self.key.compare(a, b);
    match self.ascending {
      true => ordering,
      false => ordering.reverse(),
    }
  }
}

/// Transient list controls: search text, selected tags and sort order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
  search_text: String,
  selected_tag_ids: BTreeSet<uuid::Uuid>,
  sort: SortOption,
}

impl FilterState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn search_text(&self) -> &str {
    self.search_text.as_str()
  }

  pub fn selected_tag_ids(&self) -> &BTreeSet<uuid::Uuid> {
    &self.selected_tag_ids
  }

  pub fn sort(&self) -> SortOption {
    self.sort
  }

  pub fn set_search_text(&mut self, text: &str) {
    self.search_text = text.to_owned();
  }

  pub fn set_sort(&mut self, sort: SortOption) {
    self.sort = sort;
  }

  pub fn select_sort(&mut self, key: SortKey) -> SortOption {
    self.sort = self.sort.select(key);
    self.sort
  }

  /// Returns whether the tag is selected afterwards.
  pub fn toggle_tag(&mut self, tag_id: uuid::Uuid) -> bool {
    if self.selected_tag_ids.remove(&tag_id) {
      return false;
    }
    self.selected_tag_ids.insert(tag_id);
    true
  }

  pub fn select_tag(&mut self, tag_id: uuid::Uuid) {
    self.selected_tag_ids.insert(tag_id);
  }

  pub fn deselect_tag(&mut self, tag_id: uuid::Uuid) -> bool {
    self.selected_tag_ids.remove(&tag_id)
  }

  pub fn matches(&self, item: &Item) -> bool {
    let matches_search = self.search_text.is_empty()
      || item
        .name()
        .to_lowercase()
        .contains(&self.search_text.to_lowercase());

    let matches_tags =
      self.selected_tag_ids.is_empty() || item.has_any_tag(&self.selected_tag_ids);

    matches_search && matches_tags
  }
}
