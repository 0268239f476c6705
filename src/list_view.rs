//! What the list screen shows: the filtered, sorted rows and their totals.
//!
//! Everything here is derived from the stores and the filter state and holds
//! no state of its own, so it can be recomputed after any change.

use crate::{filter::FilterState, item::Item, tag::Tag, traits::Indexable};

#[derive(Debug, Clone)]
pub struct ListRow {
  pub item: Item,
  /// The item's tags that still exist, in tag display order.
  pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default)]
pub struct ListView {
  pub rows: Vec<ListRow>,
  pub total_quantity: i64,
  pub total_price: i64,
}

impl ListView {
  pub fn items(&self) -> impl Iterator<Item = &Item> {
    self.rows.iter().map(|row| &row.item)
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }
}

pub fn derive(items: &[Item], tags: &[Tag], filter: &FilterState) -> ListView {
  let mut visible: Vec<&Item> = items.iter().filter(|item| filter.matches(item)).collect();

  // stable: equal keys keep their filtered order
  let sort = filter.sort();
  visible.sort_by(|a, b| sort.compare(a, b));

  let total_quantity = visible
    .iter()
    .fold(0i64, |acc, item| acc.saturating_add(item.quantity()));
  let total_price = visible
    .iter()
    .fold(0i64, |acc, item| acc.saturating_add(item.total_amount()));

  let rows = visible
    .into_iter()
    .map(|item| ListRow {
      item: item.clone(),
      tags: tags
        .iter()
        .filter(|tag| item.tag_ids().contains(&tag.id()))
        .cloned()
        .collect(),
    })
    .collect();

  ListView {
    rows,
    total_quantity,
    total_price,
  }
}
