use std::collections::BTreeSet;

use crate::traits::Indexable;

/// A shopping-list entry. Two items are the same item when their ids match,
/// whatever their other fields say.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
  id: uuid::Uuid,
  name: String,
  quantity: i64,
  price: i64,
  tag_ids: BTreeSet<uuid::Uuid>,
  created_date: chrono::DateTime<chrono::Local>,
  updated_date: chrono::DateTime<chrono::Local>,
}

impl Indexable for Item {
  fn id(&self) -> uuid::Uuid {
    self.id
  }
}

impl PartialEq for Item {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for Item {}

impl Item {
  pub fn new(name: &str, quantity: i64, price: i64, tag_ids: BTreeSet<uuid::Uuid>) -> Self {
    let now = chrono::Local::now();
    Self {
      id: uuid::Uuid::new_v4(),
      name: name.to_owned(),
      quantity,
      price,
      tag_ids,
      created_date: now,
      updated_date: now,
    }
  }

  pub fn name(&self) -> &str {
    self.name.as_str()
  }

  pub fn quantity(&self) -> i64 {
    self.quantity
  }

  pub fn price(&self) -> i64 {
    self.price
  }

  /// Unit price times quantity.
  pub fn total_amount(&self) -> i64 {
    self.price.saturating_mul(self.quantity)
  }

  pub fn tag_ids(&self) -> &BTreeSet<uuid::Uuid> {
    &self.tag_ids
  }

  pub fn has_any_tag(&self, tag_ids: &BTreeSet<uuid::Uuid>) -> bool {
    !self.tag_ids.is_disjoint(tag_ids)
  }

  pub fn created_date(&self) -> chrono::DateTime<chrono::Local> {
    self.created_date
  }

  pub fn updated_date(&self) -> chrono::DateTime<chrono::Local> {
    self.updated_date
  }

  pub fn set_name(&mut self, name: &str) {
    self.name = name.to_owned();
  }

  pub fn set_quantity(&mut self, quantity: i64) {
    self.quantity = quantity;
  }

  pub fn set_price(&mut self, price: i64) {
    self.price = price;
  }

  pub fn set_tag_ids(&mut self, tag_ids: BTreeSet<uuid::Uuid>) {
    self.tag_ids = tag_ids;
  }

  pub(crate) fn keep_created_date(&mut self, created_date: chrono::DateTime<chrono::Local>) {
    self.created_date = created_date;
  }

  /// Marks the item as edited now. Never moves `updated_date` before
  /// `created_date`, even if the clock went backwards.
  pub(crate) fn touch(&mut self) {
    self.updated_date = std::cmp::max(chrono::Local::now(), self.created_date);
  }
}
