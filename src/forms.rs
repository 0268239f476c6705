use std::collections::BTreeSet;

use crate::{color::Rgb, item::Item, tag::Tag, traits::Indexable};

/// Why a form could not be saved. Shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Notice {
  #[error("name can't be empty")]
  EmptyName,

  #[error("quantity must be a whole number, got: {0:?}")]
  InvalidQuantity(String),

  #[error("price must be a whole number, got: {0:?}")]
  InvalidPrice(String),

  #[error("{0:?} already exists")]
  AlreadyExists(String),
}

/// Shown to the user after a change went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
  Added(String),
  Deleted(String),
}

impl std::fmt::Display for Confirmation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Confirmation::Added(name) => write!(f, "added {}", name),
      Confirmation::Deleted(name) => write!(f, "deleted {}", name),
    }
  }
}

/// Field values of an item that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidItem {
  pub name: String,
  pub quantity: i64,
  pub price: i64,
  pub tag_ids: BTreeSet<uuid::Uuid>,
}

impl ValidItem {
  pub fn into_item(self) -> Item {
    Item::new(&self.name, self.quantity, self.price, self.tag_ids)
  }

  pub fn apply_to(self, item: &mut Item) {
    item.set_name(&self.name);
    item.set_quantity(self.quantity);
    item.set_price(self.price);
    item.set_tag_ids(self.tag_ids);
  }
}

/// The add/edit item form, holding raw user input until it is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
  pub editing: Option<uuid::Uuid>,
  pub name: String,
  pub quantity: String,
  pub price: String,
  pub selected_tag_ids: BTreeSet<uuid::Uuid>,
}

impl ItemDraft {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_item(item: &Item) -> Self {
    Self {
      editing: Some(item.id()),
      name: item.name().to_owned(),
      quantity: item.quantity().to_string(),
      price: item.price().to_string(),
      selected_tag_ids: item.tag_ids().clone(),
    }
  }

  pub fn toggle_tag(&mut self, tag_id: uuid::Uuid) -> bool {
    if self.selected_tag_ids.remove(&tag_id) {
      return false;
    }
    self.selected_tag_ids.insert(tag_id);
    true
  }

  pub fn validate(&self, existing: &[Item]) -> Result<ValidItem, Notice> {
    let name = validate_name(&self.name)?;
    let quantity = self
      .quantity
      .trim()
      .parse::<i64>()
      .map_err(|_| Notice::InvalidQuantity(self.quantity.clone()))?;
    let price = self
      .price
      .trim()
      .parse::<i64>()
      .map_err(|_| Notice::InvalidPrice(self.price.clone()))?;

    let duplicate = existing
      .iter()
      .filter(|item| Some(item.id()) != self.editing)
      .any(|item| same_name(item.name(), &name));
    if duplicate {
      return Err(Notice::AlreadyExists(name));
    }

    Ok(ValidItem {
      name,
      quantity,
      price,
      tag_ids: self.selected_tag_ids.clone(),
    })
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagDraft {
  pub name: String,
  pub color: Rgb,
}

impl TagDraft {
  pub fn new(name: &str, color: Rgb) -> Self {
    Self {
      name: name.to_owned(),
      color,
    }
  }

  pub fn validate(&self, existing: &[Tag]) -> Result<Tag, Notice> {
    let name = validate_name(&self.name)?;
    if existing.iter().any(|tag| same_name(tag.name(), &name)) {
      return Err(Notice::AlreadyExists(name));
    }
    Ok(Tag::new(&name, self.color))
  }
}

fn validate_name(name: &str) -> Result<String, Notice> {
  let name = name.trim();
  if name.is_empty() {
    return Err(Notice::EmptyName);
  }
  Ok(name.to_owned())
}

fn same_name(a: &str, b: &str) -> bool {
  a.to_lowercase() == b.to_lowercase()
}
