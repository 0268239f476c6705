use log::{debug, warn};

use crate::{error::StoreError, item::Item, traits::Indexable};

use super::{collection::Collection, persistence::Persistence};

pub const ITEMS_KEY: &str = "items";

/// Items in insertion order. Display order is derived elsewhere.
pub struct ItemStore {
  items: Collection<Item>,
}

impl ItemStore {
  pub fn new(persistence: Box<dyn Persistence>) -> Self {
    Self {
      items: Collection::new(ITEMS_KEY, persistence),
    }
  }

  pub fn items(&self) -> &[Item] {
    self.items.all()
  }

  pub fn item_by_id(&self, id: uuid::Uuid) -> Option<&Item> {
    self.items.get_by_id(id)
  }

  pub fn find_by_name(&self, name: &str) -> Option<&Item> {
    let name = name.to_lowercase();
    self
      .items
      .all()
      .iter()
      .find(|i| i.name().to_lowercase() == name)
  }

  pub fn add_item(&mut self, item: Item) {
    debug!("add item: {} id: {}", item.name(), item.id());
    self.items.add(item);
  }

  pub fn remove_item(&mut self, id: uuid::Uuid) -> Result<Item, StoreError> {
    self.items.remove(id).map_err(|err| {
      warn!("remove item: {}", err);
      err
    })
  }

  /// Writes `item` over the stored item with the same id, in place.
  ///
  /// The stored creation date wins over whatever `item` carries and the
  /// update date is refreshed. A missing id leaves the store untouched.
  pub fn update_item(&mut self, mut item: Item) -> Result<Item, StoreError> {
    let created_date = match self.items.get_by_id(item.id()) {
      Some(stored) => stored.created_date(),
      None => {
        let err = StoreError::NotFound(item.id());
        warn!("update item: {}", err);
        return Err(err);
      }
    };

    item.keep_created_date(created_date);
    item.touch();
    self.items.replace(item.clone())?;

    debug!("updated item: {} id: {}", item.name(), item.id());
    Ok(item)
  }
}
