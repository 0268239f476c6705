use log::debug;

use crate::{
  error::{ActionError, StoreError},
  filter::{FilterState, SortKey, SortOption},
  forms::{Confirmation, ItemDraft, TagDraft},
  item::Item,
  list_view::{self, ListView},
  storage::{FilePersistence, ItemStore, MemoryPersistence, Persistence, TagStore},
  tag::Tag,
  traits::Indexable,
  Config,
};

pub struct ShoppingList {
  items: ItemStore,
  tags: TagStore,
  filter: FilterState,
  form: Option<ItemDraft>,
  confirmation: Option<Confirmation>,
}

impl ShoppingList {
  pub fn new(items: Box<dyn Persistence>, tags: Box<dyn Persistence>) -> Self {
    Self {
      items: ItemStore::new(items),
      tags: TagStore::new(tags),
      filter: FilterState::new(),
      form: None,
      confirmation: None,
    }
  }

  pub fn open(config: &Config) -> std::io::Result<Self> {
    debug!("basket data folder: {}", config.storage_dir_path);
    Ok(Self::new(
      Box::new(FilePersistence::new(&config.storage_dir_path)?),
      Box::new(FilePersistence::new(&config.storage_dir_path)?),
    ))
  }

  pub fn in_memory(persistence: &MemoryPersistence) -> Self {
    Self::new(Box::new(persistence.clone()), Box::new(persistence.clone()))
  }

  pub fn items(&self) -> &[Item] {
    self.items.items()
  }

  pub fn tags(&self) -> &[Tag] {
    self.tags.tags()
  }

  pub fn item_by_id(&self, id: uuid::Uuid) -> Option<&Item> {
    self.items.item_by_id(id)
  }

  pub fn tag_by_id(&self, id: uuid::Uuid) -> Option<&Tag> {
    self.tags.tag_by_id(id)
  }

  pub fn find_tag_by_name(&self, name: &str) -> Option<&Tag> {
    self.tags.find_by_name(name)
  }

  pub fn find_tags(&self, item: &Item) -> Vec<Tag> {
    self.tags.find_tags(item.tag_ids())
  }

  pub fn add_item(&mut self, draft: &ItemDraft) -> Result<Item, ActionError> {
    let item = draft.validate(self.items.items())?.into_item();
    self.items.add_item(item.clone());
    self.confirmation = Some(Confirmation::Added(item.name().to_owned()));
    Ok(item)
  }

  pub fn update_item(&mut self, id: uuid::Uuid, draft: &ItemDraft) -> Result<Item, ActionError> {
    let mut item = self
      .items
      .item_by_id(id)
      .cloned()
      .ok_or(StoreError::NotFound(id))?;

    let draft = ItemDraft {
      editing: Some(id),
      ..draft.clone()
    };
    draft.validate(self.items.items())?.apply_to(&mut item);

    Ok(self.items.update_item(item)?)
  }

  pub fn remove_item(&mut self, id: uuid::Uuid) -> Result<Item, StoreError> {
    let removed = self.items.remove_item(id)?;
    self.close_form_of(id);
    self.confirmation = Some(Confirmation::Deleted(removed.name().to_owned()));
    Ok(removed)
  }

  /// Removes every item the current view shows. Items hidden by the search
  /// text or the tag selection stay.
  pub fn clear_visible(&mut self) -> Vec<Item> {
    let visible: Vec<uuid::Uuid> = self.view().items().map(|i| i.id()).collect();

    let mut removed = Vec::with_capacity(visible.len());
    for id in visible {
      if let Ok(item) = self.items.remove_item(id) {
        self.close_form_of(id);
        removed.push(item);
      }
    }

    debug!("cleared {} visible items", removed.len());
    removed
  }

  fn close_form_of(&mut self, id: uuid::Uuid) {
    if self.form.as_ref().and_then(|f| f.editing) == Some(id) {
      debug!("closing form of removed item: {}", id);
      self.form = None;
    }
  }

  pub fn add_tag(&mut self, draft: &TagDraft) -> Result<Tag, ActionError> {
    let tag = draft.validate(self.tags.tags())?;
    self.tags.add_tag(tag.clone());
    self.confirmation = Some(Confirmation::Added(tag.name().to_owned()));
    Ok(tag)
  }

  /// The confirmation left by the last successful add or delete, if not
  /// shown yet.
  pub fn take_confirmation(&mut self) -> Option<Confirmation> {
    self.confirmation.take()
  }

  /// Drops the tag and forgets it everywhere it was selected. Items keep the
  /// dangling id, it just never matches anything again.
  pub fn remove_tag(&mut self, id: uuid::Uuid) -> usize {
    let removed = self.tags.remove_tag(id);
    self.filter.deselect_tag(id);
    if let Some(form) = self.form.as_mut() {
      form.selected_tag_ids.remove(&id);
    }
    removed
  }

  pub fn form(&self) -> Option<&ItemDraft> {
    self.form.as_ref()
  }

  pub fn form_mut(&mut self) -> Option<&mut ItemDraft> {
    self.form.as_mut()
  }

  pub fn open_add_form(&mut self) -> &mut ItemDraft {
    self.form.insert(ItemDraft::new())
  }

  pub fn open_edit_form(&mut self, id: uuid::Uuid) -> Option<&mut ItemDraft> {
    let draft = ItemDraft::from_item(self.items.item_by_id(id)?);
    Some(self.form.insert(draft))
  }

  pub fn cancel_form(&mut self) {
    self.form = None;
  }

  /// Saves the open form. It stays open when validation fails so the user
  /// can fix the input.
  pub fn submit_form(&mut self) -> Option<Result<Item, ActionError>> {
    let draft = self.form.clone()?;
    let result = match draft.editing {
      Some(id) => self.update_item(id, &draft),
      None => self.add_item(&draft),
    };
    if result.is_ok() {
      self.form = None;
    }
    Some(result)
  }

  pub fn filter(&self) -> &FilterState {
    &self.filter
  }

  pub fn set_search(&mut self, text: &str) {
    self.filter.set_search_text(text);
  }

  pub fn toggle_tag(&mut self, tag_id: uuid::Uuid) -> bool {
    self.filter.toggle_tag(tag_id)
  }

  pub fn select_sort(&mut self, key: SortKey) -> SortOption {
    self.filter.select_sort(key)
  }

  pub fn set_sort(&mut self, sort: SortOption) {
    self.filter.set_sort(sort);
  }

  pub fn view(&self) -> ListView {
    list_view::derive(self.items.items(), self.tags.tags(), &self.filter)
  }

  pub fn shorten_id(&self, id: uuid::Uuid) -> String {
    shorten_id(id)
  }

  /// Accepts a full id or the `abcd..wxyz` short form, over items and tags.
  pub fn resolve_id(&self, id: &str) -> Option<uuid::Uuid> {
    if let Ok(full_id) = uuid::Uuid::parse_str(id) {
      return self.ids().find(|known| *known == full_id);
    }
    self.ids().find(|known| shorten_id(*known) == id)
  }

  fn ids(&self) -> impl Iterator<Item = uuid::Uuid> + '_ {
    self
      .items
      .items()
      .iter()
      .map(|i| i.id())
      .chain(self.tags.tags().iter().map(|t| t.id()))
  }
}

pub fn shorten_id(id: uuid::Uuid) -> String {
  let id_string = id.as_simple().to_string();
  format!(
    "{}..{}",
    &id_string[0..4],
    &id_string[id_string.len() - 4..id_string.len()]
  )
}

#[cfg(test)]
mod test {
  use super::ShoppingList;
  use crate::{
    color::Rgb,
    error::{ActionError, StoreError},
    filter::SortKey,
    forms::{Confirmation, ItemDraft, Notice, TagDraft},
    storage::MemoryPersistence,
    traits::Indexable,
  };

  fn draft(name: &str, quantity: i64, price: i64) -> ItemDraft {
    ItemDraft {
      name: name.to_owned(),
      quantity: quantity.to_string(),
      price: price.to_string(),
      ..ItemDraft::new()
    }
  }

  fn get_new_list() -> (MemoryPersistence, ShoppingList) {
    let persistence = MemoryPersistence::new();
    let list = ShoppingList::in_memory(&persistence);
    (persistence, list)
  }

  #[test]
  fn add_and_reopen() {
    let (persistence, mut list) = get_new_list();
    let dairy = list.add_tag(&TagDraft::new("Dairy", Rgb::default())).unwrap();
    let mut milk = draft("Milk", 2, 90);
    milk.selected_tag_ids.insert(dairy.id());
    let item = list.add_item(&milk).unwrap();

    let reopened = ShoppingList::in_memory(&persistence);
    assert_eq!(reopened.items().len(), 1);
    assert_eq!(reopened.tags().len(), 1);
    assert_eq!(reopened.find_tags(&reopened.items()[0])[0].name(), "Dairy");
    assert_eq!(reopened.item_by_id(item.id()).unwrap().quantity(), 2);
  }

  #[test]
  fn duplicate_item_does_not_mutate() {
    let (_, mut list) = get_new_list();
    list.add_item(&draft("Milk", 1, 90)).unwrap();

    match list.add_item(&draft("milk", 5, 10)) {
      Err(ActionError::Invalid(Notice::AlreadyExists(name))) => assert_eq!(name, "milk"),
      other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(list.items().len(), 1);
    assert_eq!(list.items()[0].quantity(), 1);
  }

  #[test]
  fn duplicate_tag_does_not_mutate() {
    let (_, mut list) = get_new_list();
    list.add_tag(&TagDraft::new("Dairy", Rgb::default())).unwrap();

    match list.add_tag(&TagDraft::new("DAIRY", Rgb::default())) {
      Err(ActionError::Invalid(Notice::AlreadyExists(name))) => assert_eq!(name, "DAIRY"),
      other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(list.tags().len(), 1);
  }

  #[test]
  fn update_item_by_id() {
    let (_, mut list) = get_new_list();
    list.add_item(&draft("Milk", 1, 90)).unwrap();
    let bread = list.add_item(&draft("Bread", 1, 50)).unwrap();
    list.add_item(&draft("Eggs", 10, 20)).unwrap();

    let updated = list.update_item(bread.id(), &draft("Bread", 2, 55)).unwrap();

    assert_eq!(list.items()[1].id(), bread.id());
    assert_eq!(list.items()[1].price(), 55);
    assert_eq!(updated.created_date(), bread.created_date());
  }

  #[test]
  fn update_unknown_item() {
    let (_, mut list) = get_new_list();
    list.add_item(&draft("Milk", 1, 90)).unwrap();

    let missing = uuid::Uuid::new_v4();
    match list.update_item(missing, &draft("Milk", 2, 90)) {
      Err(ActionError::Store(StoreError::NotFound(id))) => assert_eq!(id, missing),
      other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(list.items()[0].quantity(), 1);
  }

  #[test]
  fn remove_tag_scrubs_selections() {
    let (_, mut list) = get_new_list();
    let dairy = list.add_tag(&TagDraft::new("Dairy", Rgb::default())).unwrap();
    let bakery = list.add_tag(&TagDraft::new("Bakery", Rgb::default())).unwrap();

    list.toggle_tag(dairy.id());
    list.toggle_tag(bakery.id());
    let form = list.open_add_form();
    form.toggle_tag(dairy.id());

    assert_eq!(list.remove_tag(dairy.id()), 1);

    assert!(!list.filter().selected_tag_ids().contains(&dairy.id()));
    assert!(list.filter().selected_tag_ids().contains(&bakery.id()));
    assert!(list.form().unwrap().selected_tag_ids.is_empty());
  }

  #[test]
  fn dangling_tag_ids_are_tolerated() {
    let (_, mut list) = get_new_list();
    let dairy = list.add_tag(&TagDraft::new("Dairy", Rgb::default())).unwrap();
    let mut milk = draft("Milk", 1, 90);
    milk.selected_tag_ids.insert(dairy.id());
    list.add_item(&milk).unwrap();

    list.remove_tag(dairy.id());

    let view = list.view();
    assert_eq!(view.rows.len(), 1);
    assert!(view.rows[0].tags.is_empty());
    assert!(view.rows[0].item.tag_ids().contains(&dairy.id()));
  }

  #[test]
  fn edit_form_flow() {
    let (_, mut list) = get_new_list();
    let milk = list.add_item(&draft("Milk", 1, 90)).unwrap();
    list.add_item(&draft("Bread", 1, 50)).unwrap();

    let form = list.open_edit_form(milk.id()).unwrap();
    form.name = "bread".to_owned();
    assert!(matches!(
      list.submit_form(),
      Some(Err(ActionError::Invalid(Notice::AlreadyExists(_))))
    ));
    assert!(list.form().is_some());

    list.form_mut().unwrap().name = "Oat milk".to_owned();
    let saved = list.submit_form().unwrap().unwrap();
    assert_eq!(saved.id(), milk.id());
    assert_eq!(list.items()[0].name(), "Oat milk");
    assert!(list.form().is_none());
    assert!(list.submit_form().is_none());
  }

  #[test]
  fn add_form_flow() {
    let (_, mut list) = get_new_list();
    let form = list.open_add_form();
    form.name = "Milk".to_owned();
    form.quantity = "x".to_owned();
    form.price = "10".to_owned();

    assert!(matches!(
      list.submit_form(),
      Some(Err(ActionError::Invalid(Notice::InvalidQuantity(_))))
    ));
    assert!(list.items().is_empty());

    list.form_mut().unwrap().quantity = "4".to_owned();
    list.submit_form().unwrap().unwrap();
    assert_eq!(list.items().len(), 1);
  }

  #[test]
  fn removing_edited_item_closes_form() {
    let (_, mut list) = get_new_list();
    let milk = list.add_item(&draft("Milk", 1, 90)).unwrap();
    list.open_edit_form(milk.id()).unwrap();

    list.remove_item(milk.id()).unwrap();
    assert!(list.form().is_none());
  }

  #[test]
  fn view_uses_filter_state() {
    let (_, mut list) = get_new_list();
    list.add_item(&draft("a", 2, 300)).unwrap();
    list.add_item(&draft("b", 1, 100)).unwrap();
    list.add_item(&draft("c", 1, 200)).unwrap();

    list.select_sort(SortKey::Price);
    let prices: Vec<i64> = list.view().items().map(|i| i.price()).collect();
    assert_eq!(prices, vec![300, 200, 100]);

    list.select_sort(SortKey::Price);
    let prices: Vec<i64> = list.view().items().map(|i| i.price()).collect();
    assert_eq!(prices, vec![100, 200, 300]);

    list.select_sort(SortKey::TotalAmount);
    let names: Vec<String> = list.view().items().map(|i| i.name().to_owned()).collect();
    assert_eq!(names, vec!["a", "c", "b"]);

    list.set_search("A");
    let view = list.view();
    assert_eq!(view.total_quantity, 2);
    assert_eq!(view.total_price, 600);
  }

  #[test]
  fn clear_visible_keeps_hidden_items() {
    let (persistence, mut list) = get_new_list();
    let dairy = list.add_tag(&TagDraft::new("Dairy", Rgb::default())).unwrap();
    let mut milk = draft("Milk", 1, 90);
    milk.selected_tag_ids.insert(dairy.id());
    let milk = list.add_item(&milk).unwrap();
    let mut cheese = draft("Cheese", 1, 300);
    cheese.selected_tag_ids.insert(dairy.id());
    list.add_item(&cheese).unwrap();
    let bread = list.add_item(&draft("Bread", 1, 50)).unwrap();
    let milkshake = list.add_item(&draft("Milkshake", 1, 120)).unwrap();

    list.toggle_tag(dairy.id());
    list.set_search("milk");
    list.open_edit_form(milk.id()).unwrap();

    let removed: Vec<String> = list
      .clear_visible()
      .iter()
      .map(|i| i.name().to_owned())
      .collect();
    assert_eq!(removed, vec!["Milk"]);
    assert!(list.form().is_none());

    let left: Vec<&str> = list.items().iter().map(|i| i.name()).collect();
    assert_eq!(left, vec!["Cheese", "Bread", "Milkshake"]);
    assert!(list.item_by_id(bread.id()).is_some());
    assert!(list.item_by_id(milkshake.id()).is_some());

    let reopened = ShoppingList::in_memory(&persistence);
    assert_eq!(reopened.items().len(), 3);
  }

  #[test]
  fn clear_visible_without_filter_empties_list() {
    let (_, mut list) = get_new_list();
    list.add_item(&draft("Milk", 1, 90)).unwrap();
    list.add_item(&draft("Bread", 1, 50)).unwrap();

    assert_eq!(list.clear_visible().len(), 2);
    assert!(list.items().is_empty());
    assert!(list.clear_visible().is_empty());
  }

  #[test]
  fn confirmations_follow_changes() {
    let (_, mut list) = get_new_list();
    assert_eq!(list.take_confirmation(), None);

    let milk = list.add_item(&draft("Milk", 1, 90)).unwrap();
    assert_eq!(
      list.take_confirmation(),
      Some(Confirmation::Added("Milk".to_owned()))
    );
    assert_eq!(list.take_confirmation(), None);

    list.add_item(&draft("milk", 1, 90)).unwrap_err();
    assert_eq!(list.take_confirmation(), None);

    list.remove_item(milk.id()).unwrap();
    let deleted = list.take_confirmation().unwrap();
    assert_eq!(deleted, Confirmation::Deleted("Milk".to_owned()));
    assert_eq!(deleted.to_string(), "deleted Milk");

    list.add_tag(&TagDraft::new("Dairy", Rgb::default())).unwrap();
    assert_eq!(
      list.take_confirmation(),
      Some(Confirmation::Added("Dairy".to_owned()))
    );
  }

  #[test]
  fn resolve_short_and_full_ids() {
    let (_, mut list) = get_new_list();
    let milk = list.add_item(&draft("Milk", 1, 90)).unwrap();
    let dairy = list.add_tag(&TagDraft::new("Dairy", Rgb::default())).unwrap();

    let short = list.shorten_id(milk.id());
    assert_eq!(short.len(), 10);
    assert_eq!(list.resolve_id(&short), Some(milk.id()));
    assert_eq!(list.resolve_id(&dairy.id().to_string()), Some(dairy.id()));
    assert_eq!(list.resolve_id(&uuid::Uuid::new_v4().to_string()), None);
    assert_eq!(list.resolve_id("nope"), None);
  }
}
