use colored::Colorize;

use crate::{
  filter::FilterState, item::Item, list_view::ListView, shopping_list::shorten_id, tag::Tag,
  traits::Indexable,
};

pub struct Viewer {}

impl Viewer {
  pub fn new() -> Self {
    Self {}
  }

  pub fn print_list(&self, view: &ListView, filter: &FilterState) {
    if view.is_empty() {
      println!("no items to show");
      return;
    }

    let sort = filter.sort();
    println!(
      "{}",
      format!(
        "sorted by {} {}",
        sort.key.name(),
        if sort.ascending { "↑" } else { "↓" }
      )
      .dimmed()
    );

    for row in view.rows.iter() {
      self.print_item(&row.item, &row.tags);
    }

    println!(
      "{}",
      format!(
        "total: {} pcs, {}",
        view.total_quantity, view.total_price
      )
      .bold()
      .bright_yellow()
    );
  }

  pub fn print_item(&self, item: &Item, tags: &[Tag]) {
    println!(
      "{id}  {name:20}  {quantity:>4} x {price:>8} = {total:>9}  {tags}",
      id = shorten_id(item.id()).dimmed(),
      name = item.name().bold(),
      quantity = item.quantity(),
      price = item.price(),
      total = item.total_amount().to_string().green(),
      tags = format_tags(tags)
    );
  }

  pub fn print_tags(&self, tags: &[Tag]) {
    if tags.is_empty() {
      println!("no tags yet");
      return;
    }
    for tag in tags.iter() {
      println!(
        "{}  {}  {}",
        shorten_id(tag.id()).dimmed(),
        tag.name().color(tag.color().to_color()),
        tag.color().to_hex().dimmed()
      );
    }
  }
}

fn format_tags(tags: &[Tag]) -> String {
  let names: Vec<String> = tags
    .iter()
    .map(|tag| tag.name().color(tag.color().to_color()).to_string())
    .collect();
  format!("[{}]", names.join(", "))
}
