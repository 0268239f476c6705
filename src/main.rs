use basket::{
  color::Rgb,
  filter::{SortKey, SortOption},
  forms::{ItemDraft, TagDraft},
  traits::Indexable,
  viewer::Viewer,
  Config, ShoppingList,
};

fn build_cli() -> clap::Command<'static> {
  let tag_arg = clap::Arg::new("tag")
    .long("tag")
    .short('t')
    .takes_value(true)
    .multiple_occurrences(true);
  let search_arg = clap::Arg::new("search")
    .long("search")
    .short('s')
    .takes_value(true);

  clap::Command::new("basket")
    .about("shopping list with tags and running totals")
    .arg_required_else_help(true)
    .subcommand(clap::Command::new("add").args(&[
      clap::Arg::new("name").required(true).index(1),
      clap::Arg::new("qty").long("qty").takes_value(true).default_value("1"),
      clap::Arg::new("price").long("price").takes_value(true).required(true),
      tag_arg.clone(),
    ]))
    .subcommand(clap::Command::new("edit").args(&[
      clap::Arg::new("id").required(true).index(1),
      clap::Arg::new("name").long("name").takes_value(true),
      clap::Arg::new("qty").long("qty").takes_value(true),
      clap::Arg::new("price").long("price").takes_value(true),
      tag_arg.clone(),
    ]))
    .subcommand(clap::Command::new("rm").arg(clap::Arg::new("id").required(true).index(1)))
    .subcommand(clap::Command::new("list").args(&[
      search_arg.clone(),
      tag_arg.clone(),
      clap::Arg::new("sort")
        .long("sort")
        .takes_value(true)
        .possible_values(["price", "created", "updated", "total"]),
      clap::Arg::new("asc").long("asc"),
    ]))
    .subcommand(
      clap::Command::new("clear")
        .about("remove every item the list currently shows")
        .args(&[search_arg, tag_arg]),
    )
    .subcommand(clap::Command::new("tags"))
    .subcommand(clap::Command::new("tag-add").args(&[
      clap::Arg::new("name").required(true).index(1),
      clap::Arg::new("color")
        .long("color")
        .takes_value(true)
        .default_value("#808080"),
    ]))
    .subcommand(clap::Command::new("tag-rm").arg(clap::Arg::new("tag").required(true).index(1)))
    .subcommand(
      clap::Command::new("completions").arg(clap::Arg::new("shell").required(true).index(1)),
    )
}

fn main() {
  env_logger::init();

  let matches = build_cli().get_matches();

  if let Some(("completions", completion_matches)) = matches.subcommand() {
    match completion_matches.value_of_t::<clap_complete::Shell>("shell") {
      Ok(shell) => {
        clap_complete::generate(shell, &mut build_cli(), "basket", &mut std::io::stdout())
      }
      Err(err) => fail(&format!("unknown shell: {}", err)),
    }
    return;
  }

  let config = match Config::load() {
    Ok(config) => config,
    Err(err) => fail(&format!("config err: {}", err)),
  };
  let mut list = match ShoppingList::open(&config) {
    Ok(list) => list,
    Err(err) => fail(&format!("can't open storage at {}: {}", config.storage_dir_path, err)),
  };
  let viewer = Viewer::new();

  match matches.subcommand() {
    Some(("add", add_matches)) => {
      let draft = ItemDraft {
        name: add_matches.value_of("name").unwrap_or_default().to_owned(),
        quantity: add_matches.value_of("qty").unwrap_or_default().to_owned(),
        price: add_matches.value_of("price").unwrap_or_default().to_owned(),
        selected_tag_ids: resolve_tags(
          &list,
          add_matches.values_of("tag").into_iter().flatten(),
        ),
        ..ItemDraft::new()
      };
      match list.add_item(&draft) {
        Ok(item) => {
          print_confirmation(&mut list);
          viewer.print_item(&item, &list.find_tags(&item));
        }
        Err(err) => fail(&format!("can't add item: {}", err)),
      }
    }

    Some(("edit", edit_matches)) => {
      let id = resolve_id(&list, edit_matches.value_of("id").unwrap_or_default());
      let mut draft = match list.item_by_id(id) {
        Some(item) => ItemDraft::from_item(item),
        None => fail(&format!("item {} not found", list.shorten_id(id))),
      };
      if let Some(name) = edit_matches.value_of("name") {
        draft.name = name.to_owned();
      }
      if let Some(quantity) = edit_matches.value_of("qty") {
        draft.quantity = quantity.to_owned();
      }
      if let Some(price) = edit_matches.value_of("price") {
        draft.price = price.to_owned();
      }
      if edit_matches.is_present("tag") {
        let tags = edit_matches.values_of("tag").into_iter().flatten();
        draft.selected_tag_ids = resolve_tags(&list, tags);
      }
      match list.update_item(id, &draft) {
        Ok(item) => {
          println!("item updated:");
          viewer.print_item(&item, &list.find_tags(&item));
        }
        Err(err) => fail(&format!("can't update item: {}", err)),
      }
    }

    Some(("rm", rm_matches)) => {
      let id = resolve_id(&list, rm_matches.value_of("id").unwrap_or_default());
      match list.remove_item(id) {
        Ok(_) => print_confirmation(&mut list),
        Err(err) => fail(&format!("can't remove item: {}", err)),
      }
    }

    Some(("list", list_matches)) => {
      apply_filter(&mut list, list_matches);
      if list_matches.is_present("sort") || list_matches.is_present("asc") {
        let key = list_matches.value_of_t::<SortKey>("sort").ok();
        list.set_sort(SortOption::from_flags(key, list_matches.is_present("asc")));
      }
      viewer.print_list(&list.view(), list.filter());
    }

    Some(("clear", clear_matches)) => {
      apply_filter(&mut list, clear_matches);
      let removed = list.clear_visible();
      for item in removed.iter() {
        println!("deleted {}", item.name());
      }
      println!("{} items cleared, {} left", removed.len(), list.items().len());
    }

    Some(("tags", _)) => viewer.print_tags(list.tags()),

    Some(("tag-add", tag_matches)) => {
      let color = match tag_matches.value_of_t::<Rgb>("color") {
        Ok(color) => color,
        Err(err) => fail(&format!("bad color: {}", err)),
      };
      let draft = TagDraft::new(tag_matches.value_of("name").unwrap_or_default(), color);
      match list.add_tag(&draft) {
        Ok(tag) => {
          print_confirmation(&mut list);
          viewer.print_tags(&[tag]);
        }
        Err(err) => fail(&format!("can't add tag: {}", err)),
      }
    }

    Some(("tag-rm", tag_matches)) => {
      let tag = tag_matches.value_of("tag").unwrap_or_default();
      let id = match list.find_tag_by_name(tag) {
        Some(found_tag) => found_tag.id(),
        None => resolve_id(&list, tag),
      };
      match list.remove_tag(id) {
        0 => fail(&format!("tag {} not found", tag)),
        _ => println!("tag removed: {}", tag),
      }
    }

    Some((subcmd, _)) => println!("unknown subcommand {}", subcmd),
    None => println!("subcommand not found"),
  };
}

/// Search text and tag selection shared by `list` and `clear`.
fn apply_filter(list: &mut ShoppingList, matches: &clap::ArgMatches) {
  if let Some(search) = matches.value_of("search") {
    list.set_search(search);
  }
  let tags = matches.values_of("tag").into_iter().flatten();
  for tag_id in resolve_tags(list, tags) {
    list.toggle_tag(tag_id);
  }
}

fn print_confirmation(list: &mut ShoppingList) {
  if let Some(confirmation) = list.take_confirmation() {
    println!("{}", confirmation);
  }
}

fn resolve_id(list: &ShoppingList, id: &str) -> uuid::Uuid {
  match list.resolve_id(id) {
    Some(found) => found,
    None => fail(&format!("id {} not found", id)),
  }
}

fn resolve_tags<'a>(
  list: &ShoppingList,
  names: impl IntoIterator<Item = &'a str>,
) -> std::collections::BTreeSet<uuid::Uuid> {
  names
    .into_iter()
    .map(|name| match list.find_tag_by_name(name) {
      Some(tag) => tag.id(),
      None => fail(&format!("unknown tag: {}, add it with `basket tag-add`", name)),
    })
    .collect()
}

fn fail(msg: &str) -> ! {
  eprintln!("{}", msg);
  std::process::exit(1);
}
