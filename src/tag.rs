use crate::{color::Rgb, traits::Indexable};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
  id: uuid::Uuid,
  name: String,
  color_components: Rgb,
}

impl Indexable for Tag {
  fn id(&self) -> uuid::Uuid {
    self.id
  }
}

impl PartialEq for Tag {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for Tag {}

impl Tag {
  pub fn new(name: &str, color: Rgb) -> Self {
    Self {
      id: uuid::Uuid::new_v4(),
      name: name.to_owned(),
      color_components: color,
    }
  }

  pub fn name(&self) -> &str {
    self.name.as_str()
  }

  pub fn color(&self) -> Rgb {
    self.color_components
  }
}
