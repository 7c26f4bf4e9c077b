use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A purchasable board position. An unset owner goes over the wire as an
/// empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub index: usize,
    pub price: i64,
    #[serde(
        serialize_with = "serialize_owner",
        deserialize_with = "deserialize_owner"
    )]
    pub owner: Option<String>,
}

impl Property {
    pub fn new(index: usize, price: i64) -> Self {
        Self {
            index,
            price,
            owner: None,
        }
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    pub fn is_owned_by(&self, player_id: &str) -> bool {
        self.owner.as_deref() == Some(player_id)
    }

    /// Scales the price, truncating toward zero.
    pub fn inflate(&mut self, factor: f64) {
        self.price = (self.price as f64 * factor) as i64;
    }

    pub fn resale_value(&self) -> i64 {
        self.price / 2
    }
}

fn serialize_owner<S: Serializer>(owner: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(owner.as_deref().unwrap_or(""))
}

fn deserialize_owner<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let owner = Option::<String>::deserialize(d)?;
    Ok(owner.filter(|id| !id.is_empty()))
}
