use rand::Rng;

use crate::{config::PricePolicy, errors::GameError, models::Property};

/// The board: one property per position, created once per game.
#[derive(Debug, Clone)]
pub struct PropertyRegistry {
    properties: Vec<Property>,
}

impl PropertyRegistry {
    pub fn init<R: Rng>(board_size: usize, policy: &PricePolicy, rng: &mut R) -> Self {
        let properties = (0..board_size)
            .map(|index| {
                let price = match *policy {
                    PricePolicy::Fixed(price) => price,
                    PricePolicy::Random { min, max } => rng.random_range(min..=max),
                };
                Property::new(index, price)
            })
            .collect();

        Self { properties }
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn all(&self) -> &[Property] {
        &self.properties
    }

    pub fn get_mut(&mut self, index: i64) -> Result<&mut Property, GameError> {
        let slot = self.slot(index)?;
        Ok(&mut self.properties[slot])
    }

    pub fn inflate(&mut self, factor: f64) {
        for property in &mut self.properties {
            property.inflate(factor);
        }
    }

    fn slot(&self, index: i64) -> Result<usize, GameError> {
        usize::try_from(index)
            .ok()
            .filter(|&slot| slot < self.properties.len())
            .ok_or(GameError::InvalidIndex(index))
    }
}
