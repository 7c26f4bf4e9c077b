use rand::Rng;

pub const DICE_FACES: u8 = 6;

/// Source of dice values in `1..=6`.
pub trait DiceRoller: Send {
    fn roll(&mut self) -> u8;
}

/// Dice backed by a long-lived random generator.
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng + Send> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> DiceRoller for RngDice<R> {
    fn roll(&mut self) -> u8 {
        self.rng.random_range(1..=DICE_FACES)
    }
}

/// Replays a fixed sequence of faces, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct FixedDice {
    faces: Vec<u8>,
    next: usize,
}

impl FixedDice {
    pub fn new(faces: Vec<u8>) -> Self {
        Self { faces, next: 0 }
    }
}

impl DiceRoller for FixedDice {
    fn roll(&mut self) -> u8 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.next % self.faces.len()];
        self.next = (self.next + 1) % self.faces.len();
        face
    }
}
