/// Resolved combat stats at one level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub max_hp: i32,
}

impl StatBlock {
    pub const fn new(attack: i32, defense: i32, speed: i32, max_hp: i32) -> Self {
        Self {
            attack,
            defense,
            speed,
            max_hp,
        }
    }
}
