/// An object that can be caught and gives combo.
#[derive(Clone, Debug, PartialEq)]
pub struct PalpableObject {
    pub x: f32,
    pub x_offset: f32,
    pub start_time: f64,
    pub dist_to_hyper_dash: f32,
    pub hyper_dash: bool,
    pub kind: PalpableKind,
    /// Tiny droplets between the previous object of the juice stream and
    /// this one.
    pub tiny_droplets: u32,
}

impl PalpableObject {
    pub const fn new(x: f32, start_time: f64, kind: PalpableKind) -> Self {
        Self {
            x,
            x_offset: 0.0,
            start_time,
            dist_to_hyper_dash: 0.0,
            hyper_dash: false,
            kind,
            tiny_droplets: 0,
        }
    }

    pub fn effective_x(&self) -> f32 {
        self.x + self.x_offset
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PalpableKind {
    Fruit,
    Droplet,
}
