/// Growth level at which a plant stops growing and turns into seeds.
pub const MATURITY: i32 = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    pub name: String,
    pub growth_level: i32,
    pub water_needs: i32,
    pub optimal_temperature: i32,
    pub consumed: bool,
}

impl Plant {
    pub fn new(
        name: impl Into<String>,
        growth_level: i32,
        water_needs: i32,
        optimal_temperature: i32,
    ) -> Self {
        Self {
            name: name.into(),
            growth_level,
            water_needs,
            optimal_temperature,
            consumed: false,
        }
    }

    /// A fresh seedling with the parent's species parameters.
    pub fn seedling(&self) -> Self {
        Self::new(self.name.clone(), 0, self.water_needs, self.optimal_temperature)
    }

    pub fn is_mature(&self) -> bool {
        self.growth_level >= MATURITY
    }
}
