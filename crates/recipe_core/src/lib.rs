//! Recipe core: domain model and the pure submission state machine.
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{Ingredient, Recipe};
pub use msg::{GenerationOutcome, Msg};
pub use state::{AppState, Phase, RequestId};
pub use update::update;
pub use view_model::AppViewModel;
