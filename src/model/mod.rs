pub mod planner;
pub mod scale;
pub mod selection;

pub use planner::DayPlanner;
pub use scale::DayScale;
pub use selection::{Grip, Selection, SelectionSet};
