pub mod chart;
pub mod dasha;
pub mod divisional;
pub mod strength;
pub mod summary;
pub mod zodiac;

pub use chart::*;
pub use dasha::*;
pub use divisional::*;
pub use strength::*;
pub use summary::*;
pub use zodiac::*;
