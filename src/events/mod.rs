mod keyboard;
mod pointer;

pub use keyboard::wire_polygon_toggle_key;
pub use pointer::wire_orbit_controls;
