//! Screen modules beside the watchface itself.

mod debug;

pub use debug::draw_debug_page;
