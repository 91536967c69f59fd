pub mod app;
pub mod date;
pub mod lang;
pub mod render;
pub mod search;
pub mod status;
pub mod view;

pub use app::{AppHandlers, app_view};
pub use date::format_date;
pub use render::render_text;
pub use search::{InputEvent, SearchBox};
pub use status::{DatabaseStatus, StatusCallbacks};
pub use view::{Callback, Node, SelectOption, TextCallback};
