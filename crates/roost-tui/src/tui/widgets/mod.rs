pub mod chat;
pub mod home;
pub mod input_box;
pub mod listings;
pub mod status_bar;

pub use chat::ChatView;
pub use home::HomeView;
pub use input_box::InputBox;
pub use listings::ListingsView;
pub use status_bar::StatusBar;
