// handlers/public/mod.rs - Public handlers (no identity required)
//
// Account creation and token acquisition, the event catalogue, the shared
// food catalogue, the news proxy and the chatbot.

pub mod account;
pub mod chatbot;
pub mod events;
pub mod food;
pub mod health;
pub mod resources;

pub use account::{login, logout, register};
pub use chatbot::ask;
pub use events::list_events;
pub use food::create_food;
pub use health::health;
pub use resources::top_resources;
