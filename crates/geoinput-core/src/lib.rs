pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod surface;
pub mod widget;

pub use config::{ApiConfig, AppConfig, WidgetConfig};
pub use error::{GeoInputError, Result};
pub use models::{AddressCandidate, Coordinates};
pub use provider::SuggestionProvider;
pub use surface::{InputHandle, MemorySurface, RenderSurface, TextInput};
pub use widget::{
    Applied, AutocompleteWidget, ClickTarget, Dropdown, KeyOutcome, NavKey, SelectionHandler,
    WidgetState,
};
