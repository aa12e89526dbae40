//! Authentication state, navigation, and the gate that ties them to entry forms.

pub mod gate;
pub mod navigation;
pub mod store;

pub use gate::{AuthGate, GateDecision};
pub use navigation::{HistoryNavigator, Navigator};
pub use store::{AuthStore, InMemoryAuthStore};
