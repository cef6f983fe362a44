pub mod keys;
pub mod terminal;
pub mod view;

pub use terminal::pick;
pub use view::{PickerView, Theme, render};
