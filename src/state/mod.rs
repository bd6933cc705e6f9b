//! Dashboard state types.

mod reading;
mod toast;

pub use reading::{format_age, Reading};
pub use toast::{Toast, ToastType};
